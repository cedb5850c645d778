//! Core types for the rasterizer

use super::math::Vec4;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize float channels: clamp to 0.0-1.0, scale by 255, truncate
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Self { r: q(r), g: q(g), b: q(b), a: q(a) }
    }

    /// Convert a shader output (x=r, y=g, z=b, w=a)
    pub fn from_vec4(v: Vec4) -> Self {
        Self::from_f32(v.x, v.y, v.z, v.w)
    }

    /// Pack as 0xAARRGGBB (render target layout)
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub fn from_argb(v: u32) -> Self {
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    /// Convert to [u8; 4] in RGBA order
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Texel layout of a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8 bits per channel, packed 0xAARRGGBB
    Rgba8,
    /// 32-bit depth value
    Depth32,
}

/// Fixed-size pixel buffer (color or depth), row-major, 4 bytes per texel
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub pixels: Vec<u32>,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; width * height],
        }
    }

    /// Write `value` verbatim to every texel
    pub fn clear(&mut self, value: u32) {
        self.pixels.fill(value);
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[self.index_of(x, y)]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: u32) {
        let idx = self.index_of(x, y);
        self.pixels[idx] = value;
    }

    /// Pixels as RGBA bytes, rows ordered from the last row to row 0
    pub fn to_rgba_bytes_flipped(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for row in self.pixels.chunks_exact(self.width.max(1)).rev() {
            for &px in row {
                out.extend_from_slice(&Color::from_argb(px).to_bytes());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_packing() {
        let c = Color::with_alpha(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_argb(), 0x4411_2233);
        assert_eq!(Color::from_argb(0x4411_2233), c);
    }

    #[test]
    fn test_color_from_f32_truncates_and_clamps() {
        let c = Color::from_f32(0.7, 0.6, 0.8, 1.0);
        assert_eq!(c, Color::with_alpha(178, 153, 204, 255));
        assert_eq!(Color::from_f32(-1.0, 2.0, 0.0, 1.0), Color::with_alpha(0, 255, 0, 255));
    }

    #[test]
    fn test_clear_writes_every_texel() {
        let mut rt = RenderTarget::new(3, 2, PixelFormat::Rgba8);
        rt.set_pixel(1, 1, 7);
        rt.clear(0xFFAA_BBCC);
        assert!(rt.pixels.iter().all(|&p| p == 0xFFAA_BBCC));
    }

    #[test]
    fn test_flipped_bytes_put_last_row_first() {
        let mut rt = RenderTarget::new(1, 2, PixelFormat::Rgba8);
        rt.set_pixel(0, 0, Color::new(1, 2, 3).to_argb());
        rt.set_pixel(0, 1, Color::new(4, 5, 6).to_argb());
        assert_eq!(rt.to_rgba_bytes_flipped(), vec![4, 5, 6, 255, 1, 2, 3, 255]);
    }
}
