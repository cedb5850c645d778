//! Windows: a front/back color pair plus a depth target, all the same size

use std::fmt;

use crate::gl::Handle;
use crate::rasterizer::{PixelFormat, RenderTarget};

/// Opaque reference to a window owned by a [`crate::gl::Context`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub Handle);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(Handle::NULL);

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Window {
    pub title: String,
    /// Last presented frame
    pub front: RenderTarget,
    /// Frame being drawn
    pub back: RenderTarget,
    pub depth: RenderTarget,
}

impl Window {
    pub fn new(width: usize, height: usize, title: &str) -> Self {
        Self {
            title: title.to_string(),
            front: RenderTarget::new(width, height, PixelFormat::Rgba8),
            back: RenderTarget::new(width, height, PixelFormat::Rgba8),
            depth: RenderTarget::new(width, height, PixelFormat::Depth32),
        }
    }

    pub fn width(&self) -> usize {
        self.back.width
    }

    pub fn height(&self) -> usize {
        self.back.height
    }

    /// Exchange front and back. Returns the target just retired from drawing,
    /// which is now the front.
    pub fn swap(&mut self) -> &RenderTarget {
        std::mem::swap(&mut self.front, &mut self.back);
        &self.front
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_size() {
        let win = Window::new(4, 3, "test");
        for target in [&win.front, &win.back, &win.depth] {
            assert_eq!((target.width, target.height), (4, 3));
            assert_eq!(target.pixels.len(), 12);
        }
        assert_eq!(win.depth.format, PixelFormat::Depth32);
    }

    #[test]
    fn test_swap_exchanges_without_copying() {
        let mut win = Window::new(2, 2, "test");
        win.back.clear(0xFF11_2233);
        let back_ptr = win.back.pixels.as_ptr();
        let retired = win.swap();
        assert!(retired.pixels.iter().all(|&p| p == 0xFF11_2233));
        assert_eq!(retired.pixels.as_ptr(), back_ptr);
        assert!(win.back.pixels.iter().all(|&p| p == 0));
    }
}
