//! Vector math for the vertex and pixel stages

use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};
use serde::{Serialize, Deserialize};

/// Four-component float vector (positions, colors, shader varyings)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// Value of an attribute before any component is fetched
    pub const ATTRIB_DEFAULT: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v, w: v }
    }

    pub fn scale(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    /// Divide xyz by w and keep 1/w in the fourth component
    pub fn perspective_divide(self) -> Vec4 {
        Vec4 {
            x: self.x / self.w,
            y: self.y / self.w,
            z: self.z / self.w,
            w: 1.0 / self.w,
        }
    }

    /// Weighted sum of three vectors (barycentric interpolation)
    pub fn blend(a: Vec4, b: Vec4, c: Vec4, w0: f32, w1: f32, w2: f32) -> Vec4 {
        a * w0 + b * w1 + c * w2
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 component {} out of range", i),
        }
    }
}

impl IndexMut<usize> for Vec4 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vec4 component {} out of range", i),
        }
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl Add<f32> for Vec4 {
    type Output = Vec4;
    fn add(self, s: f32) -> Vec4 {
        self + Vec4::splat(s)
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        self.scale(s)
    }
}

/// Component-wise product
impl Mul for Vec4 {
    type Output = Vec4;
    fn mul(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
            w: self.w * other.w,
        }
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    fn div(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x / s,
            y: self.y / s,
            z: self.z / s,
            w: self.w / s,
        }
    }
}

/// Signed area term of `c` relative to the directed edge `a -> b` (xy only).
///
/// Positive for a triangle `(a, b, c)` wound the front-facing way.
pub fn edge_function(a: Vec4, b: Vec4, c: Vec4) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Tie-break for points lying exactly on the edge `a -> b`.
///
/// Edges on the max-x / max-y side of a front-facing triangle own their
/// pixels. Those are the sides the half-open bounding box keeps; a pixel
/// center on the box minimum is never visited. Exactly one of `a -> b` and
/// `b -> a` owns, so an edge shared by two triangles claims its pixels once.
pub fn owns_edge_pixels(a: Vec4, b: Vec4) -> bool {
    let d = b - a;
    d.y < 0.0 || (d.y == 0.0 && d.x > 0.0)
}

/// Edge test with the ownership tie-break applied to exact zeros
pub fn edge_covers(a: Vec4, b: Vec4, value: f32) -> bool {
    value > 0.0 || (value == 0.0 && owns_edge_pixels(a, b))
}

/// Map NDC xy in [-1, 1] to pixel coordinates of a `width` x `height` target
pub fn ndc_to_screen(ndc: Vec4, width: usize, height: usize) -> Vec4 {
    let size = Vec4::new(width as f32, height as f32, 1.0, 1.0);
    let mut screen = ((ndc + 1.0) / 2.0) * size;
    // z and 1/w pass through untouched
    screen.z = ndc.z;
    screen.w = ndc.w;
    screen
}
