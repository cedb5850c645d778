//! CPU triangle rasterizer
//!
//! Features:
//! - Edge-function coverage with a top-left fill rule
//! - Back-face and degenerate triangle rejection
//! - Optional per-pixel fragment shading with linearly interpolated varyings
//! - No clipping, blending or depth test

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;
