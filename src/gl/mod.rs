//! GL-style API state machine
//!
//! Entry points live on [`Context`]. Enum-valued parameters are raw [`GLenum`]
//! values decoded at the boundary; unknown values raise `GL_INVALID_ENUM`.

mod context;
mod enums;
mod error;
mod resources;
mod shader;
mod state;
mod vertex;

pub use context::*;
pub use enums::*;
pub use error::*;
pub use resources::*;
pub use shader::*;
pub use state::*;
pub use vertex::*;

pub type GLenum = u32;
pub type GLbitfield = u32;

pub const GL_NO_ERROR: GLenum = 0;
pub const GL_FALSE: bool = false;
pub const GL_TRUE: bool = true;

pub const GL_INVALID_ENUM: GLenum = 0x0500;
pub const GL_INVALID_VALUE: GLenum = 0x0501;
pub const GL_INVALID_OPERATION: GLenum = 0x0502;

pub const GL_TRIANGLES: GLenum = 0x0004;
pub const GL_LESS: GLenum = 0x0201;
pub const GL_DEPTH_TEST: GLenum = 0x0B71;
pub const GL_FLOAT: GLenum = 0x1406;
pub const GL_RENDERER: GLenum = 0x1F01;
pub const GL_VERSION: GLenum = 0x1F02;
pub const GL_RGBA8: GLenum = 0x8058;
pub const GL_ARRAY_BUFFER: GLenum = 0x8892;
pub const GL_STREAM_DRAW: GLenum = 0x88E0;
pub const GL_STATIC_DRAW: GLenum = 0x88E4;
pub const GL_DYNAMIC_DRAW: GLenum = 0x88E8;
pub const GL_FRAGMENT_SHADER: GLenum = 0x8B30;
pub const GL_VERTEX_SHADER: GLenum = 0x8B31;

pub const GL_DEPTH_BUFFER_BIT: GLbitfield = 0x0000_0100;
pub const GL_COLOR_BUFFER_BIT: GLbitfield = 0x0000_4000;

/// Number of attribute slots, shader outputs and uniform slots
pub const MAX_VARYINGS: usize = 16;
pub const MAX_VERTEX_ATTRIBS: usize = MAX_VARYINGS;
pub const MAX_UNIFORMS: usize = MAX_VARYINGS;

pub const RENDERER_NAME: &str = "cpu-gl software rasterizer";
pub const VERSION_STRING: &str = "0.1";
