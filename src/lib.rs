//! cpu-gl: a GL-style rendering pipeline that runs entirely on the CPU
//!
//! Buffers, vertex arrays, shaders and programs live in a [`gl::Context`].
//! Draw calls pull vertices through the vertex stage, rasterize triangles into
//! the active window's back target, and `swap_buffers` hands finished frames to
//! a [`export::FrameSink`].

pub mod config;
pub mod export;
pub mod gl;
pub mod rasterizer;
pub mod window;
