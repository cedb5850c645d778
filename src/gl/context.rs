//! The caller-facing API: one explicit context, created at startup and passed
//! to every call
//!
//! Mutating calls never return errors. A rejected argument records a
//! [`GlError`] in the sticky slot (read and cleared by [`Context::get_error`])
//! and leaves all state as it was.

use std::fmt;

use log::{debug, warn};

use super::*;
use crate::export::{ExportError, FrameSink};
use crate::rasterizer::{draw_triangle, Color, Vec4};
use crate::window::{Window, WindowHandle};

/// Value written to the depth target by `clear(GL_DEPTH_BUFFER_BIT)`
pub const DEPTH_CLEAR_VALUE: u32 = 0;

pub struct Context {
    state: PipelineState,
    windows: ResourceTable<Window>,
    active_window: WindowHandle,
    frame_sink: Option<Box<dyn FrameSink>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("active_window", &self.active_window)
            .field("has_frame_sink", &self.frame_sink.is_some())
            .finish()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            state: PipelineState::new(),
            windows: ResourceTable::new(),
            active_window: WindowHandle::NULL,
            frame_sink: None,
        }
    }

    /// Read-only view of the pipeline state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    fn raise(&mut self, op: &str, err: GlError, value: impl fmt::Display) {
        warn!("{}: {} ({})", op, err, value);
        self.state.error.raise(err);
    }

    /// Decode an enum argument, raising `GL_INVALID_ENUM` on failure
    fn decode<T>(&mut self, op: &str, value: GLenum) -> Option<T>
    where
        T: TryFrom<GLenum, Error = GlError>,
    {
        match T::try_from(value) {
            Ok(v) => Some(v),
            Err(err) => {
                self.raise(op, err, format_args!("{:#06x}", value));
                None
            }
        }
    }

    // Windows and presentation

    /// Create a window with front, back and depth targets and make it active
    pub fn create_window(&mut self, width: usize, height: usize, title: &str) -> WindowHandle {
        if width == 0 || height == 0 {
            self.raise("create_window", GlError::InvalidValue, format_args!("{}x{}", width, height));
            return WindowHandle::NULL;
        }
        let handle = WindowHandle(self.windows.insert(Window::new(width, height, title)));
        self.active_window = handle;
        debug!("created {} \"{}\" ({}x{})", handle, title, width, height);
        handle
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(handle.0)
    }

    pub fn active_window(&self) -> WindowHandle {
        self.active_window
    }

    /// Install the collaborator that receives retired frames
    pub fn set_frame_sink(&mut self, sink: Box<dyn FrameSink>) {
        self.frame_sink = Some(sink);
    }

    /// Exchange the window's front and back targets and export the frame just
    /// finished. Only the sink's own failure is reported here.
    pub fn swap_buffers(&mut self, handle: WindowHandle) -> Result<(), ExportError> {
        let window = self
            .windows
            .get_mut(handle.0)
            .unwrap_or_else(|| panic!("swap_buffers: {} does not exist", handle));
        let retired = window.swap();
        match self.frame_sink.as_mut() {
            Some(sink) => sink.write_frame(retired),
            None => Ok(()),
        }
    }

    fn active_window_mut(&mut self, op: &str) -> &mut Window {
        let handle = self.active_window;
        self.windows
            .get_mut(handle.0)
            .unwrap_or_else(|| panic!("{}: no active window", op))
    }

    // Queries and fixed-function state

    pub fn get_string(&mut self, name: GLenum) -> &'static str {
        match self.decode("get_string", name) {
            Some(StringName::Renderer) => RENDERER_NAME,
            Some(StringName::Version) => VERSION_STRING,
            None => "",
        }
    }

    /// Return the pending error code and reset it to `GL_NO_ERROR`
    pub fn get_error(&mut self) -> GLenum {
        self.state.error.take()
    }

    pub fn enable(&mut self, cap: GLenum) {
        if let Some(Capability::DepthTest) = self.decode("enable", cap) {
            self.state.depth_test = true;
        }
    }

    pub fn disable(&mut self, cap: GLenum) {
        if let Some(Capability::DepthTest) = self.decode("disable", cap) {
            self.state.depth_test = false;
        }
    }

    pub fn is_enabled(&mut self, cap: GLenum) -> bool {
        match self.decode("is_enabled", cap) {
            Some(Capability::DepthTest) => self.state.depth_test,
            None => false,
        }
    }

    /// Stored only; the rasterizer performs no depth test
    pub fn depth_func(&mut self, func: GLenum) {
        if let Some(func) = self.decode::<DepthFunc>("depth_func", func) {
            self.state.depth_func = func;
        }
    }

    pub fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.state.clear_color = Color::from_f32(r, g, b, a).to_argb();
    }

    pub fn clear(&mut self, mask: GLbitfield) {
        const KNOWN: GLbitfield = GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT;
        if mask & !KNOWN != 0 {
            self.raise("clear", GlError::InvalidValue, format_args!("{:#x}", mask));
            return;
        }
        let clear_color = self.state.clear_color;
        let window = self.active_window_mut("clear");
        if mask & GL_COLOR_BUFFER_BIT != 0 {
            window.back.clear(clear_color);
        }
        if mask & GL_DEPTH_BUFFER_BIT != 0 {
            window.depth.clear(DEPTH_CLEAR_VALUE);
        }
    }

    // Buffers

    pub fn gen_buffers(&mut self, count: usize) -> Vec<Handle> {
        let handles = self.state.buffers.allocate(count);
        debug!("gen_buffers: {:?}", handles);
        handles
    }

    /// Bind `buffer` to `target`. Handle 0 unbinds.
    pub fn bind_buffer(&mut self, target: GLenum, buffer: Handle) {
        if let Some(BufferTarget::Array) = self.decode("bind_buffer", target) {
            self.state.array_buffer = buffer;
        }
    }

    /// Replace every byte of the buffer bound to `target`
    pub fn buffer_data(&mut self, target: GLenum, data: &[u8], usage: GLenum) {
        let Some(BufferTarget::Array) = self.decode("buffer_data", target) else {
            return;
        };
        if self.decode::<BufferUsage>("buffer_data", usage).is_none() {
            return;
        }
        let buffer = self.state.bound_array_buffer_mut("buffer_data");
        buffer.clear();
        buffer.extend_from_slice(data);
        debug!("buffer_data: {} bytes into buffer {}", data.len(), self.state.array_buffer);
    }

    // Vertex arrays

    pub fn gen_vertex_arrays(&mut self, count: usize) -> Vec<Handle> {
        let handles = self.state.vertex_arrays.allocate(count);
        debug!("gen_vertex_arrays: {:?}", handles);
        handles
    }

    /// Make `vao` current. A non-zero handle must have been generated.
    pub fn bind_vertex_array(&mut self, vao: Handle) {
        assert!(
            vao.is_null() || self.state.vertex_arrays.contains(vao),
            "bind_vertex_array: {} is not a generated vertex array",
            vao
        );
        self.state.vertex_array = vao;
    }

    /// Enable attribute `index` of the current vertex array with a fresh descriptor
    pub fn enable_vertex_attrib_array(&mut self, index: usize) {
        if index >= MAX_VERTEX_ATTRIBS {
            self.raise("enable_vertex_attrib_array", GlError::InvalidValue, index);
            return;
        }
        self.state
            .bound_vertex_array_mut("enable_vertex_attrib_array")
            .enable(index);
    }

    pub fn disable_vertex_attrib_array(&mut self, index: usize) {
        if index >= MAX_VERTEX_ATTRIBS {
            self.raise("disable_vertex_attrib_array", GlError::InvalidValue, index);
            return;
        }
        self.state
            .bound_vertex_array_mut("disable_vertex_attrib_array")
            .disable(index);
    }

    /// Describe where attribute `index` lives in the array buffer. The slot must
    /// already be enabled on the current vertex array.
    pub fn vertex_attrib_pointer(
        &mut self,
        index: usize,
        count: u32,
        kind: GLenum,
        normalized: bool,
        stride: usize,
        offset: usize,
    ) {
        const OP: &str = "vertex_attrib_pointer";
        if index >= MAX_VERTEX_ATTRIBS {
            self.raise(OP, GlError::InvalidValue, format_args!("index {}", index));
            return;
        }
        if !(1..=4).contains(&count) {
            self.raise(OP, GlError::InvalidValue, format_args!("count {}", count));
            return;
        }
        let Some(kind) = self.decode::<AttribType>(OP, kind) else {
            return;
        };

        let attrib = self
            .state
            .bound_vertex_array_mut(OP)
            .attrib_mut(index)
            .unwrap_or_else(|| panic!("{}: attribute {} is not enabled", OP, index));
        *attrib = VertexAttrib::new(count, kind, normalized, stride, offset);
    }

    // Shaders and programs

    /// Returns the new shader, or handle 0 if `kind` is not a shader stage
    pub fn create_shader(&mut self, kind: GLenum) -> Handle {
        let Some(kind) = self.decode::<ShaderKind>("create_shader", kind) else {
            return Handle::NULL;
        };
        let handle = self.state.shaders.insert(ShaderObject::new(kind));
        debug!("create_shader: {:?} shader {}", kind, handle);
        handle
    }

    /// Install the body of `shader`
    pub fn shader_source(&mut self, shader: Handle, body: impl Shader + 'static) {
        self.shader_object_mut("shader_source", shader).set_body(Box::new(body));
    }

    /// Bodies are native code, so there is nothing to compile
    pub fn compile_shader(&mut self, shader: Handle) {
        self.shader_object_mut("compile_shader", shader);
    }

    fn shader_object_mut(&mut self, op: &str, shader: Handle) -> &mut ShaderObject {
        self.state
            .shaders
            .get_mut(shader)
            .unwrap_or_else(|| panic!("{}: {} is not a shader", op, shader))
    }

    pub fn create_program(&mut self) -> Handle {
        let handle = self.state.programs.insert(Program::default());
        debug!("create_program: {}", handle);
        handle
    }

    pub fn attach_shader(&mut self, program: Handle, shader: Handle) {
        let kind = self
            .state
            .shaders
            .get(shader)
            .unwrap_or_else(|| panic!("attach_shader: {} is not a shader", shader))
            .kind;
        self.program_mut("attach_shader", program).attach(kind, shader);
    }

    /// Fails with `GL_INVALID_OPERATION` unless both stages are attached
    pub fn link_program(&mut self, program: Handle) {
        let linked = self
            .state
            .programs
            .get(program)
            .unwrap_or_else(|| panic!("link_program: {} is not a program", program))
            .link();
        if let Err(err) = linked {
            self.raise("link_program", err, format_args!("program {}", program));
        }
    }

    /// Make `program` current. Handle 0 leaves no program in use.
    pub fn use_program(&mut self, program: Handle) {
        assert!(
            program.is_null() || self.state.programs.contains(program),
            "use_program: {} is not a program",
            program
        );
        self.state.program = program;
    }

    fn program_mut(&mut self, op: &str, program: Handle) -> &mut Program {
        self.state
            .programs
            .get_mut(program)
            .unwrap_or_else(|| panic!("{}: {} is not a program", op, program))
    }

    /// Set uniform `location` of the current program. Location -1 is ignored.
    pub fn uniform_4f(&mut self, location: i32, x: f32, y: f32, z: f32, w: f32) {
        const OP: &str = "uniform_4f";
        if location == -1 {
            return;
        }
        if self.state.program.is_null() {
            self.raise(OP, GlError::InvalidOperation, "no program in use");
            return;
        }
        let slot = match usize::try_from(location) {
            Ok(slot) if slot < MAX_UNIFORMS => slot,
            _ => {
                self.raise(OP, GlError::InvalidOperation, format_args!("location {}", location));
                return;
            }
        };
        self.state.bound_program_mut(OP).uniforms[slot] = Vec4::new(x, y, z, w);
    }

    // Drawing

    /// Draw each complete triple of vertex indices in `first..count` into the
    /// active window's back target
    pub fn draw_arrays(&mut self, mode: GLenum, first: u32, count: u32) {
        let Some(PrimitiveMode::Triangles) = self.decode("draw_arrays", mode) else {
            return;
        };

        let handle = self.active_window;
        let window = self
            .windows
            .get_mut(handle.0)
            .unwrap_or_else(|| panic!("draw_arrays: no active window"));

        let mut covered = 0;
        let mut n = first;
        while n < count && count - n >= 3 {
            covered += draw_triangle(&self.state, &mut window.back, n, n + 1, n + 2);
            n += 3;
        }
        debug!("draw_arrays: vertices {}..{} covered {} pixels", first, count, covered);
    }
}
