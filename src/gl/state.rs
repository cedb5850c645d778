//! Pipeline state: bindings, fixed-function settings and resource tables

use super::{
    Buffer, DepthFunc, ErrorSlot, GlError, Handle, Program, ResourceTable, Shader, ShaderObject,
    VertexArray,
};
use crate::rasterizer::Vec4;

/// Everything a draw reads, and the only state a shader can observe
#[derive(Debug)]
pub struct PipelineState {
    pub(crate) error: ErrorSlot,
    pub(crate) depth_test: bool,
    pub(crate) depth_func: DepthFunc,
    /// Packed 0xAARRGGBB
    pub(crate) clear_color: u32,
    pub(crate) array_buffer: Handle,
    pub(crate) vertex_array: Handle,
    pub(crate) program: Handle,
    pub(crate) buffers: ResourceTable<Buffer>,
    pub(crate) vertex_arrays: ResourceTable<VertexArray>,
    pub(crate) shaders: ResourceTable<ShaderObject>,
    pub(crate) programs: ResourceTable<Program>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            error: ErrorSlot::default(),
            depth_test: false,
            depth_func: DepthFunc::Less,
            clear_color: 0,
            array_buffer: Handle::NULL,
            vertex_array: Handle::NULL,
            program: Handle::NULL,
            buffers: ResourceTable::new(),
            vertex_arrays: ResourceTable::new(),
            shaders: ResourceTable::new(),
            programs: ResourceTable::new(),
        }
    }

    /// Error waiting to be read, without clearing it
    pub fn pending_error(&self) -> Option<GlError> {
        self.error.peek()
    }

    pub fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    pub fn depth_func(&self) -> DepthFunc {
        self.depth_func
    }

    pub fn clear_color(&self) -> u32 {
        self.clear_color
    }

    pub fn array_buffer_binding(&self) -> Handle {
        self.array_buffer
    }

    pub fn vertex_array_binding(&self) -> Handle {
        self.vertex_array
    }

    pub fn program_binding(&self) -> Handle {
        self.program
    }

    pub fn buffer(&self, handle: Handle) -> Option<&Buffer> {
        self.buffers.get(handle)
    }

    pub fn vertex_array(&self, handle: Handle) -> Option<&VertexArray> {
        self.vertex_arrays.get(handle)
    }

    pub fn shader(&self, handle: Handle) -> Option<&ShaderObject> {
        self.shaders.get(handle)
    }

    pub fn program(&self, handle: Handle) -> Option<&Program> {
        self.programs.get(handle)
    }

    // Bindings are trusted once set. A dangling one is a caller bug, not an
    // API error, so the accessors below panic.

    pub(crate) fn bound_array_buffer(&self, op: &str) -> &Buffer {
        self.buffers
            .get(self.array_buffer)
            .unwrap_or_else(|| panic!("{}: array buffer {} is not a live buffer", op, self.array_buffer))
    }

    pub(crate) fn bound_array_buffer_mut(&mut self, op: &str) -> &mut Buffer {
        let handle = self.array_buffer;
        self.buffers
            .get_mut(handle)
            .unwrap_or_else(|| panic!("{}: array buffer {} is not a live buffer", op, handle))
    }

    pub(crate) fn bound_vertex_array(&self, op: &str) -> &VertexArray {
        self.vertex_arrays
            .get(self.vertex_array)
            .unwrap_or_else(|| panic!("{}: vertex array {} is not a live vertex array", op, self.vertex_array))
    }

    pub(crate) fn bound_vertex_array_mut(&mut self, op: &str) -> &mut VertexArray {
        let handle = self.vertex_array;
        self.vertex_arrays
            .get_mut(handle)
            .unwrap_or_else(|| panic!("{}: vertex array {} is not a live vertex array", op, handle))
    }

    pub(crate) fn bound_program(&self, op: &str) -> &Program {
        self.programs
            .get(self.program)
            .unwrap_or_else(|| panic!("{}: no program in use (binding {})", op, self.program))
    }

    pub(crate) fn bound_program_mut(&mut self, op: &str) -> &mut Program {
        let handle = self.program;
        self.programs
            .get_mut(handle)
            .unwrap_or_else(|| panic!("{}: no program in use (binding {})", op, handle))
    }

    /// Body of the program's vertex shader. Panics if it has none.
    pub(crate) fn vertex_shader(&self, program: &Program) -> &dyn Shader {
        program
            .vertex
            .and_then(|h| self.shaders.get(h))
            .and_then(ShaderObject::body)
            .unwrap_or_else(|| panic!("program {} has no vertex shader body", self.program))
    }

    /// Fragment shader body and uniforms of the current program, if it has one
    pub(crate) fn fragment_stage(&self) -> Option<(&dyn Shader, &[Vec4])> {
        let program = self.programs.get(self.program)?;
        let body = program
            .fragment
            .and_then(|h| self.shaders.get(h))
            .and_then(ShaderObject::body)?;
        Some((body, &program.uniforms[..]))
    }
}
