//! Vertex array layouts and the vertex stage
//!
//! A vertex is assembled by reading each enabled attribute out of the bound
//! array buffer, run through the vertex shader, and then perspective-divided.

use super::{AttribType, PipelineState, Varyings, MAX_VARYINGS, MAX_VERTEX_ATTRIBS};
use crate::rasterizer::Vec4;

/// Raw bytes of a buffer object
pub type Buffer = Vec<u8>;

/// How one attribute slot is laid out in the array buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    /// Components per vertex (1-4)
    pub count: u32,
    pub kind: AttribType,
    /// Stored but unused: only float attributes exist
    pub normalized: bool,
    /// Bytes between consecutive vertices, already resolved from 0
    pub stride: usize,
    /// Byte offset of the first vertex
    pub offset: usize,
}

impl Default for VertexAttrib {
    fn default() -> Self {
        Self {
            count: 0,
            kind: AttribType::Float,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

impl VertexAttrib {
    pub fn new(count: u32, kind: AttribType, normalized: bool, stride: usize, offset: usize) -> Self {
        let stride = if stride == 0 { count as usize * 4 } else { stride };
        Self { count, kind, normalized, stride, offset }
    }

    /// Read this attribute for vertex `index`. Missing components default to (0, 0, 0, 1).
    pub fn fetch(&self, buffer: &[u8], index: u32) -> Vec4 {
        let mut value = Vec4::ATTRIB_DEFAULT;
        let base = index as usize * self.stride + self.offset;
        for n in 0..self.count as usize {
            let at = base + n * 4;
            let bytes = buffer.get(at..at + 4).unwrap_or_else(|| {
                panic!(
                    "vertex {} reads bytes {}..{} past the end of a {}-byte array buffer",
                    index,
                    at,
                    at + 4,
                    buffer.len()
                )
            });
            value[n] = match self.kind {
                AttribType::Float => bytemuck::pod_read_unaligned::<f32>(bytes),
            };
        }
        value
    }
}

/// Vertex array object: attribute index -> descriptor, `None` when disabled
#[derive(Debug, Clone, Default)]
pub struct VertexArray {
    attribs: Vec<Option<VertexAttrib>>,
}

impl VertexArray {
    /// Install a fresh descriptor at `index`, replacing any previous one
    pub fn enable(&mut self, index: usize) {
        if self.attribs.len() <= index {
            self.attribs.resize(index + 1, None);
        }
        self.attribs[index] = Some(VertexAttrib::default());
    }

    pub fn disable(&mut self, index: usize) {
        if let Some(slot) = self.attribs.get_mut(index) {
            *slot = None;
        }
    }

    pub fn attrib(&self, index: usize) -> Option<&VertexAttrib> {
        self.attribs.get(index).and_then(Option::as_ref)
    }

    pub fn attrib_mut(&mut self, index: usize) -> Option<&mut VertexAttrib> {
        self.attribs.get_mut(index).and_then(Option::as_mut)
    }

    /// Enabled slots with their indices
    pub fn enabled(&self) -> impl Iterator<Item = (usize, &VertexAttrib)> {
        self.attribs
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_ref().map(|a| (i, a)))
    }

    /// Gather every enabled attribute of vertex `index`; disabled slots stay zero
    pub fn fetch(&self, buffer: &[u8], index: u32) -> Varyings {
        let mut inputs = [Vec4::ZERO; MAX_VARYINGS];
        for (slot, attrib) in self.enabled().take_while(|(slot, _)| *slot < MAX_VERTEX_ATTRIBS) {
            inputs[slot] = attrib.fetch(buffer, index);
        }
        inputs
    }
}

/// Run vertex `index` through the current vertex array, array buffer and vertex
/// shader, then divide the position (output 0) by its w.
///
/// Output 0 comes back as (x/w, y/w, z/w, 1/w); other outputs are untouched.
/// Panics if any binding the stage needs is missing.
pub fn process_vertex(state: &PipelineState, index: u32) -> Varyings {
    let layout = state.bound_vertex_array("process_vertex");
    let buffer = state.bound_array_buffer("process_vertex");
    let inputs = layout.fetch(buffer, index);

    let program = state.bound_program("process_vertex");
    let shader = state.vertex_shader(program);

    let mut outputs = [Vec4::ZERO; MAX_VARYINGS];
    shader.invoke(&program.uniforms, &inputs, &mut outputs, state);

    outputs[0] = outputs[0].perspective_divide();
    outputs
}
