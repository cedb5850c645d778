//! Shader objects and programs
//!
//! Shaders are native Rust code. A shader body reads the program's uniforms and
//! its per-vertex (or per-fragment) inputs and writes up to [`MAX_VARYINGS`]
//! four-component outputs.

use std::fmt;

use super::{GlError, Handle, PipelineState, ShaderKind, MAX_UNIFORMS, MAX_VARYINGS};
use crate::rasterizer::Vec4;

/// Fixed-size block of shader inputs or outputs
pub type Varyings = [Vec4; MAX_VARYINGS];

/// A programmable stage body
pub trait Shader {
    fn invoke(&self, uniforms: &[Vec4], inputs: &Varyings, outputs: &mut Varyings, state: &PipelineState);
}

/// Adapter turning a closure into a [`Shader`]
pub struct FnShader<F>(F);

/// Wrap a closure as a shader body
pub fn shader_fn<F>(f: F) -> FnShader<F>
where
    F: Fn(&[Vec4], &Varyings, &mut Varyings, &PipelineState),
{
    FnShader(f)
}

impl<F> Shader for FnShader<F>
where
    F: Fn(&[Vec4], &Varyings, &mut Varyings, &PipelineState),
{
    fn invoke(&self, uniforms: &[Vec4], inputs: &Varyings, outputs: &mut Varyings, state: &PipelineState) {
        (self.0)(uniforms, inputs, outputs, state)
    }
}

/// Vertex shader copying attribute 0 to the position output
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Shader for PassThrough {
    fn invoke(&self, _uniforms: &[Vec4], inputs: &Varyings, outputs: &mut Varyings, _state: &PipelineState) {
        outputs[0] = inputs[0];
    }
}

/// Fragment shader writing one constant color
#[derive(Debug, Clone, Copy)]
pub struct SolidColor(pub Vec4);

impl Shader for SolidColor {
    fn invoke(&self, _uniforms: &[Vec4], _inputs: &Varyings, outputs: &mut Varyings, _state: &PipelineState) {
        outputs[0] = self.0;
    }
}

/// A shader slot in the shader table: stage kind plus an optional body
pub struct ShaderObject {
    pub kind: ShaderKind,
    body: Option<Box<dyn Shader>>,
}

impl ShaderObject {
    pub fn new(kind: ShaderKind) -> Self {
        Self { kind, body: None }
    }

    pub fn set_body(&mut self, body: Box<dyn Shader>) {
        self.body = Some(body);
    }

    pub fn body(&self) -> Option<&dyn Shader> {
        self.body.as_deref()
    }
}

impl fmt::Debug for ShaderObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderObject")
            .field("kind", &self.kind)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// At most one shader per stage, plus the program's uniform slots
#[derive(Debug, Clone)]
pub struct Program {
    pub vertex: Option<Handle>,
    pub fragment: Option<Handle>,
    pub uniforms: [Vec4; MAX_UNIFORMS],
}

impl Default for Program {
    fn default() -> Self {
        Self {
            vertex: None,
            fragment: None,
            uniforms: [Vec4::ZERO; MAX_UNIFORMS],
        }
    }
}

impl Program {
    /// Store `shader` in the slot for `kind`, replacing any earlier one
    pub fn attach(&mut self, kind: ShaderKind, shader: Handle) {
        match kind {
            ShaderKind::Vertex => self.vertex = Some(shader),
            ShaderKind::Fragment => self.fragment = Some(shader),
        }
    }

    /// Linking only checks that both stages are present
    pub fn link(&self) -> Result<(), GlError> {
        if self.vertex.is_none() || self.fragment.is_none() {
            return Err(GlError::InvalidOperation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_requires_both_stages() {
        let mut program = Program::default();
        assert_eq!(program.link(), Err(GlError::InvalidOperation));
        program.attach(ShaderKind::Vertex, Handle(1));
        assert_eq!(program.link(), Err(GlError::InvalidOperation));
        program.attach(ShaderKind::Fragment, Handle(2));
        assert_eq!(program.link(), Ok(()));
    }

    #[test]
    fn test_fragment_only_fails() {
        let mut program = Program::default();
        program.attach(ShaderKind::Fragment, Handle(2));
        assert_eq!(program.link(), Err(GlError::InvalidOperation));
    }

    #[test]
    fn test_attach_replaces_same_stage() {
        let mut program = Program::default();
        program.attach(ShaderKind::Vertex, Handle(1));
        program.attach(ShaderKind::Vertex, Handle(3));
        assert_eq!(program.vertex, Some(Handle(3)));
        assert_eq!(program.fragment, None);
    }
}
