//! Typed forms of the enum values the state machine understands

use super::*;

/// Declares a closed enum decoded from raw `GLenum` values.
/// Anything outside the listed set decodes to `GlError::InvalidEnum`.
macro_rules! gl_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn to_gl(self) -> GLenum {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl TryFrom<GLenum> for $name {
            type Error = GlError;

            fn try_from(value: GLenum) -> Result<Self, GlError> {
                match value {
                    $(v if v == $value => Ok($name::$variant),)+
                    _ => Err(GlError::InvalidEnum),
                }
            }
        }
    };
}

gl_enum! {
    /// Server-side capabilities toggled by `enable`/`disable`
    Capability { DepthTest = GL_DEPTH_TEST }
}

gl_enum! {
    DepthFunc { Less = GL_LESS }
}

gl_enum! {
    BufferTarget { Array = GL_ARRAY_BUFFER }
}

gl_enum! {
    /// Usage hint for `buffer_data` (validated, otherwise ignored)
    BufferUsage {
        StreamDraw = GL_STREAM_DRAW,
        StaticDraw = GL_STATIC_DRAW,
        DynamicDraw = GL_DYNAMIC_DRAW,
    }
}

gl_enum! {
    PrimitiveMode { Triangles = GL_TRIANGLES }
}

gl_enum! {
    ShaderKind {
        Vertex = GL_VERTEX_SHADER,
        Fragment = GL_FRAGMENT_SHADER,
    }
}

gl_enum! {
    /// Queries accepted by `get_string`
    StringName {
        Renderer = GL_RENDERER,
        Version = GL_VERSION,
    }
}

gl_enum! {
    /// Component type of a vertex attribute
    AttribType { Float = GL_FLOAT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        assert_eq!(ShaderKind::try_from(GL_VERTEX_SHADER), Ok(ShaderKind::Vertex));
        assert_eq!(ShaderKind::try_from(GL_FRAGMENT_SHADER), Ok(ShaderKind::Fragment));
        assert_eq!(BufferUsage::try_from(GL_STATIC_DRAW), Ok(BufferUsage::StaticDraw));
        assert_eq!(Capability::DepthTest.to_gl(), GL_DEPTH_TEST);
    }

    #[test]
    fn test_decode_unknown_values() {
        assert_eq!(Capability::try_from(GL_LESS), Err(GlError::InvalidEnum));
        assert_eq!(BufferTarget::try_from(0), Err(GlError::InvalidEnum));
        assert_eq!(PrimitiveMode::try_from(GL_FLOAT), Err(GlError::InvalidEnum));
        assert_eq!(StringName::try_from(GL_RGBA8), Err(GlError::InvalidEnum));
    }
}
