//! Recoverable API errors and the sticky error slot

use super::{GLenum, GL_INVALID_ENUM, GL_INVALID_OPERATION, GL_INVALID_VALUE, GL_NO_ERROR};

/// Error raised by an entry point. The call that raises it performs no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GlError {
    #[error("invalid enum")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
}

impl GlError {
    pub fn code(self) -> GLenum {
        match self {
            GlError::InvalidEnum => GL_INVALID_ENUM,
            GlError::InvalidValue => GL_INVALID_VALUE,
            GlError::InvalidOperation => GL_INVALID_OPERATION,
        }
    }

    pub fn from_code(code: GLenum) -> Option<Self> {
        match code {
            GL_INVALID_ENUM => Some(GlError::InvalidEnum),
            GL_INVALID_VALUE => Some(GlError::InvalidValue),
            GL_INVALID_OPERATION => Some(GlError::InvalidOperation),
            _ => None,
        }
    }
}

/// Single pending error. A newer error overwrites an unread older one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorSlot {
    pending: Option<GlError>,
}

impl ErrorSlot {
    pub fn raise(&mut self, err: GlError) {
        self.pending = Some(err);
    }

    /// Return the pending error code and reset to `GL_NO_ERROR`
    pub fn take(&mut self) -> GLenum {
        self.pending.take().map_or(GL_NO_ERROR, GlError::code)
    }

    pub fn peek(&self) -> Option<GlError> {
        self.pending
    }
}
