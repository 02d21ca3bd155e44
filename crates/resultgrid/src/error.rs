//! Error types for table and CSV rendering.
//!
//! Every render call fails with a [`RenderError`]. The variants separate
//! failures of the rendering machinery (sink I/O, malformed field bytes,
//! buffer growth) from failures reported by the result source itself, so a
//! caller can tell "the output broke" apart from "the data was bad".

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while rendering results.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to or flushing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field contained a byte sequence that is not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte {offset}")]
    Decode { offset: usize },

    /// Growing a staging buffer failed.
    #[error("failed to allocate {requested} bytes for field staging")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// The result source reported a failure.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The requested table width is outside the supported range.
    #[error("render width {width} out of range (expected 1 < width < {max})")]
    InvalidWidth { width: usize, max: usize },
}

impl RenderError {
    /// Returns true when the error came from the result source rather than
    /// from rendering.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, RenderError::Source(_))
    }
}

/// Failure state reported by a [`ResultSource`](crate::ResultSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("result source failed: {message}")]
pub struct SourceError {
    code: Option<i32>,
    message: String,
}

impl SourceError {
    /// Creates a source error with a message and no code.
    pub fn new(message: impl Into<String>) -> Self {
        SourceError {
            code: None,
            message: message.into(),
        }
    }

    /// Creates a source error carrying the source's numeric error code.
    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        SourceError {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
