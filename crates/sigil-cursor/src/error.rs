//! Cursor error definitions.

use thiserror::Error;

/// A cursor error.
#[derive(Debug, Error)]
pub enum CursorError {
    /// The underlying stream is exhausted.
    #[error("end of input")]
    EndOfInput,

    /// The underlying stream failed, or produced bytes that are not UTF-8.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// `pushback` was called with nothing to restore.
    #[error("no character available to push back")]
    PushbackUnavailable,
}

impl CursorError {
    /// Whether this is the end-of-input signal rather than a failure.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, CursorError::EndOfInput)
    }
}
