//! Parser error definitions.

use sigil_ast::{Document, Position};
use sigil_cursor::CursorError;
use thiserror::Error;

/// What went wrong while reading a statement.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// A required delimiter was not found before `got`.
    #[error("expected {}, got {}", describe(.expected), .got)]
    Delimiter { expected: String, got: String },

    /// A call argument is not a quoted string.
    #[error("malformed argument {argument:?}: arguments must be quoted strings")]
    MalformedArgument { argument: String },

    #[error("unexpected character {found:?}, expected {expected}")]
    UnexpectedCharacter { expected: String, found: char },

    /// The input could not be read.
    #[error(transparent)]
    Cursor(CursorError),
}

impl ParseErrorKind {
    pub(crate) fn delimiter(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ParseErrorKind::Delimiter {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Single characters are shown in backticks, named things as-is.
fn describe(expected: &str) -> String {
    if expected.chars().count() == 1 {
        format!("`{}`", expected)
    } else {
        expected.to_string()
    }
}

/// A failed parse.
///
/// Carries the position of the cursor when the failure was detected and
/// every statement completed before it.
#[derive(Debug, Error)]
#[error("{position}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    /// Statements read before the failure
    pub document: Document,
}

impl ParseError {
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The statements that were read successfully before the failure.
    pub fn partial_document(&self) -> &Document {
        &self.document
    }

    pub fn into_partial_document(self) -> Document {
        self.document
    }
}
