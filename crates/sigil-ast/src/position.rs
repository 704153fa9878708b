//! Source location tracking for diagnostics.

use std::fmt;

/// A line/column location in the input.
///
/// Lines are 1-based. Columns count characters consumed on the current line
/// and are reset to 0 by every newline, so the first character of a line
/// sits at column 1 once it has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Create a position from a line and column.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position before anything has been read.
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }

    /// The position after consuming `c` from this position.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 0,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
