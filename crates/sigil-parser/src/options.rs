//! Parser configuration.

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require call arguments to end with a closing quote as well as start
    /// with one. Off by default, in which case a missing closing quote is
    /// accepted and the argument text runs to the end of the token.
    pub strict_arguments: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict_arguments: true,
        }
    }
}
