//! Source location tracking for diagnostics.

use std::fmt;

/// The line and column where a token or AST node begins.
///
/// Both fields are 1-based, exactly as reported by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position `n` columns to the right on the same line.
    #[inline]
    pub const fn offset(self, n: u32) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(n),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
