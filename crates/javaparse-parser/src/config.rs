//! Parser limits.

/// Nesting limit used by [`ParserConfig::default`].
///
/// Sized so that a parse reaching it fits in a 2 MiB thread stack in an
/// unoptimized build. Each full expression counts as two levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Recovered-error limit used by [`ParserConfig::default`].
pub const DEFAULT_MAX_ERRORS: usize = 100;

/// Tunable limits for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest nesting of expressions, statements, types and class bodies
    /// before the parse fails with `DepthExceeded`. Raise it only for
    /// threads with a larger stack.
    pub max_depth: usize,
    /// Number of errors that may be recovered from. The next error after
    /// that aborts the parse.
    pub max_errors: usize,
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}
