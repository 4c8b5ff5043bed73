//! Error types for the Java parser.
//!
//! ## Error Taxonomy
//!
//! ```text
//! ParseError
//! ├── UnexpectedToken  - current token does not match what a production requires
//! ├── Structural       - production-level rule violated (e.g. `try` with no handler)
//! ├── Unterminated     - end of input before a closing token
//! ├── DepthExceeded    - nesting deeper than the configured limit
//! ├── Syntax           - generic message with a position
//! └── Internal         - a fault in the parser itself, never caused by input
//! ```
//!
//! Every variant except `Internal` is a client error: an HTTP layer can map
//! it straight to a 4xx diagnostic using [`ParseError::line`] and
//! [`ParseError::column`].

use thiserror::Error;

use crate::Position;

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedToken,
    Structural,
    Unterminated,
    DepthExceeded,
    Syntax,
    Internal,
}

impl ParseErrorKind {
    /// Get a short description of this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::Structural => "structural error",
            ParseErrorKind::Unterminated => "unterminated construct",
            ParseErrorKind::DepthExceeded => "nesting too deep",
            ParseErrorKind::Syntax => "syntax error",
            ParseErrorKind::Internal => "internal parser error",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised while turning tokens into an AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The current token is not what the production requires.
    #[error("expected {expected}, found {actual} at {position}")]
    UnexpectedToken {
        expected: String,
        actual: String,
        position: Position,
    },

    /// A production-level invariant does not hold.
    #[error("{message} at {position}")]
    Structural { message: String, position: Position },

    /// End of input was reached before the construct opened at `position` closed.
    #[error("unterminated {construct} starting at {position}")]
    Unterminated {
        construct: &'static str,
        position: Position,
    },

    /// Nesting exceeded the configured maximum depth.
    #[error("nesting exceeds maximum depth of {limit} at {position}")]
    DepthExceeded { limit: usize, position: Position },

    /// Generic syntax error.
    #[error("{message} at {position}")]
    Syntax { message: String, position: Position },

    /// The parser itself misbehaved.
    #[error("internal parser error: {message}")]
    Internal { message: String },
}

impl ParseError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        actual: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            actual: actual.into(),
            position,
        }
    }

    pub fn structural(message: impl Into<String>, position: Position) -> Self {
        Self::Structural {
            message: message.into(),
            position,
        }
    }

    pub fn unterminated(construct: &'static str, position: Position) -> Self {
        Self::Unterminated {
            construct,
            position,
        }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            Self::Structural { .. } => ParseErrorKind::Structural,
            Self::Unterminated { .. } => ParseErrorKind::Unterminated,
            Self::DepthExceeded { .. } => ParseErrorKind::DepthExceeded,
            Self::Syntax { .. } => ParseErrorKind::Syntax,
            Self::Internal { .. } => ParseErrorKind::Internal,
        }
    }

    /// Where the error was detected. Internal faults report the start of input.
    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::Structural { position, .. }
            | Self::Unterminated { position, .. }
            | Self::DepthExceeded { position, .. }
            | Self::Syntax { position, .. } => *position,
            Self::Internal { .. } => Position::default(),
        }
    }

    /// 1-based line of [`ParseError::position`].
    pub fn line(&self) -> u32 {
        self.position().line
    }

    /// 1-based column of [`ParseError::position`].
    pub fn column(&self) -> u32 {
        self.position().column
    }

    /// The diagnostic text without the position suffix.
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, actual, ..
            } => format!("expected {expected}, found {actual}"),
            Self::Structural { message, .. }
            | Self::Syntax { message, .. }
            | Self::Internal { message } => message.clone(),
            Self::Unterminated { construct, .. } => format!("unterminated {construct}"),
            Self::DepthExceeded { limit, .. } => {
                format!("nesting exceeds maximum depth of {limit}")
            }
        }
    }

    /// Whether the error is caused by the input rather than by the parser.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Whether a protected parse attempt may skip past this error and continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::DepthExceeded { .. } | Self::Internal { .. })
    }

    /// Format the error with the offending source line and a caret under
    /// the reported column.
    pub fn display_with_source(&self, source: &str) -> String {
        let position = self.position();
        let mut output = format!(
            "Error at {}: {}\n  {}\n",
            position,
            self.kind(),
            self.message()
        );

        if let Some(line_text) = source.lines().nth(position.line.saturating_sub(1) as usize) {
            let indent = " ".repeat(position.column.saturating_sub(1) as usize);
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", position.line, line_text));
            output.push_str(&format!("  | {indent}^\n"));
        }

        output
    }
}

/// A collection of parse errors, in the order they were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }

    /// `Ok(())` if empty, otherwise the first error.
    pub fn into_result(self) -> Result<(), ParseError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
