//! Java source parser.
//!
//! Takes the token stream produced by an external Java lexer and builds a
//! typed, arena-allocated AST:
//!
//! - [`parse`] parses a compilation unit, recovering from errors, and never
//!   panics; a fault inside the parser is reported as [`Error::Internal`]
//! - [`Parser`] exposes the strict and lenient entry points and the
//!   single-expression, statement and type entry points
//! - [`tokens_from_json`] (feature `serde`) loads lexer output serialized as
//!   JSON
//! - [`TracingTrace`] (feature `trace`) forwards parser events to `tracing`
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use javaparse::{Token, TokenKind};
//!
//! let tokens = vec![
//!     Token::new(TokenKind::Keyword, "enum", 1, 1),
//!     Token::new(TokenKind::Identifier, "Color", 1, 6),
//!     Token::new(TokenKind::Separator, "{", 1, 12),
//!     Token::new(TokenKind::Identifier, "RED", 1, 14),
//!     Token::new(TokenKind::Separator, ",", 1, 17),
//!     Token::new(TokenKind::Identifier, "GREEN", 1, 19),
//!     Token::new(TokenKind::Separator, "}", 1, 25),
//! ];
//!
//! let arena = Bump::new();
//! let parsed = javaparse::parse(&tokens, &arena).unwrap();
//! assert!(!parsed.has_errors());
//! assert_eq!(parsed.program.classes[0].fields().len(), 2);
//! ```

use std::panic::{self, AssertUnwindSafe};

use bumpalo::Bump;
use thiserror::Error;

#[cfg(feature = "trace")]
mod trace;

pub use javaparse_core::{ParseError, ParseErrorKind, ParseErrors, Position};
pub use javaparse_parser::ast::{self, visitor};
pub use javaparse_parser::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERRORS};
pub use javaparse_parser::tokens::{Token, TokenKind, UnknownTokenKind};
pub use javaparse_parser::{NoopTrace, ParseTrace, Parsed, Parser, ParserConfig};

#[cfg(feature = "trace")]
pub use trace::TracingTrace;

/// Everything that can go wrong between receiving lexer output and handing
/// back a tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The parse stopped at an error it could not recover from.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The parse completed, but errors were recovered from along the way.
    #[error(transparent)]
    Recovered(#[from] ParseErrors),

    /// The token input was not valid JSON lexer output.
    #[cfg(feature = "serde")]
    #[error("invalid token input: {0}")]
    Json(#[from] serde_json::Error),

    /// The parser itself failed; the input is not to blame.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the input is at fault, as opposed to the parser.
    ///
    /// Callers serving requests map client errors to a 4xx response and
    /// the rest to a 5xx.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Parse(err) => err.is_client_error(),
            Error::Recovered(errors) => errors.iter().all(ParseError::is_client_error),
            #[cfg(feature = "serde")]
            Error::Json(_) => true,
            Error::Internal(_) => false,
        }
    }

    /// Diagnostics carried by this error, in encounter order.
    pub fn parse_errors(&self) -> Vec<&ParseError> {
        match self {
            Error::Parse(err) => vec![err],
            Error::Recovered(errors) => errors.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Parse a compilation unit with the default configuration.
///
/// Recovered errors are returned alongside the tree in [`Parsed`]; only
/// terminal failures are `Err`. Use [`Parsed::into_result`] for strict
/// behaviour.
pub fn parse<'ast>(tokens: &[Token], arena: &'ast Bump) -> Result<Parsed<'ast>, Error> {
    parse_with(tokens, arena, ParserConfig::default())
}

/// Parse a compilation unit with `config`.
///
/// With the `trace` feature, parser events are forwarded to `tracing`.
pub fn parse_with<'ast>(
    tokens: &[Token],
    arena: &'ast Bump,
    config: ParserConfig,
) -> Result<Parsed<'ast>, Error> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let parser = Parser::new(tokens, arena).with_config(config);
        #[cfg(feature = "trace")]
        let parser = parser.with_trace(Box::new(TracingTrace));
        parser.into_parsed()
    }));

    match outcome {
        Ok(Ok(parsed)) => Ok(parsed),
        Ok(Err(ParseError::Internal { message })) => Err(Error::Internal(message)),
        Ok(Err(err)) => Err(Error::Parse(err)),
        Err(payload) => Err(Error::Internal(panic_message(payload.as_ref()))),
    }
}

/// Deserialize lexer output: a JSON array of
/// `{"type", "lexeme", "line", "column"}` objects.
///
/// `kind` and `text` are accepted in place of `type` and `lexeme`.
#[cfg(feature = "serde")]
pub fn tokens_from_json(json: &str) -> Result<Vec<Token>, Error> {
    Ok(serde_json::from_str(json)?)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str, column: u32) -> Token {
        Token::new(kind, text, 1, column)
    }

    #[test]
    fn parse_returns_recovered_errors_with_tree() {
        let tokens = vec![
            token(TokenKind::Keyword, "class", 1),
            token(TokenKind::Identifier, "A", 7),
            token(TokenKind::Separator, "{", 9),
            token(TokenKind::IntLiteral, "42", 11),
            token(TokenKind::Separator, ";", 13),
            token(TokenKind::Separator, "}", 15),
        ];
        let arena = Bump::new();
        let parsed = parse(&tokens, &arena).unwrap();
        assert_eq!(parsed.program.classes.len(), 1);
        assert_eq!(parsed.errors.len(), 1);

        let err = Error::from(parsed.errors);
        assert!(err.is_client_error());
        assert_eq!(err.parse_errors().len(), 1);
    }

    #[test]
    fn depth_exceeded_is_terminal_client_error() {
        let mut tokens = vec![
            token(TokenKind::Keyword, "class", 1),
            token(TokenKind::Identifier, "A", 7),
            token(TokenKind::Separator, "{", 9),
            token(TokenKind::Keyword, "void", 11),
            token(TokenKind::Identifier, "f", 16),
            token(TokenKind::Separator, "(", 17),
            token(TokenKind::Separator, ")", 18),
        ];
        let mut column = 20;
        for brace in ["{", "}"] {
            for _ in 0..20 {
                tokens.push(token(TokenKind::Separator, brace, column));
                column += 1;
            }
        }
        tokens.push(token(TokenKind::Separator, "}", column));

        let arena = Bump::new();
        let err = parse_with(&tokens, &arena, ParserConfig::default().with_max_depth(8)).unwrap_err();
        match &err {
            Error::Parse(inner) => assert_eq!(inner.kind(), ParseErrorKind::DepthExceeded),
            other => panic!("expected terminal parse error, got {other:?}"),
        }
        assert!(err.is_client_error());

        assert!(parse(&tokens, &arena).is_ok());
    }

    #[test]
    fn internal_errors_are_not_client_errors() {
        assert!(!Error::Internal("boom".into()).is_client_error());
        assert!(!Error::Parse(ParseError::internal("boom")).is_client_error());
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload = panic::catch_unwind(|| panic!("cursor overrun")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "cursor overrun");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tokens_from_json_accepts_lexer_output() {
        let json = r#"[
            {"type": "KEYWORD", "lexeme": "class", "line": 1, "column": 1},
            {"type": "IDENTIFIER", "lexeme": "A", "line": 1, "column": 7},
            {"type": "SEPARATOR", "lexeme": "{", "line": 1, "column": 9},
            {"type": "SEPARATOR", "lexeme": "}", "line": 1, "column": 10},
            {"type": "EOF", "lexeme": "", "line": 1, "column": 11}
        ]"#;
        let tokens = tokens_from_json(json).unwrap();
        assert_eq!(tokens.len(), 5);

        let arena = Bump::new();
        let parsed = parse(&tokens, &arena).unwrap();
        assert_eq!(parsed.program.classes[0].name.name, "A");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tokens_from_json_rejects_unknown_kinds() {
        let err = tokens_from_json(r#"[{"type": "WIDGET", "lexeme": "x", "line": 1, "column": 1}]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_client_error());
    }
}
