//! Token cursor with lookahead and backtracking.
//!
//! The cursor owns an arena-backed copy of the token stream and a single
//! index into it. Speculative parsing saves the index with [`TokenCursor::mark`]
//! and rewinds with [`TokenCursor::reset`]; nothing else needs unwinding.

use bumpalo::Bump;
use javaparse_core::{ParseError, Position};

use super::{Token, TokenKind};

/// A token inside the cursor, with its text allocated in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'ast> {
    pub kind: TokenKind,
    pub text: &'ast str,
    pub position: Position,
    /// Set on the leading pieces of a split `>>`/`>>>` token: the following
    /// `>` was part of the same source token.
    pub joined: bool,
}

impl<'ast> Lexeme<'ast> {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_punct(&self, symbol: &str) -> bool {
        self.kind.is_punctuation() && self.text == symbol
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Description of this token for "found ..." diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            kind if kind.is_punctuation() => format!("'{}'", self.text),
            kind => format!("{} '{}'", kind.describe(), self.text),
        }
    }
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(usize);

/// Position-aware reader over the token sequence.
pub struct TokenCursor<'ast> {
    /// Tokens with a trailing EOF; never empty.
    tokens: Vec<Lexeme<'ast>>,
    position: usize,
}

impl<'ast> TokenCursor<'ast> {
    /// Copy `tokens` into the arena.
    ///
    /// Anything after an explicit EOF token is ignored, and an EOF marker is
    /// appended when the lexer did not supply one. `>>` and `>>>` are split
    /// into single `>` tokens so generic argument lists can close them.
    pub fn new(tokens: &[Token], arena: &'ast Bump) -> Self {
        let mut buffer = Vec::with_capacity(tokens.len() + 1);

        for token in tokens {
            if token.kind == TokenKind::Eof {
                break;
            }
            let position = Position::new(token.line, token.column);
            let is_shift = token.kind.is_punctuation() && (token.text == ">>" || token.text == ">>>");
            if is_shift {
                let pieces = token.text.len() as u32;
                for i in 0..pieces {
                    buffer.push(Lexeme {
                        kind: TokenKind::Operator,
                        text: ">",
                        position: position.offset(i),
                        joined: i + 1 < pieces,
                    });
                }
                continue;
            }
            buffer.push(Lexeme {
                kind: token.kind,
                text: arena.alloc_str(&token.text),
                position,
                joined: false,
            });
        }

        let eof_position = match buffer.last() {
            Some(last) => last.position.offset(last.text.chars().count() as u32),
            None => Position::default(),
        };
        buffer.push(Lexeme {
            kind: TokenKind::Eof,
            text: "",
            position: eof_position,
            joined: false,
        });

        Self {
            tokens: buffer,
            position: 0,
        }
    }

    /// The token at the cursor, or the EOF marker.
    #[inline]
    pub fn current(&self) -> Lexeme<'ast> {
        self.peek_nth(0)
    }

    /// The token `n` places ahead of the cursor, clamped to EOF.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Lexeme<'ast> {
        let last = self.tokens.len() - 1;
        self.tokens[(self.position + n).min(last)]
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<Lexeme<'ast>> {
        self.position.checked_sub(1).map(|i| self.tokens[i])
    }

    /// Consume the current token and return it. Never moves past EOF.
    pub fn advance(&mut self) -> Lexeme<'ast> {
        let token = self.current();
        if !token.is_eof() {
            self.position += 1;
        }
        token
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current().is_eof()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.current().position
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        Mark(self.position)
    }

    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        self.position = mark.0;
    }

    /// Whether the current token has `kind` and, when given, `text`.
    ///
    /// Separator and operator kinds are interchangeable.
    pub fn matches(&self, kind: TokenKind, text: Option<&str>) -> bool {
        let token = self.current();
        let kind_ok = token.kind == kind || (kind.is_punctuation() && token.kind.is_punctuation());
        kind_ok && text.is_none_or(|t| token.text == t)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.matches(kind, None)
    }

    #[inline]
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.current().is_keyword(keyword)
    }

    #[inline]
    pub fn check_punct(&self, symbol: &str) -> bool {
        self.current().is_punct(symbol)
    }

    #[inline]
    pub fn check_identifier(&self) -> bool {
        self.current().is_identifier()
    }

    pub fn eat_keyword(&mut self, keyword: &str) -> Option<Lexeme<'ast>> {
        self.check_keyword(keyword).then(|| self.advance())
    }

    pub fn eat_punct(&mut self, symbol: &str) -> Option<Lexeme<'ast>> {
        self.check_punct(symbol).then(|| self.advance())
    }

    /// Consume the current token if it matches, otherwise fail with an
    /// `UnexpectedToken` error at the current token.
    pub fn expect(&mut self, kind: TokenKind, text: Option<&str>) -> Result<Lexeme<'ast>, ParseError> {
        if self.matches(kind, text) {
            return Ok(self.advance());
        }
        let expected = match text {
            Some(t) if kind.is_punctuation() => format!("'{t}'"),
            Some(t) => format!("{} '{t}'", kind.describe()),
            None => kind.describe().to_string(),
        };
        Err(self.unexpected(expected))
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<Lexeme<'ast>, ParseError> {
        self.expect(TokenKind::Keyword, Some(keyword))
    }

    pub fn expect_punct(&mut self, symbol: &str) -> Result<Lexeme<'ast>, ParseError> {
        self.expect(TokenKind::Separator, Some(symbol))
    }

    pub fn expect_identifier(&mut self) -> Result<Lexeme<'ast>, ParseError> {
        self.expect(TokenKind::Identifier, None)
    }

    /// Build an `UnexpectedToken` error for the current token.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        ParseError::unexpected_token(expected, token.describe(), token.position)
    }
}
