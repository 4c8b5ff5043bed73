//! Parser infrastructure.
//!
//! Provides the main [`Parser`] struct: the shared token cursor, the depth
//! guard, the speculation helpers used for every lookahead decision, and
//! small utilities the production modules share.

use bumpalo::Bump;
use javaparse_core::{ParseError, ParseErrors, Position};

use crate::ast::recovery::RecoveryState;
use crate::ast::Ident;
use crate::config::ParserConfig;
use crate::tokens::{Lexeme, Token, TokenCursor};
use crate::trace::{NoopTrace, ParseTrace};

/// Recursive-descent parser for Java token streams.
///
/// The `'ast` lifetime refers to the arena where AST nodes and token text
/// are allocated. The input tokens only need to live during [`Parser::new`].
pub struct Parser<'ast> {
    pub(super) cursor: TokenCursor<'ast>,
    pub(super) arena: &'ast Bump,
    pub(super) config: ParserConfig,
    /// Errors recovered from so far.
    pub(super) errors: ParseErrors,
    pub(super) state: RecoveryState,
    /// Current nesting depth, checked against `config.max_depth`.
    pub(super) depth: usize,
    /// Set while parsing a constructor body, where `this(..)`/`super(..)`
    /// statements are recognised.
    pub(super) in_constructor: bool,
    pub(super) trace: Box<dyn ParseTrace + 'ast>,
}

impl<'ast> Parser<'ast> {
    /// Create a parser over `tokens`, copying their text into `arena`.
    pub fn new(tokens: &[Token], arena: &'ast Bump) -> Self {
        Self {
            cursor: TokenCursor::new(tokens, arena),
            arena,
            config: ParserConfig::default(),
            errors: ParseErrors::new(),
            state: RecoveryState::Parsing,
            depth: 0,
            in_constructor: false,
            trace: Box::new(NoopTrace),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_trace(mut self, trace: Box<dyn ParseTrace + 'ast>) -> Self {
        self.trace = trace;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Take the recovered errors, leaving an empty collection.
    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    /// Fail unless every token has been consumed.
    pub fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.cursor.is_eof() {
            Ok(())
        } else {
            Err(self.cursor.unexpected("end of input"))
        }
    }

    // ========================================================================
    // Nesting and speculation
    // ========================================================================

    /// Run `production` one nesting level deeper.
    pub(super) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.nested_by(1, production)
    }

    /// Run `production` `cost` nesting levels deeper.
    ///
    /// A full expression recurses through many more stack frames than a
    /// statement or a type, so expressions charge more than one level.
    pub(super) fn nested_by<T>(
        &mut self,
        cost: usize,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth + cost > self.config.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.config.max_depth,
                position: self.cursor.position(),
            });
        }
        self.depth += cost;
        let result = production(self);
        self.depth -= cost;
        result
    }

    /// Try `production` without committing to it.
    ///
    /// `Ok(None)` and recoverable errors both count as "did not match": the
    /// cursor is rewound and `Ok(None)` returned. On a match the cursor is
    /// left after the consumed tokens. Unrecoverable errors propagate.
    pub(super) fn speculate<T>(
        &mut self,
        production: &'static str,
        attempt: impl FnOnce(&mut Self) -> Result<Option<T>, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let mark = self.cursor.mark();
        let position = self.cursor.position();

        let outcome = match attempt(self) {
            Ok(value) => value,
            Err(error) if error.is_recoverable() => None,
            Err(error) => {
                self.cursor.reset(mark);
                return Err(error);
            }
        };
        if outcome.is_none() {
            self.cursor.reset(mark);
        }
        self.trace.speculation(production, position, outcome.is_some());
        Ok(outcome)
    }

    /// Like [`Parser::speculate`] but always rewinds; reports whether the
    /// check matched.
    pub(super) fn lookahead(
        &mut self,
        production: &'static str,
        check: impl FnOnce(&mut Self) -> Result<bool, ParseError>,
    ) -> Result<bool, ParseError> {
        let mark = self.cursor.mark();
        let matched = self
            .speculate(production, |p| Ok(check(p)?.then_some(())))?
            .is_some();
        self.cursor.reset(mark);
        Ok(matched)
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    pub(super) fn enter(&mut self, production: &'static str) {
        let position = self.cursor.position();
        self.trace.enter(production, position);
    }

    pub(super) fn position(&self) -> Position {
        self.cursor.position()
    }

    pub(super) fn ident_from(&self, token: Lexeme<'ast>) -> Ident<'ast> {
        Ident::new(token.text, token.position)
    }

    pub(super) fn parse_ident(&mut self) -> Result<Ident<'ast>, ParseError> {
        let token = self.cursor.expect_identifier()?;
        Ok(self.ident_from(token))
    }

    /// Consume the closing `symbol` of a construct opened at `open`.
    ///
    /// Running out of input reports the construct as unterminated instead of
    /// as an unexpected end of input.
    pub(super) fn expect_close(
        &mut self,
        symbol: &str,
        construct: &'static str,
        open: Position,
    ) -> Result<Lexeme<'ast>, ParseError> {
        if let Some(token) = self.cursor.eat_punct(symbol) {
            return Ok(token);
        }
        if self.cursor.is_eof() {
            return Err(ParseError::unterminated(construct, open));
        }
        Err(self.cursor.unexpected(format!("'{symbol}'")))
    }

    /// Consume a `Type...` varargs marker, written as one `...` token or
    /// as three `.` tokens.
    pub(super) fn eat_ellipsis(&mut self) -> bool {
        if self.cursor.eat_punct("...").is_some() {
            return true;
        }
        let dots = (0..3).all(|i| self.cursor.peek_nth(i).is_punct("."));
        if dots {
            for _ in 0..3 {
                self.cursor.advance();
            }
        }
        dots
    }

    /// Whether the cursor is at a lambda arrow, `->` or `-` `>`.
    pub(super) fn at_arrow(&self, offset: usize) -> bool {
        let first = self.cursor.peek_nth(offset);
        first.is_punct("->") || (first.is_punct("-") && self.cursor.peek_nth(offset + 1).is_punct(">"))
    }

    pub(super) fn expect_arrow(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat_punct("->").is_some() {
            return Ok(());
        }
        if self.at_arrow(0) {
            self.cursor.advance();
            self.cursor.advance();
            return Ok(());
        }
        Err(self.cursor.unexpected("'->'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{testing::tokenize, TokenKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn nested_enforces_max_depth() {
        let arena = Bump::new();
        let mut parser = Parser::new(&[], &arena).with_config(ParserConfig::default().with_max_depth(2));

        let result = parser.nested(|p| p.nested(|p| p.nested(|_| Ok(()))));
        assert!(matches!(result, Err(ParseError::DepthExceeded { limit: 2, .. })));
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn nested_by_charges_cost() {
        let arena = Bump::new();
        let mut parser = Parser::new(&[], &arena).with_config(ParserConfig::default().with_max_depth(4));

        assert!(parser.nested_by(2, |p| p.nested_by(2, |_| Ok(()))).is_ok());
        let result = parser.nested_by(2, |p| p.nested_by(2, |p| p.nested(|_| Ok(()))));
        assert!(matches!(result, Err(ParseError::DepthExceeded { limit: 4, .. })));
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn speculate_rewinds_on_miss() {
        let arena = Bump::new();
        let tokens = tokenize("a b c");
        let mut parser = Parser::new(&tokens, &arena);

        let miss: Option<()> = parser
            .speculate("attempt", |p| {
                p.cursor.advance();
                p.cursor.expect_punct(";")?;
                Ok(Some(()))
            })
            .unwrap();
        assert!(miss.is_none());
        assert_eq!(parser.cursor.current().text, "a");

        let hit = parser
            .speculate("attempt", |p| Ok(Some(p.cursor.advance().text)))
            .unwrap();
        assert_eq!(hit, Some("a"));
        assert_eq!(parser.cursor.current().text, "b");
    }

    #[test]
    fn speculate_propagates_depth_errors() {
        let arena = Bump::new();
        let tokens = tokenize("a");
        let mut parser = Parser::new(&tokens, &arena).with_config(ParserConfig::default().with_max_depth(0));

        let result: Result<Option<()>, _> = parser.speculate("attempt", |p| p.nested(|_| Ok(Some(()))));
        assert!(matches!(result, Err(ParseError::DepthExceeded { .. })));
    }

    #[test]
    fn lookahead_never_consumes() {
        let arena = Bump::new();
        let tokens = tokenize("x = 1");
        let mut parser = Parser::new(&tokens, &arena);

        let matched = parser
            .lookahead("assign", |p| {
                p.cursor.advance();
                Ok(p.cursor.check_punct("="))
            })
            .unwrap();
        assert!(matched);
        assert_eq!(parser.cursor.current().text, "x");
    }

    #[test]
    fn ellipsis_forms() {
        let arena = Bump::new();
        let dots = vec![
            Token::new(TokenKind::Separator, ".", 1, 1),
            Token::new(TokenKind::Separator, ".", 1, 2),
            Token::new(TokenKind::Separator, ".", 1, 3),
        ];
        let mut parser = Parser::new(&dots, &arena);
        assert!(parser.eat_ellipsis());
        assert!(parser.cursor.is_eof());

        let tokens = tokenize("...");
        let mut parser = Parser::new(&tokens, &arena);
        assert!(parser.eat_ellipsis());

        let tokens = tokenize(". x");
        let mut parser = Parser::new(&tokens, &arena);
        assert!(!parser.eat_ellipsis());
        assert!(parser.cursor.check_punct("."));
    }

    #[test]
    fn arrow_forms() {
        let arena = Bump::new();
        let tokens = tokenize("->");
        let mut parser = Parser::new(&tokens, &arena);
        assert!(parser.at_arrow(0));
        parser.expect_arrow().unwrap();
        assert!(parser.cursor.is_eof());

        let single = vec![Token::new(TokenKind::Operator, "->", 1, 1)];
        let mut parser = Parser::new(&single, &arena);
        assert!(parser.at_arrow(0));
        parser.expect_arrow().unwrap();

        let tokens = tokenize("- x");
        let mut parser = Parser::new(&tokens, &arena);
        assert!(parser.expect_arrow().is_err());
    }

    #[test]
    fn expect_close_reports_unterminated_at_open() {
        let arena = Bump::new();
        let tokens = tokenize("( a");
        let mut parser = Parser::new(&tokens, &arena);
        let open = parser.cursor.advance().position;
        parser.cursor.advance();
        let err = parser.expect_close(")", "argument list", open).unwrap_err();
        assert_eq!(err, ParseError::unterminated("argument list", Position::new(1, 1)));

        let tokens = tokenize("( a ;");
        let mut parser = Parser::new(&tokens, &arena);
        parser.cursor.advance();
        parser.cursor.advance();
        let err = parser.expect_close(")", "argument list", open).unwrap_err();
        assert_eq!(err.kind(), javaparse_core::ParseErrorKind::UnexpectedToken);
    }

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<(&'static str, bool)>>>);

    impl ParseTrace for Recorder {
        fn speculation(&mut self, production: &'static str, _position: Position, committed: bool) {
            self.0.borrow_mut().push((production, committed));
        }
    }

    #[test]
    fn trace_sees_speculation_outcomes() {
        let arena = Bump::new();
        let tokens = tokenize("a");
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut parser = Parser::new(&tokens, &arena).with_trace(Box::new(Recorder(events.clone())));

        let _ = parser.speculate("hit", |p| Ok(Some(p.cursor.advance())));
        let _ = parser.speculate("miss", |_| Ok(None::<()>));

        assert_eq!(*events.borrow(), vec![("hit", true), ("miss", false)]);
    }
}
