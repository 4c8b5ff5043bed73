//! Error recovery.
//!
//! Top-level declarations, class members and block statements are parsed as
//! *protected attempts*. When one fails, the error is recorded, the parser
//! enters [`RecoveryState::Recovering`] and skips tokens until a
//! synchronization point, and the failed construct contributes nothing to
//! the tree.
//!
//! Synchronization points, outside any braces opened while skipping:
//! - `class`, `import`, `interface` or `enum` (program level only; not consumed)
//! - `;` (consumed)
//! - `}` closing the enclosing body (left for the enclosing production; a
//!   stray `}` at program level is consumed)
//! - end of input (terminal)
//!
//! Braces the failed construct opened before the failure are closed first,
//! so its own `}` is never taken for the enclosing body's. A `{ .. }`
//! region entered while skipping is skipped as a whole, and its closing `}`
//! also ends recovery.

use javaparse_core::ParseError;

use super::parser::Parser;
use crate::tokens::{Lexeme, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    Parsing,
    /// Skipping tokens after a failure.
    Recovering,
}

/// The kind of construct a protected attempt parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncLevel {
    Program,
    Member,
    Statement,
}

/// Where a protected attempt started and what it may resynchronize on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryContext {
    pub level: SyncLevel,
    pub start: Mark,
}

const DECLARATION_KEYWORDS: [&str; 4] = ["class", "import", "interface", "enum"];

fn starts_declaration(token: &Lexeme<'_>) -> bool {
    DECLARATION_KEYWORDS.iter().any(|kw| token.is_keyword(kw))
}

impl<'ast> Parser<'ast> {
    /// Run `production` as a protected attempt.
    ///
    /// Returns `Ok(Some(node))` on success and `Ok(None)` when the error was
    /// recorded and skipped. Unrecoverable errors, and any error once
    /// `max_errors` have been recorded, propagate.
    pub(super) fn protected<T>(
        &mut self,
        level: SyncLevel,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let context = RecoveryContext {
            level,
            start: self.cursor.mark(),
        };

        match production(self) {
            Ok(node) => {
                self.state = RecoveryState::Parsing;
                Ok(Some(node))
            }
            Err(error) if error.is_recoverable() && self.errors.len() < self.config.max_errors => {
                self.state = RecoveryState::Recovering;
                self.synchronize(&context);
                self.trace.recovered(&error, self.cursor.position());
                self.errors.push(error);
                if !self.cursor.is_eof() {
                    self.state = RecoveryState::Parsing;
                }
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Skip forward from the failure point to the next synchronization point.
    pub(super) fn synchronize(&mut self, context: &RecoveryContext) {
        let mut unclosed = self.unclosed_braces(context.start);
        while unclosed > 0 {
            let token = self.cursor.current();
            if token.is_eof() {
                return;
            }
            self.cursor.advance();
            if token.is_punct("{") {
                unclosed += 1;
            } else if token.is_punct("}") {
                unclosed -= 1;
            }
        }

        let mut depth = 0usize;
        loop {
            let token = self.cursor.current();
            if token.is_eof() {
                return;
            }

            if depth == 0 {
                let moved = self.cursor.mark() != context.start;
                if context.level == SyncLevel::Program && moved && starts_declaration(&token) {
                    return;
                }
                if token.is_punct(";") {
                    self.cursor.advance();
                    return;
                }
                if token.is_punct("}") {
                    if context.level == SyncLevel::Program {
                        self.cursor.advance();
                    }
                    return;
                }
            }

            self.cursor.advance();
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Number of `{` between `start` and the cursor that are still open.
    fn unclosed_braces(&mut self, start: Mark) -> usize {
        let failure = self.cursor.mark();
        self.cursor.reset(start);

        let mut open = 0usize;
        while self.cursor.mark() != failure && !self.cursor.is_eof() {
            let token = self.cursor.advance();
            if token.is_punct("{") {
                open += 1;
            } else if token.is_punct("}") {
                open = open.saturating_sub(1);
            }
        }

        self.cursor.reset(failure);
        open
    }
}
