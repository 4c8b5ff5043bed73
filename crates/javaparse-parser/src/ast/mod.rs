//! Abstract Syntax Tree (AST) for Java.
//!
//! This module provides:
//! - AST node definitions for classes, interfaces, enums, statements and
//!   expressions
//! - The recursive-descent [`Parser`] turning a token stream into the tree
//! - Error recovery at declaration, member and statement boundaries
//! - Visitor pattern for AST traversal
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use javaparse_parser::ast::Parser;
//! use javaparse_parser::tokens::{Token, TokenKind};
//!
//! let tokens = vec![
//!     Token::new(TokenKind::Keyword, "class", 1, 1),
//!     Token::new(TokenKind::Identifier, "Point", 1, 7),
//!     Token::new(TokenKind::Separator, "{", 1, 13),
//!     Token::new(TokenKind::Keyword, "int", 1, 15),
//!     Token::new(TokenKind::Identifier, "x", 1, 19),
//!     Token::new(TokenKind::Separator, ";", 1, 20),
//!     Token::new(TokenKind::Separator, "}", 1, 22),
//! ];
//!
//! let arena = Bump::new();
//! match Parser::parse(&tokens, &arena) {
//!     Ok(program) => assert_eq!(program.classes[0].fields().len(), 1),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

// Core types
pub mod node;
pub mod ops;

mod parser;
pub mod recovery;
mod type_parser;
pub mod types;

mod literal;

pub mod expr;
mod expr_parser;

pub mod stmt;
mod stmt_parser;

pub mod decl;
mod decl_parser;

pub mod visitor;

use bumpalo::Bump;
use javaparse_core::{ParseError, ParseErrors};

pub use decl::*;
pub use expr::*;
pub use node::*;
pub use ops::*;
pub use parser::Parser;
pub use recovery::{RecoveryContext, RecoveryState, SyncLevel};
pub use stmt::*;
pub use types::*;

use crate::tokens::Token;

/// The result of a lenient parse: the tree built from every construct that
/// parsed, and the errors recovered from along the way.
///
/// Constructs that failed contribute nothing to `program`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'ast> {
    pub program: Program<'ast>,
    pub errors: ParseErrors,
}

impl<'ast> Parsed<'ast> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program if nothing was recovered from, otherwise the errors.
    pub fn into_result(self) -> Result<Program<'ast>, ParseErrors> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }
}

impl<'ast> Parser<'ast> {
    /// Parse a compilation unit, failing if any error was encountered.
    ///
    /// All AST nodes are allocated in `arena` and remain valid for the
    /// arena's lifetime. Use [`Parser::parse_lenient`] to keep the partial
    /// tree alongside the recovered errors.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(tokens: &[Token], arena: &'ast Bump) -> Result<Program<'ast>, ParseErrors> {
        Parser::new(tokens, arena).into_program()
    }

    /// Parse a compilation unit, recovering from errors.
    ///
    /// Only terminal failures (nesting too deep, too many errors, or a
    /// parser fault) are returned as `Err`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_lenient(tokens: &[Token], arena: &'ast Bump) -> Result<Parsed<'ast>, ParseError> {
        Parser::new(tokens, arena).into_parsed()
    }

    /// Strict parse with this parser's configuration and trace.
    pub fn into_program(mut self) -> Result<Program<'ast>, ParseErrors> {
        let result = self.parse_program();
        self.finish(result)
    }

    /// Lenient parse with this parser's configuration and trace.
    pub fn into_parsed(mut self) -> Result<Parsed<'ast>, ParseError> {
        let program = self.parse_program()?;
        Ok(Parsed {
            program,
            errors: self.take_errors(),
        })
    }

    /// Parse a single expression that spans the whole input.
    pub fn expression(tokens: &[Token], arena: &'ast Bump) -> Result<&'ast Expr<'ast>, ParseErrors> {
        let mut parser = Parser::new(tokens, arena);
        let result = parser.parse_expression().and_then(|expr| {
            parser.expect_eof()?;
            Ok(expr)
        });
        parser.finish(result)
    }

    /// Parse a single statement that spans the whole input.
    pub fn statement(tokens: &[Token], arena: &'ast Bump) -> Result<&'ast Stmt<'ast>, ParseErrors> {
        let mut parser = Parser::new(tokens, arena);
        let result = parser.parse_statement().and_then(|stmt| {
            parser.expect_eof()?;
            Ok(&*arena.alloc(stmt))
        });
        parser.finish(result)
    }

    /// Parse a single type that spans the whole input.
    pub fn type_expr(tokens: &[Token], arena: &'ast Bump) -> Result<TypeExpr<'ast>, ParseErrors> {
        let mut parser = Parser::new(tokens, arena);
        let result = parser.parse_type().and_then(|ty| {
            parser.expect_eof()?;
            Ok(ty)
        });
        parser.finish(result)
    }

    fn finish<T>(&mut self, result: Result<T, ParseError>) -> Result<T, ParseErrors> {
        match result {
            Ok(node) => {
                if self.errors.is_empty() {
                    Ok(node)
                } else {
                    Err(self.take_errors())
                }
            }
            Err(err) => {
                self.errors.push(err);
                Err(self.take_errors())
            }
        }
    }
}
