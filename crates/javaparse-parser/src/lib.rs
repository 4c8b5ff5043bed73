//! Java parser crate.
//!
//! Turns the token stream of an external Java lexer into a typed AST.
//! It includes:
//! - The token model and the cursor the parser reads through
//! - Abstract Syntax Tree (AST) definitions
//! - A recursive-descent parser with error recovery
//! - Visitor pattern for AST traversal
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use javaparse_parser::{Parser, Token, TokenKind};
//!
//! let tokens = vec![
//!     Token::new(TokenKind::Keyword, "interface", 1, 1),
//!     Token::new(TokenKind::Identifier, "Shape", 1, 11),
//!     Token::new(TokenKind::Separator, "{", 1, 17),
//!     Token::new(TokenKind::Keyword, "double", 1, 19),
//!     Token::new(TokenKind::Identifier, "area", 1, 26),
//!     Token::new(TokenKind::Separator, "(", 1, 30),
//!     Token::new(TokenKind::Separator, ")", 1, 31),
//!     Token::new(TokenKind::Separator, ";", 1, 32),
//!     Token::new(TokenKind::Separator, "}", 1, 34),
//! ];
//!
//! let arena = Bump::new();
//! match Parser::parse(&tokens, &arena) {
//!     Ok(program) => println!("Parsed {} classes", program.classes.len()),
//!     Err(errors) => eprintln!("Parse errors: {}", errors),
//! }
//! ```

pub mod ast;
pub mod config;
pub mod tokens;
pub mod trace;

// Re-export commonly used types at crate root
pub use ast::{Parsed, Parser};
pub use config::ParserConfig;
pub use javaparse_core::{ParseError, ParseErrorKind, ParseErrors, Position};
pub use tokens::{Token, TokenKind};
pub use trace::{NoopTrace, ParseTrace};
