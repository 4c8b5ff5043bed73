//! Token input and the cursor the parser reads it through.

mod cursor;
mod token;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use cursor::{Lexeme, Mark, TokenCursor};
pub use token::{Token, TokenKind, UnknownTokenKind};
