//! Shared vocabulary for the Java parser crates.
//!
//! Provides source [`Position`]s and the [`ParseError`] taxonomy that every
//! production reports through.

pub mod error;
pub mod position;

pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use position::Position;
