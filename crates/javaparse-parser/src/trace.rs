//! Optional tracing hook.
//!
//! The parser reports what it is doing through [`ParseTrace`] and has no
//! logging dependency of its own. Callers that want logs plug in an
//! implementation; the default [`NoopTrace`] discards everything.

use javaparse_core::{ParseError, Position};

/// Receives parser events. Every method defaults to doing nothing.
pub trait ParseTrace {
    /// A production started at `position`.
    fn enter(&mut self, _production: &'static str, _position: Position) {}

    /// A speculative parse finished; `committed` is false when the cursor
    /// was rewound.
    fn speculation(&mut self, _production: &'static str, _position: Position, _committed: bool) {}

    /// `error` was recorded and parsing resumed at `resumed_at`.
    fn recovered(&mut self, _error: &ParseError, _resumed_at: Position) {}
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl ParseTrace for NoopTrace {}
