//! [`ParseTrace`] implementation that forwards parser events to `tracing`.

use javaparse_core::{ParseError, Position};
use javaparse_parser::ParseTrace;
use tracing::{debug, trace, warn};

/// Emits parser events under the `javaparse::parser` target.
///
/// Productions are logged at `TRACE`, speculation outcomes at `DEBUG` and
/// recovered errors at `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl ParseTrace for TracingTrace {
    fn enter(&mut self, production: &'static str, position: Position) {
        trace!(
            target: "javaparse::parser",
            production,
            line = position.line,
            column = position.column,
            "enter"
        );
    }

    fn speculation(&mut self, production: &'static str, position: Position, committed: bool) {
        debug!(
            target: "javaparse::parser",
            production,
            line = position.line,
            column = position.column,
            committed,
            "speculation"
        );
    }

    fn recovered(&mut self, error: &ParseError, resumed_at: Position) {
        warn!(
            target: "javaparse::parser",
            kind = error.kind().as_str(),
            line = error.line(),
            column = error.column(),
            resumed_line = resumed_at.line,
            resumed_column = resumed_at.column,
            "recovered from parse error: {}",
            error.message()
        );
    }
}
