//! Diagnostic emitters.
//!
//! An emitter turns [`Diagnostic`] values into output. Only a human-readable
//! terminal format is provided; other formats implement the same trait.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::{Diagnostic, Report};

/// Trait for emitting diagnostics in some output format.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Emit a report in location order.
    fn emit_report(&mut self, report: &Report) {
        for diag in report.sorted() {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors and warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
