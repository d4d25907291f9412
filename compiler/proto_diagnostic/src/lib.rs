//! Diagnostics for the Protobuf front end.
//!
//! The lexer and parser never render anything: they push [`Diagnostic`]
//! values into an injected [`Report`]. Rendering is left to an emitter such
//! as [`TerminalEmitter`].
//!
//! # Error Code Ranges
//!
//! - `E0xxx`: lexical errors
//! - `E1xxx`: structural (parse) errors
//! - `E9xxx`: internal errors

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod fixes;
mod report;
pub mod span_utils;

pub use diagnostic::{
    expected, more_than_once, unclosed_delimiter, unexpected_tokens, Applicability, Diagnostic,
    Label, Severity, Substitution, Suggestion,
};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::{ErrorCode, UnknownErrorCode};
pub use fixes::Justify;
pub use report::{Report, ReportConfig};
