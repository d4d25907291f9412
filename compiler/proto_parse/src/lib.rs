//! Permissive recursive descent parser for Protobuf sources.
//!
//! Builds the syntax tree of a lexed file into its [`Context`]. Parsing
//! never fails: every problem becomes a diagnostic in the [`Report`] and the
//! parser either leaves the offending part of a node absent or skips exactly
//! one token. Definitions it could not interpret confidently are marked
//! corrupt.
//!
//! ```
//! use proto_diagnostic::Report;
//! use proto_ir::ast::DefKind;
//!
//! let mut report = Report::new();
//! let ctx = proto_parse::parse_source("a.proto", "message M { int32 x = 1; }", &mut report);
//! assert!(report.is_empty());
//!
//! let message = ctx.file_view().defs().next().unwrap();
//! assert_eq!(message.classify(), DefKind::Message);
//! assert_eq!(message.name().unwrap().to_string(), "M");
//! ```
//!
//! # Organization
//! - `parser`: parser state and token-level helpers
//! - `grammar`: one module per family of productions, each extending `Parser`
//! - `errors`: constructors for every diagnostic the parser emits

mod errors;
mod grammar;
mod parser;

use std::sync::Arc;

use proto_diagnostic::Report;
use proto_ir::ast::{Context, ContextOptions};
use proto_ir::SourceFile;
use tracing::debug;

use crate::parser::{Parser, Scope};

/// Parser configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Options for contexts created by [`parse_source_with`].
    pub context: ContextOptions,
    /// Diagnose `syntax`, `edition`, `package` and `import` declarations
    /// that appear inside a body.
    pub check_placement: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            context: ContextOptions::default(),
            check_placement: true,
        }
    }
}

/// Parse the token stream of `ctx` into its root body.
pub fn parse(ctx: &mut Context, report: &mut Report) {
    parse_with(ctx, report, ParseOptions::default());
}

pub fn parse_with(ctx: &mut Context, report: &mut Report, options: ParseOptions) {
    let errors_before = report.error_count();
    let (stream, arena) = ctx.split_mut();
    let root = arena.root();
    let mut cursor = stream.cursor();
    let mut parser = Parser::new(stream, arena, report, options);
    parser.decls(&mut cursor, root, Scope::File);

    debug!(
        path = ctx.file().path(),
        decls = ctx.root().len(),
        nodes = ctx.arena().node_count(),
        errors = report.error_count() - errors_before,
        "parsed"
    );
}

/// Lex and parse a file held in memory.
pub fn parse_source(path: impl Into<String>, text: impl Into<String>, report: &mut Report) -> Context {
    parse_source_with(SourceFile::shared(path, text), report, ParseOptions::default())
}

pub fn parse_source_with(file: Arc<SourceFile>, report: &mut Report, options: ParseOptions) -> Context {
    let stream = proto_lexer::lex(file, report);
    parse_stream(stream, report, options)
}

/// Lex and parse raw file contents.
///
/// Input that is not valid UTF-8 is reported and parsed as an empty file.
pub fn parse_bytes(
    path: impl Into<String>,
    bytes: Vec<u8>,
    report: &mut Report,
    options: ParseOptions,
) -> Context {
    let stream = proto_lexer::lex_bytes(path, bytes, report);
    parse_stream(stream, report, options)
}

fn parse_stream(stream: proto_ir::TokenStream, report: &mut Report, options: ParseOptions) -> Context {
    let mut ctx = Context::with_options(stream, options.context);
    parse_with(&mut ctx, report, options);
    ctx
}

#[cfg(test)]
mod tests;
