//! Parser tests.
//!
//! - `scenarios`: whole-file parses checked against the tree dump
//! - `decls`: each declaration form and its disambiguation
//! - `exprs`: values, message literals and ranges
//! - `recovery`: malformed input, diagnostics and suggested fixes
//! - `properties`: termination and robustness on arbitrary input

mod exprs;
mod properties;
mod recovery;
mod scenarios;

use proto_diagnostic::{ErrorCode, Report};
use proto_ir::ast::dump::dump;
use proto_ir::ast::Context;

fn parse(src: &str) -> (Context, Report) {
    let mut report = Report::new();
    let ctx = crate::parse_source("test.proto", src, &mut report);
    (ctx, report)
}

fn codes(report: &Report) -> Vec<ErrorCode> {
    report.iter().map(|d| d.code).collect()
}

/// Parse input that must be accepted without diagnostics and dump it.
fn dump_clean(src: &str) -> String {
    let (ctx, report) = parse(src);
    assert!(report.is_empty(), "unexpected diagnostics for {src:?}: {:#?}", report.diagnostics());
    dump(&ctx)
}
