#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use proto_diagnostic::{ColorMode, TerminalEmitter};
use tempfile::TempDir;

use super::{corrupt_defs, run, Status};
use crate::{Command, DriverConfig, DriverError};

struct Output {
    status: Status,
    out: String,
    diagnostics: String,
}

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn config(command: Command, files: Vec<PathBuf>) -> DriverConfig {
    DriverConfig {
        command,
        files,
        color: ColorMode::Never,
        trace_nodes: false,
    }
}

fn run_captured(config: &DriverConfig) -> Result<Output, DriverError> {
    let mut out = Vec::new();
    let mut diagnostics = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    let status = run(config, &mut out, &mut diagnostics)?;
    Ok(Output {
        status,
        out: String::from_utf8(out).unwrap(),
        diagnostics: String::from_utf8(diagnostics.into_inner()).unwrap(),
    })
}

#[test]
fn dump_clean_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.proto", "syntax = \"proto3\";\nmessage M { int32 x = 1; }\n");
    let output = run_captured(&config(Command::Dump, vec![path])).unwrap();
    assert_eq!(output.status, Status::Clean);
    assert_eq!(output.out, "file\n  syntax \"proto3\"\n  message M\n    field int32 x = 1\n");
    assert_eq!(output.diagnostics, "");
}

#[test]
fn parse_reports_errors_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(&dir, "good.proto", "message M {}\n");
    let bad = write(&dir, "bad.proto", "message M { int32 x = 1 }\n");
    let output = run_captured(&config(Command::Parse, vec![good.clone(), bad.clone()])).unwrap();

    assert_eq!(output.status, Status::Failed);
    let lines: Vec<&str> = output.out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("{}: 1 declarations", good.display())));
    assert!(lines[1].ends_with("1 error"), "{}", lines[1]);
    assert!(output.diagnostics.contains("[E1005]"), "{}", output.diagnostics);
    assert!(output.diagnostics.contains("bad.proto:1:24"), "{}", output.diagnostics);
}

#[test]
fn lex_lists_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.proto", "a = 1;");
    let output = run_captured(&config(Command::Lex, vec![path])).unwrap();
    assert_eq!(output.status, Status::Clean);
    assert!(output.out.contains("(6 tokens)"), "{}", output.out);
    assert!(output.out.contains("\"a\""));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.proto");
    let err = run_captured(&config(Command::Parse, vec![path])).err().unwrap();
    assert!(matches!(err, DriverError::Read { .. }));
}

#[test]
fn corrupt_definitions_in_source_order() {
    let mut report = proto_diagnostic::Report::new();
    let ctx = proto_parse::parse_source(
        "a.proto",
        "message { enum {} } service {}",
        &mut report,
    );
    let corrupt: Vec<_> = corrupt_defs(ctx.root()).iter().map(|d| d.span().start).collect();
    assert_eq!(corrupt, [0, 10, 20]);
}

#[test]
fn dump_traces_corrupt_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.proto", "message {}");
    let mut config = config(Command::Dump, vec![path]);
    config.trace_nodes = true;
    let output = run_captured(&config).unwrap();
    assert_eq!(output.status, Status::Failed);
    assert!(output.out.contains("corrupt message definition at"), "{}", output.out);
}
