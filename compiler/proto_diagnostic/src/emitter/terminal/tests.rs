#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proto_ir::Span;

use super::*;
use crate::{ErrorCode, Substitution};

const SOURCE: &str = "syntax = \"proto3\";\nmessage Foo {\n  int32 x = 1\n}\n";

fn missing_semi() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1005)
        .with_message("missing `;` after definition")
        .with_label(Span::point(46), "expected `;`")
        .with_fix("add a semicolon", Substitution::new(Span::point(46), ";"))
}

fn render(diag: &Diagnostic, source: bool) -> String {
    let mut out = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Never, false);
    if source {
        emitter.set_source(SourceFile::shared("foo.proto", SOURCE));
    }
    emitter.emit(diag);
    emitter.flush();
    drop(emitter);
    String::from_utf8(out).unwrap()
}

#[test]
fn renders_line_and_column() {
    let text = render(&missing_semi(), true);
    let expected = "\
error[E1005]: missing `;` after definition
  --> foo.proto:3:14
   |
 3 |   int32 x = 1
   |              ^ expected `;`
   = help: add a semicolon: `;`

";
    assert_eq!(text, expected);
}

#[test]
fn secondary_labels_use_dashes() {
    let diag = crate::more_than_once(Span::new(27, 30), Span::new(35, 40), "type");
    let text = render(&diag, true);
    assert!(text.contains("  --> foo.proto:3:3\n"), "{text}");
    assert!(text.contains("  ::: foo.proto:2:9\n"), "{text}");
    assert!(text.contains("   |         --- first given here\n"), "{text}");
    assert!(text.contains("   = note: only the first occurrence is used\n"), "{text}");
}

#[test]
fn multi_line_spans_underline_to_end_of_line() {
    let diag = Diagnostic::error(ErrorCode::E0010)
        .with_message("unclosed delimiter `{`")
        .with_label(Span::new(31, 50), "this block");
    let text = render(&diag, true);
    assert!(text.contains(" 2 | message Foo {\n   |             ^ this block\n"), "{text}");
}

#[test]
fn without_source_falls_back_to_offsets() {
    let text = render(&missing_semi(), false);
    assert!(text.starts_with("error[E1005]: missing `;` after definition\n"));
    assert!(text.contains("  --> 46..46: expected `;`\n"), "{text}");
    assert!(text.contains("  = help: add a semicolon: `;`\n"), "{text}");
}

#[test]
fn colors() {
    let mut out = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Always, false);
    emitter.emit(&missing_semi());
    drop(emitter);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\x1b[1;31merror\x1b[0m"));
    assert!(text.contains("E1005"));
}

#[test]
fn color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!("never".parse::<ColorMode>(), Ok(ColorMode::Never));
    assert!("sometimes".parse::<ColorMode>().is_err());
}

#[test]
fn report_is_emitted_in_location_order() {
    let mut report = crate::Report::new();
    report.push(Diagnostic::error(ErrorCode::E1001).with_message("second").with_label(Span::new(40, 41), ""));
    report.push(Diagnostic::error(ErrorCode::E1001).with_message("first").with_label(Span::new(0, 6), ""));
    let mut out = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Never, false);
    emitter.emit_report(&report);
    drop(emitter);
    let text = String::from_utf8(out).unwrap();
    assert!(text.find("first").unwrap() < text.find("second").unwrap());
}

#[test]
fn summary() {
    let cases = [
        (1, 0, "error: aborting due to previous error\n"),
        (3, 0, "error: aborting due to 3 previous errors\n"),
        (2, 1, "error: aborting due to 2 previous errors; 1 warning emitted\n"),
        (0, 2, "warning: 2 warnings emitted\n"),
        (0, 0, ""),
    ];
    for (errors, warnings, expected) in cases {
        let mut out = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut out, ColorMode::Never, false);
        emitter.emit_summary(errors, warnings);
        drop(emitter);
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
