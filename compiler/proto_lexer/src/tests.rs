#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proto_diagnostic::ErrorCode;

use super::*;

fn lex_str(src: &str) -> (TokenStream, Report) {
    let mut report = Report::new();
    let stream = lex(SourceFile::shared("test.proto", src), &mut report);
    (stream, report)
}

fn codes(report: &Report) -> Vec<ErrorCode> {
    report.iter().map(|d| d.code).collect()
}

fn significant(stream: &TokenStream) -> Vec<&str> {
    stream
        .iter_natural()
        .filter(|t| !t.is_skippable())
        .map(|t| t.text())
        .collect()
}

#[test]
fn clean_file() {
    let src = "syntax = \"proto3\";\npackage foo.bar;\n\nmessage Foo {\n  repeated int32 x = 1 [packed = true];\n}\n";
    let (stream, report) = lex_str(src);
    assert!(report.is_empty(), "{:?}", report.diagnostics());
    assert!(stream.is_frozen());
    assert_eq!(stream.covered(), src.len() as u32);
    assert_eq!(
        significant(&stream),
        vec![
            "syntax", "=", "\"proto3\"", ";", "package", "foo", ".", "bar", ";", "message", "Foo",
            "{", "repeated", "int32", "x", "=", "1", "[", "packed", "=", "true", "]", ";", "}",
        ]
    );
}

#[test]
fn delimiters_are_fused() {
    let (stream, report) = lex_str("a { b ( c ) [ d ] } e");
    assert!(report.is_empty());
    let mut cursor = stream.cursor();
    assert_eq!(cursor.next().unwrap().text(), "a");
    let brace = cursor.next().unwrap();
    assert!(brace.is_open());
    assert_eq!(brace.partner().unwrap().text(), "}");
    assert_eq!(brace.outer_span(), Span::new(2, 19));
    assert_eq!(cursor.next().unwrap().text(), "e");
    assert!(cursor.done());

    let mut inner = brace.children();
    assert_eq!(inner.next().unwrap().text(), "b");
    let paren = inner.next().unwrap();
    assert_eq!(paren.children().next().unwrap().text(), "c");
    let bracket = inner.next().unwrap();
    assert_eq!(bracket.partner().unwrap().text(), "]");
    assert!(inner.done());
}

#[test]
fn angle_brackets_stay_leaves() {
    let (stream, report) = lex_str("map<string, int32>");
    assert!(report.is_empty());
    assert!(stream.iter_natural().all(|t| t.is_leaf()));
}

#[test]
fn unclosed_delimiter_at_eof() {
    let (stream, report) = lex_str("message Foo {\n  int32 x = 1;\n");
    assert_eq!(codes(&report), vec![ErrorCode::E0010]);
    let diag = &report.diagnostics()[0];
    assert_eq!(diag.primary_span(), Some(Span::point(29)));
    assert_eq!(diag.labels[1].span, Span::new(12, 13));
    // The brace is left as a leaf; what follows it is not its children.
    assert_eq!(significant(&stream).len(), 8);
    assert!(stream.iter_natural().all(|t| t.is_leaf()));
}

#[test]
fn unclosed_inside_closed() {
    let (stream, report) = lex_str("{ ( }");
    assert_eq!(codes(&report), vec![ErrorCode::E0010]);
    assert_eq!(report.diagnostics()[0].primary_span(), Some(Span::new(2, 3)));
    let brace = stream.cursor().next().unwrap();
    assert_eq!(brace.partner().unwrap().span(), Span::new(4, 5));
}

#[test]
fn unmatched_close() {
    let (stream, report) = lex_str("a ) { ] }");
    assert_eq!(codes(&report), vec![ErrorCode::E0011, ErrorCode::E0011]);
    assert_eq!(report.diagnostics()[0].primary_span(), Some(Span::new(2, 3)));
    let mut cursor = stream.cursor();
    cursor.next();
    assert!(cursor.next().unwrap().is_punct(")"));
    let brace = cursor.next().unwrap();
    assert!(brace.is_open());
    assert!(cursor.done());
}

#[test]
fn string_diagnostics() {
    let (stream, report) = lex_str("option x = \"abc\nfoo = 'a\\qb';");
    assert_eq!(codes(&report), vec![ErrorCode::E0001, ErrorCode::E0005]);
    let unterminated = &report.diagnostics()[0];
    assert_eq!(unterminated.primary_span(), Some(Span::new(11, 15)));
    assert_eq!(unterminated.structured_suggestions[0].substitutions[0].snippet, "\"");
    let escape = &report.diagnostics()[1];
    assert_eq!(escape.primary_span(), Some(Span::new(24, 26)));
    assert_eq!(escape.message, "unknown escape sequence `\\q`");
    // Both strings are still single tokens.
    assert_eq!(
        stream.iter_natural().filter(|t| t.kind() == TokenKind::String).count(),
        2
    );
}

#[test]
fn number_diagnostics() {
    let (_, report) = lex_str("a = 0x; b = 09; c = 18446744073709551616; d = 18446744073709551615; e = 1.5e3;");
    assert_eq!(codes(&report), vec![ErrorCode::E0003, ErrorCode::E0003, ErrorCode::E0004]);
    assert!(report.diagnostics()[1].notes[0].contains("octal"));
}

#[test]
fn comment_and_character_diagnostics() {
    let (_, report) = lex_str("message Café {} /* open");
    assert_eq!(codes(&report), vec![ErrorCode::E0007, ErrorCode::E0006]);

    let (stream, report) = lex_str("int32 x = 1;\u{7}");
    assert_eq!(codes(&report), vec![ErrorCode::E0002]);
    assert_eq!(
        stream.iter_natural().last().unwrap().kind(),
        TokenKind::Unrecognized
    );
}

#[test]
fn lex_bytes_reports_invalid_utf8() {
    let mut report = Report::new();
    let stream = lex_bytes("bad.proto", vec![b'a', b' ', 0xff, b'b'], &mut report);
    assert_eq!(codes(&report), vec![ErrorCode::E0009]);
    assert_eq!(report.diagnostics()[0].primary_span(), Some(Span::new(2, 3)));
    assert_eq!(stream.natural_len(), 0);
    assert_eq!(stream.file().path(), "bad.proto");

    let mut report = Report::new();
    let stream = lex_bytes("ok.proto", b"enum E {}".to_vec(), &mut report);
    assert!(report.is_empty());
    assert_eq!(significant(&stream), vec!["enum", "E", "{", "}"]);
}

#[test]
fn empty_file() {
    let (stream, report) = lex_str("");
    assert!(report.is_empty());
    assert_eq!(stream.natural_len(), 0);
    assert!(stream.cursor().done());
}

proptest! {
    /// Every input lexes, and the tokens tile the source exactly.
    #[test]
    fn tokens_tile_source(src in "[ -~\\n\\t\u{e9}\u{2192}]{0,64}") {
        let (stream, _) = lex_str(&src);
        let mut end = 0;
        let mut rebuilt = String::new();
        for tok in stream.iter_natural() {
            prop_assert_eq!(tok.span().start, end);
            prop_assert!(tok.span().end > end);
            end = tok.span().end;
            rebuilt.push_str(tok.text());
        }
        prop_assert_eq!(rebuilt, src);
    }

    /// Fused delimiters pair an opener with the matching closer.
    #[test]
    fn partners_match(src in "[(){}\\[\\]a ]{0,40}") {
        let (stream, _) = lex_str(&src);
        for tok in stream.iter_natural().filter(|t| t.is_open()) {
            let close = tok.partner().unwrap();
            let pair = format!("{}{}", tok.text(), close.text());
            prop_assert!(matches!(pair.as_str(), "()" | "[]" | "{}"), "{}", pair);
            prop_assert_eq!(close.partner().unwrap(), tok);
        }
    }
}
