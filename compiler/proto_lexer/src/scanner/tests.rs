#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn scan(src: &str) -> Vec<(TokenKind, &str, Option<Flaw>)> {
    let mut scanner = Scanner::new(src);
    let mut out = Vec::new();
    let mut start = 0;
    while let Some(lexeme) = scanner.next_lexeme() {
        out.push((lexeme.kind, &src[start..start + lexeme.len], lexeme.flaw));
        start += lexeme.len;
    }
    assert_eq!(scanner.pos(), src.len());
    out
}

fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
    scan(src).into_iter().map(|(k, t, _)| (k, t)).collect()
}

#[test]
fn field_definition() {
    use TokenKind::{Ident, Number, Punct, Space};
    assert_eq!(
        kinds("optional int32 x = 1;"),
        vec![
            (Ident, "optional"),
            (Space, " "),
            (Ident, "int32"),
            (Space, " "),
            (Ident, "x"),
            (Space, " "),
            (Punct, "="),
            (Space, " "),
            (Number, "1"),
            (Punct, ";"),
        ]
    );
}

#[test]
fn comments() {
    use TokenKind::{Comment, Ident, Space};
    assert_eq!(
        kinds("a // line\n/* block\n */b"),
        vec![
            (Ident, "a"),
            (Space, " "),
            (Comment, "// line"),
            (Space, "\n"),
            (Comment, "/* block\n */"),
            (Ident, "b"),
        ]
    );
    assert_eq!(
        scan("/* open"),
        vec![(Comment, "/* open", Some(Flaw::UnterminatedComment))]
    );
    assert_eq!(kinds("a/b"), vec![(Ident, "a"), (TokenKind::Punct, "/"), (Ident, "b")]);
}

#[test]
fn numbers() {
    for text in ["0", "42", "0x1F", "017", "1.5", ".5", "1e10", "1.5E-3", "2e+8"] {
        assert_eq!(kinds(text), vec![(TokenKind::Number, text)], "{text}");
    }
    // Greedy: malformed numbers stay one token.
    assert_eq!(kinds("12abc"), vec![(TokenKind::Number, "12abc")]);
    // No sign after a hex `e`.
    assert_eq!(
        kinds("0x1e-5"),
        vec![
            (TokenKind::Number, "0x1e"),
            (TokenKind::Punct, "-"),
            (TokenKind::Number, "5")
        ]
    );
    assert_eq!(kinds("-1"), vec![(TokenKind::Punct, "-"), (TokenKind::Number, "1")]);
}

#[test]
fn strings() {
    assert_eq!(kinds(r#""proto3""#), vec![(TokenKind::String, r#""proto3""#)]);
    assert_eq!(kinds(r"'it\'s'"), vec![(TokenKind::String, r"'it\'s'")]);
    assert_eq!(kinds(r#""a\"b""#), vec![(TokenKind::String, r#""a\"b""#)]);
    assert_eq!(kinds(r#""it's""#), vec![(TokenKind::String, r#""it's""#)]);
}

#[test]
fn unterminated_strings() {
    assert_eq!(
        scan("\"abc\nx"),
        vec![
            (TokenKind::String, "\"abc", Some(Flaw::UnterminatedString)),
            (TokenKind::Space, "\n", None),
            (TokenKind::Ident, "x", None),
        ]
    );
    assert_eq!(scan("\"abc"), vec![(TokenKind::String, "\"abc", Some(Flaw::UnterminatedString))]);
    assert_eq!(scan("\"ab\\"), vec![(TokenKind::String, "\"ab\\", Some(Flaw::UnterminatedString))]);
    assert_eq!(scan("\""), vec![(TokenKind::String, "\"", Some(Flaw::UnterminatedString))]);
    assert_eq!(
        scan("\"a\\\nb"),
        vec![
            (TokenKind::String, "\"a\\", Some(Flaw::UnterminatedString)),
            (TokenKind::Space, "\n", None),
            (TokenKind::Ident, "b", None),
        ]
    );
}

#[test]
fn non_ascii() {
    assert_eq!(scan("café"), vec![(TokenKind::Ident, "café", Some(Flaw::NonAsciiIdent))]);
    assert_eq!(scan("émile_2"), vec![(TokenKind::Ident, "émile_2", Some(Flaw::NonAsciiIdent))]);
    assert_eq!(
        scan("a→b"),
        vec![
            (TokenKind::Ident, "a", None),
            (TokenKind::Unrecognized, "→", Some(Flaw::Unrecognized)),
            (TokenKind::Ident, "b", None),
        ]
    );
    assert_eq!(
        scan("\u{1}\u{2} "),
        vec![
            (TokenKind::Unrecognized, "\u{1}\u{2}", Some(Flaw::Unrecognized)),
            (TokenKind::Space, " ", None),
        ]
    );
}

#[test]
fn delimiters_are_single_punctuation() {
    let texts: Vec<_> = kinds("{[(<>)]}").into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["{", "[", "(", "<", ">", ")", "]", "}"]);
}
