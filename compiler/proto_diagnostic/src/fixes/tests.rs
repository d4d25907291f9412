#![allow(clippy::unwrap_used, clippy::expect_used)]

use proto_ir::{SourceFile, TokenKind};

use super::*;

/// Enough of a tokenizer for these tests: whitespace, `//` comments,
/// identifier/number runs and single punctuation.
fn stream(src: &str) -> TokenStream {
    let mut stream = TokenStream::new(SourceFile::shared("test.proto", src));
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        let (len, kind) = if rest[0].is_ascii_whitespace() {
            (rest.iter().take_while(|b| b.is_ascii_whitespace()).count(), TokenKind::Space)
        } else if rest.starts_with(b"//") {
            (rest.iter().take_while(|&&b| b != b'\n').count(), TokenKind::Comment)
        } else if rest[0].is_ascii_alphanumeric() {
            (rest.iter().take_while(|b| b.is_ascii_alphanumeric()).count(), TokenKind::Ident)
        } else {
            (1, TokenKind::Punct)
        };
        stream.push(len, kind);
        i += len;
    }
    stream.freeze();
    stream
}

fn apply(src: &str, sub: &Substitution) -> String {
    let mut out = src.to_owned();
    out.replace_range(sub.span.to_range(), &sub.snippet);
    out
}

#[test]
fn left_skips_whitespace_and_comments() {
    let src = "int32 x = 1  // trailing\n}";
    let s = stream(src);
    let at = Span::point(src.find('}').unwrap() as u32);
    assert_eq!(justify(&s, at, Justify::Left), Span::point(11));

    let sub = insertion(&s, at, ";", Justify::Left);
    assert_eq!(apply(src, &sub), "int32 x = 1;  // trailing\n}");
}

#[test]
fn left_stays_after_significant_token() {
    let s = stream("a b");
    assert_eq!(justify(&s, Span::point(1), Justify::Left), Span::point(1));
}

#[test]
fn right_skips_to_next_token() {
    let s = stream("x   // c\n  y");
    assert_eq!(justify(&s, Span::point(1), Justify::Right), Span::point(11));
    // Wider spans justify from their end.
    assert_eq!(justify(&s, Span::new(0, 1), Justify::Right), Span::point(11));
}

#[test]
fn edges_of_file() {
    let s = stream("  x  ");
    assert_eq!(justify(&s, Span::point(2), Justify::Left), Span::point(0));
    assert_eq!(justify(&s, Span::point(3), Justify::Right), Span::point(5));
}

#[test]
fn inside_a_token_does_not_move() {
    let s = stream("message");
    assert_eq!(justify(&s, Span::point(3), Justify::Left), Span::point(3));
    assert_eq!(justify(&s, Span::point(3), Justify::Right), Span::point(3));
}

#[test]
fn nil_span_is_unchanged() {
    let s = stream("a");
    assert!(justify(&s, Span::NONE, Justify::Left).is_none());
}

#[test]
fn between_adds_missing_spaces() {
    let src = "int32 x 1;";
    let s = stream(src);

    // Right after `x`: a space is needed before but not after.
    let sub = insertion(&s, Span::point(7), "=", Justify::Between);
    assert_eq!(sub.snippet, " =");
    assert_eq!(apply(src, &sub), "int32 x = 1;");

    // Right before `1`: the other way around.
    let sub = insertion(&s, Span::point(8), "=", Justify::Between);
    assert_eq!(sub.snippet, "= ");
    assert_eq!(apply(src, &sub), "int32 x = 1;");
}

#[test]
fn between_tight_and_loose() {
    let loose = stream("x  1");
    assert_eq!(insertion(&loose, Span::point(2), "=", Justify::Between).snippet, "=");
    let tight = stream("a;b");
    assert_eq!(insertion(&tight, Span::point(1), "=", Justify::Between).snippet, " = ");
    assert_eq!(insertion(&tight, Span::point(0), "=", Justify::Between).snippet, "= ");
    assert_eq!(insertion(&tight, Span::point(3), "=", Justify::Between).snippet, " =");
}
