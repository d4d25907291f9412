#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_util::tokenize;
use crate::SourceFile;

fn texts(mut cursor: Cursor<'_>) -> Vec<&str> {
    let mut out = Vec::new();
    while let Some(t) = cursor.next() {
        out.push(t.text());
    }
    out
}

#[test]
fn push_assigns_contiguous_spans() {
    let mut s = TokenStream::new(SourceFile::shared("a.proto", "ab  c"));
    let a = s.push(2, TokenKind::Ident);
    let sp = s.push(2, TokenKind::Space);
    let c = s.push(1, TokenKind::Ident);

    assert_eq!(s.get(a).span(), crate::Span::new(0, 2));
    assert_eq!(s.get(sp).span(), crate::Span::new(2, 4));
    assert_eq!(s.get(c).span(), crate::Span::new(4, 5));
    assert_eq!(s.get(a).text(), "ab");
    assert_eq!(s.get(c).kind(), TokenKind::Ident);
    assert!(s.get(sp).is_skippable());
}

#[test]
#[should_panic(expected = "frozen")]
fn push_after_freeze_panics() {
    let mut s = TokenStream::new(SourceFile::shared("a.proto", "ab"));
    s.push(1, TokenKind::Ident);
    s.freeze();
    s.push(1, TokenKind::Ident);
}

#[test]
#[should_panic(expected = "exceeds source length")]
fn push_past_source_end_panics() {
    let mut s = TokenStream::new(SourceFile::shared("a.proto", "ab"));
    s.push(3, TokenKind::Ident);
}

#[test]
#[should_panic(expected = "zero-length")]
fn push_zero_length_panics() {
    let mut s = TokenStream::new(SourceFile::shared("a.proto", "ab"));
    s.push(0, TokenKind::Ident);
}

#[test]
fn synthetic_tokens_after_freeze() {
    let mut s = tokenize("x");
    let id = s.new_ident("foo");
    let semi = s.new_punct(";");
    let st = s.new_string("a\"b");

    assert!(id.is_synthetic());
    assert_eq!(s.get(id).text(), "foo");
    assert_eq!(s.get(id).span(), crate::Span::NONE);
    assert_eq!(s.get(semi).kind(), TokenKind::Punct);
    assert_eq!(s.get(st).text(), "\"a\\\"b\"");
    assert_eq!(s.get(st).as_string().as_deref(), Some("a\"b"));
}

#[test]
fn around_boundaries_and_interior() {
    let s = tokenize("ab cd");
    let toks: Vec<Token> = s.iter_natural().map(TokenRef::token).collect();
    assert_eq!(toks.len(), 3);

    assert_eq!(s.around(0), (None, Some(toks[0])));
    assert_eq!(s.around(1), (Some(toks[0]), Some(toks[0])));
    assert_eq!(s.around(2), (Some(toks[0]), Some(toks[1])));
    assert_eq!(s.around(3), (Some(toks[1]), Some(toks[2])));
    assert_eq!(s.around(5), (Some(toks[2]), None));
}

#[test]
fn around_empty_stream() {
    let s = TokenStream::new(SourceFile::shared("a.proto", ""));
    assert_eq!(s.around(0), (None, None));
}

#[test]
fn natural_fusion() {
    let s = tokenize("a { b ( c ) } d");
    let brace = s.iter_natural().find(|t| t.text() == "{").map(TokenRef::token);
    let brace = s.get(brace.expect("no brace"));

    assert!(brace.is_open());
    assert!(!brace.is_leaf());
    let (open, close) = brace.start_end();
    assert_eq!(open, brace);
    assert_eq!(close.text(), "}");
    assert!(close.is_close());
    assert_eq!(close.start_end(), (open, close));
    assert_eq!(brace.outer_span(), crate::Span::new(2, 13));

    assert_eq!(texts(brace.children()), vec!["b", "("]);
    assert_eq!(texts(s.cursor()), vec!["a", "{", "d"]);
}

#[test]
fn unmatched_brackets_stay_leaves() {
    let s = tokenize("a ( b");
    let paren = s.iter_natural().find(|t| t.text() == "(");
    let paren = paren.expect("no paren");
    assert!(paren.is_leaf());
    assert_eq!(paren.start_end(), (paren, paren));
    assert!(paren.children().done());
}

#[test]
fn synthetic_fusion() {
    let mut s = tokenize("");
    let open = s.new_punct("{");
    let x = s.new_ident("x");
    let semi = s.new_punct(";");
    let close = s.new_punct("}");
    s.fuse(open, close, [x, semi]);

    let o = s.get(open);
    let c = s.get(close);
    assert!(o.is_open());
    assert!(c.is_close());
    assert_eq!(o.start_end(), (o, c));
    assert_eq!(c.start_end(), (o, c));
    assert_eq!(texts(o.children()), vec!["x", ";"]);
    assert_eq!(texts(c.children()), vec!["x", ";"]);
    assert!(s.get(x).children().done());
}

#[test]
#[should_panic(expected = "cannot fuse natural tokens")]
fn fuse_rejects_natural() {
    let mut s = tokenize("{}");
    let a = s.iter_natural().map(TokenRef::token).next();
    let a = a.expect("empty");
    let b = s.new_punct("}");
    s.fuse(a, b, []);
}

#[test]
#[should_panic(expected = "must be leaves")]
fn fuse_rejects_non_leaf() {
    let mut s = tokenize("");
    let a = s.new_punct("(");
    let b = s.new_punct(")");
    let c = s.new_punct(")");
    s.fuse(a, b, []);
    s.fuse(a, c, []);
}

#[test]
#[should_panic(expected = "belongs to context")]
fn foreign_token_panics() {
    let mut a = tokenize("x");
    let b = tokenize("y");
    let foreign = b.iter_natural().map(TokenRef::token).next();
    let foreign = foreign.expect("empty");
    let _ = a.new_ident("z");
    let _ = a.get(foreign);
}

#[test]
fn cursor_skips_trivia_and_rewinds() {
    let s = tokenize("a  b ; c");
    let mut c = s.cursor();
    let mark = c.mark();
    assert_eq!(c.next().map(TokenRef::text), Some("a"));
    assert_eq!(c.peek_skippable().map(TokenRef::kind), Some(TokenKind::Space));
    assert_eq!(c.peek().map(TokenRef::text), Some("b"));
    c.rewind(mark);
    assert_eq!(c.peek().map(TokenRef::text), Some("a"));
    assert_eq!(c.prev(), None);
}

#[test]
fn cursor_seek() {
    let s = tokenize("a b c");
    let b = s.iter_natural().find(|t| t.text() == "b").map(TokenRef::token);
    let mut c = s.cursor();
    c.seek(b.expect("no b"));
    assert_eq!(c.next().map(TokenRef::text), Some("b"));
    assert_eq!(c.next().map(TokenRef::text), Some("c"));
    assert_eq!(c.next(), None);
}

#[test]
#[should_panic(expected = "not within the cursor's range")]
fn cursor_seek_outside_range() {
    let s = tokenize("a { b } c");
    let brace = s.iter_natural().find(|t| t.text() == "{");
    let brace = brace.expect("no brace");
    let c_tok = s.iter_natural().find(|t| t.text() == "c").map(TokenRef::token);
    let mut inner = brace.children();
    inner.seek(c_tok.expect("no c"));
}

#[test]
fn cursor_end_span() {
    let s = tokenize("a { b }");
    assert_eq!(s.cursor().end_span(), crate::Span::point(7));
    let brace = s.iter_natural().find(|t| t.text() == "{");
    let brace = brace.expect("no brace");
    assert_eq!(brace.children().end_span(), crate::Span::new(6, 7));
}

#[test]
fn literal_accessors() {
    let mut s = TokenStream::new(SourceFile::shared("a.proto", "0x1F 017 1.5 inf"));
    let hex = s.push(4, TokenKind::Number);
    s.push(1, TokenKind::Space);
    let oct = s.push(3, TokenKind::Number);
    s.push(1, TokenKind::Space);
    let flt = s.push(3, TokenKind::Number);
    s.push(1, TokenKind::Space);
    let inf = s.push(3, TokenKind::Ident);

    assert_eq!(s.get(hex).as_int(), Some(31));
    assert_eq!(s.get(oct).as_int(), Some(15));
    assert_eq!(s.get(flt).as_int(), None);
    assert_eq!(s.get(flt).as_float(), Some(1.5));
    assert_eq!(s.get(inf).as_float(), Some(f64::INFINITY));
    assert!(s.get(inf).is_keyword("inf"));
}

#[test]
fn number_literals() {
    use literal::{parse_number, NumberError, NumberValue};
    assert_eq!(parse_number("42"), Ok(NumberValue::Int(42)));
    assert_eq!(parse_number("0"), Ok(NumberValue::Int(0)));
    assert_eq!(parse_number("0x"), Err(NumberError::Malformed));
    assert_eq!(parse_number("09"), Err(NumberError::Malformed));
    assert_eq!(
        parse_number("18446744073709551616"),
        Err(NumberError::Overflow)
    );
    assert_eq!(
        parse_number("18446744073709551615"),
        Ok(NumberValue::Int(u64::MAX))
    );
    assert_eq!(parse_number("1e3"), Ok(NumberValue::Float(1000.0)));
    assert_eq!(parse_number(".5"), Ok(NumberValue::Float(0.5)));
}

#[test]
fn string_escapes() {
    let mut errors = Vec::new();
    let bytes = literal::unescape(r#""a\n\x41\101é\q""#, |e| errors.push(e));
    assert_eq!(bytes, "a\nAAé".as_bytes());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, literal::EscapeErrorKind::Unknown('q'));
    assert_eq!((errors[0].start, errors[0].end), (14, 16));

    assert_eq!(literal::unescape("'single'", |_| {}), b"single");
    assert_eq!(literal::unescape("\"unterminated", |_| {}), b"unterminated");
}

fn lengths() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..6, 1..24)
}

proptest! {
    #[test]
    fn around_after_push(lens in lengths()) {
        let total: usize = lens.iter().sum();
        let src = "x".repeat(total);
        let mut s = TokenStream::new(Arc::new(SourceFile::new("p.proto", src)));
        let toks: Vec<Token> = lens.iter().map(|&n| s.push(n, TokenKind::Ident)).collect();

        for (i, tok) in toks.iter().enumerate() {
            let end = s.get(*tok).span().end;
            prop_assert_eq!(s.around(end), (Some(*tok), toks.get(i + 1).copied()));
            let span = s.get(*tok).span();
            if span.len() > 1 {
                prop_assert_eq!(s.around(span.start + 1), (Some(*tok), Some(*tok)));
            }
        }
    }

    #[test]
    fn fused_start_end(n in 0usize..5) {
        let mut s = tokenize("");
        let open = s.new_punct("[");
        let close = s.new_punct("]");
        let kids: Vec<Token> = (0..n).map(|i| s.new_ident(&format!("k{i}"))).collect();
        s.fuse(open, close, kids);
        let (o, c) = (s.get(open), s.get(close));
        prop_assert_eq!(o.start_end(), (o, c));
        prop_assert_eq!(c.start_end(), (o, c));
        prop_assert_eq!(texts(o.children()).len(), n);
    }

    #[test]
    fn cursor_next_prev_symmetry(src in "[a ;(){}]{0,40}") {
        let s = tokenize(&src);
        let mut c = s.cursor();
        prop_assert_eq!(c.prev_skippable(), None);

        let mut marks = vec![c.mark()];
        while c.next_skippable().is_some() {
            marks.push(c.mark());
        }
        prop_assert_eq!(c.next_skippable(), None);

        for pair in marks.windows(2) {
            let (before, after) = (pair[0], pair[1]);
            let mut fwd = s.cursor();
            fwd.rewind(before);
            let tok = fwd.next_skippable();
            prop_assert_eq!(fwd.mark(), after);
            let back = fwd.prev_skippable();
            prop_assert_eq!(back, tok);
            prop_assert_eq!(fwd.mark(), before);

            let mut bwd = s.cursor();
            bwd.rewind(after);
            let tok = bwd.prev_skippable();
            prop_assert_eq!(bwd.mark(), before);
            prop_assert_eq!(bwd.next_skippable(), tok);
            prop_assert_eq!(bwd.mark(), after);
        }
    }
}

proptest! {
    /// Cursors over the children of a synthetic tree walk both ways alike,
    /// stepping over a nested tree as one token.
    #[test]
    fn synthetic_cursor_symmetry(n in 0usize..8, nested in any::<bool>()) {
        let mut s = tokenize("");
        let open = s.new_punct("{");
        let close = s.new_punct("}");
        let mut kids: Vec<Token> = (0..n).map(|i| s.new_ident(&format!("k{i}"))).collect();
        if nested {
            let (o, c) = (s.new_punct("("), s.new_punct(")"));
            let inner = s.new_ident("inner");
            s.fuse(o, c, [inner]);
            kids.insert(n / 2, o);
        }
        s.fuse(open, close, kids.clone());

        let mut c = s.get(open).children();
        prop_assert_eq!(c.prev(), None);
        let mut forward = Vec::new();
        while let Some(tok) = c.next() {
            forward.push(tok.token());
        }
        prop_assert_eq!(&forward, &kids);
        let mut backward = Vec::new();
        while let Some(tok) = c.prev() {
            backward.push(tok.token());
        }
        backward.reverse();
        prop_assert_eq!(&backward, &kids);

        let mut c = s.get(open).children();
        for _ in 0..kids.len() {
            let before = c.mark();
            let tok = c.next();
            prop_assert_eq!(c.prev(), tok);
            prop_assert_eq!(c.mark(), before);
            c.next();
        }
        prop_assert!(c.done());
    }
}
