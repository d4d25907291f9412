//! Placement of suggested punctuation edits.
//!
//! A parser that notices a missing `;` knows the position of the token that
//! should have been followed by one, but that position is usually separated
//! from the next token by whitespace and comments. Justification decides on
//! which side of that gap the edit lands and how it is spaced:
//!
//! ```text
//! int32 x = 1   // comment        Left:    int32 x = 1;   // comment
//! int32 x 1;                      Between: int32 x = 1;
//! ```

use proto_ir::{Span, TokenStream};

use crate::Substitution;

/// Where an inserted piece of punctuation goes relative to the surrounding
/// skippable tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Glue to the end of the previous significant token (`;`, `,`).
    Left,
    /// Glue to the start of the next significant token.
    Right,
    /// Stay in place, separated by single spaces on both sides (`=`).
    Between,
}

/// Move an insertion point according to `justify`.
///
/// `span` is reduced to a point first: its end for [`Justify::Right`], its
/// start otherwise. The nil span is returned unchanged.
pub fn justify(stream: &TokenStream, span: Span, justify: Justify) -> Span {
    if span.is_none() {
        return span;
    }
    match justify {
        Justify::Left => Span::point(skip_back(stream, span.start)),
        Justify::Right => Span::point(skip_forward(stream, span.end)),
        Justify::Between => Span::point(span.start),
    }
}

/// An insertion of `text` at `at`, justified.
///
/// For [`Justify::Between`] a space is added on each side of `text` that is
/// not already next to whitespace or the edge of the file.
pub fn insertion(stream: &TokenStream, at: Span, text: &str, how: Justify) -> Substitution {
    let point = justify(stream, at, how);
    if how != Justify::Between || point.is_none() {
        return Substitution::new(point, text);
    }
    let bytes = stream.source().as_bytes();
    let p = point.start as usize;
    let space_before = p == 0 || bytes.get(p - 1).map_or(true, u8::is_ascii_whitespace);
    let space_after = bytes.get(p).map_or(true, u8::is_ascii_whitespace);

    let mut snippet = String::with_capacity(text.len() + 2);
    if !space_before {
        snippet.push(' ');
    }
    snippet.push_str(text);
    if !space_after {
        snippet.push(' ');
    }
    Substitution::new(point, snippet)
}

fn skip_back(stream: &TokenStream, mut at: u32) -> u32 {
    loop {
        let (before, after) = stream.around(at);
        let Some(before) = before else { return at };
        if after == Some(before) {
            return at;
        }
        let tok = stream.get(before);
        if !tok.is_skippable() {
            return at;
        }
        at = tok.span().start;
    }
}

fn skip_forward(stream: &TokenStream, mut at: u32) -> u32 {
    loop {
        let (before, after) = stream.around(at);
        let Some(after) = after else { return at };
        if before == Some(after) {
            return at;
        }
        let tok = stream.get(after);
        if !tok.is_skippable() {
            return at;
        }
        at = tok.span().end;
    }
}

#[cfg(test)]
mod tests;
