//! Borrowed token views.

use std::fmt;

use super::cursor::Cursor;
use super::literal::{self, NumberValue};
use super::raw::{RawToken, Token};
use super::stream::{Fusion, TokenStream};
use super::TokenKind;
use crate::Span;

/// A token resolved against its stream.
///
/// Cheap to copy. Detach with [`token`](Self::token) to store it.
#[derive(Copy, Clone)]
pub struct TokenRef<'a> {
    stream: &'a TokenStream,
    raw: RawToken,
}

impl<'a> TokenRef<'a> {
    /// # Panics
    /// Panics if `raw` is out of bounds for `stream`.
    #[track_caller]
    pub(crate) fn new(stream: &'a TokenStream, raw: RawToken) -> Self {
        match (raw.natural_index(), raw.synthetic_index()) {
            (Some(i), _) => assert!(
                i < stream.natural_len(),
                "natural token {i} out of bounds"
            ),
            (_, Some(i)) => assert!(
                i < stream.synthetic_len(),
                "synthetic token {i} out of bounds"
            ),
            _ => panic!("cannot resolve the absent token"),
        }
        TokenRef { stream, raw }
    }

    /// The stream this token lives in.
    #[inline]
    pub fn stream(self) -> &'a TokenStream {
        self.stream
    }

    /// The compact handle.
    #[inline]
    pub fn raw(self) -> RawToken {
        self.raw
    }

    /// Detach from the stream.
    #[inline]
    pub fn token(self) -> Token {
        Token::new(self.stream.id(), self.raw)
    }

    /// Whether this token is backed by source text.
    #[inline]
    pub fn is_natural(self) -> bool {
        self.raw.is_natural()
    }

    /// Lexical category.
    pub fn kind(self) -> TokenKind {
        match self.raw.natural_index() {
            Some(i) => self.stream.natural(i).kind(),
            None => self.synth_kind(),
        }
    }

    fn synth_kind(self) -> TokenKind {
        self.raw
            .synthetic_index()
            .map_or(TokenKind::Unrecognized, |i| self.stream.synthetic(i).kind)
    }

    /// Whether whitespace or comment.
    #[inline]
    pub fn is_skippable(self) -> bool {
        self.kind().is_skippable()
    }

    /// The token's own text: source bytes for natural tokens, stored text
    /// for synthetic ones. For a tree token this is the delimiter only.
    pub fn text(self) -> &'a str {
        match (self.raw.natural_index(), self.raw.synthetic_index()) {
            (Some(i), _) => self.stream.natural_span(i).text(self.stream.source()),
            (_, Some(i)) => &self.stream.synthetic(i).text,
            _ => "",
        }
    }

    /// Source location; [`Span::NONE`] for synthetic tokens.
    pub fn span(self) -> Span {
        self.raw
            .natural_index()
            .map_or(Span::NONE, |i| self.stream.natural_span(i))
    }

    /// Span from the open delimiter through the close delimiter of a tree
    /// token; the token's own span for a leaf.
    pub fn outer_span(self) -> Span {
        let (open, close) = self.start_end();
        open.span().join(close.span())
    }

    /// Whether this token has no delimiter partner.
    pub fn is_leaf(self) -> bool {
        self.partner().is_none()
    }

    /// Whether this is the opening half of a delimiter pair.
    pub fn is_open(self) -> bool {
        match self.raw.natural_index() {
            Some(i) => self.stream.natural(i).partner_offset() > 0,
            None => matches!(self.fusion(), Some(Fusion::Open { .. })),
        }
    }

    /// Whether this is the closing half of a delimiter pair.
    pub fn is_close(self) -> bool {
        match self.raw.natural_index() {
            Some(i) => self.stream.natural(i).partner_offset() < 0,
            None => matches!(self.fusion(), Some(Fusion::Close { .. })),
        }
    }

    fn fusion(self) -> Option<&'a Fusion> {
        self.raw
            .synthetic_index()
            .map(|i| &self.stream.synthetic(i).fusion)
    }

    /// The other half of a delimiter pair.
    pub fn partner(self) -> Option<TokenRef<'a>> {
        if let Some(i) = self.raw.natural_index() {
            let offset = self.stream.natural(i).partner_offset();
            if offset == 0 {
                return None;
            }
            let j = i.checked_add_signed(offset as isize)?;
            return Some(TokenRef::new(self.stream, RawToken::natural(j)));
        }
        match self.fusion()? {
            Fusion::Leaf => None,
            Fusion::Open { close, .. } => Some(TokenRef::new(self.stream, *close)),
            Fusion::Close { open } => Some(TokenRef::new(self.stream, *open)),
        }
    }

    /// The open and close halves of a tree token, whichever half this is.
    /// A leaf returns itself twice.
    pub fn start_end(self) -> (TokenRef<'a>, TokenRef<'a>) {
        match self.partner() {
            None => (self, self),
            Some(p) if self.is_open() => (self, p),
            Some(p) => (p, self),
        }
    }

    /// A cursor over the tokens between the delimiters of a tree token.
    /// Empty for leaves.
    pub fn children(self) -> Cursor<'a> {
        let (open, close) = self.start_end();
        if open.raw == close.raw {
            return Cursor::empty(self.stream);
        }
        match (open.raw.natural_index(), close.raw.natural_index()) {
            (Some(o), Some(c)) => Cursor::natural(self.stream, o + 1, c),
            _ => match open.fusion() {
                Some(Fusion::Open { children, .. }) => Cursor::synthetic(self.stream, children),
                _ => Cursor::empty(self.stream),
            },
        }
    }

    /// Whether this is the identifier `word`.
    #[inline]
    pub fn is_keyword(self, word: &str) -> bool {
        self.kind() == TokenKind::Ident && self.text() == word
    }

    /// Whether this is the punctuation `punct`.
    #[inline]
    pub fn is_punct(self, punct: &str) -> bool {
        self.kind() == TokenKind::Punct && self.text() == punct
    }

    /// Value of an integer literal; `None` for other tokens or on overflow.
    pub fn as_int(self) -> Option<u64> {
        if self.kind() != TokenKind::Number {
            return None;
        }
        match literal::parse_number(self.text()) {
            Ok(NumberValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    /// Value of a number literal as a float. The identifiers `inf` and `nan`
    /// are accepted as well.
    pub fn as_float(self) -> Option<f64> {
        match self.kind() {
            TokenKind::Number => match literal::parse_number(self.text()).ok()? {
                NumberValue::Float(f) => Some(f),
                #[allow(clippy::cast_precision_loss, reason = "float conversion is the point")]
                NumberValue::Int(i) => Some(i as f64),
            },
            TokenKind::Ident => match self.text() {
                "inf" => Some(f64::INFINITY),
                "nan" => Some(f64::NAN),
                _ => None,
            },
            _ => None,
        }
    }

    /// Decoded bytes of a string literal. Invalid escapes are dropped.
    pub fn as_bytes(self) -> Option<Vec<u8>> {
        (self.kind() == TokenKind::String).then(|| literal::unescape(self.text(), |_| {}))
    }

    /// Decoded value of a string literal, lossily converted to UTF-8.
    pub fn as_string(self) -> Option<String> {
        self.as_bytes()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }
}

impl PartialEq for TokenRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.stream, other.stream) && self.raw == other.raw
    }
}

impl Eq for TokenRef<'_> {}

impl fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} {:?}", self.raw, self.kind(), self.text())?;
        if let Some(p) = self.partner() {
            write!(f, " <-> {:?}", p.raw)?;
        }
        f.write_str(")")
    }
}
