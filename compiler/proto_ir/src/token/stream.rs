//! Token stream storage.
//!
//! Natural tokens live in one dense table of `(end, meta)` pairs: the start of
//! a token is the end of the previous one, so spans cost four bytes per token.
//! The metadata word packs the [`TokenKind`] into its low bits and a signed
//! offset to the matching delimiter into the rest. Synthetic tokens are kept in
//! a separate pool and own their text.

use std::fmt;
use std::sync::Arc;

use super::cursor::Cursor;
use super::literal;
use super::raw::{RawToken, Token};
use super::token_ref::TokenRef;
use super::TokenKind;
use crate::{ContextId, SourceFile, Span};

/// A natural token: end offset plus packed kind and partner offset.
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) struct Natural {
    pub(crate) end: u32,
    pub(crate) meta: i32,
}

impl Natural {
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "masked to the low four bits"
    )]
    pub(crate) const fn kind(self) -> TokenKind {
        TokenKind::from_bits((self.meta & TokenKind::MASK) as u8)
    }

    /// Signed distance to the partner delimiter; zero for leaves.
    #[inline]
    pub(crate) const fn partner_offset(self) -> i32 {
        self.meta >> TokenKind::BITS
    }
}

/// How a synthetic token participates in delimiter pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Fusion {
    Leaf,
    Open {
        close: RawToken,
        children: Vec<RawToken>,
    },
    Close {
        open: RawToken,
    },
}

/// A token created by tooling rather than read from source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Synthetic {
    pub(crate) text: Box<str>,
    pub(crate) kind: TokenKind,
    pub(crate) fusion: Fusion,
}

/// Token storage for one source file.
///
/// Natural tokens are appended by the lexer with [`push`](Self::push) and
/// become read-only after [`freeze`](Self::freeze). Synthetic tokens can be
/// minted at any time.
pub struct TokenStream {
    id: ContextId,
    file: Arc<SourceFile>,
    nats: Vec<Natural>,
    synths: Vec<Synthetic>,
    frozen: bool,
}

impl TokenStream {
    /// Largest distance between two fused natural delimiters, in tokens.
    pub const MAX_PARTNER_OFFSET: usize = (1 << (31 - TokenKind::BITS)) - 1;

    /// Create an empty stream over `file`, minting a fresh [`ContextId`].
    pub fn new(file: Arc<SourceFile>) -> Self {
        TokenStream {
            id: ContextId::fresh(),
            file,
            nats: Vec::new(),
            synths: Vec::new(),
            frozen: false,
        }
    }

    /// The stamp carried by every token minted here.
    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The source file the natural tokens refer into.
    #[inline]
    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &str {
        self.file.text()
    }

    /// Number of natural tokens.
    #[inline]
    pub fn natural_len(&self) -> usize {
        self.nats.len()
    }

    /// Number of synthetic tokens.
    #[inline]
    pub fn synthetic_len(&self) -> usize {
        self.synths.len()
    }

    /// Whether natural tokens can no longer be pushed or fused.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// End offset of the last natural token, i.e. how much source is covered.
    #[inline]
    pub fn covered(&self) -> u32 {
        self.nats.last().map_or(0, |n| n.end)
    }

    /// Append the next natural token, starting where the previous one ended.
    ///
    /// # Panics
    /// Panics if the stream is frozen, `len` is zero, or the token would
    /// extend past the end of the source.
    #[track_caller]
    pub fn push(&mut self, len: usize, kind: TokenKind) -> Token {
        assert!(!self.frozen, "push: token stream is frozen");
        assert!(len > 0, "push: zero-length token");
        let start = self.covered();
        let end = u32::try_from(len)
            .ok()
            .and_then(|l| start.checked_add(l))
            .filter(|&end| end <= self.file.len());
        let Some(end) = end else {
            panic!(
                "push: token of length {len} at offset {start} exceeds source length {}",
                self.file.len()
            );
        };
        let raw = RawToken::natural(self.nats.len());
        self.nats.push(Natural {
            end,
            meta: kind as i32,
        });
        Token::new(self.id, raw)
    }

    /// Record that two natural leaves are a matched delimiter pair.
    ///
    /// # Panics
    /// Panics if the stream is frozen, either token is not a natural leaf of
    /// this stream, `open` does not precede `close`, or the pair is further
    /// apart than [`MAX_PARTNER_OFFSET`](Self::MAX_PARTNER_OFFSET).
    #[track_caller]
    pub fn fuse_natural(&mut self, open: Token, close: Token) {
        assert!(!self.frozen, "fuse_natural: token stream is frozen");
        let (Some(o), Some(c)) = (
            open.raw_in(self.id).natural_index(),
            close.raw_in(self.id).natural_index(),
        ) else {
            panic!("fuse_natural: both tokens must be natural");
        };
        assert!(o < c, "fuse_natural: open token must precede close token");
        assert!(
            c - o <= Self::MAX_PARTNER_OFFSET,
            "fuse_natural: delimiters are {} tokens apart",
            c - o
        );
        assert!(
            self.nats[o].partner_offset() == 0 && self.nats[c].partner_offset() == 0,
            "fuse_natural: both tokens must be leaves"
        );
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            reason = "bounded by MAX_PARTNER_OFFSET"
        )]
        let offset = (c - o) as i32;
        self.nats[o].meta |= offset << TokenKind::BITS;
        self.nats[c].meta |= (-offset) << TokenKind::BITS;
    }

    /// Make natural tokens read-only.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn push_synthetic(&mut self, text: Box<str>, kind: TokenKind) -> Token {
        let raw = RawToken::synthetic(self.synths.len());
        self.synths.push(Synthetic {
            text,
            kind,
            fusion: Fusion::Leaf,
        });
        Token::new(self.id, raw)
    }

    /// Mint a synthetic identifier.
    pub fn new_ident(&mut self, name: &str) -> Token {
        self.push_synthetic(name.into(), TokenKind::Ident)
    }

    /// Mint a synthetic punctuation token, e.g. `;` or `{`.
    pub fn new_punct(&mut self, punct: &str) -> Token {
        self.push_synthetic(punct.into(), TokenKind::Punct)
    }

    /// Mint a synthetic string literal whose decoded value is `value`.
    pub fn new_string(&mut self, value: &str) -> Token {
        self.push_synthetic(literal::quote(value).into_boxed_str(), TokenKind::String)
    }

    /// Mint a synthetic number literal from its textual form.
    pub fn new_number(&mut self, text: &str) -> Token {
        self.push_synthetic(text.into(), TokenKind::Number)
    }

    /// Fuse two synthetic leaves into a tree token with the given children.
    ///
    /// # Panics
    /// Panics if either delimiter is natural, already fused, from another
    /// context, or if `open == close`; also if any child is from another
    /// context.
    #[track_caller]
    pub fn fuse(&mut self, open: Token, close: Token, children: impl IntoIterator<Item = Token>) {
        let open_raw = open.raw_in(self.id);
        let close_raw = close.raw_in(self.id);
        let (Some(o), Some(c)) = (open_raw.synthetic_index(), close_raw.synthetic_index()) else {
            panic!("fuse: cannot fuse natural tokens");
        };
        assert!(o != c, "fuse: a token cannot be fused with itself");
        assert!(
            self.synths[o].fusion == Fusion::Leaf && self.synths[c].fusion == Fusion::Leaf,
            "fuse: both tokens must be leaves"
        );
        let id = self.id;
        let children = children.into_iter().map(|t| t.raw_in(id)).collect();
        self.synths[o].fusion = Fusion::Open {
            close: close_raw,
            children,
        };
        self.synths[c].fusion = Fusion::Close { open: open_raw };
    }

    /// Tokens immediately before and after a byte offset.
    ///
    /// At a token boundary this is the pair of adjacent tokens; at the start
    /// or end of the file one side is `None`. An offset strictly inside a
    /// token returns that token on both sides.
    pub fn around(&self, offset: u32) -> (Option<Token>, Option<Token>) {
        if self.nats.is_empty() {
            return (None, None);
        }
        if offset == 0 {
            return (None, self.natural_token(0));
        }
        let i = self.nats.partition_point(|n| n.end < offset);
        if i == self.nats.len() {
            return (self.natural_token(i - 1), None);
        }
        if self.nats[i].end == offset {
            (self.natural_token(i), self.natural_token(i + 1))
        } else {
            let tok = self.natural_token(i);
            (tok, tok)
        }
    }

    /// Resolve a detached token against this stream.
    ///
    /// # Panics
    /// Panics if the token was minted by another stream.
    #[inline]
    #[track_caller]
    pub fn get(&self, tok: Token) -> TokenRef<'_> {
        TokenRef::new(self, tok.raw_in(self.id))
    }

    /// Resolve a raw handle, `None` for [`RawToken::NONE`].
    #[inline]
    pub fn resolve(&self, raw: RawToken) -> Option<TokenRef<'_>> {
        (!raw.is_none()).then(|| TokenRef::new(self, raw))
    }

    /// A cursor over every natural token.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::natural(self, 0, self.nats.len())
    }

    /// All natural tokens in order, skippable ones included.
    pub fn iter_natural(&self) -> impl Iterator<Item = TokenRef<'_>> + '_ {
        (0..self.nats.len()).map(move |i| TokenRef::new(self, RawToken::natural(i)))
    }

    #[inline]
    fn natural_token(&self, index: usize) -> Option<Token> {
        (index < self.nats.len()).then(|| Token::new(self.id, RawToken::natural(index)))
    }

    #[inline]
    pub(crate) fn natural(&self, index: usize) -> Natural {
        self.nats[index]
    }

    #[inline]
    pub(crate) fn natural_span(&self, index: usize) -> Span {
        let start = if index == 0 { 0 } else { self.nats[index - 1].end };
        Span::new(start, self.nats[index].end)
    }

    #[inline]
    pub(crate) fn synthetic(&self, index: usize) -> &Synthetic {
        &self.synths[index]
    }
}

impl fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStream")
            .field("id", &self.id)
            .field("file", &self.file.path())
            .field("natural", &self.nats.len())
            .field("synthetic", &self.synths.len())
            .field("frozen", &self.frozen)
            .finish()
    }
}
