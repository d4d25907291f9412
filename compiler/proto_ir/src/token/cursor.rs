//! Token cursor.
//!
//! A [`Cursor`] walks either a contiguous run of natural tokens or the child
//! list of a synthetic tree token. Tree tokens are yielded as a unit (their
//! open half) in both directions; their contents are reached through
//! [`TokenRef::children`].
//!
//! `next`/`prev`/`peek` skip whitespace and comments, the `*_skippable`
//! variants do not.

use std::fmt;

use super::raw::{RawToken, Token};
use super::stream::TokenStream;
use super::token_ref::TokenRef;
use crate::Span;

#[derive(Copy, Clone)]
enum Range<'a> {
    /// Natural token indices `start..end`.
    Natural { start: usize, end: usize },
    /// Children of a synthetic tree token.
    Synthetic(&'a [RawToken]),
}

/// A saved cursor position, restored with [`Cursor::rewind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CursorMark(usize);

/// Peekable, seekable, bidirectional iterator over a bounded token range.
#[derive(Copy, Clone)]
pub struct Cursor<'a> {
    stream: &'a TokenStream,
    range: Range<'a>,
    /// Absolute natural index, or index into the synthetic child list.
    idx: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn natural(stream: &'a TokenStream, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= stream.natural_len());
        Cursor {
            stream,
            range: Range::Natural { start, end },
            idx: start,
        }
    }

    pub(crate) fn synthetic(stream: &'a TokenStream, children: &'a [RawToken]) -> Self {
        Cursor {
            stream,
            range: Range::Synthetic(children),
            idx: 0,
        }
    }

    pub(crate) fn empty(stream: &'a TokenStream) -> Self {
        Cursor::synthetic(stream, &[])
    }

    /// The stream being traversed.
    #[inline]
    pub fn stream(&self) -> &'a TokenStream {
        self.stream
    }

    fn bounds(&self) -> (usize, usize) {
        match self.range {
            Range::Natural { start, end } => (start, end),
            Range::Synthetic(children) => (0, children.len()),
        }
    }

    fn at(&self, idx: usize) -> TokenRef<'a> {
        match self.range {
            Range::Natural { .. } => TokenRef::new(self.stream, RawToken::natural(idx)),
            Range::Synthetic(children) => TokenRef::new(self.stream, children[idx]),
        }
    }

    /// Advance by one token, skippable ones included.
    pub fn next_skippable(&mut self) -> Option<TokenRef<'a>> {
        let (_, end) = self.bounds();
        if self.idx >= end {
            return None;
        }
        let tok = self.at(self.idx);
        self.idx += 1;
        if let Range::Natural { .. } = self.range {
            if tok.is_open() {
                if let Some(close) = tok.partner().and_then(|p| p.raw().natural_index()) {
                    self.idx = (close + 1).min(end);
                }
            }
        }
        Some(tok)
    }

    /// Step back by one token, skippable ones included.
    pub fn prev_skippable(&mut self) -> Option<TokenRef<'a>> {
        let (start, _) = self.bounds();
        if self.idx <= start {
            return None;
        }
        self.idx -= 1;
        let mut tok = self.at(self.idx);
        if let Range::Natural { .. } = self.range {
            if tok.is_close() {
                if let Some(open) = tok.partner() {
                    if let Some(o) = open.raw().natural_index() {
                        self.idx = o.max(start);
                        tok = open;
                    }
                }
            }
        }
        Some(tok)
    }

    /// The next token without advancing, skippable ones included.
    #[inline]
    pub fn peek_skippable(&self) -> Option<TokenRef<'a>> {
        let mut c = *self;
        c.next_skippable()
    }

    /// Advance past skippable tokens and return the next significant one.
    #[allow(
        clippy::should_implement_trait,
        reason = "cursor is Copy and walks in both directions"
    )]
    pub fn next(&mut self) -> Option<TokenRef<'a>> {
        loop {
            let tok = self.next_skippable()?;
            if !tok.is_skippable() {
                return Some(tok);
            }
        }
    }

    /// Step back past skippable tokens and return the previous significant one.
    pub fn prev(&mut self) -> Option<TokenRef<'a>> {
        loop {
            let tok = self.prev_skippable()?;
            if !tok.is_skippable() {
                return Some(tok);
            }
        }
    }

    /// The next significant token without advancing.
    #[inline]
    pub fn peek(&self) -> Option<TokenRef<'a>> {
        let mut c = *self;
        c.next()
    }

    /// The previous significant token without moving.
    #[inline]
    pub fn peek_prev(&self) -> Option<TokenRef<'a>> {
        let mut c = *self;
        c.prev()
    }

    /// Whether only skippable tokens remain.
    #[inline]
    pub fn done(&self) -> bool {
        self.peek().is_none()
    }

    /// Save the current position.
    #[inline]
    pub fn mark(&self) -> CursorMark {
        CursorMark(self.idx)
    }

    /// Restore a position saved with [`mark`](Self::mark).
    ///
    /// # Panics
    /// Panics if the mark lies outside this cursor's range.
    #[track_caller]
    pub fn rewind(&mut self, mark: CursorMark) {
        let (start, end) = self.bounds();
        assert!(
            (start..=end).contains(&mark.0),
            "rewind: mark {} outside cursor range {start}..{end}",
            mark.0
        );
        self.idx = mark.0;
    }

    /// Position the cursor so that the next token yielded is `tok`.
    ///
    /// # Panics
    /// Panics if `tok` is from another stream or not within this cursor's range.
    #[track_caller]
    pub fn seek(&mut self, tok: Token) {
        let raw = tok.raw_in(self.stream.id());
        let idx = match self.range {
            Range::Natural { start, end } => raw
                .natural_index()
                .filter(|i| (start..end).contains(i)),
            Range::Synthetic(children) => children.iter().position(|&c| c == raw),
        };
        match idx {
            Some(i) => self.idx = i,
            None => panic!("seek: {raw:?} is not within the cursor's range"),
        }
    }

    /// A zero-width span just past the last token yielded, or the first
    /// token's start if nothing was yielded yet. `NONE` in synthetic ranges.
    pub fn here(&self) -> Span {
        let mut c = *self;
        match c.prev_skippable() {
            Some(t) => t.outer_span().end_point(),
            None => match self.range {
                Range::Natural { start, .. } => self.start_point_of(start),
                Range::Synthetic(_) => Span::NONE,
            },
        }
    }

    fn start_point_of(&self, idx: usize) -> Span {
        if idx < self.stream.natural_len() {
            self.stream.natural_span(idx).start_point()
        } else {
            Span::point(self.stream.covered())
        }
    }

    /// Where the range ends: the closing delimiter when iterating the
    /// children of a tree token, a point at end of file otherwise.
    pub fn end_span(&self) -> Span {
        match self.range {
            Range::Natural { end, .. } if end < self.stream.natural_len() => {
                self.stream.natural_span(end)
            }
            Range::Natural { .. } => Span::point(self.stream.covered()),
            Range::Synthetic(_) => Span::NONE,
        }
    }

    /// Span of the next significant token, or [`end_span`](Self::end_span)
    /// when the range is exhausted.
    pub fn peek_span(&self) -> Span {
        self.peek().map_or_else(|| self.end_span(), TokenRef::span)
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.bounds();
        let kind = match self.range {
            Range::Natural { .. } => "natural",
            Range::Synthetic(_) => "synthetic",
        };
        write!(f, "Cursor({kind} {start}..{end} @ {})", self.idx)
    }
}
