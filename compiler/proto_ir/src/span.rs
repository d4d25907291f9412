//! Source location spans.
//!
//! Provides a compact 8-byte span representation. A span is a half-open
//! byte range into the text of the file whose token stream produced it.
//!
//! A span may be *nil* ([`Span::NONE`]): no source location applies, e.g.
//! for synthetic tokens or children that the parser could not find. The nil
//! span is encoded as `start > end`, which makes it the identity element of
//! [`Span::join`]: `min(x, u32::MAX) == x` and `max(x, 0) == x`.

use std::fmt;

use thiserror::Error;

/// Error when creating a span from a range that exceeds `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// Span start position exceeds `u32::MAX`.
    #[error("span start {0} (0x{0:X}) exceeds u32::MAX (0x{max:X})", max = u32::MAX)]
    StartTooLarge(usize),
    /// Span end position exceeds `u32::MAX`.
    #[error("span end {0} (0x{0:X}) exceeds u32::MAX (0x{max:X})", max = u32::MAX)]
    EndTooLarge(usize),
    /// Span end precedes its start.
    #[error("span end {end} precedes start {start}")]
    Inverted { start: usize, end: usize },
}

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Default for Span {
    fn default() -> Self {
        Span::NONE
    }
}

impl Span {
    /// The nil span: no source location applies.
    pub const NONE: Span = Span {
        start: u32::MAX,
        end: 0,
    };

    /// Create a new span.
    ///
    /// # Panics
    /// Panics in debug builds if `end < start`.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span end precedes start");
        Span { start, end }
    }

    /// Try to create a span from a byte range.
    ///
    /// Returns an error if the range exceeds `u32::MAX` bytes or is inverted.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        if range.end < range.start {
            return Err(SpanError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    /// Create from a byte range.
    ///
    /// # Panics
    /// Panics if the range exceeds `u32::MAX` bytes.
    #[inline]
    #[track_caller]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::try_from_range(range).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Whether this is the nil span.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.start > self.end
    }

    /// Whether this span refers to an actual source location.
    #[inline]
    pub const fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Converts the nil span into `None`.
    #[inline]
    pub const fn get(self) -> Option<Span> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }

    /// Length of the span in bytes. The nil span has length zero.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if span covers no bytes (including the nil span).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        other.is_some() && self.start <= other.start && other.end <= self.end
    }

    /// Join two spans into their convex hull.
    ///
    /// Joining with [`Span::NONE`] returns the other span unchanged.
    #[inline]
    #[must_use]
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Join every span produced by `spans`; the nil span if there are none.
    pub fn join_all(spans: impl IntoIterator<Item = Span>) -> Span {
        spans.into_iter().fold(Span::NONE, Span::join)
    }

    /// Extend span to include another position.
    #[inline]
    #[must_use]
    pub fn extend_to(self, end: u32) -> Span {
        if self.is_none() {
            return Span::point(end);
        }
        Span {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// The zero-length span at the start of this span.
    #[inline]
    #[must_use]
    pub fn start_point(self) -> Span {
        if self.is_none() {
            return self;
        }
        Span::point(self.start)
    }

    /// The zero-length span at the end of this span.
    #[inline]
    #[must_use]
    pub fn end_point(self) -> Span {
        if self.is_none() {
            return self;
        }
        Span::point(self.end)
    }

    /// Convert to a `std::ops::Range`. The nil span maps to `0..0`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        if self.is_none() {
            return 0..0;
        }
        self.start as usize..self.end as usize
    }

    /// Slice `source` by this span.
    ///
    /// Returns the empty string for the nil span or a span outside `source`.
    pub fn text(self, source: &str) -> &str {
        source.get(self.to_range()).unwrap_or("")
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "<none>");
        }
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Anything with a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl<T: Spanned> Spanned for Option<T> {
    fn span(&self) -> Span {
        self.as_ref().map_or(Span::NONE, Spanned::span)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests;
