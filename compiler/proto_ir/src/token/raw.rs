//! Token handle encoding.

use std::fmt;

use crate::ContextId;

/// Compact token handle shared by natural and synthetic tokens.
///
/// - `0`: no token
/// - `n > 0`: natural token at index `n - 1`
/// - `n < 0`: synthetic token at index `!n` (so `-1` is synthetic `0`)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(transparent)]
pub struct RawToken(i32);

impl RawToken {
    /// The absent token.
    pub const NONE: RawToken = RawToken(0);

    /// Handle for the natural token at `index`.
    ///
    /// # Panics
    /// Panics if the index does not fit the positive half of the handle space.
    #[inline]
    #[track_caller]
    pub(crate) fn natural(index: usize) -> Self {
        match i32::try_from(index) {
            Ok(i) if i < i32::MAX => RawToken(i + 1),
            _ => panic!("natural token index {index} exceeds handle space"),
        }
    }

    /// Handle for the synthetic token at `index`.
    ///
    /// # Panics
    /// Panics if the index does not fit the negative half of the handle space.
    #[inline]
    #[track_caller]
    pub(crate) fn synthetic(index: usize) -> Self {
        match i32::try_from(index) {
            Ok(i) => RawToken(!i),
            Err(_) => panic!("synthetic token index {index} exceeds handle space"),
        }
    }

    /// Whether this is the absent token.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this refers to a token backed by source text.
    #[inline]
    pub const fn is_natural(self) -> bool {
        self.0 > 0
    }

    /// Whether this refers to a token created by tooling.
    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.0 < 0
    }

    /// Index into the natural token table, if natural.
    #[inline]
    #[allow(
        clippy::cast_sign_loss,
        reason = "guarded by the positivity check"
    )]
    pub const fn natural_index(self) -> Option<usize> {
        if self.0 > 0 {
            Some((self.0 - 1) as usize)
        } else {
            None
        }
    }

    /// Index into the synthetic token pool, if synthetic.
    #[inline]
    #[allow(
        clippy::cast_sign_loss,
        reason = "!x is non-negative for negative x"
    )]
    pub const fn synthetic_index(self) -> Option<usize> {
        if self.0 < 0 {
            Some((!self.0) as usize)
        } else {
            None
        }
    }

    /// The raw handle value.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Debug for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(i) = self.natural_index() {
            write!(f, "Nat({i})")
        } else if let Some(i) = self.synthetic_index() {
            write!(f, "Syn({i})")
        } else {
            write!(f, "NoToken")
        }
    }
}

/// A token handle detached from its stream.
///
/// Carries the [`ContextId`] of the stream that minted it so that it can be
/// stored in syntax tree nodes and resolved later with
/// [`TokenStream::get`](crate::TokenStream::get). Absent tokens are modelled
/// as `Option<Token>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    ctx: ContextId,
    raw: RawToken,
}

impl Token {
    #[inline]
    pub(crate) const fn new(ctx: ContextId, raw: RawToken) -> Self {
        Token { ctx, raw }
    }

    /// The stamp of the stream that minted this token.
    #[inline]
    pub const fn context(self) -> ContextId {
        self.ctx
    }

    /// The compact handle.
    #[inline]
    pub const fn raw(self) -> RawToken {
        self.raw
    }

    /// Whether this token is backed by source text.
    #[inline]
    pub const fn is_natural(self) -> bool {
        self.raw.is_natural()
    }

    /// Whether this token was created by tooling.
    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.raw.is_synthetic()
    }

    /// Check that this token was minted by `ctx`, returning its raw handle.
    #[inline]
    #[track_caller]
    pub fn raw_in(self, ctx: ContextId) -> RawToken {
        ctx.check(self.ctx, "token");
        self.raw
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.raw, self.ctx)
    }
}

/// Strip an optional detached token down to its raw handle, checking its stamp.
#[inline]
#[track_caller]
pub fn raw_opt(tok: Option<Token>, ctx: ContextId) -> RawToken {
    tok.map_or(RawToken::NONE, |t| t.raw_in(ctx))
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{RawToken, Token};
    crate::static_assert_size!(RawToken, 4);
    crate::static_assert_size!(Token, 8);
    crate::static_assert_size!(Option<Token>, 8);
}
