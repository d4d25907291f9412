//! Per-file identity stamps.
//!
//! Every token stream mints a fresh [`ContextId`]; the [`Context`] built on
//! top of it adopts the same stamp. Detached handles ([`Token`], node ids)
//! carry the stamp of the file that minted them so that storage can refuse
//! handles that belong to another file.
//!
//! [`Context`]: crate::ast::Context
//! [`Token`]: crate::Token

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CONTEXT: AtomicU32 = AtomicU32::new(1);

/// Identity of one file's token stream and syntax tree storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ContextId(NonZeroU32);

impl ContextId {
    /// Mint a stamp never handed out before in this process.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` contexts are created.
    pub fn fresh() -> Self {
        let raw = NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed);
        match NonZeroU32::new(raw) {
            Some(id) => ContextId(id),
            None => panic!("context id space exhausted"),
        }
    }

    /// The raw stamp value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }

    /// Abort with a contract-violation message if `other` is not `self`.
    #[inline]
    #[track_caller]
    pub fn check(self, other: ContextId, what: &str) {
        assert!(
            self == other,
            "{what} belongs to context #{} but was used with context #{}",
            other.raw(),
            self.raw()
        );
    }
}

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}
