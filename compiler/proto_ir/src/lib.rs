//! Proto IR - token stream and syntax tree storage for Protobuf sources.
//!
//! This crate holds the data structures shared by the front end:
//! - [`SourceFile`] and [`Span`] for source text and locations
//! - [`TokenStream`] with natural (lexed) and synthetic (tooling) tokens
//! - [`Cursor`] for bounded, bidirectional token traversal
//! - [`ast::Context`], the per-file arena of syntax tree nodes, and the
//!   typed views over it
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: nodes refer to each other by `(kind, index)`
//!   pairs into per-variant tables, never by pointer
//! - **Stamp Everything**: detached handles carry the [`ContextId`] of the
//!   file that minted them; mixing files is a panic, not silent corruption
//! - **Views, not trait objects**: `DeclAny`/`ExprAny`/`TypeAny` dispatch on
//!   a kind tag and downcast with `as_*` accessors

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod context_id;
mod source;
mod span;
pub mod token;

#[cfg(test)]
pub(crate) mod test_util;

pub use context_id::ContextId;
pub use source::{SourceError, SourceFile, MAX_FILE_LEN};
pub use span::{Span, SpanError, Spanned};
pub use token::{
    literal, raw_opt, Cursor, CursorMark, RawToken, Token, TokenKind, TokenRef, TokenStream,
};
