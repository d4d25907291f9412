//! Tokens: kinds, handles, storage and traversal.
//!
//! # Handles
//! - [`RawToken`]: compact `i32` handle, natural or synthetic
//! - [`Token`]: a handle stamped with its stream's [`ContextId`](crate::ContextId)
//! - [`TokenRef`]: a handle resolved against its [`TokenStream`]
//!
//! # Traversal
//! [`Cursor`] walks a bounded range of tokens, treating fused delimiter
//! pairs as single tree tokens.

mod cursor;
mod kind;
pub mod literal;
mod raw;
mod stream;
mod token_ref;

pub use cursor::{Cursor, CursorMark};
pub use kind::TokenKind;
pub use raw::{raw_opt, RawToken, Token};
pub use stream::TokenStream;
pub use token_ref::TokenRef;

#[cfg(test)]
mod tests;
