//! Comma-delimited lists.
//!
//! Lists are stored as `(element, trailing comma)` pairs. The comma is
//! [`RawToken::NONE`] when absent, e.g. after the last element.

use super::ids::IntoRaw;
use super::Context;
use crate::{ContextId, RawToken, Span, Token, TokenRef};

/// An element and its trailing comma, as passed to constructors.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WithComma<T> {
    pub value: T,
    pub comma: Option<Token>,
}

impl<T> WithComma<T> {
    /// An element without a trailing comma.
    pub fn bare(value: T) -> Self {
        WithComma { value, comma: None }
    }
}

/// Storage form of [`WithComma`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct RawWithComma<R> {
    pub(crate) value: R,
    pub(crate) comma: RawToken,
}

#[track_caller]
pub(crate) fn lower_list<T: IntoRaw>(
    list: Vec<WithComma<T>>,
    ctx: ContextId,
) -> Vec<RawWithComma<T::Raw>> {
    list.into_iter()
        .map(|w| RawWithComma {
            value: w.value.into_raw(ctx),
            comma: crate::raw_opt(w.comma, ctx),
        })
        .collect()
}

/// A view that can be built from a list element's storage form.
pub trait FromRaw<'a>: Sized {
    #[doc(hidden)]
    type Raw: Copy;
    #[doc(hidden)]
    fn from_raw(ctx: &'a Context, raw: Self::Raw) -> Self;
    /// Source span of the element.
    fn elem_span(&self) -> Span;
}

/// Read-only view of a comma-delimited list.
pub struct Commas<'a, V: FromRaw<'a>> {
    ctx: &'a Context,
    items: &'a [RawWithComma<V::Raw>],
}

impl<'a, V: FromRaw<'a>> Clone for Commas<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V: FromRaw<'a>> Copy for Commas<'a, V> {}

impl<'a, V: FromRaw<'a>> Commas<'a, V> {
    pub(crate) fn new(ctx: &'a Context, items: &'a [RawWithComma<V::Raw>]) -> Self {
        Commas { ctx, items }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[track_caller]
    pub fn at(&self, i: usize) -> V {
        V::from_raw(self.ctx, self.items[i].value)
    }

    /// Element at `i`, if in bounds.
    pub fn get(&self, i: usize) -> Option<V> {
        self.items.get(i).map(|w| V::from_raw(self.ctx, w.value))
    }

    /// The comma after element `i`, if there is one.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[track_caller]
    pub fn comma(&self, i: usize) -> Option<TokenRef<'a>> {
        self.ctx.stream().resolve(self.items[i].comma)
    }

    /// Elements in order.
    pub fn iter(&self) -> impl Iterator<Item = V> + 'a {
        let ctx = self.ctx;
        self.items.iter().map(move |w| V::from_raw(ctx, w.value))
    }

    /// Span of all elements and commas.
    pub fn span(&self) -> Span {
        Span::join_all(self.items.iter().map(|w| {
            V::from_raw(self.ctx, w.value)
                .elem_span()
                .join(self.ctx.stream().resolve(w.comma).map_or(Span::NONE, TokenRef::span))
        }))
    }
}

/// Mutable access to a comma-delimited list, obtained from the arena.
pub struct CommasMut<'a, T: IntoRaw> {
    ctx: ContextId,
    items: &'a mut Vec<RawWithComma<T::Raw>>,
}

impl<'a, T: IntoRaw> CommasMut<'a, T> {
    pub(crate) fn new(ctx: ContextId, items: &'a mut Vec<RawWithComma<T::Raw>>) -> Self {
        CommasMut { ctx, items }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `value` at `i` without a trailing comma.
    ///
    /// # Panics
    /// Panics if `i > len` or `value` belongs to another context.
    #[track_caller]
    pub fn insert(&mut self, i: usize, value: T) {
        self.insert_with_comma(i, value, None);
    }

    /// Insert `value` at `i` followed by `comma`.
    ///
    /// # Panics
    /// Panics if `i > len` or an argument belongs to another context.
    #[track_caller]
    pub fn insert_with_comma(&mut self, i: usize, value: T, comma: Option<Token>) {
        let raw = RawWithComma {
            value: value.into_raw(self.ctx),
            comma: crate::raw_opt(comma, self.ctx),
        };
        self.items.insert(i, raw);
    }

    /// Remove the element at `i` together with its comma.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[track_caller]
    pub fn delete(&mut self, i: usize) {
        self.items.remove(i);
    }

    /// Replace the comma after element `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds or `comma` belongs to another context.
    #[track_caller]
    pub fn set_comma(&mut self, i: usize, comma: Option<Token>) {
        self.items[i].comma = crate::raw_opt(comma, self.ctx);
    }
}
