//! Syntax tree storage and views.
//!
//! # Storage
//! A [`Context`] owns the [`TokenStream`](crate::TokenStream) and an
//! [`AstArena`] with one table per node variant. Nodes are created with the
//! `new_*` constructors on the arena, which return stamped ids
//! ([`DeclDefId`], [`ExprId`], ...). Children are stored as `(kind, index)`
//! pairs, never as references.
//!
//! # Views
//! Reading goes through lightweight `Copy` views pairing `&Context` with an
//! index: [`DeclDef`], [`ExprArray`], ... The family views [`DeclAny`],
//! [`ExprAny`] and [`TypeAny`] downcast with `as_*`, which returns `None`
//! on a kind mismatch.
//!
//! # Mutation
//! [`AstArena::body_mut`], [`AstArena::def_mut`] and the `*_mut` list
//! accessors edit nodes in place. Every id passed in must come from the
//! same context.

/// Defines a `Copy` view over one row of one arena table.
macro_rules! define_view {
    ($(#[$meta:meta])* $view:ident, $id:ident, $table:ident, $row:ty) => {
        $(#[$meta])*
        #[derive(Copy, Clone)]
        pub struct $view<'a> {
            ctx: &'a $crate::ast::Context,
            idx: ::std::num::NonZeroU32,
        }

        impl<'a> $view<'a> {
            #[inline]
            pub(crate) fn new(ctx: &'a $crate::ast::Context, idx: ::std::num::NonZeroU32) -> Self {
                $view { ctx, idx }
            }

            /// The detached id of this node.
            #[inline]
            pub fn id(self) -> $crate::ast::$id {
                $crate::ast::$id::new(self.ctx.id(), self.idx)
            }

            /// The context this node lives in.
            #[inline]
            pub fn context(self) -> &'a $crate::ast::Context {
                self.ctx
            }

            #[inline]
            fn row(self) -> &'a $row {
                &self.ctx.arena().$table[$crate::ast::ids::slot(self.idx)]
            }

            #[inline]
            #[allow(dead_code, reason = "not every view holds tokens")]
            fn tok(self, raw: $crate::RawToken) -> Option<$crate::TokenRef<'a>> {
                self.ctx.stream().resolve(raw)
            }
        }

        impl $crate::ast::NodeView for $crate::ast::$id {
            type View<'a> = $view<'a>;

            #[inline]
            #[track_caller]
            fn view(self, ctx: &$crate::ast::Context) -> $view<'_> {
                $view::new(ctx, self.idx_in(ctx.id()))
            }
        }

        impl PartialEq for $view<'_> {
            fn eq(&self, other: &Self) -> bool {
                ::std::ptr::eq(self.ctx, other.ctx) && self.idx == other.idx
            }
        }

        impl Eq for $view<'_> {}

        impl ::std::fmt::Debug for $view<'_> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({}) @ {:?}", stringify!($view), self.idx, self.span())
            }
        }
    };
}

mod arena;
mod args;
mod commas;
mod context;
mod decl;
pub mod dump;
mod expr;
mod ids;
mod nodes;
mod options;
mod path;
mod ty;

pub use arena::{AnyNode, AstArena, BodyMut, ContextOptions, DefMut};
pub use args::{
    DeclDefArgs, DeclImportArgs, DeclPackageArgs, DeclRangeArgs, DeclSyntaxArgs, ExprArrayArgs,
    ExprDictArgs, ExprFieldArgs, ExprPrefixedArgs, ExprRangeArgs, OptionEntryArgs, OptionsArgs,
    SignatureArgs, TypeGenericArgs, TypePrefixedArgs,
};
pub use commas::{Commas, CommasMut, FromRaw, WithComma};
pub use context::{Context, NodeView};
pub use decl::{
    classify_shape, DeclAny, DeclBody, DeclDef, DeclEmpty, DeclImport, DeclPackage, DeclRange,
    DeclSyntax, DefKind, DefShape, File, ImportModifier, Signature,
};
pub use expr::{
    ExprAny, ExprArray, ExprDict, ExprField, ExprLiteral, ExprPath, ExprPrefixed, ExprRange,
};
pub use ids::{
    DeclBodyId, DeclDefId, DeclEmptyId, DeclId, DeclImportId, DeclKind, DeclPackageId,
    DeclRangeId, DeclSyntaxId, ExprArrayId, ExprDictId, ExprFieldId, ExprId, ExprKind,
    ExprLiteralId, ExprPathId, ExprPrefixedId, ExprRangeId, IntoRaw, OptionsId, RawDecl, RawExpr,
    RawType, TypeGenericId, TypeId, TypeKind, TypePathId, TypePrefixedId,
};
pub use nodes::RawOptionEntry;
pub use options::{CompactOptions, OptionEntry};
pub use path::{is_separator, Components, Path, PathComponent, PathTokens, RawPath};
pub use ty::{TypeAny, TypeGeneric, TypePath, TypePrefix, TypePrefixed};

use crate::{Span, TokenRef};

/// Span of an optional token, [`Span::NONE`] when absent.
#[inline]
pub(crate) fn tok_span(tok: Option<TokenRef<'_>>) -> Span {
    tok.map_or(Span::NONE, TokenRef::span)
}

/// Span of an optional tree token including its partner.
#[inline]
pub(crate) fn tree_span(tok: Option<TokenRef<'_>>) -> Span {
    tok.map_or(Span::NONE, TokenRef::outer_span)
}
