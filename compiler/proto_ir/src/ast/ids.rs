//! Node handles.
//!
//! Storage refers to nodes by 1-based [`NonZeroU32`] indices into the table
//! for their variant, paired with a kind tag when the variant is not fixed
//! ([`RawDecl`], [`RawExpr`], [`RawType`]). The public ids add the
//! [`ContextId`] of the arena that minted them.

use std::fmt;
use std::num::NonZeroU32;

use crate::ContextId;

/// Index of the next row in a table of length `len`.
///
/// # Panics
/// Panics if the table already holds `u32::MAX` rows.
#[inline]
#[track_caller]
pub(crate) fn next_index(len: usize) -> NonZeroU32 {
    u32::try_from(len + 1)
        .ok()
        .and_then(NonZeroU32::new)
        .unwrap_or_else(|| panic!("node table overflow"))
}

/// Row of a 1-based index.
#[inline]
pub(crate) fn slot(idx: NonZeroU32) -> usize {
    idx.get() as usize - 1
}

macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name {
            ctx: ContextId,
            idx: NonZeroU32,
        }

        impl $name {
            #[inline]
            pub(crate) const fn new(ctx: ContextId, idx: NonZeroU32) -> Self {
                $name { ctx, idx }
            }

            /// The arena that minted this id.
            #[inline]
            pub const fn context(self) -> ContextId {
                self.ctx
            }

            /// The 1-based index within its table.
            #[inline]
            pub const fn index(self) -> u32 {
                self.idx.get()
            }

            /// Check the stamp and return the storage index.
            #[inline]
            #[track_caller]
            pub(crate) fn idx_in(self, ctx: ContextId) -> NonZeroU32 {
                ctx.check(self.ctx, stringify!($name));
                self.idx
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.idx)
            }
        }
    )*};
}

define_ids! {
    /// An empty declaration (`;`).
    DeclEmptyId;
    /// A `syntax` or `edition` pragma.
    DeclSyntaxId;
    /// A `package` declaration.
    DeclPackageId;
    /// An `import` declaration.
    DeclImportId;
    /// A general definition: message, field, rpc, option, ...
    DeclDefId;
    /// A declaration body, braced or the file itself.
    DeclBodyId;
    /// A `reserved` or `extensions` declaration.
    DeclRangeId;
    /// A literal expression.
    ExprLiteralId;
    /// A path expression.
    ExprPathId;
    /// A prefixed expression, e.g. `-1`.
    ExprPrefixedId;
    /// A range expression, `a to b`.
    ExprRangeId;
    /// An array expression, `[a, b]`.
    ExprArrayId;
    /// A dictionary expression, `{a: b}`.
    ExprDictId;
    /// A key-value expression, `a: b`.
    ExprFieldId;
    /// A path type.
    TypePathId;
    /// A type with a modifier, e.g. `repeated T`.
    TypePrefixedId;
    /// A generic type, e.g. `map<K, V>`.
    TypeGenericId;
    /// A compact options list, `[a = b, c = d]`.
    OptionsId;
}

macro_rules! define_any {
    (
        $(#[$meta:meta])*
        $kind:ident, $raw:ident, $any:ident {
            $($variant:ident => $id:ident,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[repr(u8)]
        pub enum $kind {
            $($variant,)*
        }

        /// Storage form: kind tag plus index into that kind's table.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub struct $raw {
            pub(crate) kind: $kind,
            pub(crate) idx: NonZeroU32,
        }

        /// A stamped handle to a node of any kind in this family.
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $any {
            ctx: ContextId,
            raw: $raw,
        }

        impl $any {
            #[inline]
            pub(crate) const fn from_raw(ctx: ContextId, raw: $raw) -> Self {
                $any { ctx, raw }
            }

            /// The arena that minted this id.
            #[inline]
            pub const fn context(self) -> ContextId {
                self.ctx
            }

            /// Which table the node lives in.
            #[inline]
            pub const fn kind(self) -> $kind {
                self.raw.kind
            }

            #[inline]
            #[track_caller]
            pub(crate) fn raw_in(self, ctx: ContextId) -> $raw {
                ctx.check(self.ctx, stringify!($any));
                self.raw
            }
        }

        impl fmt::Debug for $any {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}({})", self.raw.kind, self.raw.idx)
            }
        }

        $(
            impl From<$id> for $any {
                #[inline]
                fn from(id: $id) -> Self {
                    $any {
                        ctx: id.ctx,
                        raw: $raw {
                            kind: $kind::$variant,
                            idx: id.idx,
                        },
                    }
                }
            }
        )*
    };
}

define_any! {
    /// Declaration kinds.
    DeclKind, RawDecl, DeclId {
        Empty => DeclEmptyId,
        Syntax => DeclSyntaxId,
        Package => DeclPackageId,
        Import => DeclImportId,
        Def => DeclDefId,
        Body => DeclBodyId,
        Range => DeclRangeId,
    }
}

define_any! {
    /// Expression kinds.
    ExprKind, RawExpr, ExprId {
        Literal => ExprLiteralId,
        Path => ExprPathId,
        Prefixed => ExprPrefixedId,
        Range => ExprRangeId,
        Array => ExprArrayId,
        Dict => ExprDictId,
        Field => ExprFieldId,
    }
}

define_any! {
    /// Type kinds.
    TypeKind, RawType, TypeId {
        Path => TypePathId,
        Prefixed => TypePrefixedId,
        Generic => TypeGenericId,
    }
}

/// Conversion of a public argument into its storage form, checking stamps.
pub trait IntoRaw {
    #[doc(hidden)]
    type Raw: Copy;
    #[doc(hidden)]
    fn into_raw(self, ctx: ContextId) -> Self::Raw;
}

impl IntoRaw for DeclId {
    type Raw = RawDecl;
    #[track_caller]
    fn into_raw(self, ctx: ContextId) -> RawDecl {
        self.raw_in(ctx)
    }
}

impl IntoRaw for ExprId {
    type Raw = RawExpr;
    #[track_caller]
    fn into_raw(self, ctx: ContextId) -> RawExpr {
        self.raw_in(ctx)
    }
}

impl IntoRaw for TypeId {
    type Raw = RawType;
    #[track_caller]
    fn into_raw(self, ctx: ContextId) -> RawType {
        self.raw_in(ctx)
    }
}

impl IntoRaw for ExprFieldId {
    type Raw = NonZeroU32;
    #[track_caller]
    fn into_raw(self, ctx: ContextId) -> NonZeroU32 {
        self.idx_in(ctx)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{DeclDefId, DeclId, RawDecl};
    crate::static_assert_size!(DeclDefId, 8);
    crate::static_assert_size!(Option<DeclDefId>, 8);
    crate::static_assert_size!(RawDecl, 8);
    crate::static_assert_size!(Option<RawDecl>, 8);
    crate::static_assert_size!(DeclId, 12);
}
