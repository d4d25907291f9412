//! Type views.

use std::fmt;
use std::num::NonZeroU32;

use smallvec::SmallVec;

use super::commas::FromRaw;
use super::ids::{RawType, TypeKind};
use super::nodes::{RawTypeGeneric, RawTypePath, RawTypePrefixed};
use super::path::Path;
use super::{tok_span, Commas, Context, TypeId};
use crate::{Span, TokenRef};

/// A type modifier keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypePrefix {
    Optional,
    Repeated,
    Required,
    /// Streaming method argument or result.
    Stream,
}

impl TypePrefix {
    pub const KEYWORDS: [&'static str; 4] = ["optional", "repeated", "required", "stream"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "optional" => Some(TypePrefix::Optional),
            "repeated" => Some(TypePrefix::Repeated),
            "required" => Some(TypePrefix::Required),
            "stream" => Some(TypePrefix::Stream),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            TypePrefix::Optional => "optional",
            TypePrefix::Repeated => "repeated",
            TypePrefix::Required => "required",
            TypePrefix::Stream => "stream",
        }
    }
}

impl fmt::Display for TypePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Any type.
#[derive(Copy, Clone)]
pub struct TypeAny<'a> {
    ctx: &'a Context,
    raw: RawType,
}

impl<'a> TypeAny<'a> {
    pub(crate) fn new(ctx: &'a Context, raw: RawType) -> Self {
        TypeAny { ctx, raw }
    }

    pub fn id(self) -> TypeId {
        TypeId::from_raw(self.ctx.id(), self.raw)
    }

    pub fn kind(self) -> TypeKind {
        self.raw.kind
    }

    fn expect_kind(self, kind: TypeKind) -> Option<NonZeroU32> {
        (self.raw.kind == kind).then_some(self.raw.idx)
    }

    pub fn as_path(self) -> Option<TypePath<'a>> {
        self.expect_kind(TypeKind::Path)
            .map(|i| TypePath::new(self.ctx, i))
    }

    pub fn as_prefixed(self) -> Option<TypePrefixed<'a>> {
        self.expect_kind(TypeKind::Prefixed)
            .map(|i| TypePrefixed::new(self.ctx, i))
    }

    pub fn as_generic(self) -> Option<TypeGeneric<'a>> {
        self.expect_kind(TypeKind::Generic)
            .map(|i| TypeGeneric::new(self.ctx, i))
    }

    /// The chain of prefixes, outermost first.
    pub fn prefixes(self) -> SmallVec<[TypePrefixed<'a>; 2]> {
        let mut out = SmallVec::new();
        let mut cur = Some(self);
        while let Some(pre) = cur.and_then(TypeAny::as_prefixed) {
            out.push(pre);
            cur = pre.ty();
        }
        out
    }

    /// The type with all prefixes stripped, `None` if the innermost prefix
    /// has no type.
    pub fn remove_prefixes(self) -> Option<TypeAny<'a>> {
        let mut cur = self;
        while let Some(pre) = cur.as_prefixed() {
            cur = pre.ty()?;
        }
        Some(cur)
    }

    pub fn span(self) -> Span {
        match self.raw.kind {
            TypeKind::Path => TypePath::new(self.ctx, self.raw.idx).span(),
            TypeKind::Prefixed => TypePrefixed::new(self.ctx, self.raw.idx).span(),
            TypeKind::Generic => TypeGeneric::new(self.ctx, self.raw.idx).span(),
        }
    }
}

impl<'a> FromRaw<'a> for TypeAny<'a> {
    type Raw = RawType;

    fn from_raw(ctx: &'a Context, raw: RawType) -> Self {
        TypeAny::new(ctx, raw)
    }

    fn elem_span(&self) -> Span {
        self.span()
    }
}

impl PartialEq for TypeAny<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.raw == other.raw
    }
}

impl Eq for TypeAny<'_> {}

impl fmt::Debug for TypeAny<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {:?}", self.raw.kind, self.raw.idx, self.span())
    }
}

define_view!(
    /// A named type: `int32`, `.pkg.Msg`, or a keyword such as `message`.
    TypePath, TypePathId, type_paths, RawTypePath
);

impl<'a> TypePath<'a> {
    pub fn path(self) -> Path<'a> {
        Path::present(self.ctx, self.row().path)
    }

    pub fn span(self) -> Span {
        self.path().span()
    }
}

define_view!(TypePrefixed, TypePrefixedId, type_prefixed, RawTypePrefixed);

impl<'a> TypePrefixed<'a> {
    /// The modifier token.
    pub fn prefix_token(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().prefix)
    }

    pub fn prefix(self) -> Option<TypePrefix> {
        TypePrefix::from_keyword(self.prefix_token()?.text())
    }

    /// The modified type, absent in e.g. `optional = 1;`.
    pub fn ty(self) -> Option<TypeAny<'a>> {
        self.row().ty.map(|t| TypeAny::new(self.ctx, t))
    }

    pub fn span(self) -> Span {
        tok_span(self.prefix_token()).join(self.ty().map_or(Span::NONE, TypeAny::span))
    }
}

define_view!(
    /// `map<K, V>` and friends.
    TypeGeneric, TypeGenericId, generics, RawTypeGeneric
);

impl<'a> TypeGeneric<'a> {
    pub fn path(self) -> Path<'a> {
        Path::present(self.ctx, self.row().path)
    }

    /// The `<` token.
    pub fn open(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().open)
    }

    pub fn args(self) -> Commas<'a, TypeAny<'a>> {
        Commas::new(self.ctx, &self.row().args)
    }

    /// The `>` token, absent if the list was not closed.
    pub fn close(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().close)
    }

    /// Key and value types, if this is `map<K, V>`.
    pub fn as_map(self) -> Option<(TypeAny<'a>, TypeAny<'a>)> {
        let args = self.args();
        if !self.path().is_keyword("map") || args.len() != 2 {
            return None;
        }
        Some((args.at(0), args.at(1)))
    }

    pub fn span(self) -> Span {
        self.path()
            .span()
            .join(tok_span(self.open()))
            .join(self.args().span())
            .join(tok_span(self.close()))
    }
}
