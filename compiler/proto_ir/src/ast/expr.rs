//! Expression views.
//!
//! Expressions appear as field numbers, option values, reserved ranges and
//! inside the text-format dictionaries used by aggregate options.

use std::fmt;
use std::num::NonZeroU32;

use super::commas::FromRaw;
use super::ids::{ExprKind, RawExpr};
use super::nodes::{
    RawExprArray, RawExprDict, RawExprField, RawExprLiteral, RawExprPath, RawExprPrefixed,
    RawExprRange,
};
use super::path::Path;
use super::{tok_span, tree_span, Commas, Context, ExprId};
use crate::{Span, TokenKind, TokenRef};

/// Any expression.
#[derive(Copy, Clone)]
pub struct ExprAny<'a> {
    ctx: &'a Context,
    raw: RawExpr,
}

impl<'a> ExprAny<'a> {
    pub(crate) fn new(ctx: &'a Context, raw: RawExpr) -> Self {
        ExprAny { ctx, raw }
    }

    pub fn id(self) -> ExprId {
        ExprId::from_raw(self.ctx.id(), self.raw)
    }

    pub fn kind(self) -> ExprKind {
        self.raw.kind
    }

    fn expect_kind(self, kind: ExprKind) -> Option<NonZeroU32> {
        (self.raw.kind == kind).then_some(self.raw.idx)
    }

    pub fn as_literal(self) -> Option<ExprLiteral<'a>> {
        self.expect_kind(ExprKind::Literal)
            .map(|i| ExprLiteral::new(self.ctx, i))
    }

    pub fn as_path(self) -> Option<ExprPath<'a>> {
        self.expect_kind(ExprKind::Path)
            .map(|i| ExprPath::new(self.ctx, i))
    }

    pub fn as_prefixed(self) -> Option<ExprPrefixed<'a>> {
        self.expect_kind(ExprKind::Prefixed)
            .map(|i| ExprPrefixed::new(self.ctx, i))
    }

    pub fn as_range(self) -> Option<ExprRange<'a>> {
        self.expect_kind(ExprKind::Range)
            .map(|i| ExprRange::new(self.ctx, i))
    }

    pub fn as_array(self) -> Option<ExprArray<'a>> {
        self.expect_kind(ExprKind::Array)
            .map(|i| ExprArray::new(self.ctx, i))
    }

    pub fn as_dict(self) -> Option<ExprDict<'a>> {
        self.expect_kind(ExprKind::Dict)
            .map(|i| ExprDict::new(self.ctx, i))
    }

    pub fn as_field(self) -> Option<ExprField<'a>> {
        self.expect_kind(ExprKind::Field)
            .map(|i| ExprField::new(self.ctx, i))
    }

    /// The value of an integer literal, optionally negated with `-`.
    ///
    /// Returns `None` for anything else, or if the value does not fit.
    pub fn as_signed_int(self) -> Option<i64> {
        if let Some(lit) = self.as_literal() {
            return lit.as_int().and_then(|v| i64::try_from(v).ok());
        }
        let pre = self.as_prefixed()?;
        if pre.prefix()?.text() != "-" {
            return None;
        }
        let magnitude = pre.expr()?.as_literal()?.as_int()?;
        if magnitude == 1 << 63 {
            return Some(i64::MIN);
        }
        i64::try_from(magnitude).ok().map(|v| -v)
    }

    pub fn span(self) -> Span {
        match self.raw.kind {
            ExprKind::Literal => ExprLiteral::new(self.ctx, self.raw.idx).span(),
            ExprKind::Path => ExprPath::new(self.ctx, self.raw.idx).span(),
            ExprKind::Prefixed => ExprPrefixed::new(self.ctx, self.raw.idx).span(),
            ExprKind::Range => ExprRange::new(self.ctx, self.raw.idx).span(),
            ExprKind::Array => ExprArray::new(self.ctx, self.raw.idx).span(),
            ExprKind::Dict => ExprDict::new(self.ctx, self.raw.idx).span(),
            ExprKind::Field => ExprField::new(self.ctx, self.raw.idx).span(),
        }
    }
}

impl<'a> FromRaw<'a> for ExprAny<'a> {
    type Raw = RawExpr;

    fn from_raw(ctx: &'a Context, raw: RawExpr) -> Self {
        ExprAny::new(ctx, raw)
    }

    fn elem_span(&self) -> Span {
        self.span()
    }
}

impl PartialEq for ExprAny<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.raw == other.raw
    }
}

impl Eq for ExprAny<'_> {}

impl fmt::Debug for ExprAny<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {:?}", self.raw.kind, self.raw.idx, self.span())
    }
}

define_view!(
    /// A number, or one or more adjacent string literals.
    ExprLiteral, ExprLiteralId, literals, RawExprLiteral
);

impl<'a> ExprLiteral<'a> {
    /// The first token of the literal.
    pub fn token(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().token)
    }

    /// Every token of the literal, more than one for `"a" "b"`.
    pub fn pieces(self) -> impl Iterator<Item = TokenRef<'a>> + 'a {
        let row = self.row();
        std::iter::once(row.token)
            .chain(row.rest.iter().copied())
            .filter_map(move |raw| self.tok(raw))
    }

    /// Whether this is an implicit concatenation of several strings.
    pub fn is_concatenation(self) -> bool {
        !self.row().rest.is_empty()
    }

    pub fn is_string(self) -> bool {
        self.token().is_some_and(|t| t.kind() == TokenKind::String)
    }

    pub fn as_int(self) -> Option<u64> {
        self.token()?.as_int()
    }

    pub fn as_float(self) -> Option<f64> {
        self.token()?.as_float()
    }

    /// The decoded value of a string literal, with all pieces joined.
    pub fn as_string(self) -> Option<String> {
        if !self.is_string() {
            return None;
        }
        let mut bytes = Vec::new();
        for piece in self.pieces() {
            bytes.extend(piece.as_bytes()?);
        }
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn span(self) -> Span {
        self.pieces().fold(Span::NONE, |span, t| span.join(t.span()))
    }
}

define_view!(ExprPath, ExprPathId, expr_paths, RawExprPath);

impl<'a> ExprPath<'a> {
    pub fn path(self) -> Path<'a> {
        Path::present(self.ctx, self.row().path)
    }

    pub fn span(self) -> Span {
        self.path().span()
    }
}

define_view!(
    /// An expression with a prefix operator, e.g. `-5` or `-inf`.
    ExprPrefixed, ExprPrefixedId, expr_prefixed, RawExprPrefixed
);

impl<'a> ExprPrefixed<'a> {
    pub fn prefix(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().prefix)
    }

    pub fn expr(self) -> Option<ExprAny<'a>> {
        self.row().expr.map(|e| ExprAny::new(self.ctx, e))
    }

    pub fn span(self) -> Span {
        tok_span(self.prefix()).join(self.expr().map_or(Span::NONE, ExprAny::span))
    }
}

define_view!(
    /// `start to end`.
    ExprRange, ExprRangeId, expr_ranges, RawExprRange
);

impl<'a> ExprRange<'a> {
    pub fn start(self) -> Option<ExprAny<'a>> {
        self.row().start.map(|e| ExprAny::new(self.ctx, e))
    }

    pub fn to(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().to)
    }

    /// The upper bound, which may be the path `max`.
    pub fn end(self) -> Option<ExprAny<'a>> {
        self.row().end.map(|e| ExprAny::new(self.ctx, e))
    }

    /// Whether the upper bound is the identifier `max`.
    pub fn is_open_ended(self) -> bool {
        self.end()
            .and_then(ExprAny::as_path)
            .is_some_and(|p| p.path().is_keyword("max"))
    }

    pub fn span(self) -> Span {
        self.start()
            .map_or(Span::NONE, ExprAny::span)
            .join(tok_span(self.to()))
            .join(self.end().map_or(Span::NONE, ExprAny::span))
    }
}

define_view!(ExprArray, ExprArrayId, arrays, RawExprArray);

impl<'a> ExprArray<'a> {
    /// The `[` token.
    pub fn brackets(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().brackets)
    }

    pub fn elems(self) -> Commas<'a, ExprAny<'a>> {
        Commas::new(self.ctx, &self.row().elems)
    }

    pub fn span(self) -> Span {
        tree_span(self.brackets()).join(self.elems().span())
    }
}

define_view!(
    /// A text-format message literal, `{ key: value ... }`.
    ExprDict, ExprDictId, dicts, RawExprDict
);

impl<'a> ExprDict<'a> {
    /// The `{` token.
    pub fn braces(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().braces)
    }

    pub fn entries(self) -> Commas<'a, ExprField<'a>> {
        Commas::new(self.ctx, &self.row().entries)
    }

    pub fn span(self) -> Span {
        tree_span(self.braces()).join(self.entries().span())
    }
}

define_view!(
    /// `key: value`. The colon may be absent before a dictionary value.
    ExprField, ExprFieldId, fields, RawExprField
);

impl<'a> ExprField<'a> {
    pub fn key(self) -> Option<ExprAny<'a>> {
        self.row().key.map(|e| ExprAny::new(self.ctx, e))
    }

    pub fn colon(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().colon)
    }

    pub fn value(self) -> Option<ExprAny<'a>> {
        self.row().value.map(|e| ExprAny::new(self.ctx, e))
    }

    pub fn span(self) -> Span {
        self.key()
            .map_or(Span::NONE, ExprAny::span)
            .join(tok_span(self.colon()))
            .join(self.value().map_or(Span::NONE, ExprAny::span))
    }
}

impl<'a> FromRaw<'a> for ExprField<'a> {
    type Raw = NonZeroU32;

    fn from_raw(ctx: &'a Context, raw: NonZeroU32) -> Self {
        ExprField::new(ctx, raw)
    }

    fn elem_span(&self) -> Span {
        self.span()
    }
}

impl<'a> From<ExprField<'a>> for ExprAny<'a> {
    fn from(field: ExprField<'a>) -> Self {
        ExprAny::new(
            field.ctx,
            RawExpr {
                kind: ExprKind::Field,
                idx: field.idx,
            },
        )
    }
}
