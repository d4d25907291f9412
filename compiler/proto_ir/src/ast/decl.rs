//! Declaration views.

mod def;

pub use def::{classify_shape, DeclDef, DefKind, DefShape, Signature};

use std::fmt;
use std::num::NonZeroU32;

use super::expr::ExprAny;
use super::ids::{DeclKind, RawDecl};
use super::nodes::{
    RawDeclBody, RawDeclEmpty, RawDeclImport, RawDeclPackage, RawDeclRange, RawDeclSyntax,
};
use super::options::CompactOptions;
use super::path::Path;
use super::{tok_span, Commas, Context, DeclId};
use crate::{Span, TokenRef};

/// Any declaration.
#[derive(Copy, Clone)]
pub struct DeclAny<'a> {
    ctx: &'a Context,
    raw: RawDecl,
}

impl<'a> DeclAny<'a> {
    pub(crate) fn new(ctx: &'a Context, raw: RawDecl) -> Self {
        DeclAny { ctx, raw }
    }

    /// The detached id.
    pub fn id(self) -> DeclId {
        DeclId::from_raw(self.ctx.id(), self.raw)
    }

    pub fn kind(self) -> DeclKind {
        self.raw.kind
    }

    fn expect_kind(self, kind: DeclKind) -> Option<NonZeroU32> {
        (self.raw.kind == kind).then_some(self.raw.idx)
    }

    pub fn as_empty(self) -> Option<DeclEmpty<'a>> {
        self.expect_kind(DeclKind::Empty)
            .map(|i| DeclEmpty::new(self.ctx, i))
    }

    pub fn as_syntax(self) -> Option<DeclSyntax<'a>> {
        self.expect_kind(DeclKind::Syntax)
            .map(|i| DeclSyntax::new(self.ctx, i))
    }

    pub fn as_package(self) -> Option<DeclPackage<'a>> {
        self.expect_kind(DeclKind::Package)
            .map(|i| DeclPackage::new(self.ctx, i))
    }

    pub fn as_import(self) -> Option<DeclImport<'a>> {
        self.expect_kind(DeclKind::Import)
            .map(|i| DeclImport::new(self.ctx, i))
    }

    pub fn as_def(self) -> Option<DeclDef<'a>> {
        self.expect_kind(DeclKind::Def)
            .map(|i| DeclDef::new(self.ctx, i))
    }

    pub fn as_body(self) -> Option<DeclBody<'a>> {
        self.expect_kind(DeclKind::Body)
            .map(|i| DeclBody::new(self.ctx, i))
    }

    pub fn as_range(self) -> Option<DeclRange<'a>> {
        self.expect_kind(DeclKind::Range)
            .map(|i| DeclRange::new(self.ctx, i))
    }

    /// Span of every present child.
    pub fn span(self) -> Span {
        let i = self.raw.idx;
        match self.raw.kind {
            DeclKind::Empty => DeclEmpty::new(self.ctx, i).span(),
            DeclKind::Syntax => DeclSyntax::new(self.ctx, i).span(),
            DeclKind::Package => DeclPackage::new(self.ctx, i).span(),
            DeclKind::Import => DeclImport::new(self.ctx, i).span(),
            DeclKind::Def => DeclDef::new(self.ctx, i).span(),
            DeclKind::Body => DeclBody::new(self.ctx, i).span(),
            DeclKind::Range => DeclRange::new(self.ctx, i).span(),
        }
    }
}

impl PartialEq for DeclAny<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.raw == other.raw
    }
}

impl Eq for DeclAny<'_> {}

impl fmt::Debug for DeclAny<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {:?}", self.raw.kind, self.raw.idx, self.span())
    }
}

define_view!(
    /// A stray `;`.
    DeclEmpty, DeclEmptyId, empties, RawDeclEmpty
);

impl<'a> DeclEmpty<'a> {
    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    pub fn span(self) -> Span {
        tok_span(self.semi())
    }
}

define_view!(
    /// `syntax = "proto3";` or `edition = "2023";`.
    DeclSyntax, DeclSyntaxId, syntaxes, RawDeclSyntax
);

impl<'a> DeclSyntax<'a> {
    pub fn keyword(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().keyword)
    }

    /// Whether this is an `edition` rather than a `syntax` pragma.
    pub fn is_edition(self) -> bool {
        self.keyword().is_some_and(|k| k.is_keyword("edition"))
    }

    pub fn equals(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().equals)
    }

    pub fn value(self) -> Option<ExprAny<'a>> {
        self.row().value.map(|v| ExprAny::new(self.ctx, v))
    }

    pub fn options(self) -> Option<CompactOptions<'a>> {
        self.row().options.map(|o| CompactOptions::new(self.ctx, o))
    }

    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    pub fn span(self) -> Span {
        tok_span(self.keyword())
            .join(tok_span(self.equals()))
            .join(self.value().map_or(Span::NONE, ExprAny::span))
            .join(self.options().map_or(Span::NONE, CompactOptions::span))
            .join(tok_span(self.semi()))
    }
}

define_view!(
    /// `package foo.bar;`.
    DeclPackage, DeclPackageId, packages, RawDeclPackage
);

impl<'a> DeclPackage<'a> {
    pub fn keyword(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().keyword)
    }

    pub fn path(self) -> Option<Path<'a>> {
        Path::new(self.ctx, self.row().path)
    }

    pub fn options(self) -> Option<CompactOptions<'a>> {
        self.row().options.map(|o| CompactOptions::new(self.ctx, o))
    }

    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    pub fn span(self) -> Span {
        tok_span(self.keyword())
            .join(self.path().map_or(Span::NONE, Path::span))
            .join(self.options().map_or(Span::NONE, CompactOptions::span))
            .join(tok_span(self.semi()))
    }
}

/// The modifier of an `import`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImportModifier {
    Public,
    Weak,
    /// `import option`, used by editions for option-only dependencies.
    Option,
}

impl ImportModifier {
    pub const KEYWORDS: [&'static str; 3] = ["public", "weak", "option"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(ImportModifier::Public),
            "weak" => Some(ImportModifier::Weak),
            "option" => Some(ImportModifier::Option),
            _ => None,
        }
    }
}

define_view!(
    /// `import "foo.proto";`.
    DeclImport, DeclImportId, imports, RawDeclImport
);

impl<'a> DeclImport<'a> {
    pub fn keyword(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().keyword)
    }

    /// The `public`/`weak`/`option` token, if any.
    pub fn modifier_token(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().modifier)
    }

    pub fn modifier(self) -> Option<ImportModifier> {
        self.modifier_token()
            .and_then(|t| ImportModifier::from_keyword(t.text()))
    }

    /// The imported file expression, normally a string literal.
    pub fn import_path(self) -> Option<ExprAny<'a>> {
        self.row().path.map(|p| ExprAny::new(self.ctx, p))
    }

    /// The imported file name, if given as a string literal.
    pub fn file_name(self) -> Option<String> {
        self.import_path()?.as_literal()?.as_string()
    }

    pub fn options(self) -> Option<CompactOptions<'a>> {
        self.row().options.map(|o| CompactOptions::new(self.ctx, o))
    }

    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    pub fn span(self) -> Span {
        tok_span(self.keyword())
            .join(tok_span(self.modifier_token()))
            .join(self.import_path().map_or(Span::NONE, ExprAny::span))
            .join(self.options().map_or(Span::NONE, CompactOptions::span))
            .join(tok_span(self.semi()))
    }
}

define_view!(
    /// A sequence of declarations: a braced body, or the file itself.
    DeclBody, DeclBodyId, bodies, RawDeclBody
);

impl<'a> DeclBody<'a> {
    /// The `{` token, absent for the file body.
    pub fn braces(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().braces)
    }

    /// Whether this is the file body.
    pub fn is_file(self) -> bool {
        self.id() == self.ctx.arena().root()
    }

    pub fn len(self) -> usize {
        self.row().kinds.len()
    }

    pub fn is_empty(self) -> bool {
        self.row().kinds.is_empty()
    }

    /// Declaration at `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[track_caller]
    pub fn at(self, i: usize) -> DeclAny<'a> {
        let row = self.row();
        let idx = NonZeroU32::new(row.idxs[i])
            .unwrap_or_else(|| panic!("body slot {i} holds a null index"));
        DeclAny::new(
            self.ctx,
            RawDecl {
                kind: row.kinds[i],
                idx,
            },
        )
    }

    /// Declaration at `i`, if in bounds.
    pub fn get(self, i: usize) -> Option<DeclAny<'a>> {
        (i < self.len()).then(|| self.at(i))
    }

    /// Declarations in order.
    pub fn iter(self) -> impl Iterator<Item = DeclAny<'a>> + 'a {
        (0..self.len()).map(move |i| self.at(i))
    }

    /// Span of the braces, or of all declarations for the file body. A body
    /// whose `}` is missing runs from its `{` through its last declaration.
    pub fn span(self) -> Span {
        match self.braces() {
            Some(b) if b.is_open() => b.outer_span(),
            Some(b) => b.span().join(Span::join_all(self.iter().map(DeclAny::span))),
            None => Span::join_all(self.iter().map(DeclAny::span)),
        }
    }
}

define_view!(
    /// `reserved 1 to 5, "foo";` or `extensions 100 to max;`.
    DeclRange, DeclRangeId, ranges, RawDeclRange
);

impl<'a> DeclRange<'a> {
    pub fn keyword(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().keyword)
    }

    pub fn is_reserved(self) -> bool {
        self.keyword().is_some_and(|k| k.is_keyword("reserved"))
    }

    pub fn is_extensions(self) -> bool {
        self.keyword().is_some_and(|k| k.is_keyword("extensions"))
    }

    /// The ranges, names or numbers listed.
    pub fn args(self) -> Commas<'a, ExprAny<'a>> {
        Commas::new(self.ctx, &self.row().args)
    }

    pub fn options(self) -> Option<CompactOptions<'a>> {
        self.row().options.map(|o| CompactOptions::new(self.ctx, o))
    }

    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    pub fn span(self) -> Span {
        tok_span(self.keyword())
            .join(self.args().span())
            .join(self.options().map_or(Span::NONE, CompactOptions::span))
            .join(tok_span(self.semi()))
    }
}

/// File-level view of the root body.
#[derive(Copy, Clone, Debug)]
pub struct File<'a> {
    body: DeclBody<'a>,
}

impl<'a> File<'a> {
    pub(crate) fn new(body: DeclBody<'a>) -> Self {
        File { body }
    }

    /// The root body.
    pub fn body(self) -> DeclBody<'a> {
        self.body
    }

    /// The first `syntax` or `edition` pragma.
    pub fn syntax(self) -> Option<DeclSyntax<'a>> {
        self.body.iter().find_map(DeclAny::as_syntax)
    }

    /// The first `package` declaration.
    pub fn package(self) -> Option<DeclPackage<'a>> {
        self.body.iter().find_map(DeclAny::as_package)
    }

    /// Every `import`, in order.
    pub fn imports(self) -> impl Iterator<Item = DeclImport<'a>> + 'a {
        self.body.iter().filter_map(DeclAny::as_import)
    }

    /// Every top-level declaration, in order.
    pub fn decls(self) -> impl Iterator<Item = DeclAny<'a>> + 'a {
        self.body.iter()
    }

    /// Every top-level definition, in order.
    pub fn defs(self) -> impl Iterator<Item = DeclDef<'a>> + 'a {
        self.body.iter().filter_map(DeclAny::as_def)
    }

    pub fn span(self) -> Span {
        self.body.span()
    }
}
