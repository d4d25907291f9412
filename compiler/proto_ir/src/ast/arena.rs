//! Per-file node storage.
//!
//! One dense, insertion-ordered table per node variant. Tables only grow:
//! removing a declaration from a body unlinks it but keeps its row, so ids
//! stay valid for the lifetime of the arena.
//!
//! A declaration is in at most one body at a time. The arena tracks which
//! rows are linked and panics on a second insertion.

use std::backtrace::Backtrace;
use std::fmt;
use std::num::NonZeroU32;

use rustc_hash::{FxHashMap, FxHashSet};

use super::args::{
    DeclDefArgs, DeclImportArgs, DeclPackageArgs, DeclRangeArgs, DeclSyntaxArgs, ExprArrayArgs,
    ExprDictArgs, ExprFieldArgs, ExprPrefixedArgs, ExprRangeArgs, OptionEntryArgs, OptionsArgs,
    SignatureArgs, TypeGenericArgs, TypePrefixedArgs,
};
use super::commas::{lower_list, CommasMut};
use super::ids::{
    next_index, slot, DeclBodyId, DeclDefId, DeclEmptyId, DeclId, DeclImportId, DeclKind,
    DeclPackageId, DeclRangeId, DeclSyntaxId, ExprArrayId, ExprDictId, ExprFieldId, ExprId,
    ExprKind, ExprLiteralId, ExprPathId, ExprPrefixedId, ExprRangeId, IntoRaw, OptionsId,
    RawDecl, TypeGenericId, TypeId, TypeKind, TypePathId, TypePrefixedId,
};
use super::nodes::{
    RawDeclBody, RawDeclDef, RawDeclEmpty, RawDeclImport, RawDeclPackage, RawDeclRange,
    RawDeclSyntax, RawExprArray, RawExprDict, RawExprField, RawExprLiteral, RawExprPath,
    RawExprPrefixed, RawExprRange, RawOptionEntry, RawOptions, RawSignature, RawTypeGeneric,
    RawTypePath, RawTypePrefixed,
};
use super::path::{raw_path_opt, PathTokens};
use crate::{raw_opt, ContextId, Token};

/// Arena configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Record a backtrace for every node constructed. Expensive; for
    /// debugging tools that need to find who built a node.
    pub trace_creation: bool,
}

/// Any node, for looking up creation sites.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnyNode {
    Decl(DeclId),
    Expr(ExprId),
    Type(TypeId),
    Options(OptionsId),
}

macro_rules! any_node_from {
    ($variant:ident: $($id:ty),*) => {$(
        impl From<$id> for AnyNode {
            fn from(id: $id) -> Self {
                AnyNode::$variant(id.into())
            }
        }
    )*};
}

any_node_from!(Decl: DeclId, DeclEmptyId, DeclSyntaxId, DeclPackageId, DeclImportId, DeclDefId, DeclBodyId, DeclRangeId);
any_node_from!(Expr: ExprId, ExprLiteralId, ExprPathId, ExprPrefixedId, ExprRangeId, ExprArrayId, ExprDictId, ExprFieldId);
any_node_from!(Type: TypeId, TypePathId, TypePrefixedId, TypeGenericId);

impl From<OptionsId> for AnyNode {
    fn from(id: OptionsId) -> Self {
        AnyNode::Options(id)
    }
}

/// Table and row of a node, used as the creation-site key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum NodeKey {
    Decl(DeclKind, u32),
    Expr(ExprKind, u32),
    Type(TypeKind, u32),
    Options(u32),
}

/// Storage for every syntax tree node of one file.
pub struct AstArena {
    id: ContextId,
    pub(crate) empties: Vec<RawDeclEmpty>,
    pub(crate) syntaxes: Vec<RawDeclSyntax>,
    pub(crate) packages: Vec<RawDeclPackage>,
    pub(crate) imports: Vec<RawDeclImport>,
    pub(crate) defs: Vec<RawDeclDef>,
    pub(crate) bodies: Vec<RawDeclBody>,
    pub(crate) ranges: Vec<RawDeclRange>,
    pub(crate) literals: Vec<RawExprLiteral>,
    pub(crate) expr_paths: Vec<RawExprPath>,
    pub(crate) expr_prefixed: Vec<RawExprPrefixed>,
    pub(crate) expr_ranges: Vec<RawExprRange>,
    pub(crate) arrays: Vec<RawExprArray>,
    pub(crate) dicts: Vec<RawExprDict>,
    pub(crate) fields: Vec<RawExprField>,
    pub(crate) type_paths: Vec<RawTypePath>,
    pub(crate) type_prefixed: Vec<RawTypePrefixed>,
    pub(crate) generics: Vec<RawTypeGeneric>,
    pub(crate) options: Vec<RawOptions>,
    /// Declarations currently in some body, as `(kind, index)`.
    linked: FxHashSet<(DeclKind, u32)>,
    sites: Option<FxHashMap<NodeKey, Backtrace>>,
}

/// Index of the file body, created with the arena.
const ROOT: NonZeroU32 = NonZeroU32::MIN;

fn push_row<T>(table: &mut Vec<T>, row: T) -> NonZeroU32 {
    let idx = next_index(table.len());
    table.push(row);
    idx
}

impl AstArena {
    pub(crate) fn new(id: ContextId, options: ContextOptions) -> Self {
        AstArena {
            id,
            empties: Vec::new(),
            syntaxes: Vec::new(),
            packages: Vec::new(),
            imports: Vec::new(),
            defs: Vec::new(),
            bodies: vec![RawDeclBody::default()],
            ranges: Vec::new(),
            literals: Vec::new(),
            expr_paths: Vec::new(),
            expr_prefixed: Vec::new(),
            expr_ranges: Vec::new(),
            arrays: Vec::new(),
            dicts: Vec::new(),
            fields: Vec::new(),
            type_paths: Vec::new(),
            type_prefixed: Vec::new(),
            generics: Vec::new(),
            options: Vec::new(),
            linked: FxHashSet::from_iter([(DeclKind::Body, ROOT.get())]),
            sites: options.trace_creation.then(FxHashMap::default),
        }
    }

    /// The stamp this arena checks ids against.
    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The file body.
    #[inline]
    pub fn root(&self) -> DeclBodyId {
        DeclBodyId::new(self.id, ROOT)
    }

    /// Whether creation sites are being recorded.
    #[inline]
    pub fn traces_creation(&self) -> bool {
        self.sites.is_some()
    }

    /// Where `node` was constructed, if creation tracing is enabled.
    pub fn creation_site(&self, node: impl Into<AnyNode>) -> Option<&Backtrace> {
        let key = match node.into() {
            AnyNode::Decl(id) => {
                let raw = id.raw_in(self.id);
                NodeKey::Decl(raw.kind, raw.idx.get())
            }
            AnyNode::Expr(id) => {
                let raw = id.raw_in(self.id);
                NodeKey::Expr(raw.kind, raw.idx.get())
            }
            AnyNode::Type(id) => {
                let raw = id.raw_in(self.id);
                NodeKey::Type(raw.kind, raw.idx.get())
            }
            AnyNode::Options(id) => NodeKey::Options(id.idx_in(self.id).get()),
        };
        self.sites.as_ref()?.get(&key)
    }

    fn record(&mut self, key: NodeKey) {
        if let Some(sites) = &mut self.sites {
            sites.insert(key, Backtrace::force_capture());
        }
    }

    /// Total number of nodes across all tables, the root body included.
    pub fn node_count(&self) -> usize {
        self.empties.len()
            + self.syntaxes.len()
            + self.packages.len()
            + self.imports.len()
            + self.defs.len()
            + self.bodies.len()
            + self.ranges.len()
            + self.literals.len()
            + self.expr_paths.len()
            + self.expr_prefixed.len()
            + self.expr_ranges.len()
            + self.arrays.len()
            + self.dicts.len()
            + self.fields.len()
            + self.type_paths.len()
            + self.type_prefixed.len()
            + self.generics.len()
            + self.options.len()
    }

    // Declarations

    /// A lone `;`.
    #[track_caller]
    pub fn new_decl_empty(&mut self, semi: Token) -> DeclEmptyId {
        let row = RawDeclEmpty {
            semi: semi.raw_in(self.id),
        };
        let idx = push_row(&mut self.empties, row);
        self.record(NodeKey::Decl(DeclKind::Empty, idx.get()));
        DeclEmptyId::new(self.id, idx)
    }

    #[track_caller]
    pub fn new_decl_syntax(&mut self, args: DeclSyntaxArgs) -> DeclSyntaxId {
        let id = self.id;
        let row = RawDeclSyntax {
            keyword: args.keyword.raw_in(id),
            equals: raw_opt(args.equals, id),
            value: args.value.map(|v| v.raw_in(id)),
            options: args.options.map(|o| o.idx_in(id)),
            semi: raw_opt(args.semi, id),
        };
        let idx = push_row(&mut self.syntaxes, row);
        self.record(NodeKey::Decl(DeclKind::Syntax, idx.get()));
        DeclSyntaxId::new(id, idx)
    }

    #[track_caller]
    pub fn new_decl_package(&mut self, args: DeclPackageArgs) -> DeclPackageId {
        let id = self.id;
        let row = RawDeclPackage {
            keyword: args.keyword.raw_in(id),
            path: raw_path_opt(args.path, id),
            options: args.options.map(|o| o.idx_in(id)),
            semi: raw_opt(args.semi, id),
        };
        let idx = push_row(&mut self.packages, row);
        self.record(NodeKey::Decl(DeclKind::Package, idx.get()));
        DeclPackageId::new(id, idx)
    }

    #[track_caller]
    pub fn new_decl_import(&mut self, args: DeclImportArgs) -> DeclImportId {
        let id = self.id;
        let row = RawDeclImport {
            keyword: args.keyword.raw_in(id),
            modifier: raw_opt(args.modifier, id),
            path: args.path.map(|p| p.raw_in(id)),
            options: args.options.map(|o| o.idx_in(id)),
            semi: raw_opt(args.semi, id),
        };
        let idx = push_row(&mut self.imports, row);
        self.record(NodeKey::Decl(DeclKind::Import, idx.get()));
        DeclImportId::new(id, idx)
    }

    #[track_caller]
    pub fn new_decl_def(&mut self, args: DeclDefArgs) -> DeclDefId {
        let id = self.id;
        let row = RawDeclDef {
            ty: args.ty.map(|t| t.raw_in(id)),
            name: raw_path_opt(args.name, id),
            signature: args.signature.map(|s| Box::new(lower_signature(s, id))),
            equals: raw_opt(args.equals, id),
            value: args.value.map(|v| v.raw_in(id)),
            options: args.options.map(|o| o.idx_in(id)),
            body: args.body.map(|b| b.idx_in(id)),
            semi: raw_opt(args.semi, id),
            corrupt: args.corrupt,
        };
        let idx = push_row(&mut self.defs, row);
        self.record(NodeKey::Decl(DeclKind::Def, idx.get()));
        DeclDefId::new(id, idx)
    }

    /// An empty body. `braces` is the `{` (or `}`) of its delimiters.
    #[track_caller]
    pub fn new_decl_body(&mut self, braces: Option<Token>) -> DeclBodyId {
        let row = RawDeclBody {
            braces: raw_opt(braces, self.id),
            ..RawDeclBody::default()
        };
        let idx = push_row(&mut self.bodies, row);
        self.record(NodeKey::Decl(DeclKind::Body, idx.get()));
        DeclBodyId::new(self.id, idx)
    }

    #[track_caller]
    pub fn new_decl_range(&mut self, args: DeclRangeArgs) -> DeclRangeId {
        let id = self.id;
        let row = RawDeclRange {
            keyword: args.keyword.raw_in(id),
            args: lower_list(args.args, id),
            options: args.options.map(|o| o.idx_in(id)),
            semi: raw_opt(args.semi, id),
        };
        let idx = push_row(&mut self.ranges, row);
        self.record(NodeKey::Decl(DeclKind::Range, idx.get()));
        DeclRangeId::new(id, idx)
    }

    // Expressions

    #[track_caller]
    pub fn new_expr_literal(&mut self, token: Token) -> ExprLiteralId {
        self.new_expr_strings(token, &[])
    }

    /// Adjacent string literals read as one value: `"foo" 'bar'`.
    #[track_caller]
    pub fn new_expr_strings(&mut self, first: Token, rest: &[Token]) -> ExprLiteralId {
        let id = self.id;
        let row = RawExprLiteral {
            token: first.raw_in(id),
            rest: rest.iter().map(|t| t.raw_in(id)).collect(),
        };
        let idx = push_row(&mut self.literals, row);
        self.record(NodeKey::Expr(ExprKind::Literal, idx.get()));
        ExprLiteralId::new(self.id, idx)
    }

    #[track_caller]
    pub fn new_expr_path(&mut self, path: PathTokens) -> ExprPathId {
        let row = RawExprPath {
            path: path.raw_in(self.id),
        };
        let idx = push_row(&mut self.expr_paths, row);
        self.record(NodeKey::Expr(ExprKind::Path, idx.get()));
        ExprPathId::new(self.id, idx)
    }

    #[track_caller]
    pub fn new_expr_prefixed(&mut self, args: ExprPrefixedArgs) -> ExprPrefixedId {
        let id = self.id;
        let row = RawExprPrefixed {
            prefix: args.prefix.raw_in(id),
            expr: args.expr.map(|e| e.raw_in(id)),
        };
        let idx = push_row(&mut self.expr_prefixed, row);
        self.record(NodeKey::Expr(ExprKind::Prefixed, idx.get()));
        ExprPrefixedId::new(id, idx)
    }

    #[track_caller]
    pub fn new_expr_range(&mut self, args: ExprRangeArgs) -> ExprRangeId {
        let id = self.id;
        let row = RawExprRange {
            start: args.start.map(|e| e.raw_in(id)),
            to: args.to.raw_in(id),
            end: args.end.map(|e| e.raw_in(id)),
        };
        let idx = push_row(&mut self.expr_ranges, row);
        self.record(NodeKey::Expr(ExprKind::Range, idx.get()));
        ExprRangeId::new(id, idx)
    }

    #[track_caller]
    pub fn new_expr_array(&mut self, args: ExprArrayArgs) -> ExprArrayId {
        let id = self.id;
        let row = RawExprArray {
            brackets: args.brackets.raw_in(id),
            elems: lower_list(args.elems, id),
        };
        let idx = push_row(&mut self.arrays, row);
        self.record(NodeKey::Expr(ExprKind::Array, idx.get()));
        ExprArrayId::new(id, idx)
    }

    #[track_caller]
    pub fn new_expr_dict(&mut self, args: ExprDictArgs) -> ExprDictId {
        let id = self.id;
        let row = RawExprDict {
            braces: args.braces.raw_in(id),
            entries: lower_list(args.entries, id),
        };
        let idx = push_row(&mut self.dicts, row);
        self.record(NodeKey::Expr(ExprKind::Dict, idx.get()));
        ExprDictId::new(id, idx)
    }

    #[track_caller]
    pub fn new_expr_field(&mut self, args: ExprFieldArgs) -> ExprFieldId {
        let id = self.id;
        let row = RawExprField {
            key: args.key.map(|e| e.raw_in(id)),
            colon: raw_opt(args.colon, id),
            value: args.value.map(|e| e.raw_in(id)),
        };
        let idx = push_row(&mut self.fields, row);
        self.record(NodeKey::Expr(ExprKind::Field, idx.get()));
        ExprFieldId::new(id, idx)
    }

    // Types

    #[track_caller]
    pub fn new_type_path(&mut self, path: PathTokens) -> TypePathId {
        let row = RawTypePath {
            path: path.raw_in(self.id),
        };
        let idx = push_row(&mut self.type_paths, row);
        self.record(NodeKey::Type(TypeKind::Path, idx.get()));
        TypePathId::new(self.id, idx)
    }

    #[track_caller]
    pub fn new_type_prefixed(&mut self, args: TypePrefixedArgs) -> TypePrefixedId {
        let id = self.id;
        let row = RawTypePrefixed {
            prefix: args.prefix.raw_in(id),
            ty: args.ty.map(|t| t.raw_in(id)),
        };
        let idx = push_row(&mut self.type_prefixed, row);
        self.record(NodeKey::Type(TypeKind::Prefixed, idx.get()));
        TypePrefixedId::new(id, idx)
    }

    #[track_caller]
    pub fn new_type_generic(&mut self, args: TypeGenericArgs) -> TypeGenericId {
        let id = self.id;
        let row = RawTypeGeneric {
            path: args.path.raw_in(id),
            open: raw_opt(args.open, id),
            args: lower_list(args.args, id),
            close: raw_opt(args.close, id),
        };
        let idx = push_row(&mut self.generics, row);
        self.record(NodeKey::Type(TypeKind::Generic, idx.get()));
        TypeGenericId::new(id, idx)
    }

    // Options

    #[track_caller]
    pub fn new_options(&mut self, args: OptionsArgs) -> OptionsId {
        let id = self.id;
        let row = RawOptions {
            brackets: args.brackets.raw_in(id),
            entries: lower_list(args.entries, id),
        };
        let idx = push_row(&mut self.options, row);
        self.record(NodeKey::Options(idx.get()));
        OptionsId::new(id, idx)
    }

    // Mutation

    /// Mutable access to a body's declarations.
    #[track_caller]
    pub fn body_mut(&mut self, body: DeclBodyId) -> BodyMut<'_> {
        let idx = body.idx_in(self.id);
        BodyMut {
            ctx: self.id,
            body: &mut self.bodies[slot(idx)],
            linked: &mut self.linked,
        }
    }

    /// Mutable access to a definition's fields.
    #[track_caller]
    pub fn def_mut(&mut self, def: DeclDefId) -> DefMut<'_> {
        let idx = def.idx_in(self.id);
        DefMut {
            ctx: self.id,
            def: &mut self.defs[slot(idx)],
        }
    }

    /// The argument list of a `reserved`/`extensions` declaration.
    #[track_caller]
    pub fn range_args_mut(&mut self, range: DeclRangeId) -> CommasMut<'_, ExprId> {
        let idx = range.idx_in(self.id);
        CommasMut::new(self.id, &mut self.ranges[slot(idx)].args)
    }

    /// The elements of an array expression.
    #[track_caller]
    pub fn array_elems_mut(&mut self, array: ExprArrayId) -> CommasMut<'_, ExprId> {
        let idx = array.idx_in(self.id);
        CommasMut::new(self.id, &mut self.arrays[slot(idx)].elems)
    }

    /// The entries of a dictionary expression.
    #[track_caller]
    pub fn dict_entries_mut(&mut self, dict: ExprDictId) -> CommasMut<'_, ExprFieldId> {
        let idx = dict.idx_in(self.id);
        CommasMut::new(self.id, &mut self.dicts[slot(idx)].entries)
    }

    /// The type arguments of a generic type.
    #[track_caller]
    pub fn generic_args_mut(&mut self, generic: TypeGenericId) -> CommasMut<'_, TypeId> {
        let idx = generic.idx_in(self.id);
        CommasMut::new(self.id, &mut self.generics[slot(idx)].args)
    }

    /// The entries of a compact options list.
    #[track_caller]
    pub fn options_entries_mut(&mut self, options: OptionsId) -> CommasMut<'_, OptionEntryArgs> {
        let idx = options.idx_in(self.id);
        CommasMut::new(self.id, &mut self.options[slot(idx)].entries)
    }
}

#[track_caller]
fn lower_signature(sig: SignatureArgs, id: ContextId) -> RawSignature {
    RawSignature {
        inputs: raw_opt(sig.inputs, id),
        input_list: lower_list(sig.input_list, id),
        returns: raw_opt(sig.returns, id),
        outputs: raw_opt(sig.outputs, id),
        output_list: lower_list(sig.output_list, id),
    }
}

impl IntoRaw for OptionEntryArgs {
    type Raw = RawOptionEntry;
    #[track_caller]
    fn into_raw(self, ctx: ContextId) -> RawOptionEntry {
        RawOptionEntry {
            path: raw_path_opt(self.path, ctx),
            equals: raw_opt(self.equals, ctx),
            value: self.value.map(|v| v.raw_in(ctx)),
        }
    }
}

impl fmt::Debug for AstArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstArena")
            .field("id", &self.id)
            .field("decls", &(self.defs.len() + self.bodies.len()))
            .field("nodes", &self.node_count())
            .field("traced", &self.traces_creation())
            .finish_non_exhaustive()
    }
}

/// Mutable access to a declaration body.
pub struct BodyMut<'a> {
    ctx: ContextId,
    body: &'a mut RawDeclBody,
    linked: &'a mut FxHashSet<(DeclKind, u32)>,
}

impl BodyMut<'_> {
    /// Number of declarations.
    #[inline]
    pub fn len(&self) -> usize {
        self.body.kinds.len()
    }

    /// Whether the body has no declarations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.kinds.is_empty()
    }

    /// Insert `decl` at position `i`, shifting later declarations up.
    ///
    /// # Panics
    /// Panics if `i > len`, if `decl` belongs to another context, or if it
    /// is already in a body (this one included). The file body can never be
    /// inserted.
    #[track_caller]
    pub fn insert(&mut self, i: usize, decl: impl Into<DeclId>) {
        let raw: RawDecl = decl.into().raw_in(self.ctx);
        assert!(
            i <= self.len(),
            "insert index {i} out of bounds for body of length {}",
            self.len()
        );
        assert!(
            self.linked.insert((raw.kind, raw.idx.get())),
            "{:?}({}) is already in a body; delete it before inserting it again",
            raw.kind,
            raw.idx
        );
        self.body.kinds.insert(i, raw.kind);
        self.body.idxs.insert(i, raw.idx.get());
    }

    /// Append `decl`.
    #[track_caller]
    pub fn push(&mut self, decl: impl Into<DeclId>) {
        let len = self.len();
        self.insert(len, decl);
    }

    /// Unlink the declaration at `i`, shifting later declarations down.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[track_caller]
    pub fn delete(&mut self, i: usize) {
        assert!(
            i < self.len(),
            "delete index {i} out of bounds for body of length {}",
            self.len()
        );
        let kind = self.body.kinds.remove(i);
        let idx = self.body.idxs.remove(i);
        self.linked.remove(&(kind, idx));
    }

    /// Set the brace token.
    #[track_caller]
    pub fn set_braces(&mut self, braces: Option<Token>) {
        self.body.braces = raw_opt(braces, self.ctx);
    }
}

/// Mutable access to a definition.
pub struct DefMut<'a> {
    ctx: ContextId,
    def: &'a mut RawDeclDef,
}

impl DefMut<'_> {
    #[track_caller]
    pub fn set_type(&mut self, ty: Option<TypeId>) {
        self.def.ty = ty.map(|t| t.raw_in(self.ctx));
    }

    #[track_caller]
    pub fn set_name(&mut self, name: Option<PathTokens>) {
        self.def.name = raw_path_opt(name, self.ctx);
    }

    #[track_caller]
    pub fn set_equals(&mut self, equals: Option<Token>) {
        self.def.equals = raw_opt(equals, self.ctx);
    }

    #[track_caller]
    pub fn set_value(&mut self, value: Option<ExprId>) {
        self.def.value = value.map(|v| v.raw_in(self.ctx));
    }

    #[track_caller]
    pub fn set_options(&mut self, options: Option<OptionsId>) {
        self.def.options = options.map(|o| o.idx_in(self.ctx));
    }

    #[track_caller]
    pub fn set_body(&mut self, body: Option<DeclBodyId>) {
        self.def.body = body.map(|b| b.idx_in(self.ctx));
    }

    #[track_caller]
    pub fn set_semi(&mut self, semi: Option<Token>) {
        self.def.semi = raw_opt(semi, self.ctx);
    }

    /// Replace the signature; `None` removes it.
    #[track_caller]
    pub fn set_signature(&mut self, signature: Option<SignatureArgs>) {
        self.def.signature = signature.map(|s| Box::new(lower_signature(s, self.ctx)));
    }

    /// The method inputs, creating an empty signature if there is none.
    pub fn inputs_mut(&mut self) -> CommasMut<'_, TypeId> {
        let sig = self.def.signature.get_or_insert_with(Box::default);
        CommasMut::new(self.ctx, &mut sig.input_list)
    }

    /// The method outputs, creating an empty signature if there is none.
    pub fn outputs_mut(&mut self) -> CommasMut<'_, TypeId> {
        let sig = self.def.signature.get_or_insert_with(Box::default);
        CommasMut::new(self.ctx, &mut sig.output_list)
    }

    /// Flag the definition as one the parser could not interpret confidently.
    /// The flag is sticky.
    pub fn mark_corrupt(&mut self) {
        self.def.corrupt = true;
    }
}
