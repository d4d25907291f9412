//! General definitions and their classification.
//!
//! The parser does not decide whether `message Foo { ... }` is a message or
//! a field of type `message`: it records the type, name and followers it saw
//! and [`DeclDef::classify`] decides from one table.

use std::fmt;

use bitflags::bitflags;

use crate::ast::expr::ExprAny;
use crate::ast::nodes::{RawDeclDef, RawSignature};
use crate::ast::options::CompactOptions;
use crate::ast::path::Path;
use crate::ast::ty::TypeAny;
use crate::ast::{tok_span, tree_span, Commas, Context, DeclBody};
use crate::{Span, TokenRef};

/// What a definition turned out to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefKind {
    Message,
    Enum,
    Service,
    Extend,
    Field,
    EnumValue,
    Oneof,
    Group,
    Method,
    Option,
}

impl DefKind {
    pub const fn describe(self) -> &'static str {
        match self {
            DefKind::Message => "message definition",
            DefKind::Enum => "enum definition",
            DefKind::Service => "service definition",
            DefKind::Extend => "extension block",
            DefKind::Field => "field",
            DefKind::EnumValue => "enum value",
            DefKind::Oneof => "oneof definition",
            DefKind::Group => "group",
            DefKind::Method => "method",
            DefKind::Option => "option setting",
        }
    }

    /// Whether this kind introduces a body of declarations.
    pub const fn has_body(self) -> bool {
        matches!(
            self,
            DefKind::Message
                | DefKind::Enum
                | DefKind::Service
                | DefKind::Extend
                | DefKind::Oneof
                | DefKind::Group
        )
    }
}

impl fmt::Display for DefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

bitflags! {
    /// Which parts of a definition are present.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DefShape: u8 {
        const TYPE = 1 << 0;
        const NAME = 1 << 1;
        const BODY = 1 << 2;
        const SIGNATURE = 1 << 3;
        const VALUE = 1 << 4;
        /// The type carries modifiers such as `optional`.
        const PREFIXED = 1 << 5;
    }
}

struct Rule {
    keyword: &'static str,
    require: DefShape,
    forbid: DefShape,
    kind: DefKind,
}

const BLOCK_FORBID: DefShape = DefShape::SIGNATURE
    .union(DefShape::VALUE)
    .union(DefShape::PREFIXED);

/// Keyword × shape → kind. First matching row wins; no match falls back to
/// field (typed) or enum value (untyped).
const RULES: &[Rule] = &[
    Rule {
        keyword: "message",
        require: DefShape::BODY,
        forbid: BLOCK_FORBID,
        kind: DefKind::Message,
    },
    Rule {
        keyword: "enum",
        require: DefShape::BODY,
        forbid: BLOCK_FORBID,
        kind: DefKind::Enum,
    },
    Rule {
        keyword: "service",
        require: DefShape::BODY,
        forbid: BLOCK_FORBID,
        kind: DefKind::Service,
    },
    Rule {
        keyword: "extend",
        require: DefShape::BODY,
        forbid: BLOCK_FORBID,
        kind: DefKind::Extend,
    },
    Rule {
        keyword: "oneof",
        require: DefShape::BODY,
        forbid: BLOCK_FORBID,
        kind: DefKind::Oneof,
    },
    Rule {
        keyword: "group",
        require: DefShape::BODY,
        forbid: DefShape::SIGNATURE,
        kind: DefKind::Group,
    },
    Rule {
        keyword: "rpc",
        require: DefShape::SIGNATURE,
        forbid: DefShape::VALUE.union(DefShape::PREFIXED),
        kind: DefKind::Method,
    },
    Rule {
        keyword: "option",
        require: DefShape::NAME.union(DefShape::VALUE),
        forbid: DefShape::BODY
            .union(DefShape::SIGNATURE)
            .union(DefShape::PREFIXED),
        kind: DefKind::Option,
    },
];

/// Classify a definition from its introducing keyword (the innermost type
/// path, if it is a single identifier) and the parts present.
pub fn classify_shape(keyword: Option<&str>, shape: DefShape) -> DefKind {
    if let Some(kw) = keyword {
        let hit = RULES.iter().find(|r| {
            r.keyword == kw && shape.contains(r.require) && !shape.intersects(r.forbid)
        });
        if let Some(rule) = hit {
            return rule.kind;
        }
    }
    if shape.contains(DefShape::TYPE) {
        DefKind::Field
    } else {
        DefKind::EnumValue
    }
}

define_view!(
    /// Any general definition.
    DeclDef, DeclDefId, defs, RawDeclDef
);

impl<'a> DeclDef<'a> {
    /// The leading type, which may be a keyword such as `message`.
    pub fn ty(self) -> Option<TypeAny<'a>> {
        self.row().ty.map(|t| TypeAny::new(self.ctx, t))
    }

    pub fn name(self) -> Option<Path<'a>> {
        Path::new(self.ctx, self.row().name)
    }

    /// `(inputs) returns (outputs)`, for methods.
    pub fn signature(self) -> Option<Signature<'a>> {
        self.row().signature.as_deref().map(|raw| Signature {
            ctx: self.ctx,
            raw,
        })
    }

    pub fn equals(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().equals)
    }

    /// The value: a field number, enum number or option value.
    pub fn value(self) -> Option<ExprAny<'a>> {
        self.row().value.map(|v| ExprAny::new(self.ctx, v))
    }

    pub fn options(self) -> Option<CompactOptions<'a>> {
        self.row().options.map(|o| CompactOptions::new(self.ctx, o))
    }

    pub fn body(self) -> Option<DeclBody<'a>> {
        self.row().body.map(|b| DeclBody::new(self.ctx, b))
    }

    pub fn semi(self) -> Option<TokenRef<'a>> {
        self.tok(self.row().semi)
    }

    /// Whether the parser could not interpret this definition confidently.
    pub fn is_corrupt(self) -> bool {
        self.row().corrupt
    }

    /// Which parts are present.
    pub fn shape(self) -> DefShape {
        let row = self.row();
        let mut shape = DefShape::empty();
        if let Some(ty) = self.ty() {
            shape |= DefShape::TYPE;
            if ty.as_prefixed().is_some() {
                shape |= DefShape::PREFIXED;
            }
        }
        shape.set(DefShape::NAME, !row.name.is_none());
        shape.set(DefShape::BODY, row.body.is_some());
        shape.set(DefShape::SIGNATURE, row.signature.is_some());
        shape.set(DefShape::VALUE, row.value.is_some());
        shape
    }

    /// The keyword token candidate: the innermost type path, if it is a
    /// single identifier.
    pub fn keyword_token(self) -> Option<TokenRef<'a>> {
        self.ty()?.remove_prefixes()?.as_path()?.path().as_ident()
    }

    /// Decide what this definition is.
    pub fn classify(self) -> DefKind {
        let kw = self.keyword_token().map(TokenRef::text);
        classify_shape(kw, self.shape())
    }

    /// The introducing keyword, if [`classify`](Self::classify) matched one.
    pub fn keyword(self) -> Option<TokenRef<'a>> {
        let kind = self.classify();
        if matches!(kind, DefKind::Field | DefKind::EnumValue) {
            return None;
        }
        self.keyword_token()
    }

    pub fn span(self) -> Span {
        self.ty()
            .map_or(Span::NONE, TypeAny::span)
            .join(self.name().map_or(Span::NONE, Path::span))
            .join(self.signature().map_or(Span::NONE, Signature::span))
            .join(tok_span(self.equals()))
            .join(self.value().map_or(Span::NONE, ExprAny::span))
            .join(self.options().map_or(Span::NONE, CompactOptions::span))
            .join(self.body().map_or(Span::NONE, DeclBody::span))
            .join(tok_span(self.semi()))
    }
}

/// A method signature.
#[derive(Copy, Clone)]
pub struct Signature<'a> {
    ctx: &'a Context,
    raw: &'a RawSignature,
}

impl<'a> Signature<'a> {
    /// The `(` of the input list.
    pub fn input_parens(self) -> Option<TokenRef<'a>> {
        self.ctx.stream().resolve(self.raw.inputs)
    }

    pub fn inputs(self) -> Commas<'a, TypeAny<'a>> {
        Commas::new(self.ctx, &self.raw.input_list)
    }

    pub fn returns(self) -> Option<TokenRef<'a>> {
        self.ctx.stream().resolve(self.raw.returns)
    }

    /// The `(` of the output list.
    pub fn output_parens(self) -> Option<TokenRef<'a>> {
        self.ctx.stream().resolve(self.raw.outputs)
    }

    pub fn outputs(self) -> Commas<'a, TypeAny<'a>> {
        Commas::new(self.ctx, &self.raw.output_list)
    }

    pub fn span(self) -> Span {
        tree_span(self.input_parens())
            .join(tok_span(self.returns()))
            .join(tree_span(self.output_parens()))
            .join(self.inputs().span())
            .join(self.outputs().span())
    }
}

impl fmt::Debug for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature @ {:?}", self.span())
    }
}
