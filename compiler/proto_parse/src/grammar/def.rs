//! General definitions: messages, fields, enum values, methods, options...
//!
//! After the type and name, a definition takes any of its followers in any
//! order:
//!
//! ```text
//! "(" types ")"            inputs
//! "returns" "(" types ")"  outputs
//! "[" options "]"          compact options
//! "{" decls "}"            body
//! "=" expr                 value
//! ```
//!
//! Each may appear once. A repeat is parsed so that its contents are still
//! checked, reported, and dropped: the first occurrence is the one kept.

use proto_ir::ast::{
    classify_shape, DeclDefArgs, DeclDefId, DefKind, DefShape, SignatureArgs, TypeId, WithComma,
};
use proto_ir::{Cursor, Span, TokenKind, TokenRef};
use tracing::{debug, trace};

use super::ty::Base;
use super::{ListRules, TypeParts};
use crate::errors;
use crate::parser::{is_tree, span_since, ParsedPath, Parser};

/// Where each follower first appeared.
#[derive(Default)]
struct Seen {
    inputs: Option<Span>,
    outputs: Option<Span>,
    options: Option<Span>,
    body: Option<Span>,
    value: Option<Span>,
}

impl<'a> Parser<'a> {
    pub(crate) fn def(
        &mut self,
        c: &mut Cursor<'a>,
        ty: TypeParts<'a>,
        name: Option<ParsedPath<'a>>,
    ) -> DeclDefId {
        let (ty, name) = self.reattach(c, ty, name);
        let keyword = ty.innermost_keyword();
        let type_span = ty.span;
        let prefixed = !ty.prefixes.is_empty();
        let mut args = DeclDefArgs {
            ty: self.build_type(ty),
            name: name.map(|n| n.tokens),
            ..DeclDefArgs::default()
        };

        let mut seen = Seen::default();
        let mut signature = SignatureArgs::default();
        while let Some(tok) = c.peek() {
            if is_tree(tok, "(") {
                c.next();
                let list = self.type_list(tok);
                if self.first(&mut seen.inputs, tok.outer_span(), "input types") {
                    signature.inputs = Some(tok.token());
                    signature.input_list = list;
                } else {
                    args.corrupt = true;
                }
            } else if tok.is_keyword("returns") {
                c.next();
                let parens = c.peek().filter(|t| is_tree(*t, "("));
                let list = match parens {
                    Some(parens) => {
                        c.next();
                        self.type_list(parens)
                    }
                    None => {
                        self.error(errors::expected_outputs(c.peek_span(), c.peek()));
                        Vec::new()
                    }
                };
                if self.first(&mut seen.outputs, span_since(tok.span(), c), "output types") {
                    signature.returns = Some(tok.token());
                    signature.outputs = parens.map(TokenRef::token);
                    signature.output_list = list;
                } else {
                    args.corrupt = true;
                }
            } else if is_tree(tok, "[") {
                c.next();
                let options = self.compact_options(tok);
                if self.first(&mut seen.options, tok.outer_span(), "options") {
                    args.options = Some(options);
                } else {
                    args.corrupt = true;
                }
            } else if tok.is_punct("{") {
                c.next();
                let body = self.any_body(tok, c);
                if self.first(&mut seen.body, tok.outer_span(), "body") {
                    args.body = Some(body);
                } else {
                    args.corrupt = true;
                }
            } else if tok.is_leaf() && tok.is_punct("=") {
                c.next();
                let value = self.expr(c);
                if value.is_none() {
                    self.error(errors::expected_expr(c.peek_span(), "value after `=`", c.peek()));
                }
                if self.first(&mut seen.value, span_since(tok.span(), c), "value") {
                    args.equals = Some(tok.token());
                    args.value = value;
                } else {
                    args.corrupt = true;
                }
            } else if starts_bare_value(tok) {
                self.error(errors::missing_equals(self.stream, tok.span()));
                let value = self.expr(c);
                if self.first(&mut seen.value, span_since(tok.span(), c), "value") {
                    args.value = value;
                } else {
                    args.corrupt = true;
                }
            } else {
                break;
            }
        }
        if seen.inputs.is_some() || seen.outputs.is_some() {
            args.signature = Some(signature);
        }

        let kind = classify_shape(keyword.map(TokenRef::text), shape_of(&args, prefixed));
        if seen.body.is_none() {
            args.semi = self.semicolon(c, kind.describe());
        }
        if args.name.is_none() {
            if matches!(kind, DefKind::Field | DefKind::EnumValue) {
                self.error(errors::expected_name(type_span.end_point(), "field name", None));
            } else {
                self.error(errors::unnamed(kind, type_span));
                args.corrupt = true;
            }
        }
        if args.ty.is_none() && args.name.is_none() {
            args.corrupt = true;
        }

        if args.corrupt {
            debug!(kind = ?kind, at = ?type_span, "corrupt definition");
        } else {
            trace!(kind = ?kind, "definition");
        }
        self.arena.new_decl_def(args)
    }

    /// Settle a type that was not followed by a name.
    ///
    /// Under modifiers, the base path is the name and the type is missing:
    /// `optional optional = 1;`. A bare path is the name of an enum value
    /// unless a body or signature follows, as in `message { ... }`.
    fn reattach(
        &mut self,
        c: &Cursor<'a>,
        mut ty: TypeParts<'a>,
        name: Option<ParsedPath<'a>>,
    ) -> (TypeParts<'a>, Option<ParsedPath<'a>>) {
        if name.is_some() {
            return (ty, name);
        }
        let opens = c.peek().is_some_and(|t| t.is_punct("{") || is_tree(t, "("));
        match ty.base.take() {
            Some(Base::Path(path)) if !ty.prefixes.is_empty() => {
                if let Some(&prefix) = ty.prefixes.last() {
                    self.error(errors::missing_type(prefix, path.span));
                }
                (ty, Some(path))
            }
            Some(Base::Path(path)) if !opens => (ty, Some(path)),
            base => {
                ty.base = base;
                (ty, None)
            }
        }
    }

    /// Record the first occurrence of a follower. Later ones are reported
    /// and `false` is returned.
    fn first(&mut self, seen: &mut Option<Span>, span: Span, what: &str) -> bool {
        match *seen {
            None => {
                *seen = Some(span);
                true
            }
            Some(first) => {
                trace!(?first, again = ?span, what, "repeated follower");
                self.error(proto_diagnostic::more_than_once(first, span, what));
                false
            }
        }
    }

    /// `(A, stream B)`.
    fn type_list(&mut self, parens: TokenRef<'a>) -> Vec<WithComma<TypeId>> {
        let mut inner = parens.children();
        let list = self.delimited(&mut inner, ListRules::COMMAS, "types", Self::ty);
        self.finish_tree(&mut inner, list.broken, "in type list");
        list.items
    }
}

fn shape_of(args: &DeclDefArgs, prefixed: bool) -> DefShape {
    let mut shape = DefShape::empty();
    shape.set(DefShape::TYPE, args.ty.is_some());
    shape.set(DefShape::PREFIXED, prefixed);
    shape.set(DefShape::NAME, args.name.is_some());
    shape.set(DefShape::BODY, args.body.is_some());
    shape.set(DefShape::SIGNATURE, args.signature.is_some());
    shape.set(DefShape::VALUE, args.value.is_some());
    shape
}

/// A value written without its `=`: `int32 x 1;`.
fn starts_bare_value(tok: TokenRef<'_>) -> bool {
    match tok.kind() {
        TokenKind::Number | TokenKind::String => true,
        TokenKind::Punct => tok.is_leaf() && tok.is_punct("-"),
        _ => false,
    }
}
