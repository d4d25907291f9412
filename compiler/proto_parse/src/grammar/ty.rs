//! Types: `int32`, `.pkg.Msg`, `repeated Foo`, `map<string, Bar>`.
//!
//! Modifiers are consumed greedily. When no path follows them, the last
//! modifier is taken as the type path instead, so `optional = 1;` has the
//! type `optional` rather than a dangling modifier.

use proto_ir::ast::{is_separator, TypeGenericArgs, TypeId, TypePrefix, TypePrefixedArgs};
use proto_ir::{Cursor, Span, TokenKind, TokenRef};
use proto_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::trace;

use super::ListRules;
use crate::errors;
use crate::parser::{eat_punct, parse_path, span_since, ParsedPath, Parser};

/// A type as parsed, before any of it is stored.
///
/// Kept apart so that a definition can still move the base path into its
/// name slot once it sees that no name followed.
#[derive(Default)]
pub(crate) struct TypeParts<'a> {
    pub(crate) prefixes: SmallVec<[TokenRef<'a>; 2]>,
    pub(crate) base: Option<Base<'a>>,
    pub(crate) span: Span,
}

pub(crate) enum Base<'a> {
    Path(ParsedPath<'a>),
    Generic(TypeGenericArgs),
}

impl<'a> TypeParts<'a> {
    /// The identifier this type consists of, with no modifiers or arguments.
    pub(crate) fn keyword(&self) -> Option<TokenRef<'a>> {
        if !self.prefixes.is_empty() {
            return None;
        }
        match &self.base {
            Some(Base::Path(path)) => path.ident,
            _ => None,
        }
    }

    /// The identifier under the modifiers, as used for classification.
    pub(crate) fn innermost_keyword(&self) -> Option<TokenRef<'a>> {
        match &self.base {
            Some(Base::Path(path)) => path.ident,
            _ => None,
        }
    }
}

const TYPE_ARGS: ListRules = ListRules::COMMAS.ending_at(is_close_angle);

impl<'a> Parser<'a> {
    /// Parse and store a type.
    pub(crate) fn ty(&mut self, c: &mut Cursor<'a>) -> Option<TypeId> {
        ensure_sufficient_stack(|| {
            let parts = self.type_parts(c)?;
            self.build_type(parts)
        })
    }

    /// Parse a type without storing it. `None` if nothing was consumed.
    pub(crate) fn type_parts(&mut self, c: &mut Cursor<'a>) -> Option<TypeParts<'a>> {
        let start = c.peek_span();
        let mut prefixes = SmallVec::new();
        while let Some(tok) = c.peek().filter(|t| is_prefix(*t, c)) {
            c.next();
            prefixes.push(tok);
        }
        let base = match parse_path(c) {
            Some(path) => Some(self.generic(c, path)),
            None => prefixes.pop().map(|tok| Base::Path(ParsedPath::single(tok))),
        };
        base.map(|base| TypeParts {
            prefixes,
            base: Some(base),
            span: span_since(start, c),
        })
    }

    /// Store a parsed type, wrapping the base in its modifiers innermost
    /// first.
    pub(crate) fn build_type(&mut self, parts: TypeParts<'a>) -> Option<TypeId> {
        let mut ty: Option<TypeId> = parts.base.map(|base| match base {
            Base::Path(path) => self.arena.new_type_path(path.tokens).into(),
            Base::Generic(args) => self.arena.new_type_generic(args).into(),
        });
        for prefix in parts.prefixes.iter().rev() {
            let args = TypePrefixedArgs {
                prefix: prefix.token(),
                ty,
            };
            ty = Some(self.arena.new_type_prefixed(args).into());
        }
        ty
    }

    /// `<K, V>` after a type path. The arguments are leaf tokens, since the
    /// lexer does not pair angle brackets.
    fn generic(&mut self, c: &mut Cursor<'a>, path: ParsedPath<'a>) -> Base<'a> {
        let Some(open) = eat_punct(c, "<") else {
            return Base::Path(path);
        };
        let list = self.delimited(c, TYPE_ARGS, "type arguments", Self::ty);
        let close = eat_punct(c, ">");
        if close.is_none() {
            trace!(open = ?open.span(), "unclosed type arguments");
            self.error(errors::unclosed_angle(open.span(), c.peek_span(), c.peek()));
        }
        Base::Generic(TypeGenericArgs {
            path: path.tokens,
            open: Some(open.token()),
            args: list.items,
            close: close.map(TokenRef::token),
        })
    }
}

/// A modifier keyword that is not itself the start of a qualified path.
fn is_prefix(tok: TokenRef<'_>, c: &Cursor<'_>) -> bool {
    if tok.kind() != TokenKind::Ident || TypePrefix::from_keyword(tok.text()).is_none() {
        return false;
    }
    let mut after = *c;
    after.next();
    !after.peek().is_some_and(is_separator)
}

fn is_close_angle(tok: TokenRef<'_>) -> bool {
    tok.is_punct(">")
}
