//! Expressions, lowest precedence first:
//!
//! ```text
//! expr  = range [ ":" range ]
//! range = atom [ "to" atom ]
//! atom  = literal | path | "-" atom | "[" expr, ... "]" | "{" entry ... "}"
//! entry = range ( ":" | "=" ) range | range "{" ... "}" | range
//! ```
//!
//! An entry without a key is kept, with the key absent.

use proto_ir::ast::{
    ExprArrayArgs, ExprDictArgs, ExprFieldArgs, ExprFieldId, ExprId, ExprPrefixedArgs,
    ExprRangeArgs,
};
use proto_ir::{Cursor, Token, TokenKind, TokenRef};
use proto_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::ListRules;
use crate::errors;
use crate::parser::{can_begin_path, is_tree, parse_path, span_since, Parser};

impl<'a> Parser<'a> {
    /// A value: `1`, `-inf`, `foo.BAR`, `[1, 2]`, `{ a: 1 }`, `1 to max`,
    /// `key: value`.
    pub(crate) fn expr(&mut self, c: &mut Cursor<'a>) -> Option<ExprId> {
        ensure_sufficient_stack(|| {
            let key = self.range_expr(c);
            match self.field_rest(c, key, false) {
                Some(field) => Some(field.into()),
                None => key,
            }
        })
    }

    /// `start to end`, or a lone atom.
    pub(crate) fn range_expr(&mut self, c: &mut Cursor<'a>) -> Option<ExprId> {
        let start = self.atom(c)?;
        Some(self.range_tail(c, start))
    }

    /// The `to end` part of a range whose start was already parsed.
    pub(crate) fn range_tail(&mut self, c: &mut Cursor<'a>, start: ExprId) -> ExprId {
        let Some(to) = c.peek().filter(|t| t.is_keyword("to")) else {
            return start;
        };
        c.next();
        let end = self.atom(c);
        if end.is_none() {
            self.error(errors::expected_expr(c.peek_span(), "end of range", c.peek()));
        }
        let args = ExprRangeArgs {
            start: Some(start),
            to: to.token(),
            end,
        };
        self.arena.new_expr_range(args).into()
    }

    /// Everything after a field key. `None`, consuming nothing, if the key
    /// is not followed by a separator or a message value.
    ///
    /// Inside message literals `=` separates as well, and a message value
    /// may follow its key directly.
    fn field_rest(
        &mut self,
        c: &mut Cursor<'a>,
        key: Option<ExprId>,
        in_message: bool,
    ) -> Option<ExprFieldId> {
        let next = c.peek()?;
        let colon = if next.is_leaf() && (next.is_punct(":") || (in_message && next.is_punct("="))) {
            c.next();
            Some(next)
        } else if in_message && key.is_some() && is_tree(next, "{") {
            None
        } else {
            return None;
        };
        let value = self.range_expr(c);
        if value.is_none() {
            self.error(errors::expected_expr(c.peek_span(), "field value", c.peek()));
        }
        let args = ExprFieldArgs {
            key,
            colon: colon.map(TokenRef::token),
            value,
        };
        Some(self.arena.new_expr_field(args))
    }

    fn atom(&mut self, c: &mut Cursor<'a>) -> Option<ExprId> {
        ensure_sufficient_stack(|| self.atom_inner(c))
    }

    fn atom_inner(&mut self, c: &mut Cursor<'a>) -> Option<ExprId> {
        let tok = c.peek()?;
        match tok.kind() {
            TokenKind::Number => {
                c.next();
                Some(self.arena.new_expr_literal(tok.token()).into())
            }
            TokenKind::String => Some(self.strings(c, tok)),
            _ if is_tree(tok, "[") => {
                c.next();
                Some(self.array(tok))
            }
            _ if is_tree(tok, "{") => {
                c.next();
                Some(self.dict(tok))
            }
            _ if tok.is_leaf() && tok.is_punct("-") => {
                c.next();
                let expr = self.atom(c);
                if expr.is_none() {
                    self.error(errors::expected_expr(c.peek_span(), "value after `-`", c.peek()));
                }
                let args = ExprPrefixedArgs {
                    prefix: tok.token(),
                    expr,
                };
                Some(self.arena.new_expr_prefixed(args).into())
            }
            _ if can_begin_path(tok) => {
                let path = parse_path(c)?;
                Some(self.arena.new_expr_path(path.tokens).into())
            }
            _ => None,
        }
    }

    /// `first` and any string literals right after it, read as a single
    /// value. `first` is the next token of `c`.
    pub(crate) fn strings(&mut self, c: &mut Cursor<'a>, first: TokenRef<'a>) -> ExprId {
        c.next();
        let mut rest: SmallVec<[Token; 2]> = SmallVec::new();
        while let Some(tok) = c.peek().filter(|t| t.kind() == TokenKind::String) {
            c.next();
            rest.push(tok.token());
        }
        self.arena.new_expr_strings(first.token(), &rest).into()
    }

    fn array(&mut self, brackets: TokenRef<'a>) -> ExprId {
        let mut inner = brackets.children();
        let list = self.delimited(&mut inner, ListRules::COMMAS, "array elements", Self::expr);
        self.finish_tree(&mut inner, list.broken, "in array");
        let args = ExprArrayArgs {
            brackets: brackets.token(),
            elems: list.items,
        };
        self.arena.new_expr_array(args).into()
    }

    fn dict(&mut self, braces: TokenRef<'a>) -> ExprId {
        let mut inner = braces.children();
        let list = self.delimited(&mut inner, ListRules::ENTRIES, "message fields", Self::entry);
        self.finish_tree(&mut inner, list.broken, "in message literal");
        let args = ExprDictArgs {
            braces: braces.token(),
            entries: list.items,
        };
        self.arena.new_expr_dict(args).into()
    }

    /// One entry of a message literal. A bare value becomes an entry with
    /// no key.
    fn entry(&mut self, c: &mut Cursor<'a>) -> Option<ExprFieldId> {
        let start = c.peek_span();
        let key = self.range_expr(c);
        if let Some(field) = self.field_rest(c, key, true) {
            return Some(field);
        }
        let value = key?;
        self.error(errors::keyless_entry(span_since(start, c)));
        let args = ExprFieldArgs {
            key: None,
            colon: None,
            value: Some(value),
        };
        Some(self.arena.new_expr_field(args))
    }
}
