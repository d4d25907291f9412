//! Compact options: `[deprecated = true, (my.ext).x = { a: 1 }]`.

use proto_ir::ast::{OptionEntryArgs, OptionsArgs, OptionsId};
use proto_ir::{Cursor, TokenRef};

use super::ListRules;
use crate::errors;
use crate::parser::{eat_punct, is_tree, parse_path, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn compact_options(&mut self, brackets: TokenRef<'a>) -> OptionsId {
        let mut inner = brackets.children();
        let list = self.delimited(&mut inner, ListRules::COMMAS, "options", Self::option_entry);
        self.finish_tree(&mut inner, list.broken, "in compact options");
        let args = OptionsArgs {
            brackets: brackets.token(),
            entries: list.items,
        };
        self.arena.new_options(args)
    }

    /// Options before the `;` of a declaration with a fixed grammar.
    pub(crate) fn trailing_options(&mut self, c: &mut Cursor<'a>) -> Option<OptionsId> {
        let brackets = c.peek().filter(|t| is_tree(*t, "["))?;
        c.next();
        Some(self.compact_options(brackets))
    }

    fn option_entry(&mut self, c: &mut Cursor<'a>) -> Option<OptionEntryArgs> {
        let next = c.peek()?;
        let path = parse_path(c);
        if path.is_none() {
            if !next.is_punct("=") {
                return None;
            }
            self.error(errors::expected_name(next.span(), "option name", Some(next)));
        }

        let equals = eat_punct(c, "=");
        let before_value = c.peek();
        let value = self.expr(c);
        match (equals, value) {
            (None, None) => self.error(errors::expected_equals(c.peek_span(), c.peek())),
            (None, Some(_)) => {
                let at = before_value.map_or_else(|| c.peek_span(), TokenRef::span);
                self.error(errors::missing_equals(self.stream, at));
            }
            (Some(_), None) => {
                self.error(errors::expected_expr(c.peek_span(), "option value", c.peek()));
            }
            (Some(_), Some(_)) => {}
        }

        Some(OptionEntryArgs {
            path: path.map(|p| p.tokens),
            equals: equals.map(TokenRef::token),
            value,
        })
    }
}
