//! Comma-delimited lists.

use proto_ir::ast::WithComma;
use proto_ir::{Cursor, Span, TokenRef};
use tracing::trace;

use crate::errors;
use crate::parser::{is_tree, span_since, Parser};

/// How a list is separated and where it ends.
#[derive(Copy, Clone)]
pub(crate) struct ListRules {
    separators: &'static [&'static str],
    /// Elements must be separated; a missing separator ends the list.
    required: bool,
    /// Tokens that end a list not enclosed in a tree token.
    ends: Option<fn(TokenRef<'_>) -> bool>,
}

impl ListRules {
    pub(crate) const COMMAS: ListRules = ListRules {
        separators: &[","],
        required: true,
        ends: None,
    };

    /// Message literal entries: `,` or `;`, both optional.
    pub(crate) const ENTRIES: ListRules = ListRules {
        separators: &[",", ";"],
        required: false,
        ends: None,
    };

    #[must_use]
    pub(crate) const fn ending_at(self, ends: fn(TokenRef<'_>) -> bool) -> Self {
        ListRules {
            ends: Some(ends),
            ..self
        }
    }

    fn is_separator(self, tok: TokenRef<'_>) -> bool {
        tok.is_leaf() && self.separators.iter().any(|s| tok.is_punct(s))
    }

    fn is_end(self, tok: TokenRef<'_>) -> bool {
        self.ends.is_some_and(|ends| ends(tok))
    }

    /// Nothing more can follow: the tree is exhausted or an end token is next.
    fn at_end(self, c: &Cursor<'_>) -> bool {
        c.peek().map_or(true, |t| self.is_end(t))
    }

    /// Move `c` up to the end token of a list not enclosed in a tree token,
    /// if one comes before the declaration ends. Otherwise `c` stays put.
    fn skip_to_end(self, c: &mut Cursor<'_>) {
        if self.ends.is_none() {
            return;
        }
        let start = c.peek_span();
        let mut ahead = *c;
        while let Some(tok) = ahead.peek() {
            if self.is_end(tok) {
                trace!(skipped = ?span_since(start, &ahead), "skipped rest of list");
                *c = ahead;
                return;
            }
            if (tok.is_leaf() && tok.is_punct(";")) || is_tree(tok, "{") {
                return;
            }
            ahead.next();
        }
    }
}

/// A parsed list.
pub(crate) struct Delimited<T> {
    pub(crate) items: Vec<WithComma<T>>,
    /// A required separator was missing and reported. Inside a tree token
    /// the rest is left unread; otherwise it was skipped up to the end of
    /// the list when that end was in reach.
    pub(crate) broken: bool,
}

impl<'a> Parser<'a> {
    /// Parse elements with `elem` until it finds nothing more to parse.
    ///
    /// `elem` returns `None` without consuming anything when the next token
    /// cannot start an element.
    pub(crate) fn delimited<T>(
        &mut self,
        c: &mut Cursor<'a>,
        rules: ListRules,
        what: &str,
        mut elem: impl FnMut(&mut Self, &mut Cursor<'a>) -> Option<T>,
    ) -> Delimited<T> {
        let mut items = Vec::new();
        let mut dangling: Option<TokenRef<'a>> = None;
        loop {
            let before = c.mark();
            let Some(value) = elem(self, c) else {
                if let Some(sep) = dangling.filter(|_| rules.at_end(c)) {
                    self.error(errors::trailing_separator(sep, what));
                }
                break;
            };
            let sep = c.peek().filter(|t| rules.is_separator(*t));
            if sep.is_some() {
                c.next();
            }
            dangling = sep.filter(|_| rules.required);
            items.push(WithComma {
                value,
                comma: sep.map(TokenRef::token),
            });
            if sep.is_some() {
                continue;
            }
            if rules.required {
                if let Some(found) = c.peek().filter(|t| !rules.is_end(*t)) {
                    self.error(errors::expected_comma(self.stream, c.here(), what, found));
                    rules.skip_to_end(c);
                    return Delimited { items, broken: true };
                }
                break;
            }
            if c.mark() == before {
                break;
            }
        }
        Delimited {
            items,
            broken: false,
        }
    }

    /// Report whatever is left inside a tree token after its contents were
    /// parsed, as one diagnostic.
    pub(crate) fn finish_tree(&mut self, c: &mut Cursor<'a>, broken: bool, context: &str) {
        if broken {
            return;
        }
        let mut span = Span::NONE;
        while let Some(tok) = c.next() {
            span = span.join(tok.outer_span());
        }
        if span.is_some() {
            self.error(errors::leftover(span, context));
        }
    }
}
