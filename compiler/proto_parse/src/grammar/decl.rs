//! Bodies and declarations with a fixed grammar.
//!
//! Every declaration starts out as a type followed by an optional name.
//! Only then does the parser look at what comes next to decide whether a
//! leading `syntax`, `package`, `import`, `reserved` or `extensions` really
//! introduces that declaration. If not, it falls through to a general
//! definition, which is how `enum E { package = 1; }` still parses.

use proto_ir::ast::{
    DeclBodyId, DeclId, DeclImportArgs, DeclImportId, DeclPackageArgs, DeclPackageId,
    DeclRangeArgs, DeclRangeId, DeclSyntaxArgs, DeclSyntaxId, ExprId, ImportModifier,
};
use proto_ir::{Cursor, Token, TokenKind, TokenRef};
use proto_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use super::{ListRules, TypeParts};
use crate::errors;
use crate::parser::{
    can_begin_path, eat_punct, is_stray_delimiter, is_tree, parse_path, ParsedPath, Parser, Scope,
};

const RANGES: ListRules = ListRules::COMMAS.ending_at(ends_range);

impl<'a> Parser<'a> {
    /// Parse declarations from `c` into `body` until `c` is exhausted.
    pub(crate) fn decls(&mut self, c: &mut Cursor<'a>, body: DeclBodyId, scope: Scope) {
        while let Some(next) = c.peek() {
            let before = c.mark();
            if let Some(decl) = self.decl(c, scope) {
                self.arena.body_mut(body).push(decl);
            }
            assert_ne!(c.mark(), before, "parser made no progress at {:?}", next.span());
        }
    }

    /// `{ ... }`, the body of a definition or an orphaned block.
    pub(crate) fn body(&mut self, braces: TokenRef<'a>) -> DeclBodyId {
        let body = self.arena.new_decl_body(Some(braces.token()));
        let mut inner = braces.children();
        self.decls(&mut inner, body, Scope::Nested);
        body
    }

    /// A body opened by `brace`. If the lexer found no `}` for it, the body
    /// takes the rest of `c`.
    pub(crate) fn any_body(&mut self, brace: TokenRef<'a>, c: &mut Cursor<'a>) -> DeclBodyId {
        if brace.is_open() {
            return self.body(brace);
        }
        debug!(at = ?brace.span(), "body without `}}`");
        let body = self.arena.new_decl_body(Some(brace.token()));
        self.decls(c, body, Scope::Nested);
        body
    }

    fn decl(&mut self, c: &mut Cursor<'a>, scope: Scope) -> Option<DeclId> {
        ensure_sufficient_stack(|| self.decl_inner(c, scope))
    }

    fn decl_inner(&mut self, c: &mut Cursor<'a>, scope: Scope) -> Option<DeclId> {
        let tok = c.peek()?;
        trace!(at = ?tok.span(), "declaration");

        if tok.is_leaf() && tok.is_punct(";") {
            c.next();
            return Some(self.arena.new_decl_empty(tok.token()).into());
        }
        if tok.is_punct("{") {
            c.next();
            return Some(self.any_body(tok, c).into());
        }
        if !can_begin_path(tok) {
            c.next();
            if is_stray_delimiter(tok) {
                debug!(at = ?tok.span(), "skipping unmatched delimiter");
            } else {
                debug!(at = ?tok.span(), "skipping token");
                self.error(errors::unexpected_token(tok, "a declaration"));
            }
            return None;
        }

        let ty = self.type_parts(c)?;
        let name = parse_path(c);
        if let Some(decl) = self.fixed_decl(c, scope, &ty, name) {
            return Some(decl);
        }
        Some(self.def(c, ty, name).into())
    }

    /// A declaration with its own grammar, if the type is one of its
    /// keywords and the tokens after it fit.
    fn fixed_decl(
        &mut self,
        c: &mut Cursor<'a>,
        scope: Scope,
        ty: &TypeParts<'a>,
        name: Option<ParsedPath<'a>>,
    ) -> Option<DeclId> {
        let keyword = ty.keyword()?;
        let next = c.peek();
        match keyword.text() {
            "syntax" | "edition" if name.is_none() && starts_syntax(c, scope) => {
                Some(self.syntax_decl(c, scope, keyword).into())
            }
            "package" if next.map_or(true, |t| t.is_punct(";") || is_tree(t, "[")) => {
                Some(self.package_decl(c, scope, keyword, name).into())
            }
            "import" if starts_import(next, name) => {
                Some(self.import_decl(c, scope, keyword, name).into())
            }
            "reserved" | "extensions" if starts_range(next, name) => {
                Some(self.range_decl(c, keyword, name).into())
            }
            _ => None,
        }
    }

    fn check_file_scope(&mut self, scope: Scope, keyword: TokenRef<'a>) {
        if scope == Scope::Nested && self.options.check_placement {
            self.error(errors::misplaced(keyword));
        }
    }

    /// `syntax = "proto3";`, `edition = "2023";`.
    fn syntax_decl(
        &mut self,
        c: &mut Cursor<'a>,
        scope: Scope,
        keyword: TokenRef<'a>,
    ) -> DeclSyntaxId {
        self.check_file_scope(scope, keyword);
        let equals = eat_punct(c, "=");
        let value_tok = c.peek();
        if equals.is_none() {
            self.error(errors::missing_equals(self.stream, c.peek_span()));
        }
        let value = self.expr(c);
        match value {
            None => self.error(errors::expected_string(c.peek_span(), "a quoted version", c.peek())),
            Some(_) if !value_tok.is_some_and(|t| t.kind() == TokenKind::String) => {
                let span = value_tok.map_or_else(|| c.peek_span(), TokenRef::outer_span);
                self.error(errors::expected_string(span, "a quoted version", value_tok));
            }
            Some(_) => {}
        }
        let options = self.trailing_options(c);
        let semi = self.semicolon(c, "syntax declaration");
        self.arena.new_decl_syntax(DeclSyntaxArgs {
            keyword: keyword.token(),
            equals: equals.map(TokenRef::token),
            value,
            options,
            semi,
        })
    }

    /// `package foo.bar;`.
    fn package_decl(
        &mut self,
        c: &mut Cursor<'a>,
        scope: Scope,
        keyword: TokenRef<'a>,
        path: Option<ParsedPath<'a>>,
    ) -> DeclPackageId {
        self.check_file_scope(scope, keyword);
        if path.is_none() {
            self.error(errors::expected_name(c.peek_span(), "package name", c.peek()));
        }
        let options = self.trailing_options(c);
        let semi = self.semicolon(c, "package declaration");
        self.arena.new_decl_package(DeclPackageArgs {
            keyword: keyword.token(),
            path: path.map(|p| p.tokens),
            options,
            semi,
        })
    }

    /// `import public "foo.proto";`. `modifier` is whatever path followed
    /// the keyword; it has already been checked to be a modifier.
    fn import_decl(
        &mut self,
        c: &mut Cursor<'a>,
        scope: Scope,
        keyword: TokenRef<'a>,
        modifier: Option<ParsedPath<'a>>,
    ) -> DeclImportId {
        self.check_file_scope(scope, keyword);
        let file = c.peek().filter(|t| t.kind() == TokenKind::String);
        let path: Option<ExprId> = match file {
            Some(tok) => Some(self.strings(c, tok)),
            None => {
                self.error(errors::expected_string(c.peek_span(), "a quoted file name", c.peek()));
                None
            }
        };
        let options = self.trailing_options(c);
        let semi = self.semicolon(c, "import");
        self.arena.new_decl_import(DeclImportArgs {
            keyword: keyword.token(),
            modifier: modifier.and_then(|m| m.ident).map(TokenRef::token),
            path,
            options,
            semi,
        })
    }

    /// `reserved 1 to 5, "foo";`, `extensions 100 to max;`. A path already
    /// parsed as the name of the declaration is its first element.
    fn range_decl(
        &mut self,
        c: &mut Cursor<'a>,
        keyword: TokenRef<'a>,
        first: Option<ParsedPath<'a>>,
    ) -> DeclRangeId {
        let mut seed: Option<ExprId> = first.map(|p| self.arena.new_expr_path(p.tokens).into());
        let list = self.delimited(c, RANGES, "ranges", |p, c| match seed.take() {
            Some(start) => Some(p.range_tail(c, start)),
            None => p.range_expr(c),
        });
        if list.items.is_empty() {
            self.error(errors::expected_expr(c.peek_span(), "a range or name", c.peek()));
        }
        let options = self.trailing_options(c);
        let semi = self.semicolon(c, &format!("{} declaration", keyword.text()));
        self.arena.new_decl_range(DeclRangeArgs {
            keyword: keyword.token(),
            args: list.items,
            options,
            semi,
        })
    }

    /// Consume a `;`, or report it missing.
    pub(crate) fn semicolon(&mut self, c: &mut Cursor<'a>, what: &str) -> Option<Token> {
        if let Some(semi) = eat_punct(c, ";") {
            return Some(semi.token());
        }
        trace!(at = ?c.here(), "missing semicolon");
        self.error(errors::missing_semicolon(self.stream, c.here(), what, c.peek()));
        None
    }
}

/// `syntax` followed by `= "..."` or a bare string. Inside a body `syntax`
/// is a fine enum value name, so there the string is required.
fn starts_syntax(c: &Cursor<'_>, scope: Scope) -> bool {
    let mut ahead = *c;
    let Some(next) = ahead.next() else {
        return false;
    };
    let is_string = |t: Option<TokenRef<'_>>| t.is_some_and(|t| t.kind() == TokenKind::String);
    if is_string(Some(next)) {
        return true;
    }
    if !(next.is_leaf() && next.is_punct("=")) {
        return false;
    }
    scope == Scope::File || is_string(ahead.next())
}

/// `import "x";`, `import public "x";`, or a bare `import;`.
fn starts_import(next: Option<TokenRef<'_>>, name: Option<ParsedPath<'_>>) -> bool {
    let next_is_string = next.is_some_and(|t| t.kind() == TokenKind::String);
    match name {
        None => next_is_string || next.is_some_and(|t| t.is_punct(";")),
        Some(name) => {
            next_is_string && name.ident.is_some_and(|m| ImportModifier::from_keyword(m.text()).is_some())
        }
    }
}

/// `reserved 1 to 5;` but not `reserved = 1;`; with a name, `reserved foo, bar;`
/// but not `reserved foo = 1;`.
fn starts_range(next: Option<TokenRef<'_>>, name: Option<ParsedPath<'_>>) -> bool {
    match (next, name) {
        (None, _) => true,
        (Some(next), None) => !next.is_punct("="),
        (Some(next), Some(_)) => {
            next.is_punct(",") || next.is_keyword("to") || ends_range(next)
        }
    }
}

fn ends_range(tok: TokenRef<'_>) -> bool {
    tok.is_punct(";") || is_tree(tok, "[")
}
