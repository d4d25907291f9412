//! Parser state and token-level helpers.
//!
//! The parser never owns a cursor. Every production takes the cursor of the
//! token range it reads from: the file, or the children of a tree token.
//! Nested trees get fresh cursors from [`TokenRef::children`], so a
//! production can never read past the delimiters that enclose it.

use proto_diagnostic::{Diagnostic, Report};
use proto_ir::ast::{is_separator, AstArena, PathTokens};
use proto_ir::{Cursor, Span, TokenKind, TokenRef, TokenStream};

use crate::ParseOptions;

/// Where a declaration appears.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    File,
    Nested,
}

/// Parser state for one file.
pub(crate) struct Parser<'a> {
    pub(crate) stream: &'a TokenStream,
    pub(crate) arena: &'a mut AstArena,
    report: &'a mut Report,
    pub(crate) options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        stream: &'a TokenStream,
        arena: &'a mut AstArena,
        report: &'a mut Report,
        options: ParseOptions,
    ) -> Self {
        Parser {
            stream,
            arena,
            report,
            options,
        }
    }

    #[inline]
    pub(crate) fn error(&mut self, diag: Diagnostic) {
        self.report.push(diag);
    }
}

/// A path as parsed, before it is stored in a node.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ParsedPath<'a> {
    pub(crate) tokens: PathTokens,
    /// The identifier, if the path is a single unqualified one.
    pub(crate) ident: Option<TokenRef<'a>>,
    pub(crate) span: Span,
}

impl<'a> ParsedPath<'a> {
    pub(crate) fn single(tok: TokenRef<'a>) -> Self {
        ParsedPath {
            tokens: PathTokens::single(tok.token()),
            ident: (tok.kind() == TokenKind::Ident).then_some(tok),
            span: tok.outer_span(),
        }
    }
}

/// Parse a dotted path: `foo`, `.foo.Bar`, `(my.ext).field`, `a.com/T`.
///
/// Returns `None` without consuming anything if the next token cannot
/// begin a path.
pub(crate) fn parse_path<'a>(c: &mut Cursor<'a>) -> Option<ParsedPath<'a>> {
    let first = c.peek().filter(|t| can_begin_path(*t))?;
    let mut last = first;
    let mut want_name = true;
    while let Some(tok) = c.peek() {
        if is_separator(tok) {
            want_name = true;
        } else if want_name && is_name(tok) {
            want_name = false;
        } else {
            break;
        }
        c.next();
        last = tok;
    }
    if first == last {
        return Some(ParsedPath::single(first));
    }
    Some(ParsedPath {
        tokens: PathTokens {
            start: first.token(),
            end: last.token(),
        },
        ident: None,
        span: first.outer_span().join(last.outer_span()),
    })
}

/// Identifier, separator, or a parenthesised extension name.
pub(crate) fn can_begin_path(tok: TokenRef<'_>) -> bool {
    is_separator(tok) || is_name(tok)
}

fn is_name(tok: TokenRef<'_>) -> bool {
    tok.kind() == TokenKind::Ident || is_tree(tok, "(")
}

/// Whether `tok` is a fused tree opened by `open`.
#[inline]
pub(crate) fn is_tree(tok: TokenRef<'_>, open: &str) -> bool {
    tok.is_open() && tok.text() == open
}

/// A delimiter the lexer could not match, other than `{`. It has already
/// been reported.
pub(crate) fn is_stray_delimiter(tok: TokenRef<'_>) -> bool {
    tok.kind() == TokenKind::Punct
        && tok.is_leaf()
        && matches!(tok.text(), "(" | ")" | "[" | "]" | "}")
}

/// Consume the next token if it is the punctuation `punct`.
pub(crate) fn eat_punct<'a>(c: &mut Cursor<'a>, punct: &str) -> Option<TokenRef<'a>> {
    let tok = c.peek().filter(|t| t.is_leaf() && t.is_punct(punct))?;
    c.next();
    Some(tok)
}

/// Human-readable description of a token for "found ..." messages.
pub(crate) fn describe(tok: Option<TokenRef<'_>>) -> String {
    let Some(tok) = tok else {
        return "end of input".to_owned();
    };
    match tok.kind() {
        TokenKind::String => "a string literal".to_owned(),
        _ => match tok.partner() {
            Some(close) if tok.is_open() => format!("`{}...{}`", tok.text(), close.text()),
            _ => format!("`{}`", tok.text()),
        },
    }
}

/// Span from `start` through the last token the cursor yielded.
pub(crate) fn span_since(start: Span, c: &Cursor<'_>) -> Span {
    start.join(c.here())
}
