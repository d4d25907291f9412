//! Structural diagnostics.

use proto_diagnostic::fixes::{self, Justify};
use proto_diagnostic::{expected, unexpected_tokens, Diagnostic, ErrorCode, Substitution};
use proto_ir::ast::DefKind;
use proto_ir::{Span, TokenRef, TokenStream};

use crate::parser::describe;

/// A token no production could start with. It is skipped.
#[cold]
pub(crate) fn unexpected_token(tok: TokenRef<'_>, what: &str) -> Diagnostic {
    expected(ErrorCode::E1001, tok.outer_span(), what, &describe(Some(tok)))
}

/// Tokens left inside a tree after its contents were parsed.
#[cold]
pub(crate) fn leftover(span: Span, context: &str) -> Diagnostic {
    unexpected_tokens(span, context)
}

#[cold]
pub(crate) fn expected_expr(span: Span, what: &str, found: Option<TokenRef<'_>>) -> Diagnostic {
    expected(ErrorCode::E1002, span, what, &describe(found))
}

#[cold]
pub(crate) fn expected_name(span: Span, what: &str, found: Option<TokenRef<'_>>) -> Diagnostic {
    expected(ErrorCode::E1003, span, what, &describe(found))
}

/// `optional optional = 1;`: the only path was taken as the name.
#[cold]
pub(crate) fn missing_type(prefix: TokenRef<'_>, name: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004)
        .with_message(format!("missing type after `{}`", prefix.text()))
        .with_label(name, "this is read as the name")
        .with_secondary_label(prefix.span(), "expected a type after this")
}

/// `returns` not followed by a parenthesised list.
#[cold]
pub(crate) fn expected_outputs(span: Span, found: Option<TokenRef<'_>>) -> Diagnostic {
    expected(ErrorCode::E1004, span, "`(` and output types after `returns`", &describe(found))
}

/// `at` is the position after the last token of the declaration.
#[cold]
pub(crate) fn missing_semicolon(
    stream: &TokenStream,
    at: Span,
    what: &str,
    found: Option<TokenRef<'_>>,
) -> Diagnostic {
    let point = fixes::justify(stream, at, Justify::Left);
    expected(ErrorCode::E1005, point, &format!("`;` after {what}"), &describe(found))
        .with_fix("add a semicolon", fixes::insertion(stream, at, ";", Justify::Left))
}

/// A value not preceded by `=`; `value` is where it starts.
#[cold]
pub(crate) fn missing_equals(stream: &TokenStream, value: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1006)
        .with_message("missing `=` before value")
        .with_label(value, "expected `=` before this")
        .with_fix("insert `=`", fixes::insertion(stream, value, "=", Justify::Between))
}

/// Neither `=` nor a value where both were required.
#[cold]
pub(crate) fn expected_equals(span: Span, found: Option<TokenRef<'_>>) -> Diagnostic {
    expected(ErrorCode::E1006, span, "`=` and a value", &describe(found))
}

/// `at` is the position after the element that lacks a comma.
#[cold]
pub(crate) fn expected_comma(
    stream: &TokenStream,
    at: Span,
    what: &str,
    found: TokenRef<'_>,
) -> Diagnostic {
    expected(ErrorCode::E1007, found.outer_span(), &format!("`,` between {what}"), &describe(Some(found)))
        .with_maybe_fix("add a comma", fixes::insertion(stream, at, ",", Justify::Left))
}

/// A required separator with nothing after it: `[1, 2,]`.
#[cold]
pub(crate) fn trailing_separator(sep: TokenRef<'_>, what: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1014)
        .with_message(format!("trailing `{}` in {what}", sep.text()))
        .with_label(sep.span(), "nothing follows this separator")
        .with_fix("remove it", Substitution::new(sep.span(), ""))
}

#[cold]
pub(crate) fn misplaced(keyword: TokenRef<'_>) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1009)
        .with_message(format!("`{}` declarations are only allowed at file scope", keyword.text()))
        .with_label(keyword.span(), "not allowed inside a body")
}

#[cold]
pub(crate) fn unnamed(kind: DefKind, keyword: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1010)
        .with_message(format!("{kind} is missing a name"))
        .with_label(keyword.end_point(), "expected a name here")
}

#[cold]
pub(crate) fn keyless_entry(value: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1011)
        .with_message("message literal entry is missing a field name")
        .with_label(value, "expected `name: value`")
}

#[cold]
pub(crate) fn expected_string(span: Span, what: &str, found: Option<TokenRef<'_>>) -> Diagnostic {
    expected(ErrorCode::E1012, span, what, &describe(found))
}

#[cold]
pub(crate) fn unclosed_angle(open: Span, at: Span, found: Option<TokenRef<'_>>) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1013)
        .with_message(format!("unclosed `<`, found {}", describe(found)))
        .with_label(at, "expected `>`")
        .with_secondary_label(open, "opened here")
}
