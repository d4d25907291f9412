//! Lexical diagnostics.

use proto_diagnostic::{Diagnostic, ErrorCode, Substitution};
use proto_ir::literal::{EscapeError, NumberError};
use proto_ir::{SourceError, Span};

use crate::scanner::Flaw;

#[cold]
pub(crate) fn flaw(flaw: Flaw, span: Span, text: &str) -> Diagnostic {
    match flaw {
        Flaw::UnterminatedString => {
            let quote = text.chars().next().unwrap_or('"');
            Diagnostic::error(ErrorCode::E0001)
                .with_message("unterminated string literal")
                .with_label(span, "string starts here")
                .with_fix(
                    format!("close the string with `{quote}`"),
                    Substitution::new(span.end_point(), quote.to_string()),
                )
        }
        Flaw::UnterminatedComment => Diagnostic::error(ErrorCode::E0006)
            .with_message("unterminated block comment")
            .with_label(Span::new(span.start, span.start.saturating_add(2)), "comment starts here")
            .with_note("block comments end with `*/`"),
        Flaw::NonAsciiIdent => Diagnostic::error(ErrorCode::E0007)
            .with_message(format!("non-ASCII identifier `{text}`"))
            .with_label(span, "identifiers may only use ASCII letters, digits and `_`"),
        Flaw::Unrecognized => Diagnostic::error(ErrorCode::E0002)
            .with_message(format!("unrecognized characters {text:?}"))
            .with_label(span, "not valid in a Protobuf file"),
    }
}

#[cold]
pub(crate) fn bad_number(err: NumberError, span: Span, text: &str) -> Diagnostic {
    match err {
        NumberError::Overflow => Diagnostic::error(ErrorCode::E0004)
            .with_message(format!("integer literal `{text}` is out of range"))
            .with_label(span, "does not fit in 64 bits"),
        NumberError::Malformed => {
            let diag = Diagnostic::error(ErrorCode::E0003)
                .with_message(format!("malformed number literal `{text}`"))
                .with_label(span, "not a number");
            if text.len() > 1 && text.starts_with('0') && text.bytes().all(|b| b.is_ascii_digit()) {
                diag.with_note("a leading `0` makes an octal literal, which only uses digits 0-7")
            } else {
                diag
            }
        }
    }
}

/// `err` is relative to the token starting at `token_start`.
#[cold]
pub(crate) fn bad_escape(err: EscapeError, token_start: u32) -> Diagnostic {
    let offset = |i: usize| token_start.saturating_add(u32::try_from(i).unwrap_or(u32::MAX));
    let span = Span::new(offset(err.start), offset(err.end));
    Diagnostic::error(ErrorCode::E0005)
        .with_message(err.kind.to_string())
        .with_label(span, "invalid escape")
}

#[cold]
pub(crate) fn unclosed(open: Span, delimiter: char, at: Span, at_eof: bool) -> Diagnostic {
    if at_eof {
        return proto_diagnostic::unclosed_delimiter(open, at, delimiter);
    }
    Diagnostic::error(ErrorCode::E0010)
        .with_message(format!("unclosed delimiter `{delimiter}`"))
        .with_label(open, "never closed")
        .with_secondary_label(at, "enclosing block ends here")
}

#[cold]
pub(crate) fn unmatched_close(span: Span, delimiter: char) -> Diagnostic {
    Diagnostic::error(ErrorCode::E0011)
        .with_message(format!("unmatched closing delimiter `{delimiter}`"))
        .with_label(span, "no matching opening delimiter")
}

#[cold]
pub(crate) fn too_far_apart(open: Span, close: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message("delimiters are too far apart to be matched")
        .with_label(open, "opened here")
        .with_secondary_label(close, "closed here")
}

#[cold]
pub(crate) fn source_error(err: &SourceError) -> Diagnostic {
    let code = match err {
        SourceError::NotUtf8 { .. } => ErrorCode::E0009,
        SourceError::TooLarge { .. } => ErrorCode::E0008,
    };
    let diag = Diagnostic::error(code).with_message(err.to_string());
    match err.span().get() {
        Some(span) => diag.with_label(span, "invalid byte"),
        None => diag,
    }
}
