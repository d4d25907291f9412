//! Lexer for Protobuf sources.
//!
//! Produces a frozen [`TokenStream`] that covers every byte of the file,
//! whitespace and comments included, with `()`, `[]` and `{}` fused into
//! tree tokens. Lexing never fails: problems are pushed into the
//! [`Report`] and the offending bytes still become tokens.
//!
//! ```
//! use proto_diagnostic::Report;
//! use proto_ir::{SourceFile, TokenKind};
//!
//! let mut report = Report::new();
//! let stream = proto_lexer::lex(SourceFile::shared("a.proto", "message M {}"), &mut report);
//! assert!(report.is_empty());
//!
//! let mut cursor = stream.cursor();
//! assert!(cursor.next().unwrap().is_keyword("message"));
//! assert_eq!(cursor.next().unwrap().kind(), TokenKind::Ident);
//! assert!(cursor.next().unwrap().is_open());
//! assert!(cursor.done());
//! ```

mod delimiters;
mod errors;
mod scanner;

use std::sync::Arc;

use proto_diagnostic::Report;
use proto_ir::literal;
use proto_ir::{SourceFile, Span, TokenKind, TokenStream};
use tracing::debug;

use crate::delimiters::Delimiters;
use crate::scanner::Scanner;

/// Lex a whole file.
pub fn lex(file: Arc<SourceFile>, report: &mut Report) -> TokenStream {
    let mut stream = TokenStream::new(Arc::clone(&file));
    let text = file.text();
    let mut scanner = Scanner::new(text);
    let mut delimiters = Delimiters::default();
    let errors_before = report.error_count();

    while let Some(lexeme) = scanner.next_lexeme() {
        let end = scanner.pos();
        let start = end - lexeme.len;
        let span = span_of(start, end);
        let tok_text = &text[start..end];
        let token = stream.push(lexeme.len, lexeme.kind);

        if let Some(flaw) = lexeme.flaw {
            report.push(errors::flaw(flaw, span, tok_text));
        }
        match lexeme.kind {
            TokenKind::Number => check_number(tok_text, span, report),
            TokenKind::String => check_escapes(tok_text, span, report),
            TokenKind::Punct => {
                let byte = tok_text.as_bytes()[0];
                delimiters.punct(&mut stream, token, byte, span, report);
            }
            _ => {}
        }
    }
    delimiters.finish(Span::point(file.len()), report);
    stream.freeze();

    debug!(
        path = file.path(),
        tokens = stream.natural_len(),
        errors = report.error_count() - errors_before,
        "lexed"
    );
    stream
}

/// Validate `bytes` as a source file and lex it.
///
/// Input that is not valid UTF-8 or is too large is reported and lexed as
/// an empty file.
pub fn lex_bytes(path: impl Into<String>, bytes: Vec<u8>, report: &mut Report) -> TokenStream {
    let path = path.into();
    let file = match SourceFile::from_bytes(path.clone(), bytes) {
        Ok(file) => file,
        Err(err) => {
            report.push(errors::source_error(&err));
            SourceFile::new(path, String::new())
        }
    };
    lex(Arc::new(file), report)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets are bounded by MAX_FILE_LEN, checked when the SourceFile was built"
)]
fn span_of(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

fn check_number(text: &str, span: Span, report: &mut Report) {
    if let Err(err) = literal::parse_number(text) {
        report.push(errors::bad_number(err, span, text));
    }
}

fn check_escapes(text: &str, span: Span, report: &mut Report) {
    if !text.contains('\\') {
        return;
    }
    let _ = literal::unescape(text, |err| report.push(errors::bad_escape(err, span.start)));
}

#[cfg(test)]
mod tests;
