//! Matching of `()`, `[]` and `{}` into fused tree tokens.

use proto_diagnostic::Report;
use proto_ir::{Span, Token, TokenStream};
use tracing::trace;

use crate::errors;

struct Open {
    delimiter: u8,
    token: Token,
    span: Span,
}

/// Stack of delimiters opened but not yet closed.
#[derive(Default)]
pub(crate) struct Delimiters {
    stack: Vec<Open>,
}

impl Delimiters {
    /// Feed a punctuation token. Non-delimiters are ignored.
    pub fn punct(&mut self, stream: &mut TokenStream, token: Token, byte: u8, span: Span, report: &mut Report) {
        match byte {
            b'(' | b'[' | b'{' => self.stack.push(Open {
                delimiter: byte,
                token,
                span,
            }),
            b')' | b']' | b'}' => self.close(stream, token, byte, span, report),
            _ => {}
        }
    }

    fn close(&mut self, stream: &mut TokenStream, token: Token, byte: u8, span: Span, report: &mut Report) {
        let want = opener(byte);
        let Some(pos) = self.stack.iter().rposition(|o| o.delimiter == want) else {
            report.push(errors::unmatched_close(span, char::from(byte)));
            return;
        };
        // Anything opened inside the matching pair and never closed.
        for inner in self.stack.drain(pos + 1..).rev() {
            report.push(errors::unclosed(inner.span, char::from(inner.delimiter), span, false));
        }
        if let Some(open) = self.stack.pop() {
            fuse(stream, &open, token, span, report);
        }
    }

    /// Report every delimiter still open at the end of the file.
    pub fn finish(self, eof: Span, report: &mut Report) {
        for open in self.stack.into_iter().rev() {
            report.push(errors::unclosed(open.span, char::from(open.delimiter), eof, true));
        }
    }
}

fn fuse(stream: &mut TokenStream, open: &Open, close: Token, close_span: Span, report: &mut Report) {
    let distance = stream
        .get(open.token)
        .raw()
        .natural_index()
        .zip(stream.get(close).raw().natural_index())
        .map(|(o, c)| c - o);
    match distance {
        Some(d) if d <= TokenStream::MAX_PARTNER_OFFSET => {
            trace!(open = ?open.span, close = ?close_span, "fuse");
            stream.fuse_natural(open.token, close);
        }
        _ => report.push(errors::too_far_apart(open.span, close_span)),
    }
}

fn opener(close: u8) -> u8 {
    match close {
        b')' => b'(',
        b']' => b'[',
        _ => b'{',
    }
}
