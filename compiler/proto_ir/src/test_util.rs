//! Test helpers shared across modules.

use crate::{SourceFile, Token, TokenKind, TokenStream};

/// Minimal tokenizer: identifier and digit runs, whitespace runs,
/// double-quoted strings, single punctuation.
/// Brackets are fused with a stack; unmatched ones stay leaves.
pub(crate) fn tokenize(src: &str) -> TokenStream {
    let mut stream = TokenStream::new(SourceFile::shared("test.proto", src));
    let mut open: Vec<(char, Token)> = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let (len, kind) = if b.is_ascii_alphanumeric() || b == b'_' {
            let n = bytes[i..]
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_')
                .count();
            let kind = if b.is_ascii_digit() {
                TokenKind::Number
            } else {
                TokenKind::Ident
            };
            (n, kind)
        } else if b == b'"' {
            let n = bytes[i + 1..]
                .iter()
                .position(|c| *c == b'"')
                .map_or(bytes.len() - i, |p| p + 2);
            (n, TokenKind::String)
        } else if b.is_ascii_whitespace() {
            let n = bytes[i..]
                .iter()
                .take_while(|c| c.is_ascii_whitespace())
                .count();
            (n, TokenKind::Space)
        } else {
            (1, TokenKind::Punct)
        };
        let tok = stream.push(len, kind);
        match b {
            b'(' | b'[' | b'{' => open.push((char::from(b), tok)),
            b')' | b']' | b'}' => {
                let want = match b {
                    b')' => '(',
                    b']' => '[',
                    _ => '{',
                };
                if open.last().is_some_and(|(c, _)| *c == want) {
                    if let Some((_, o)) = open.pop() {
                        stream.fuse_natural(o, tok);
                    }
                }
            }
            _ => {}
        }
        i += len;
    }
    stream.freeze();
    stream
}
