//! Hand-written scanner producing `(kind, len)` pairs.
//!
//! The scanner classifies bytes and finds token boundaries; it does not
//! decode literals. Problems it can see while scanning are returned as a
//! [`Flaw`] next to the token instead of as an error, so scanning never
//! stops early.
//!
//! Main dispatch is on the first byte. Comment and string bodies are
//! skipped with `memchr`.

use memchr::{memchr, memchr3, memmem};
use proto_ir::TokenKind;

/// Something wrong with a token, detected while scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flaw {
    /// A string that runs into a newline or the end of the file.
    UnterminatedString,
    /// A `/*` comment with no `*/`.
    UnterminatedComment,
    /// An identifier containing non-ASCII letters.
    NonAsciiIdent,
    /// Bytes that start no token.
    Unrecognized,
}

/// One scanned token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub kind: TokenKind,
    pub len: usize,
    pub flaw: Option<Flaw>,
}

impl Lexeme {
    fn new(kind: TokenKind, len: usize) -> Self {
        Lexeme {
            kind,
            len,
            flaw: None,
        }
    }

    fn flawed(kind: TokenKind, len: usize, flaw: Flaw) -> Self {
        Lexeme {
            kind,
            len,
            flaw: Some(flaw),
        }
    }
}

pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.src.as_bytes()[self.pos..]
    }

    /// Scan the next token, `None` at the end of the input.
    pub fn next_lexeme(&mut self) -> Option<Lexeme> {
        let rest = self.rest();
        let &first = rest.first()?;
        let lexeme = match first {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => Self::whitespace(rest),
            b'/' if rest.get(1) == Some(&b'/') => Self::line_comment(rest),
            b'/' if rest.get(1) == Some(&b'*') => Self::block_comment(rest),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(rest),
            b'0'..=b'9' => Self::number(rest),
            b'.' if rest.get(1).is_some_and(u8::is_ascii_digit) => Self::number(rest),
            b'"' | b'\'' => Self::string(rest, first),
            b'!'..=b'~' => Lexeme::new(TokenKind::Punct, 1),
            0x80..=0xff => self.non_ascii(),
            _ => self.unrecognized(),
        };
        debug_assert!(lexeme.len > 0, "scanner made no progress at {}", self.pos);
        self.pos += lexeme.len;
        Some(lexeme)
    }

    fn whitespace(rest: &[u8]) -> Lexeme {
        let len = rest
            .iter()
            .take_while(|&&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c))
            .count();
        Lexeme::new(TokenKind::Space, len)
    }

    /// `// ...` up to but not including the newline.
    fn line_comment(rest: &[u8]) -> Lexeme {
        let len = memchr(b'\n', rest).unwrap_or(rest.len());
        Lexeme::new(TokenKind::Comment, len)
    }

    fn block_comment(rest: &[u8]) -> Lexeme {
        match memmem::find(&rest[2..], b"*/") {
            Some(end) => Lexeme::new(TokenKind::Comment, end + 4),
            None => Lexeme::flawed(TokenKind::Comment, rest.len(), Flaw::UnterminatedComment),
        }
    }

    fn identifier(&self, rest: &[u8]) -> Lexeme {
        let ascii = rest
            .iter()
            .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_')
            .count();
        let more = self.non_ascii_word_len(self.pos + ascii);
        if more == 0 {
            Lexeme::new(TokenKind::Ident, ascii)
        } else {
            Lexeme::flawed(TokenKind::Ident, ascii + more, Flaw::NonAsciiIdent)
        }
    }

    /// Length of a run of word characters at `at` that contains at least one
    /// non-ASCII letter, `0` if the run is ASCII only or empty.
    fn non_ascii_word_len(&self, at: usize) -> usize {
        let Some(tail) = self.src.get(at..) else {
            return 0;
        };
        let mut len = 0;
        let mut seen = false;
        for c in tail.chars() {
            if c.is_ascii_alphanumeric() || c == '_' {
                len += 1;
            } else if !c.is_ascii() && c.is_alphanumeric() {
                len += c.len_utf8();
                seen = true;
            } else {
                break;
            }
        }
        if seen {
            len
        } else {
            0
        }
    }

    /// Digits, letters, `_` and `.`, plus a sign right after an exponent.
    ///
    /// This is deliberately greedy: `0x`, `1.2.3` and `12abc` are single
    /// malformed numbers rather than several tokens.
    fn number(rest: &[u8]) -> Lexeme {
        let hex = rest.len() > 1 && rest[0] == b'0' && matches!(rest[1], b'x' | b'X');
        let mut len = 0;
        while let Some(&b) = rest.get(len) {
            let sign = matches!(b, b'+' | b'-')
                && !hex
                && len > 0
                && matches!(rest[len - 1], b'e' | b'E');
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || sign {
                len += 1;
            } else {
                break;
            }
        }
        Lexeme::new(TokenKind::Number, len)
    }

    /// A quoted string. Backslash escapes the next byte. A newline ends an
    /// unterminated string without being part of it.
    fn string(rest: &[u8], quote: u8) -> Lexeme {
        let unterminated = |len| Lexeme::flawed(TokenKind::String, len, Flaw::UnterminatedString);
        let mut i = 1;
        loop {
            let Some(off) = memchr3(quote, b'\\', b'\n', &rest[i..]) else {
                return unterminated(rest.len());
            };
            i += off;
            match rest[i] {
                b'\n' => return unterminated(i),
                b'\\' if rest.get(i + 1).is_some_and(|&b| b != b'\n') => i += 2,
                b'\\' => i += 1,
                _ => return Lexeme::new(TokenKind::String, i + 1),
            }
            if i >= rest.len() {
                return unterminated(rest.len());
            }
        }
    }

    /// A non-ASCII character outside an identifier: an identifier if it is a
    /// letter, otherwise unrecognized.
    fn non_ascii(&self) -> Lexeme {
        let len = self.non_ascii_word_len(self.pos);
        if len > 0 {
            return Lexeme::flawed(TokenKind::Ident, len, Flaw::NonAsciiIdent);
        }
        self.unrecognized()
    }

    /// A run of characters that start no token.
    fn unrecognized(&self) -> Lexeme {
        let tail = self.src.get(self.pos..).unwrap_or("");
        let len: usize = tail
            .chars()
            .take_while(|&c| is_unrecognized(c))
            .map(char::len_utf8)
            .sum();
        Lexeme::flawed(TokenKind::Unrecognized, len.max(1), Flaw::Unrecognized)
    }
}

fn is_unrecognized(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_control() && !matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c')
    } else {
        !c.is_alphanumeric()
    }
}

#[cfg(test)]
mod tests;
