//! Literal values carried by string and number tokens.
//!
//! The lexer validates literals while scanning and the tree accessors decode
//! them on demand; both go through the functions here so that the two agree.

use std::fmt;

/// Value of a number literal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberValue {
    Int(u64),
    Float(f64),
}

/// Why a number literal could not be decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberError {
    /// An integer literal that does not fit in 64 bits.
    Overflow,
    /// Digits that do not form a valid literal, e.g. `0x` or `09`.
    Malformed,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::Overflow => f.write_str("integer literal does not fit in 64 bits"),
            NumberError::Malformed => f.write_str("malformed number literal"),
        }
    }
}

/// Decode a number literal.
pub fn parse_number(text: &str) -> Result<NumberValue, NumberError> {
    let bytes = text.as_bytes();
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return parse_radix(hex, 16).map(NumberValue::Int);
    }

    let is_float = bytes
        .iter()
        .any(|b| matches!(b, b'.' | b'e' | b'E'));
    if is_float {
        if !bytes.iter().any(u8::is_ascii_digit) {
            return Err(NumberError::Malformed);
        }
        return text
            .parse::<f64>()
            .map(NumberValue::Float)
            .map_err(|_| NumberError::Malformed);
    }

    if bytes.len() > 1 && bytes[0] == b'0' {
        return parse_radix(&text[1..], 8).map(NumberValue::Int);
    }
    parse_radix(text, 10).map(NumberValue::Int)
}

fn parse_radix(digits: &str, radix: u32) -> Result<u64, NumberError> {
    if digits.is_empty() {
        return Err(NumberError::Malformed);
    }
    let mut value: u64 = 0;
    let mut overflow = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return Err(NumberError::Malformed);
        };
        match value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(d)))
        {
            Some(v) => value = v,
            None => overflow = true,
        }
    }
    if overflow {
        Err(NumberError::Overflow)
    } else {
        Ok(value)
    }
}

/// Kind of an invalid escape sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeErrorKind {
    /// `\` followed by a character with no escape meaning.
    Unknown(char),
    /// `\x` without hex digits.
    MissingHexDigits,
    /// `\u` or `\U` with too few hex digits.
    ShortUnicode,
    /// `\u`/`\U` naming a value that is not a Unicode scalar.
    InvalidCodepoint,
    /// An octal escape above `\377`.
    OctalOverflow,
    /// A lone `\` at the end of the literal.
    Trailing,
}

impl fmt::Display for EscapeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeErrorKind::Unknown(c) => write!(f, "unknown escape sequence `\\{c}`"),
            EscapeErrorKind::MissingHexDigits => f.write_str("`\\x` must be followed by hex digits"),
            EscapeErrorKind::ShortUnicode => f.write_str("unicode escape is missing hex digits"),
            EscapeErrorKind::InvalidCodepoint => f.write_str("unicode escape is not a valid code point"),
            EscapeErrorKind::OctalOverflow => f.write_str("octal escape exceeds `\\377`"),
            EscapeErrorKind::Trailing => f.write_str("escape sequence is missing a character"),
        }
    }
}

/// An invalid escape sequence at `start..end` (byte offsets into the literal text).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EscapeError {
    pub start: usize,
    pub end: usize,
    pub kind: EscapeErrorKind,
}

/// Decode the contents of a quoted string literal.
///
/// `quoted` is the full token text including quotes; a missing closing quote
/// is tolerated. Every invalid escape is passed to `on_error` and skipped.
pub fn unescape(quoted: &str, mut on_error: impl FnMut(EscapeError)) -> Vec<u8> {
    let bytes = quoted.as_bytes();
    let Some(&quote) = bytes.first() else {
        return Vec::new();
    };
    let mut end = bytes.len();
    if end >= 2 && bytes[end - 1] == quote {
        end -= 1;
    }

    let mut out = Vec::with_capacity(end);
    let mut i = 1;
    while i < end {
        let b = bytes[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        if i >= end {
            on_error(EscapeError {
                start,
                end: i,
                kind: EscapeErrorKind::Trailing,
            });
            break;
        }
        let c = bytes[i];
        i += 1;
        match c {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0B),
            b'\\' | b'\'' | b'"' | b'?' => out.push(c),
            b'0'..=b'7' => {
                let mut value = u32::from(c - b'0');
                let mut digits = 1;
                while digits < 3 && i < end && matches!(bytes[i], b'0'..=b'7') {
                    value = value * 8 + u32::from(bytes[i] - b'0');
                    i += 1;
                    digits += 1;
                }
                match u8::try_from(value) {
                    Ok(v) => out.push(v),
                    Err(_) => on_error(EscapeError {
                        start,
                        end: i,
                        kind: EscapeErrorKind::OctalOverflow,
                    }),
                }
            }
            b'x' | b'X' => {
                let mut value = 0u8;
                let mut digits = 0;
                while digits < 2 && i < end && bytes[i].is_ascii_hexdigit() {
                    value = value * 16 + hex_value(bytes[i]);
                    i += 1;
                    digits += 1;
                }
                if digits == 0 {
                    on_error(EscapeError {
                        start,
                        end: i,
                        kind: EscapeErrorKind::MissingHexDigits,
                    });
                } else {
                    out.push(value);
                }
            }
            b'u' | b'U' => {
                let want = if c == b'u' { 4 } else { 8 };
                let mut value = 0u32;
                let mut digits = 0;
                while digits < want && i < end && bytes[i].is_ascii_hexdigit() {
                    value = value * 16 + u32::from(hex_value(bytes[i]));
                    i += 1;
                    digits += 1;
                }
                if digits < want {
                    on_error(EscapeError {
                        start,
                        end: i,
                        kind: EscapeErrorKind::ShortUnicode,
                    });
                } else if let Some(ch) = char::from_u32(value) {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                } else {
                    on_error(EscapeError {
                        start,
                        end: i,
                        kind: EscapeErrorKind::InvalidCodepoint,
                    });
                }
            }
            _ => {
                // Report the whole character, which may be multi-byte.
                let ch = quoted[i - 1..].chars().next().unwrap_or('?');
                let width = ch.len_utf8();
                i += width - 1;
                on_error(EscapeError {
                    start,
                    end: i,
                    kind: EscapeErrorKind::Unknown(ch),
                });
            }
        }
    }
    out
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// Quote `value` as a double-quoted literal, escaping as needed.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\x{:02x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
