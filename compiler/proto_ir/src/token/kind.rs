//! Token kinds.

use std::fmt;

/// Lexical category of a token.
///
/// Fits in 4 bits: natural tokens pack it into the low nibble of their
/// metadata word alongside the offset to their delimiter partner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum TokenKind {
    /// Bytes the lexer could not classify.
    #[default]
    Unrecognized = 0,
    /// Whitespace, including newlines.
    Space = 1,
    /// A line or block comment.
    Comment = 2,
    /// An identifier or keyword.
    Ident = 3,
    /// A quoted string literal, quotes included.
    String = 4,
    /// A numeric literal.
    Number = 5,
    /// A single punctuation character.
    Punct = 6,
}

impl TokenKind {
    /// Number of bits used by the packed representation.
    pub const BITS: u32 = 4;

    /// Mask selecting the kind bits from a packed metadata word.
    pub const MASK: i32 = (1 << Self::BITS) - 1;

    /// Decode a kind from its packed representation.
    ///
    /// Unknown values decode to [`TokenKind::Unrecognized`].
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => TokenKind::Space,
            2 => TokenKind::Comment,
            3 => TokenKind::Ident,
            4 => TokenKind::String,
            5 => TokenKind::Number,
            6 => TokenKind::Punct,
            _ => TokenKind::Unrecognized,
        }
    }

    /// Whether parsers skip this kind of token by default.
    #[inline]
    pub const fn is_skippable(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Comment)
    }

    /// Whether the token's value is given by its text (string and number literals).
    #[inline]
    pub const fn is_literal(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Number)
    }

    /// Human-readable name used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Unrecognized => "unrecognized token",
            TokenKind::Space => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Ident => "identifier",
            TokenKind::String => "string literal",
            TokenKind::Number => "number literal",
            TokenKind::Punct => "punctuation",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
