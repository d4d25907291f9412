use std::fmt;
use std::str::FromStr;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unrecognized character
    E0002,
    /// Malformed number literal
    E0003,
    /// Integer literal does not fit in 64 bits
    E0004,
    /// Invalid escape sequence in a string
    E0005,
    /// Unterminated block comment
    E0006,
    /// Non-ASCII identifier
    E0007,
    /// File too large to address with 32-bit offsets
    E0008,
    /// File is not valid UTF-8
    E0009,
    /// Unclosed delimiter
    E0010,
    /// Unmatched closing delimiter
    E0011,

    // Parser Errors (E1xxx)
    /// Unexpected tokens
    E1001,
    /// Expected expression
    E1002,
    /// Expected name
    E1003,
    /// Expected type
    E1004,
    /// Missing `;`
    E1005,
    /// Missing `=`
    E1006,
    /// Expected `,`
    E1007,
    /// Definition part given more than once
    E1008,
    /// Declaration not allowed here
    E1009,
    /// Definition is missing a name
    E1010,
    /// Dictionary entry is missing a key
    E1011,
    /// Expected string literal
    E1012,
    /// Unclosed `<`
    E1013,
    /// Separator with no element after it
    E1014,

    // Internal Errors (E9xxx)
    /// Internal front-end error
    E9001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E9001,
    ];

    /// Check if this is a lexical error (E0xxx range).
    pub fn is_lexer_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of what the code means.
    pub fn title(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unrecognized character",
            ErrorCode::E0003 => "malformed number literal",
            ErrorCode::E0004 => "integer literal out of range",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E0006 => "unterminated block comment",
            ErrorCode::E0007 => "non-ASCII identifier",
            ErrorCode::E0008 => "file too large",
            ErrorCode::E0009 => "file is not valid UTF-8",
            ErrorCode::E0010 => "unclosed delimiter",
            ErrorCode::E0011 => "unmatched closing delimiter",
            ErrorCode::E1001 => "unexpected tokens",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "expected name",
            ErrorCode::E1004 => "expected type",
            ErrorCode::E1005 => "missing `;`",
            ErrorCode::E1006 => "missing `=`",
            ErrorCode::E1007 => "expected `,`",
            ErrorCode::E1008 => "definition part given more than once",
            ErrorCode::E1009 => "declaration not allowed here",
            ErrorCode::E1010 => "definition is missing a name",
            ErrorCode::E1011 => "dictionary entry is missing a key",
            ErrorCode::E1012 => "expected string literal",
            ErrorCode::E1013 => "unclosed `<`",
            ErrorCode::E1014 => "trailing separator",
            ErrorCode::E9001 => "internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ErrorCode::from_str`] for strings that name no code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code `{0}`")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    /// Parse a code case-insensitively, e.g. `"e1005"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

#[cfg(test)]
mod tests;
