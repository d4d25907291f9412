//! Source text.
//!
//! A [`SourceFile`] is an immutable `(path, text)` pair. It owns no
//! structure; everything else refers into it by byte offset.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::Span;

/// Largest file the front end accepts: offsets must fit in a `u32`.
pub const MAX_FILE_LEN: usize = u32::MAX as usize;

/// Error when turning raw bytes into a [`SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The input is not valid UTF-8.
    #[error("{path}: file is not valid UTF-8 (first invalid byte at offset {offset})")]
    NotUtf8 { path: String, offset: usize },
    /// The input is too large to be addressed with 32-bit offsets.
    #[error("{path}: file is {len} bytes, exceeding the maximum of {max} bytes", max = MAX_FILE_LEN)]
    TooLarge { path: String, len: usize },
}

impl SourceError {
    /// The byte range the error refers to, if it can be expressed as a span.
    pub fn span(&self) -> Span {
        match self {
            SourceError::NotUtf8 { offset, .. } => u32::try_from(*offset)
                .map(|o| Span::new(o, o.saturating_add(1)))
                .unwrap_or(Span::NONE),
            SourceError::TooLarge { .. } => Span::NONE,
        }
    }
}

/// An immutable source file: a path and its UTF-8 text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: String,
    text: String,
}

impl SourceFile {
    /// Create a source file from text that is already known to be valid.
    ///
    /// # Panics
    /// Panics if the text is longer than [`MAX_FILE_LEN`].
    #[track_caller]
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        let text = text.into();
        assert!(
            text.len() <= MAX_FILE_LEN,
            "{path}: source file exceeds {MAX_FILE_LEN} bytes"
        );
        SourceFile { path, text }
    }

    /// Create a shared source file.
    pub fn shared(path: impl Into<String>, text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(path, text))
    }

    /// Validate raw bytes read from disk and build a source file.
    pub fn from_bytes(path: impl Into<String>, bytes: Vec<u8>) -> Result<Self, SourceError> {
        let path = path.into();
        if bytes.len() > MAX_FILE_LEN {
            return Err(SourceError::TooLarge {
                path,
                len: bytes.len(),
            });
        }
        match String::from_utf8(bytes) {
            Ok(text) => Ok(SourceFile { path, text }),
            Err(e) => Err(SourceError::NotUtf8 {
                path,
                offset: e.utf8_error().valid_up_to(),
            }),
        }
    }

    /// The path this file was loaded from.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full text of the file.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "length is bounded by MAX_FILE_LEN at construction"
    )]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    /// Whether the file has no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Slice the text by `span`.
    #[inline]
    pub fn slice(&self, span: Span) -> &str {
        span.text(&self.text)
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceFile({:?}, {} bytes)", self.path, self.text.len())
    }
}
