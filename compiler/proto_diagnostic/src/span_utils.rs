//! Line and column lookup for rendering.
//!
//! Offsets are bytes; lines and columns are 1-based, and columns count
//! characters rather than bytes.

/// Byte offset of every line start in a file.
///
/// ```
/// use proto_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "syntax = \"proto3\";\nmessage Foo {}\n";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 27), (2, 9));
/// assert_eq!(table.line_text(source, 2), Some("message Foo {}"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `starts[i]` is where line `i + 1` begins; `starts[0] == 0`.
    starts: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut starts = vec![0u32];
        starts.extend(
            memchr::memchr_iter(b'\n', source.as_bytes())
                .map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { starts }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)` of `offset`.
    ///
    /// Offsets past the end of `source` clamp to its end.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self.line_start(line) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(start..end)
            .map_or(0, |s| s.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where `line` starts, `None` if there is no such line.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.starts.get(idx).copied()
    }

    fn line_start(&self, line: u32) -> u32 {
        self.line_start_offset(line).unwrap_or(0)
    }

    /// Text of `line` without its line terminator.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches('\n').trim_end_matches('\r'))
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
