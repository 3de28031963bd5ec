//! Byte-offset to line mapping
//!
//! Line decorations, the selection filter, and the outline all address lines,
//! while the host buffer and the parser only hand us byte offsets. `LineIndex`
//! is a precomputed table of line start offsets over one document snapshot.

use std::ops::Range;

/// Precomputed line start offsets for one document snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of each line; always starts with 0
    starts: Vec<usize>,
    /// Total document length in bytes
    len: usize,
}

impl LineIndex {
    /// Build the index by scanning for newlines
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Total number of lines (a trailing newline opens a final empty line)
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Map a byte offset to its line number (0-indexed); offsets past the end clamp
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset.min(self.len)) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        }
    }

    /// First byte offset of a line; None past the last line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Byte range of a line, excluding the trailing newline
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = self.line_start(line)?;
        let end = match self.starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        };
        Some(start..end)
    }

    /// Document length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let index = LineIndex::new("abc\ndefgh\ni");

        assert_eq!(index.line_of(0), 0); // 'a'
        assert_eq!(index.line_of(3), 0); // '\n'
        assert_eq!(index.line_of(4), 1); // 'd'
        assert_eq!(index.line_of(9), 1); // '\n'
        assert_eq!(index.line_of(10), 2); // 'i'
        assert_eq!(index.line_of(999), 2); // clamps
    }

    #[test]
    fn test_line_start_and_range() {
        let index = LineIndex::new("abc\ndefgh\ni");

        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(4));
        assert_eq!(index.line_start(2), Some(10));
        assert_eq!(index.line_start(3), None);

        assert_eq!(index.line_range(0), Some(0..3));
        assert_eq!(index.line_range(1), Some(4..9));
        assert_eq!(index.line_range(2), Some(10..11));
    }

    #[test]
    fn test_trailing_newline_opens_empty_line() {
        let index = LineIndex::new("abc\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_of(4), 1);
        assert_eq!(index.line_range(1), Some(4..4));
    }

    #[test]
    fn test_empty_document() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_of(0), 0);
        assert!(index.is_empty());
    }
}
