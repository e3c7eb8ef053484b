//! Line ingestion and storage.

use std::collections::TryReserveError;
use std::io::{self, BufRead, Read};
use std::ops::Index;

/// One record of the input, terminator included.
///
/// Lines compare lexicographically by their raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(Vec<u8>);

impl Line {
    /// Wraps raw bytes as a line.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes, terminator included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// Streaming reader yielding owned lines.
///
/// Lines end after each `\n`; the final line may lack one. With a maximum
/// length set, longer physical lines are split into several lines of at most
/// that many bytes.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    max_line_len: Option<usize>,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader with no line length limit.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            max_line_len: None,
        }
    }

    /// Creates a reader that splits lines longer than `max_line_len` bytes.
    pub fn with_max_line_len(inner: R, max_line_len: Option<usize>) -> Self {
        Self {
            inner,
            max_line_len: max_line_len.map(|len| len.max(1)),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        let read = match self.max_line_len {
            Some(limit) => (&mut self.inner)
                .take(limit as u64)
                .read_until(b'\n', &mut buf),
            None => self.inner.read_until(b'\n', &mut buf),
        };

        match read {
            Ok(0) => None,
            Ok(_) => Some(Ok(Line::new(buf))),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Ordered collection of lines in file order.
///
/// The store is append-only; reordering goes through a
/// [`Permutation`](crate::Permutation) of its indices.
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Vec<Line>,
}

impl LineStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot grow.
    pub fn push(&mut self, line: Line) -> Result<(), TryReserveError> {
        self.lines.try_reserve(1)?;
        self.lines.push(line);
        Ok(())
    }

    /// Number of stored lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total size of all lines in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

impl Index<usize> for LineStore {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &[u8], max: Option<usize>) -> Vec<Vec<u8>> {
        LineReader::with_max_line_len(Cursor::new(input), max)
            .map(|line| line.unwrap().as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn terminators_are_kept() {
        let lines = read_all(b"one\ntwo\r\nthree", None);
        assert_eq!(
            lines,
            vec![b"one\n".to_vec(), b"two\r\n".to_vec(), b"three".to_vec()]
        );
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(read_all(b"", None).is_empty());
    }

    #[test]
    fn blank_lines_are_lines() {
        assert_eq!(read_all(b"\n\n", None).len(), 2);
    }

    #[test]
    fn long_lines_split_at_limit() {
        let lines = read_all(b"abcdefg\nhi\n", Some(3));
        assert_eq!(
            lines,
            vec![
                b"abc".to_vec(),
                b"def".to_vec(),
                b"g\n".to_vec(),
                b"hi\n".to_vec()
            ]
        );
    }

    #[test]
    fn unlimited_reader_keeps_long_lines_whole() {
        let long = vec![b'x'; 5000];
        let lines = read_all(&long, None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5000);
    }

    #[test]
    fn zero_limit_still_progresses() {
        assert_eq!(read_all(b"ab", Some(0)).len(), 2);
    }

    #[test]
    fn store_keeps_file_order() {
        let mut store = LineStore::new();
        store.push(Line::from("b\n")).unwrap();
        store.push(Line::from("a\n")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store[0].as_bytes(), b"b\n");
        assert_eq!(store[1].as_bytes(), b"a\n");
        assert_eq!(store.byte_len(), 4);
    }

    #[test]
    fn lines_order_by_bytes() {
        assert!(Line::from("apple\n") < Line::from("banana\n"));
        assert!(Line::from("abc") < Line::from("abc\n"));
        assert!(Line::from("Zeta") < Line::from("alpha"));
    }
}
