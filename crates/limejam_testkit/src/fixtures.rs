//! Temporary file fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The UTF-8 byte-order mark, as written by the fixtures.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text file in its own temporary directory, removed on drop.
pub struct TextFile {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TextFile {
    /// Creates a file holding exactly `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("lines.txt");
        fs::write(&path, bytes).expect("Failed to write fixture");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Creates a file from lines, concatenated as given.
    pub fn with_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::new(join(lines).as_bytes())
    }

    /// Creates a file that starts with a BOM followed by `lines`.
    pub fn with_bom<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut bytes = BOM.to_vec();
        bytes.extend_from_slice(join(lines).as_bytes());
        Self::new(&bytes)
    }

    /// Path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current raw contents.
    pub fn bytes(&self) -> Vec<u8> {
        fs::read(&self.path).expect("Failed to read fixture")
    }

    /// Current contents split after each `\n`, BOM stripped.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.bytes();
        let body = bytes.strip_prefix(BOM).unwrap_or(&bytes);
        split_lines(&String::from_utf8_lossy(body))
    }

    /// Whether the file currently starts with a BOM.
    pub fn has_bom(&self) -> bool {
        self.bytes().starts_with(BOM)
    }
}

/// Splits text after each `\n`, keeping terminators.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Sorts lines, returning them as a new vector.
pub fn sorted<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let line: &str = line.as_ref();
        out.push(line.to_owned());
    }
    out.sort();
    out
}

fn join<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_roundtrip() {
        let file = TextFile::with_lines(&["b\n", "a"]);
        assert_eq!(file.bytes(), b"b\na");
        assert_eq!(file.lines(), vec!["b\n", "a"]);
        assert!(!file.has_bom());
    }

    #[test]
    fn bom_fixture() {
        let file = TextFile::with_bom(&["x\n"]);
        assert!(file.has_bom());
        assert_eq!(file.lines(), vec!["x\n"]);
    }

    #[test]
    fn directory_is_removed_on_drop() {
        let file = TextFile::new(b"");
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
    }
}
