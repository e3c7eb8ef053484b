//! Encoding detection from the first bytes of a file.
//!
//! Only ASCII and UTF-8 are supported. A UTF-8 byte-order mark is detected
//! and later re-emitted verbatim. A null byte among the first three bytes, or
//! a UTF-16/UTF-32 byte-order mark, is taken as a sign of a wide encoding and
//! the file is rejected.

use std::io::{self, Read, Seek, SeekFrom};

/// The UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Leading bytes of the UTF-16 and UTF-32 byte-order marks.
const WIDE_BOMS: [[u8; 2]; 2] = [[0xFF, 0xFE], [0xFE, 0xFF]];

/// Classification of a file's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 starting with a byte-order mark.
    Utf8Bom,
    /// ASCII or UTF-8 without a byte-order mark.
    Plain,
    /// Probably UTF-16 or UTF-32.
    Unsupported,
}

impl Encoding {
    /// Classifies the first (up to three) bytes of a file.
    ///
    /// Prefixes shorter than three bytes are always [`Encoding::Plain`].
    #[must_use]
    pub fn classify(prefix: &[u8]) -> Self {
        if prefix == UTF8_BOM {
            Self::Utf8Bom
        } else if prefix.len() == UTF8_BOM.len()
            && (prefix.contains(&0) || WIDE_BOMS.iter().any(|bom| prefix.starts_with(bom)))
        {
            Self::Unsupported
        } else {
            Self::Plain
        }
    }

    /// Whether output must start with the byte-order mark.
    #[must_use]
    pub const fn has_bom(self) -> bool {
        matches!(self, Self::Utf8Bom)
    }
}

/// Detects the encoding and positions `reader` at the first content byte.
///
/// After a BOM the cursor stays just past it; otherwise it is rewound to the
/// start so the inspected bytes are read again as content.
///
/// # Errors
///
/// Returns an error if reading or seeking fails.
pub fn detect<R: Read + Seek>(reader: &mut R) -> io::Result<Encoding> {
    let mut prefix = Vec::with_capacity(UTF8_BOM.len());
    reader
        .by_ref()
        .take(UTF8_BOM.len() as u64)
        .read_to_end(&mut prefix)?;

    let encoding = Encoding::classify(&prefix);
    if encoding != Encoding::Utf8Bom {
        reader.seek(SeekFrom::Start(0))?;
    }
    Ok(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn rest(cursor: &mut Cursor<Vec<u8>>) -> Vec<u8> {
        let mut out = Vec::new();
        cursor.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn bom_is_skipped() {
        let mut cursor = Cursor::new(b"\xEF\xBB\xBFhello\n".to_vec());
        assert_eq!(detect(&mut cursor).unwrap(), Encoding::Utf8Bom);
        assert_eq!(rest(&mut cursor), b"hello\n");
    }

    #[test]
    fn plain_text_is_rewound() {
        let mut cursor = Cursor::new(b"hello\n".to_vec());
        assert_eq!(detect(&mut cursor).unwrap(), Encoding::Plain);
        assert_eq!(rest(&mut cursor), b"hello\n");
    }

    #[test]
    fn utf16_le_is_rejected() {
        let mut cursor = Cursor::new(b"h\x00i\x00".to_vec());
        assert_eq!(detect(&mut cursor).unwrap(), Encoding::Unsupported);
    }

    #[test]
    fn wide_boms_are_rejected() {
        assert_eq!(Encoding::classify(b"\xFF\xFEh"), Encoding::Unsupported);
        assert_eq!(Encoding::classify(b"\xFE\xFF\x00"), Encoding::Unsupported);
        assert_eq!(Encoding::classify(b"\xFF\xFE\x00"), Encoding::Unsupported);
    }

    #[test]
    fn utf16_be_without_bom_is_rejected() {
        assert_eq!(Encoding::classify(b"\x00h\x00"), Encoding::Unsupported);
    }

    #[test]
    fn short_files_are_plain() {
        let inputs: [&[u8]; 4] = [b"", b"a", b"\x00", b"\xEF\xBB"];
        for input in inputs {
            let mut cursor = Cursor::new(input.to_vec());
            assert_eq!(detect(&mut cursor).unwrap(), Encoding::Plain);
            assert_eq!(rest(&mut cursor), input);
        }
    }

    #[test]
    fn has_bom() {
        assert!(Encoding::Utf8Bom.has_bom());
        assert!(!Encoding::Plain.has_bom());
        assert!(!Encoding::Unsupported.has_bom());
    }
}
