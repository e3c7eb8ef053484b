//! Error types for line reordering.

use std::collections::TryReserveError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for reorder operations.
pub type ReorderResult<T> = Result<T, ReorderError>;

/// Errors that can occur while reordering a file.
///
/// Every variant is terminal for the current run. Nothing is retried.
#[derive(Debug, Error)]
pub enum ReorderError {
    /// The input file is missing or unreadable.
    #[error("cannot open file '{}': {source}", path.display())]
    CannotOpenFile {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file looks like UTF-16 or UTF-32.
    #[error("UTF-16 and UTF-32 are not supported: '{}'", path.display())]
    UnsupportedEncoding {
        /// The rejected file.
        path: PathBuf,
    },

    /// An I/O error occurred after the file was opened.
    #[error("cannot read file '{}': {source}", path.display())]
    ReadFailed {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Growing the line store or the permutation failed.
    #[error("out of memory while processing '{}'", path.display())]
    OutOfMemory {
        /// The file being processed.
        path: PathBuf,
        /// The failed reservation.
        #[source]
        source: TryReserveError,
    },

    /// The output file could not be opened for writing.
    #[error("cannot write file '{}': {source}", path.display())]
    CannotWriteFile {
        /// The target file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing, syncing or replacing the output failed.
    #[error("write failed for '{}': {source}", path.display())]
    WriteFailed {
        /// The target file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ReorderError {
    /// Creates a cannot-open error.
    pub fn cannot_open(path: &Path, source: io::Error) -> Self {
        Self::CannotOpenFile {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an unsupported encoding error.
    pub fn unsupported_encoding(path: &Path) -> Self {
        Self::UnsupportedEncoding {
            path: path.to_path_buf(),
        }
    }

    /// Creates a read failure error.
    pub fn read_failed(path: &Path, source: io::Error) -> Self {
        Self::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an out of memory error.
    pub fn out_of_memory(path: &Path, source: TryReserveError) -> Self {
        Self::OutOfMemory {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a cannot-write error.
    pub fn cannot_write(path: &Path, source: io::Error) -> Self {
        Self::CannotWriteFile {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a write failure error.
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        Self::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}
