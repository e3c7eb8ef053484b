//! # LIMEJAM Core
//!
//! Shuffles or sorts the lines of an ASCII/UTF-8 text file in place.
//!
//! This crate provides:
//! - Encoding detection (UTF-8 BOM, rejection of UTF-16/UTF-32)
//! - Line ingestion that keeps every terminator byte
//! - A content-and-clock derived shuffle seed
//! - Sorted and Fisher-Yates shuffled index permutations
//! - Atomic or in-place rewriting of the target file
//!
//! ## Example
//!
//! ```rust,no_run
//! use limejam_core::{reorder_file, Config, Mode};
//! use std::path::Path;
//!
//! let config = Config::new().mode(Mode::Sort).keep_first(1);
//! let summary = reorder_file(Path::new("names.csv"), &config).unwrap();
//! println!("sorted {} lines", summary.lines);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod encoding;
mod engine;
mod error;
mod line;
mod permute;
mod seed;
mod writer;

pub use config::{Config, Mode, WriteStrategy, LEGACY_MAX_LINE_LEN};
pub use encoding::{detect, Encoding, UTF8_BOM};
pub use engine::{load, reorder, reorder_file, run, LoadedFile, ReorderSummary};
pub use error::{ReorderError, ReorderResult};
pub use line::{Line, LineReader, LineStore};
pub use permute::Permutation;
pub use seed::{unix_time, SeedAccumulator, INITIAL_SEED};
pub use writer::{emit, write_file, TEMP_SUFFIX};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
