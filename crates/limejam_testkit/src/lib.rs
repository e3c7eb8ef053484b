//! # LIMEJAM Testkit
//!
//! Test utilities for LIMEJAM.
//!
//! This crate provides:
//! - Temporary text file fixtures
//! - Property-based line generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use limejam_testkit::prelude::*;
//!
//! #[test]
//! fn sorts_file() {
//!     let file = TextFile::with_lines(&["b\n", "a\n"]);
//!     // ... reorder file.path()
//!     assert_eq!(file.lines(), vec!["a\n", "b\n"]);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
