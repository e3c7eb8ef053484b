//! Reorder configuration.

use serde::Serialize;

/// Line length at which the legacy reader split long physical lines.
pub const LEGACY_MAX_LINE_LEN: usize = 1023;

/// How the lines are reordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Uniform random permutation.
    #[default]
    Shuffle,
    /// Lexicographic byte order.
    Sort,
}

/// How the reordered file replaces the original.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Write a sibling temporary file, then rename it over the target.
    ///
    /// The target gets a new inode: other hard links to it keep the old
    /// contents, and ownership is not carried over.
    #[default]
    Atomic,
    /// Truncate and overwrite the target directly.
    ///
    /// A failure part way through leaves the file partially written.
    InPlace,
}

/// Configuration for a single reorder run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Shuffle or sort.
    pub mode: Mode,

    /// Number of leading lines that never move.
    pub keep_first: usize,

    /// Split physical lines longer than this many bytes (`None` = unlimited).
    pub max_line_len: Option<usize>,

    /// Fixed PRNG seed. When unset the seed is derived from the clock,
    /// the line count and the file content.
    pub seed: Option<u64>,

    /// Output replacement strategy.
    pub write_strategy: WriteStrategy,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration for the classic three-parameter call.
    #[must_use]
    pub fn from_flags(just_sort: bool, keep_first_line: bool) -> Self {
        Self::new()
            .mode(if just_sort { Mode::Sort } else { Mode::Shuffle })
            .keep_first(usize::from(keep_first_line))
    }

    /// Sets the reorder mode.
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets how many leading lines stay fixed.
    #[must_use]
    pub const fn keep_first(mut self, count: usize) -> Self {
        self.keep_first = count;
        self
    }

    /// Sets the maximum stored line length.
    #[must_use]
    pub const fn max_line_len(mut self, len: Option<usize>) -> Self {
        self.max_line_len = len;
        self
    }

    /// Uses the legacy 1023-byte line splitting.
    #[must_use]
    pub const fn legacy_line_len(self) -> Self {
        self.max_line_len(Some(LEGACY_MAX_LINE_LEN))
    }

    /// Sets a fixed PRNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the write strategy.
    #[must_use]
    pub const fn write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.write_strategy = strategy;
        self
    }
}
