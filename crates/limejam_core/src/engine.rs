//! The read, reorder, write pipeline.

use crate::config::{Config, Mode};
use crate::encoding::{self, Encoding};
use crate::error::{ReorderError, ReorderResult};
use crate::line::{LineReader, LineStore};
use crate::permute::Permutation;
use crate::seed::{self, SeedAccumulator};
use crate::writer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of a successful reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderSummary {
    /// The rewritten file.
    pub path: String,
    /// Shuffle or sort.
    pub mode: Mode,
    /// Number of lines written.
    pub lines: usize,
    /// Number of leading lines left in place.
    pub kept: usize,
    /// Whether a UTF-8 BOM was detected and re-emitted.
    pub has_bom: bool,
    /// PRNG seed used (shuffle only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A fully ingested file.
#[derive(Debug)]
pub struct LoadedFile {
    /// Encoding detected from the first bytes.
    pub encoding: Encoding,
    /// All lines in file order.
    pub lines: LineStore,
    /// Accumulator after every byte was folded in.
    pub accumulator: SeedAccumulator,
}

/// Reads `path` into memory, detecting its encoding.
///
/// The file handle is released before this returns.
///
/// # Errors
///
/// Returns [`ReorderError::CannotOpenFile`], [`ReorderError::UnsupportedEncoding`],
/// [`ReorderError::ReadFailed`] or [`ReorderError::OutOfMemory`].
pub fn load(path: &Path, max_line_len: Option<usize>) -> ReorderResult<LoadedFile> {
    let mut file = File::open(path).map_err(|e| ReorderError::cannot_open(path, e))?;

    let encoding = encoding::detect(&mut file).map_err(|e| ReorderError::read_failed(path, e))?;
    debug!(?encoding, "detected encoding");
    if encoding == Encoding::Unsupported {
        return Err(ReorderError::unsupported_encoding(path));
    }

    let mut lines = LineStore::new();
    let mut accumulator = SeedAccumulator::new();
    for line in LineReader::with_max_line_len(BufReader::new(file), max_line_len) {
        let line = line.map_err(|e| ReorderError::read_failed(path, e))?;
        accumulator.feed(line.as_bytes());
        lines
            .push(line)
            .map_err(|e| ReorderError::out_of_memory(path, e))?;
    }
    debug!(lines = lines.len(), bytes = lines.byte_len(), "read lines");

    Ok(LoadedFile {
        encoding,
        lines,
        accumulator,
    })
}

/// Reorders the lines of `path` in place according to `config`.
///
/// # Errors
///
/// Returns the first error hit; no output is written for failures before
/// the write phase.
pub fn reorder_file(path: &Path, config: &Config) -> ReorderResult<ReorderSummary> {
    let LoadedFile {
        encoding,
        lines,
        accumulator,
    } = load(path, config.max_line_len)?;

    let count = lines.len();
    let (order, seed) = match config.mode {
        Mode::Sort => (Permutation::sorted(&lines, config.keep_first), None),
        Mode::Shuffle => {
            let seed = config
                .seed
                .unwrap_or_else(|| accumulator.prng_seed(seed::unix_time(), count));
            debug!(seed, accumulated = accumulator.value(), "seeding shuffle");
            let mut rng = StdRng::seed_from_u64(seed);
            (
                Permutation::shuffled(count, config.keep_first, &mut rng),
                Some(seed),
            )
        }
    };
    let order = order.map_err(|e| ReorderError::out_of_memory(path, e))?;

    debug!(strategy = ?config.write_strategy, "writing output");
    writer::write_file(
        path,
        encoding.has_bom(),
        &lines,
        &order,
        config.write_strategy,
    )?;

    let summary = ReorderSummary {
        path: path.display().to_string(),
        mode: config.mode,
        lines: count,
        kept: config.keep_first.min(count),
        has_bom: encoding.has_bom(),
        seed,
    };
    info!(path = %summary.path, mode = ?summary.mode, lines = count, "reordered file");
    Ok(summary)
}

/// Like [`reorder_file`], but a missing path fails the way an unopenable
/// file does.
///
/// # Errors
///
/// See [`reorder_file`].
pub fn reorder(path: Option<&Path>, config: &Config) -> ReorderResult<ReorderSummary> {
    match path {
        Some(path) => reorder_file(path, config),
        None => Err(ReorderError::cannot_open(
            Path::new(""),
            io::Error::new(io::ErrorKind::NotFound, "no file name given"),
        )),
    }
}

/// Shuffles or sorts `filename`, reporting failures on stderr.
///
/// Returns the process exit status: 0 on success, 1 on failure.
pub fn run(filename: Option<&Path>, just_sort: bool, keep_first_line: bool) -> i32 {
    match reorder(filename, &Config::from_flags(just_sort, keep_first_line)) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("limejam: error: {err}");
            err.exit_code()
        }
    }
}
