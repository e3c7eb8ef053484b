//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use limejam_core::{Line, LineStore};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate one random `\n`-terminated line of `width` characters.
pub fn random_line(width: usize) -> Vec<u8> {
    let mut line: Vec<u8> = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(width)
        .collect();
    line.push(b'\n');
    line
}

/// Generate file contents with `count` random lines.
pub fn random_file(count: usize, width: usize) -> Vec<u8> {
    (0..count).flat_map(|_| random_line(width)).collect()
}

/// Generate a line store with `count` random lines.
pub fn random_store(count: usize, width: usize) -> LineStore {
    let mut store = LineStore::new();
    for _ in 0..count {
        store
            .push(Line::new(random_line(width)))
            .expect("Failed to grow line store");
    }
    store
}
