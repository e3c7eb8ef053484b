//! Content-derived seed material for the shuffle.
//!
//! Not suitable for anything that needs unpredictability.

use std::time::{SystemTime, UNIX_EPOCH};

/// Starting value of the accumulator.
pub const INITIAL_SEED: u32 = 0xDEAD_FACE;

/// Folds every input byte into a 32-bit value with add-then-rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAccumulator {
    state: u32,
}

impl Default for SeedAccumulator {
    fn default() -> Self {
        Self {
            state: INITIAL_SEED,
        }
    }
}

impl SeedAccumulator {
    /// Creates an accumulator at [`INITIAL_SEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixes `bytes` in, in order.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = self.state.wrapping_add(u32::from(byte)).rotate_left(16);
        }
    }

    /// Current accumulated value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.state
    }

    /// Combines the accumulator with the clock and line count.
    #[must_use]
    pub fn prng_seed(&self, unix_time: u64, line_count: usize) -> u64 {
        unix_time
            .wrapping_add(line_count as u64)
            .wrapping_add(u64::from(self.state))
    }
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
