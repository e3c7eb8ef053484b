//! Index permutations over a [`LineStore`].
//!
//! A [`Permutation`] is a bijection on `[0, count)`. Position `k` of the
//! output holds the line at index `permutation[k]` of the store. The first
//! `keep_first` positions always map to themselves, in both modes.

use crate::line::LineStore;
use rand::Rng;
use std::collections::TryReserveError;
use std::ops::Deref;

/// Output order of the stored lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity permutation `[0, 1, ..., count - 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index array cannot be allocated.
    pub fn identity(count: usize) -> Result<Self, TryReserveError> {
        let mut indices = Vec::new();
        indices.try_reserve_exact(count)?;
        indices.extend(0..count);
        Ok(Self(indices))
    }

    /// Sorts lines `[keep_first, count)` by their bytes.
    ///
    /// Leading lines stay in place. Equal lines keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns an error if the index array cannot be allocated.
    pub fn sorted(store: &LineStore, keep_first: usize) -> Result<Self, TryReserveError> {
        let mut permutation = Self::identity(store.len())?;
        let keep = keep_first.min(store.len());
        permutation.0[keep..].sort_by(|&a, &b| store[a].cmp(&store[b]));
        Ok(permutation)
    }

    /// Fisher-Yates shuffle of positions `[keep_first, count)`.
    ///
    /// Iterates `i` from `count - 1` down to `keep_first + 1`, swapping
    /// position `i` with a uniform draw from `[keep_first, i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index array cannot be allocated.
    pub fn shuffled<R: Rng>(
        count: usize,
        keep_first: usize,
        rng: &mut R,
    ) -> Result<Self, TryReserveError> {
        let mut permutation = Self::identity(count)?;
        let keep = keep_first.min(count);
        for i in (keep + 1..count).rev() {
            let j = rng.gen_range(keep..=i);
            permutation.0.swap(i, j);
        }
        Ok(permutation)
    }

    /// Whether every position maps to itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &index)| pos == index)
    }

    /// Consumes the permutation, returning the raw indices.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Permutation {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}
