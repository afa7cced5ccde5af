//! Random sources for trip synthesis.
//!
//! The synthesizer only ever asks three questions of its randomness: which
//! of `n` items, a real number in a range, and a weighted coin flip. Hiding
//! them behind [`RandomSource`] lets tests script exact choices while
//! production runs use a real `rand` generator.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The randomness a synthesis run draws from.
pub trait RandomSource {
    /// Uniform index in `0..n`. Callers never pass `n == 0`.
    fn pick_index(&mut self, n: usize) -> usize;

    /// Uniform real in `range`. Returns `range.start` for an empty range.
    fn uniform(&mut self, range: Range<f64>) -> f64;

    /// `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool;
}

/// [`RandomSource`] backed by any `rand` generator.
pub struct RngSource<R>(R);

impl RngSource<StdRng> {
    /// Seeded from OS entropy; successive runs differ.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    /// Fixed seed for reproducible datasets.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn pick_index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    #[inline]
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        self.0.gen_range(range)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
