//! # Injectable Randomness
//!
//! Scenario generation draws its type and impact figures from a
//! [`RandomSource`]. Production uses [`StdRandom`]; tests use
//! [`ScriptedRandom`] to replay an exact sequence and assert exact output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + std::fmt::Debug {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in the inclusive range `[min, max]`.
    ///
    /// `min > max` is treated as the single value `min`.
    fn int_in_range(&mut self, min: u8, max: u8) -> u8 {
        if min >= max {
            return min;
        }
        let span = f64::from(max - min) + 1.0;
        let offset = (self.next_unit().clamp(0.0, 1.0) * span).floor() as u8;
        min.saturating_add(offset).min(max)
    }

    /// Uniform index into a collection of `len` elements. Returns 0 when
    /// `len` is 0.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_unit().clamp(0.0, 1.0) * len as f64).floor() as usize;
        idx.min(len - 1)
    }
}

/// `rand`'s standard generator.
#[derive(Debug)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Replay `values` in order. Draws outside `[0, 1)` are clamped when
    /// consumed by the range helpers.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
