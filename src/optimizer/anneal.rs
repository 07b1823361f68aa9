use crate::error::{KaResult, KeyAnnealError};
use fastrand::Rng;
use std::ops::RangeInclusive;

/// Exponential cooling: `T(i) = T0 * exp(-i * K / N)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    pub t0: f64,
    pub k: f64,
    pub p0: f64,
    pub n: usize,
}

impl AnnealingSchedule {
    pub fn new(n: usize, t0: f64, k: f64) -> KaResult<Self> {
        if n == 0 {
            return Err(KeyAnnealError::Config("iteration count must be positive".into()));
        }
        if !(t0 > 0.0) {
            return Err(KeyAnnealError::Config(format!(
                "initial temperature must be positive, got {}",
                t0
            )));
        }
        if !(k > 0.0) {
            return Err(KeyAnnealError::Config(format!(
                "cooling rate must be positive, got {}",
                k
            )));
        }
        Ok(Self { t0, k, p0: 1.0, n })
    }

    pub fn iterations(&self) -> RangeInclusive<usize> {
        1..=self.n
    }

    #[inline]
    pub fn temperature(&self, i: usize) -> f64 {
        self.t0 * (-(i as f64) * self.k / self.n as f64).exp()
    }

    /// Probability of accepting a move that worsens the score by `delta`.
    #[inline]
    pub fn cutoff_probability(&self, delta: f64, i: usize) -> f64 {
        self.p0 * (-delta / self.temperature(i)).exp()
    }

    /// Metropolis criterion. Improvements are always accepted.
    #[inline]
    pub fn accept(&self, delta: f64, i: usize, rng: &mut Rng) -> bool {
        delta < 0.0 || rng.f64() < self.cutoff_probability(delta, i)
    }
}
