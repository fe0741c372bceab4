//! Injectable randomness
//!
//! Gap placement and cloud recycling draw from a [`RandomSource`] so tests can
//! script exact values while real runs use a seeded PCG stream.

use rand::Rng;
use rand_pcg::Pcg32;

/// Source of uniformly distributed floats
pub trait RandomSource {
    /// Uniform sample from the inclusive range `[lo, hi]`
    ///
    /// Callers guarantee `lo <= hi`.
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32;
}

impl RandomSource for Pcg32 {
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if lo >= hi {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Plays back a fixed list of unit samples (0.0..=1.0), cycling when exhausted
///
/// Each sample is mapped linearly onto the requested range, so `0.0` yields
/// `lo` and `1.0` yields `hi` regardless of the caller's bounds.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Always returns the midpoint of the requested range
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }
}

impl RandomSource for ScriptedSource {
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let t = if self.samples.is_empty() {
            0.5
        } else {
            let t = self.samples[self.cursor % self.samples.len()];
            self.cursor += 1;
            t.clamp(0.0, 1.0)
        };
        lo + (hi - lo) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pcg_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.range_f32(150.0, 370.0);
            assert!((150.0..=370.0).contains(&v));
        }
        assert_eq!(rng.range_f32(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut src = ScriptedSource::new(vec![0.0, 1.0]);
        assert_eq!(src.range_f32(10.0, 20.0), 10.0);
        assert_eq!(src.range_f32(10.0, 20.0), 20.0);
        assert_eq!(src.range_f32(0.0, 4.0), 0.0);
    }

    #[test]
    fn test_pcg_is_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.range_f32(0.0, 1.0), b.range_f32(0.0, 1.0));
        }
    }
}
