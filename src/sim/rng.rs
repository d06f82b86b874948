//! Seeded random sampling for the simulation

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic RNG owned by the game state
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[lo, hi)`; returns `lo` for an empty range
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }

    /// Uniform angle in `[0, 2π)`
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }
}
