use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic input generator seeded for reproducible runs.
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `count` values in [-5, 5): roughly half pass `ge:0`.
    pub fn small_signed(&mut self, count: usize) -> Vec<i32> {
        (0..count).map(|_| self.rng.gen_range(-5..5)).collect()
    }

    /// `count` values uniform over the whole `i32` range.
    pub fn uniform_i32(&mut self, count: usize) -> Vec<i32> {
        (0..count).map(|_| self.rng.gen::<i32>()).collect()
    }
}
