//! Id generators injected into the aggregator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Id;

/// Source of unique tokens for selections and saved records.
pub trait IdGenerator {
    /// Returns a token not previously returned by this generator.
    fn next_id(&mut self) -> Id;
}

/// Monotonic counter: `1`, `2`, `3`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Id {
        self.last += 1;
        Id::from(self.last.to_string())
    }
}

/// Random 64-bit hex tokens from a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    /// Deterministic tokens for a given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Tokens seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Id {
        Id::from(format!("{:016x}", self.rng.random::<u64>()))
    }
}
