//! Random alphanumeric ids for board items.
//!
//! Ids are short and human-copyable, not secrets. Collisions are possible in
//! principle; callers that must never reuse an id check against their own
//! history (see `PriorityBoard::add_item`).

#[cfg(test)]
#[path = "id_test.rs"]
mod id_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{ID_ALPHABET, ID_LENGTH};

/// Source of item ids.
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_rng(&mut rand::rng()) }
    }

    /// Create a generator with a fixed seed, for reproducible sequences.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Generate an id of `length` characters drawn uniformly from `[A-Za-z0-9]`.
    pub fn generate(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let idx = self.rng.random_range(0..ID_ALPHABET.len());
                ID_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Generate an id of the default length.
    pub fn generate_default(&mut self) -> String {
        self.generate(ID_LENGTH)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
