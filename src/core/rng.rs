//! Seeded random number generation for pile shuffling.
//!
//! The same seed always yields the same shuffle, so a game can be replayed
//! from its config alone. Each pile draws from its own context stream, which
//! keeps deck I's order independent of how many cards deck II holds.
//!
//! ```
//! use terra_futura::core::GameRng;
//!
//! let mut a = GameRng::new(7).for_context("deck-1");
//! let mut b = GameRng::new(7).for_context("deck-1");
//!
//! let mut xs = vec![1, 2, 3, 4, 5];
//! let mut ys = xs.clone();
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG over ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive an independent stream named by `context`.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
