//! Deterministic random number generation.
//!
//! The only randomness in a match is recruiting units (a level and a kind
//! per recruit) and dropping them onto spawn cells. Both draw from a
//! `GameRng` seeded by the config, each from its own named stream, so a
//! given seed always produces the same opening and recruiting more units
//! never shifts where they are placed.
//!
//! ```
//! use tactics_engine::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut units = root.for_context("units");
//! let mut again = GameRng::new(42).for_context("units");
//!
//! assert_eq!(units.level(4), again.level(4));
//! assert_eq!(units.index(16), again.index(16));
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream named `context`.
    ///
    /// The derived seed depends only on this stream's seed and the name,
    /// not on how much has been drawn.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A unit level in `1..=max_level`. A `max_level` of zero yields 1.
    pub fn level(&mut self, max_level: u32) -> u32 {
        self.inner.gen_range(1..=max_level.max(1))
    }

    /// An index in `0..len`. Returns 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
