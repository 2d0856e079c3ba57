//! Random unit generation.
//!
//! `UnitGenerator` is an endless iterator of freshly created characters,
//! drawn uniformly from an allowed kind set with a level in
//! `1..=max_level`. Building a new generator over the same RNG state
//! restarts the sequence.
//!
//! ```
//! use tactics_engine::core::GameRng;
//! use tactics_engine::units::{UnitGenerator, UnitKind};
//!
//! let mut rng = GameRng::new(1);
//! let recruits: Vec<_> = UnitGenerator::new(&UnitKind::HUMAN, 2, &mut rng).take(3).collect();
//!
//! assert_eq!(recruits.len(), 3);
//! assert!(recruits.iter().all(|c| UnitKind::HUMAN.contains(&c.kind)));
//! assert!(recruits.iter().all(|c| (1..=2).contains(&c.level)));
//! ```

use super::character::Character;
use super::kind::UnitKind;
use crate::core::GameRng;

/// Endless stream of random characters.
#[derive(Debug)]
pub struct UnitGenerator<'a> {
    kinds: &'a [UnitKind],
    max_level: u32,
    rng: &'a mut GameRng,
}

impl<'a> UnitGenerator<'a> {
    /// Create a generator over the given kinds and level range.
    ///
    /// A `max_level` of zero is treated as 1.
    pub fn new(kinds: &'a [UnitKind], max_level: u32, rng: &'a mut GameRng) -> Self {
        Self {
            kinds,
            max_level: max_level.max(1),
            rng,
        }
    }
}

impl Iterator for UnitGenerator<'_> {
    type Item = Character;

    /// Returns `None` only when the kind set is empty.
    fn next(&mut self) -> Option<Character> {
        let level = self.rng.level(self.max_level);
        let kind = *self.rng.choose(self.kinds)?;
        Some(Character::new(kind, level))
    }
}
