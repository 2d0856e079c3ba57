//! Characters - runtime unit state.
//!
//! A `Character` is one unit's mutable combat state. Kind and level-1
//! stats come from `UnitKind`; leveling and damage mutate it afterwards.
//!
//! ## Invariants
//!
//! - `health` stays in `0..=MAX_HEALTH`
//! - `health == 0` means the unit is dead and must be removed from the board

use serde::{Deserialize, Serialize};

use super::kind::UnitKind;

/// Health cap restored by leveling.
pub const MAX_HEALTH: u32 = 100;

/// Health every freshly generated unit starts with.
pub const INITIAL_HEALTH: u32 = 50;

/// Round to the nearest integer, halves rounding up.
#[must_use]
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

/// Health bracket, used by renderers for health bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthLevel {
    Critical,
    Normal,
    High,
}

/// A unit's combat state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    pub level: u32,
    pub attack: u32,
    pub defence: u32,
    pub health: u32,
    pub kind: UnitKind,
    pub attack_range: usize,
    pub move_range: usize,
}

impl Character {
    /// Create a unit of the given kind with its base stats.
    ///
    /// The level is recorded as-is; stats are not scaled for levels above 1.
    #[must_use]
    pub fn new(kind: UnitKind, level: u32) -> Self {
        let base = kind.base_stats();
        Self {
            level,
            attack: base.attack,
            defence: base.defence,
            health: INITIAL_HEALTH,
            kind,
            attack_range: base.attack_range,
            move_range: base.move_range,
        }
    }

    /// Check whether the unit has no health left.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply damage, clamping health at zero.
    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Advance one level.
    ///
    /// Attack and defence grow with remaining health and never shrink;
    /// health is restored by 80, capped at `MAX_HEALTH`.
    pub fn level_up(&mut self) {
        let factor = f64::from(80 + self.health) / 100.0;

        self.level += 1;
        self.attack = self.attack.max(round_half_up(f64::from(self.attack) * factor));
        self.defence = self.defence.max(round_half_up(f64::from(self.defence) * factor));
        self.health = if self.health > 20 {
            MAX_HEALTH
        } else {
            self.health + 80
        };
    }

    /// Health bracket for display.
    #[must_use]
    pub fn health_level(&self) -> HealthLevel {
        match self.health {
            h if h < 15 => HealthLevel::Critical,
            h if h < 50 => HealthLevel::Normal,
            _ => HealthLevel::High,
        }
    }
}
