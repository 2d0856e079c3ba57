//! Concrete unit kinds.
//!
//! The kind set is closed: every `Character` carries one of these six
//! kinds, and each kind fixes the level-1 attack, defence and ranges.
//! Three kinds fight for the human side, three for the computer.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Level-1 stats of a unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseStats {
    pub attack: u32,
    pub defence: u32,
    pub attack_range: usize,
    pub move_range: usize,
}

/// One of the six unit kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Swordsman,
    Bowman,
    Magician,
    Undead,
    Vampire,
    Daemon,
}

impl UnitKind {
    /// Kinds available to the human side.
    pub const HUMAN: [UnitKind; 3] = [UnitKind::Bowman, UnitKind::Swordsman, UnitKind::Magician];

    /// Kinds available to the computer side.
    pub const COMPUTER: [UnitKind; 3] = [UnitKind::Vampire, UnitKind::Undead, UnitKind::Daemon];

    /// Kinds a side may field.
    #[must_use]
    pub const fn for_side(side: Side) -> &'static [UnitKind] {
        match side {
            Side::Human => &Self::HUMAN,
            Side::Computer => &Self::COMPUTER,
        }
    }

    /// Side this kind is aligned with.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            UnitKind::Swordsman | UnitKind::Bowman | UnitKind::Magician => Side::Human,
            UnitKind::Undead | UnitKind::Vampire | UnitKind::Daemon => Side::Computer,
        }
    }

    /// Level-1 stats.
    #[must_use]
    pub const fn base_stats(self) -> BaseStats {
        let (attack, defence, attack_range, move_range) = match self {
            UnitKind::Swordsman | UnitKind::Undead => (40, 10, 1, 4),
            UnitKind::Bowman | UnitKind::Vampire => (25, 25, 2, 2),
            UnitKind::Magician => (10, 40, 4, 1),
            UnitKind::Daemon => (10, 10, 4, 1),
        };
        BaseStats {
            attack,
            defence,
            attack_range,
            move_range,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UnitKind::Swordsman => "swordsman",
            UnitKind::Bowman => "bowman",
            UnitKind::Magician => "magician",
            UnitKind::Undead => "undead",
            UnitKind::Vampire => "vampire",
            UnitKind::Daemon => "daemon",
        };
        f.write_str(name)
    }
}
