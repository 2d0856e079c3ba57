//! Unit model: kinds, characters, teams and the random unit generator.

pub mod kind;
pub mod character;
pub mod team;
pub mod generator;

pub use kind::{BaseStats, UnitKind};
pub use character::{round_half_up, Character, HealthLevel, INITIAL_HEALTH, MAX_HEALTH};
pub use team::Team;
pub use generator::UnitGenerator;
