//! Game rules: movement and attack legality, combat resolution and
//! initial placement.
//!
//! Everything here is stateless; functions take the `GameState` they read
//! or mutate, so the turn engine and the opponent policy share one set of
//! rules.

pub mod movement;
pub mod attack;
pub mod combat;
pub mod placement;

pub use movement::MovementValidator;
pub use attack::{AttackValidator, Targets};
pub use combat::{damage, AttackReport, CombatResolver, PendingAttack};
pub use placement::{place_team, spawn_cells};
