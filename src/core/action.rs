//! Action representation.
//!
//! Both sides act through the same two verbs: attack a unit, or move a unit
//! to a cell. Player clicks are translated into an `Action` by the turn
//! engine; the opponent policy returns one directly.

use serde::{Deserialize, Serialize};

use super::board::Cell;
use super::entity::UnitId;

/// A single action by one unit.
///
/// ```
/// use tactics_engine::core::{Action, UnitId};
///
/// let attack = Action::Attack { attacker: UnitId(0), target: UnitId(4) };
/// let advance = Action::Move { unit: UnitId(4), to: 27 };
///
/// assert_eq!(attack.actor(), UnitId(0));
/// assert_eq!(advance.actor(), UnitId(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `attacker` strikes `target`.
    Attack { attacker: UnitId, target: UnitId },
    /// `unit` relocates to cell `to`. `to` may be the unit's own cell.
    Move { unit: UnitId, to: Cell },
}

impl Action {
    /// The unit performing the action.
    #[must_use]
    pub fn actor(&self) -> UnitId {
        match *self {
            Action::Attack { attacker, .. } => attacker,
            Action::Move { unit, .. } => unit,
        }
    }

    /// Check whether this is an attack.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        matches!(self, Action::Attack { .. })
    }
}
