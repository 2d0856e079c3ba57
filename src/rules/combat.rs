//! Combat resolution.
//!
//! An attack resolves in two halves around a single continuation point:
//!
//! 1. `strike`: compute damage, apply it (health clamped at zero) and
//!    credit the score for human attackers.
//! 2. the damage display: the caller shows the damage number and returns
//!    only once it is done.
//! 3. `settle`: remove the target if it died, then report whether the
//!    computer side is wiped out (level complete) and whether the human
//!    side is wiped out (game over).
//!
//! `resolve_attack` runs all three in order. Nothing after the damage
//! display counts as committed until `settle` returns.

use tracing::debug;

use crate::core::{Cell, GameState, Side, UnitId};
use crate::units::{round_half_up, Character};

/// Damage `attacker` deals to `target`.
///
/// Attack minus defence, but never less than a tenth of the attack.
///
/// ```
/// use tactics_engine::rules::damage;
/// use tactics_engine::units::{Character, UnitKind};
///
/// let mut attacker = Character::new(UnitKind::Bowman, 1);
/// let mut target = Character::new(UnitKind::Vampire, 1);
/// attacker.attack = 20;
/// target.defence = 30;
///
/// assert_eq!(damage(&attacker, &target), 2);
/// ```
#[must_use]
pub fn damage(attacker: &Character, target: &Character) -> u32 {
    let attack = f64::from(attacker.attack);
    let raw = (attack - f64::from(target.defence)).max(attack * 0.1);
    round_half_up(raw)
}

/// An attack whose damage is applied but whose consequences are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "a strike must be settled"]
pub struct PendingAttack {
    pub attacker: UnitId,
    pub target: UnitId,
    pub target_cell: Cell,
    pub damage: u32,
}

/// Outcome of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: UnitId,
    pub target: UnitId,
    pub target_cell: Cell,
    pub damage: u32,
    /// The target died and was removed.
    pub killed: bool,
    /// The computer side has no units left.
    pub level_complete: bool,
    /// The human side has no units left.
    pub game_over: bool,
}

/// Applies attacks to game state.
pub struct CombatResolver;

impl CombatResolver {
    /// First half of an attack: apply damage and score.
    ///
    /// Returns `None` if either unit is unknown or the target is not on
    /// the board; nothing is changed in that case.
    pub fn strike(state: &mut GameState, attacker: UnitId, target: UnitId) -> Option<PendingAttack> {
        let target_cell = state.position_of(target)?;
        let amount = damage(state.character(attacker)?, state.character(target)?);

        state.character_mut(target)?.take_damage(amount);

        if state.side_of(attacker) == Some(Side::Human) {
            state.score += u64::from(amount);
        }

        debug!(%attacker, %target, damage = amount, "strike");

        Some(PendingAttack {
            attacker,
            target,
            target_cell,
            damage: amount,
        })
    }

    /// Second half of an attack: remove the dead and check both teams.
    pub fn settle(state: &mut GameState, pending: PendingAttack) -> AttackReport {
        let killed = state.character(pending.target).is_some_and(Character::is_dead);
        if killed {
            state.remove_unit(pending.target);
            debug!(target = %pending.target, "unit killed");
        }

        AttackReport {
            attacker: pending.attacker,
            target: pending.target,
            target_cell: pending.target_cell,
            damage: pending.damage,
            killed,
            level_complete: state.team(Side::Computer).is_empty(),
            game_over: state.team(Side::Human).is_empty(),
        }
    }

    /// Resolve a whole attack.
    ///
    /// `show_damage` receives the target cell and damage between the two
    /// halves and must return only once the display has finished.
    pub fn resolve_attack(
        state: &mut GameState,
        attacker: UnitId,
        target: UnitId,
        show_damage: impl FnOnce(Cell, u32),
    ) -> Option<AttackReport> {
        let pending = Self::strike(state, attacker, target)?;
        show_damage(pending.target_cell, pending.damage);
        Some(Self::settle(state, pending))
    }
}
