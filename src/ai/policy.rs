//! Opponent decision policy.
//!
//! `HeuristicOpponent` picks one action per turn, trying in order:
//!
//! 1. **Melee**: units ranked by attack; the first with an enemy in its
//!    eight neighbouring cells hits the toughest (highest defence) one.
//! 2. **Ranged**: units ranked by attack range; the first with an enemy
//!    inside its attack square hits the toughest one.
//! 3. **Advance**: the unit with the longest move range heads for the
//!    nearest ring of enemies, stepping along the closest of the eight
//!    compass directions and shortening the step until it lands on a free
//!    cell (possibly staying put).
//!
//! Rankings are stable, so ties keep team order; target ties keep board
//! scan order. The policy reads state only and uses no randomness: the
//! same state always yields the same action.

use std::f64::consts::FRAC_PI_4;

use crate::core::{Action, Cell, GameState, Side, UnitId};
use crate::rules::AttackValidator;
use crate::units::Character;

/// Chooses the opponent's action for a turn.
pub trait OpponentPolicy {
    /// Choose an action for `side`.
    ///
    /// Returns `None` if `side` has nothing to do (no units, or no enemies
    /// left to approach).
    fn choose_action(&self, state: &GameState, side: Side) -> Option<Action>;
}

/// The fixed attack-or-advance heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicOpponent;

impl OpponentPolicy for HeuristicOpponent {
    fn choose_action(&self, state: &GameState, side: Side) -> Option<Action> {
        Self::melee_attack(state, side)
            .or_else(|| Self::ranged_attack(state, side))
            .or_else(|| Self::advance(state, side))
    }
}

impl HeuristicOpponent {
    /// Strongest attacker with an enemy adjacent to it.
    #[must_use]
    pub fn melee_attack(state: &GameState, side: Side) -> Option<Action> {
        ranked_by(state, side, |c| c.attack as usize)
            .into_iter()
            .find_map(|unit| attack_in_radius(state, unit, 1, side))
    }

    /// Longest-reaching attacker with an enemy in its attack square.
    #[must_use]
    pub fn ranged_attack(state: &GameState, side: Side) -> Option<Action> {
        ranked_by(state, side, |c| c.attack_range)
            .into_iter()
            .find_map(|unit| {
                let range = state.character(unit)?.attack_range;
                attack_in_radius(state, unit, range, side)
            })
    }

    /// Move the most mobile unit towards the nearest enemies.
    #[must_use]
    pub fn advance(state: &GameState, side: Side) -> Option<Action> {
        let mover = *ranked_by(state, side, |c| c.move_range).first()?;
        let from = state.position_of(mover)?;
        let move_range = state.character(mover)?.move_range;
        let board = state.board();

        // Radius 1 is already known to be empty, or the melee step would
        // have fired.
        let ring = (2..=board.max_radius(from))
            .map(|radius| AttackValidator::targets_in_area(state, mover, radius, side.opponent()))
            .find(|targets| !targets.is_empty())?;
        let target = first_max_by(state, &ring, |c| c.move_range)?;
        let goal = state.position_of(target)?;

        let (step_x, step_y) = compass_step(state, from, goal);
        let (x, y) = board.to_xy(from);
        let (x, y) = (x as i64, y as i64);

        let to = (1..=move_range)
            .rev()
            .find_map(|distance| {
                let distance = distance as f64;
                let cell = board.index_of(
                    x + round_signed(step_x * distance),
                    y + round_signed(step_y * distance),
                )?;
                (!state.is_occupied(cell)).then_some(cell)
            })
            .unwrap_or(from);

        Some(Action::Move { unit: mover, to })
    }
}

/// Attack the toughest enemy within `radius` of `unit`, if any.
fn attack_in_radius(state: &GameState, unit: UnitId, radius: usize, side: Side) -> Option<Action> {
    let targets = AttackValidator::targets_in_area(state, unit, radius, side.opponent());
    let target = first_max_by(state, &targets, |c| c.defence as usize)?;
    Some(Action::Attack {
        attacker: unit,
        target,
    })
}

/// A side's units, sorted by `key` descending. Ties keep team order.
fn ranked_by(state: &GameState, side: Side, key: impl Fn(&Character) -> usize) -> Vec<UnitId> {
    let mut ranked: Vec<_> = state
        .units_of(side)
        .filter(|&(id, _)| state.position_of(id).is_some())
        .map(|(id, c)| (id, key(c)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// The first unit with the largest `key`.
fn first_max_by(
    state: &GameState,
    units: &[UnitId],
    key: impl Fn(&Character) -> usize,
) -> Option<UnitId> {
    let mut best: Option<(UnitId, usize)> = None;
    for &id in units {
        let Some(value) = state.character(id).map(&key) else {
            continue;
        };
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((id, value));
        }
    }
    best.map(|(id, _)| id)
}

/// Unit step along the compass direction nearest to `from -> goal`.
///
/// The angle is taken as `atan2(dx, dy)` and snapped to a multiple of 45°;
/// the step is then `(sin, cos)` of the snapped angle.
fn compass_step(state: &GameState, from: Cell, goal: Cell) -> (f64, f64) {
    let board = state.board();
    let (fx, fy) = board.to_xy(from);
    let (gx, gy) = board.to_xy(goal);
    let dx = gx as f64 - fx as f64;
    let dy = gy as f64 - fy as f64;

    let angle = dx.atan2(dy);
    let snapped = round_signed(angle / FRAC_PI_4) as f64 * FRAC_PI_4;
    (snapped.sin(), snapped.cos())
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_signed(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
