//! Attack legality and target scanning.
//!
//! A unit can strike any cell inside the square of side
//! `2 * attack_range + 1` centred on it, i.e. Chebyshev distance at most
//! `attack_range` on both axes. `targets_in_area` scans the same square
//! for enemies, clipped to the board and skipping the centre; the opponent
//! policy builds its melee and ranged searches on it.

use smallvec::SmallVec;

use crate::core::{Board, Cell, GameState, Side, UnitId};

/// Units found by an area scan. Eight covers a full melee ring.
pub type Targets = SmallVec<[UnitId; 8]>;

/// Attack checks.
pub struct AttackValidator;

impl AttackValidator {
    /// Check whether `target` lies inside the attack square around `from`.
    ///
    /// ```
    /// use tactics_engine::core::Board;
    /// use tactics_engine::rules::AttackValidator;
    ///
    /// let board = Board::new(8);
    ///
    /// assert!(AttackValidator::in_range(board, 0, 2, 18)); // (2, 2)
    /// assert!(!AttackValidator::in_range(board, 0, 2, 24)); // (0, 3)
    /// ```
    #[must_use]
    pub fn in_range(board: Board, from: Cell, range: usize, target: Cell) -> bool {
        let (sx, sy) = board.to_xy(from);
        let (tx, ty) = board.to_xy(target);
        sx.abs_diff(tx) <= range && sy.abs_diff(ty) <= range
    }

    /// Geometric attack check for a placed unit, using its own attack range.
    #[must_use]
    pub fn is_valid_attack_area(state: &GameState, unit: UnitId, target: Cell) -> bool {
        match (state.position_of(unit), state.character(unit)) {
            (Some(from), Some(character)) => {
                Self::in_range(state.board(), from, character.attack_range, target)
            }
            _ => false,
        }
    }

    /// Full attack check: an enemy of `unit` stands on `target` within range.
    #[must_use]
    pub fn is_valid_attack(state: &GameState, unit: UnitId, target: Cell) -> bool {
        let (Some(own), Some(victim)) = (state.side_of(unit), state.unit_at(target)) else {
            return false;
        };
        state.side_of(victim) == Some(own.opponent())
            && Self::is_valid_attack_area(state, unit, target)
    }

    /// Units of side `side` within `radius` of `unit`, in board scan order.
    ///
    /// The scan excludes the unit's own cell and anything off the board.
    #[must_use]
    pub fn targets_in_area(state: &GameState, unit: UnitId, radius: usize, side: Side) -> Targets {
        let Some(center) = state.position_of(unit) else {
            return Targets::new();
        };
        state
            .board()
            .square_around(center, radius)
            .filter_map(|cell| state.unit_at(cell))
            .filter(|&id| state.side_of(id) == Some(side))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Character, UnitKind};

    const BOARD: Board = Board::new(8);

    fn cell(x: usize, y: usize) -> Cell {
        y * 8 + x
    }

    #[test]
    fn test_square_not_diamond() {
        let from = cell(3, 3);

        assert!(AttackValidator::in_range(BOARD, from, 1, cell(4, 4)));
        assert!(AttackValidator::in_range(BOARD, from, 2, cell(5, 1)));
        assert!(!AttackValidator::in_range(BOARD, from, 2, cell(6, 3)));
        assert!(!AttackValidator::in_range(BOARD, from, 2, cell(4, 6)));
    }

    #[test]
    fn test_range_zero_is_own_cell() {
        assert!(AttackValidator::in_range(BOARD, 9, 0, 9));
        assert!(!AttackValidator::in_range(BOARD, 9, 0, 10));
    }

    #[test]
    fn test_is_valid_attack_needs_enemy() {
        let mut state = GameState::new(BOARD, 4);
        let bow = state.spawn(Character::new(UnitKind::Bowman, 1)).unwrap();
        let ally = state.spawn(Character::new(UnitKind::Magician, 1)).unwrap();
        let foe = state.spawn(Character::new(UnitKind::Vampire, 1)).unwrap();
        state.place(bow, cell(2, 2));
        state.place(ally, cell(3, 2));
        state.place(foe, cell(4, 4));

        assert!(AttackValidator::is_valid_attack(&state, bow, cell(4, 4)));
        assert!(!AttackValidator::is_valid_attack(&state, bow, cell(3, 2)));
        assert!(!AttackValidator::is_valid_attack(&state, bow, cell(1, 1)));
    }

    #[test]
    fn test_targets_in_area_filters_side_and_center() {
        let mut state = GameState::new(BOARD, 4);
        let daemon = state.spawn(Character::new(UnitKind::Daemon, 1)).unwrap();
        let near = state.spawn(Character::new(UnitKind::Bowman, 1)).unwrap();
        let far = state.spawn(Character::new(UnitKind::Swordsman, 1)).unwrap();
        let friend = state.spawn(Character::new(UnitKind::Undead, 1)).unwrap();
        state.place(daemon, cell(3, 3));
        state.place(near, cell(4, 3));
        state.place(far, cell(6, 6));
        state.place(friend, cell(2, 2));

        let melee = AttackValidator::targets_in_area(&state, daemon, 1, Side::Human);
        assert_eq!(melee.as_slice(), &[near]);

        let wide = AttackValidator::targets_in_area(&state, daemon, 3, Side::Human);
        assert_eq!(wide.as_slice(), &[near, far]);

        let allies = AttackValidator::targets_in_area(&state, daemon, 1, Side::Computer);
        assert_eq!(allies.as_slice(), &[friend]);
    }
}
