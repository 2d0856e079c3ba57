//! Movement legality.
//!
//! A unit moves along one of the eight straight rays from its cell
//! (horizontal, vertical, both diagonals), at most `move_range` steps.
//! `reaches` is pure geometry: it does not look at occupancy or board
//! bounds. `is_valid_move` adds those checks for a concrete destination.

use crate::core::{Board, Cell, GameState, UnitId};

/// Movement checks.
pub struct MovementValidator;

impl MovementValidator {
    /// Check whether `target` lies on a ray from `from` within `range` steps.
    ///
    /// ```
    /// use tactics_engine::core::Board;
    /// use tactics_engine::rules::MovementValidator;
    ///
    /// let board = Board::new(8);
    /// let from = 18; // (2, 2)
    ///
    /// assert!(MovementValidator::reaches(board, from, 3, 45)); // (5, 5)
    /// assert!(!MovementValidator::reaches(board, from, 3, 50)); // (2, 6)
    /// assert!(!MovementValidator::reaches(board, from, 3, 35)); // (3, 4), knight step
    /// ```
    #[must_use]
    pub fn reaches(board: Board, from: Cell, range: usize, target: Cell) -> bool {
        let (sx, sy) = board.to_xy(from);
        let (tx, ty) = board.to_xy(target);
        let dx = sx.abs_diff(tx);
        let dy = sy.abs_diff(ty);

        let on_ray = dx == 0 || dy == 0 || dx == dy;
        on_ray && dx.max(dy) <= range
    }

    /// Geometric move check for a placed unit, using its own move range.
    ///
    /// Returns false if the unit is unknown or not on the board.
    #[must_use]
    pub fn is_valid_move_area(state: &GameState, unit: UnitId, target: Cell) -> bool {
        match (state.position_of(unit), state.character(unit)) {
            (Some(from), Some(character)) => {
                Self::reaches(state.board(), from, character.move_range, target)
            }
            _ => false,
        }
    }

    /// Full move check: geometry plus an in-bounds, unoccupied destination.
    #[must_use]
    pub fn is_valid_move(state: &GameState, unit: UnitId, target: Cell) -> bool {
        state.board().contains(target)
            && !state.is_occupied(target)
            && Self::is_valid_move_area(state, unit, target)
    }
}
