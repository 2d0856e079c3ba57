//! Initial placement.
//!
//! At the start of every level each side's units are dropped onto random,
//! distinct cells of that side's two spawn columns (the two leftmost
//! columns for the human side, the two rightmost for the computer).

use crate::core::{Board, Cell, GameRng, GameState, Side};

/// Pick `count` distinct random cells in a side's spawn columns.
///
/// `count` is capped at the number of spawn cells.
pub fn spawn_cells(board: Board, side: Side, count: usize, rng: &mut GameRng) -> Vec<Cell> {
    let columns = board.spawn_columns(side);
    let count = count.min(columns.len() * board.size());
    let mut cells = Vec::with_capacity(count);

    while cells.len() < count {
        let row = rng.index(board.size());
        let column = columns[rng.index(columns.len())];
        let cell = row * board.size() + column;

        if !cells.contains(&cell) {
            cells.push(cell);
        }
    }
    cells
}

/// Place every unplaced member of a side's team into its spawn columns,
/// in team order.
pub fn place_team(state: &mut GameState, side: Side, rng: &mut GameRng) {
    let unplaced: Vec<_> = state
        .team(side)
        .members()
        .iter()
        .copied()
        .filter(|&id| state.position_of(id).is_none())
        .collect();

    let cells = spawn_cells(state.board(), side, unplaced.len(), rng);
    for (unit, cell) in unplaced.into_iter().zip(cells) {
        state.place(unit, cell);
    }
}
