//! The UI seam.
//!
//! The engine drives rendering through `Presenter` and never reads anything
//! back. Every method defaults to a no-op, so a host only implements what it
//! draws. `show_damage` is the one call the engine waits on: it must return
//! only once the damage display has finished, and the attack is settled
//! after it returns.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Cell, GameState, Theme};
use crate::units::Character;

/// Cell highlight style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// The selected unit's cell.
    Selected,
    /// A legal move destination (green).
    Move,
    /// A legal attack target (red).
    Attack,
}

/// Pointer icon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Auto,
    Pointer,
    Crosshair,
    NotAllowed,
}

/// Final result shown when a match ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    /// Best score including this match.
    pub hi_score: u64,
    /// This match set the hi score.
    pub new_record: bool,
}

/// Rendering collaborator.
pub trait Presenter {
    fn draw_board(&mut self, _theme: Theme, _board: Board) {}

    /// Redraw every unit marker from the current placement.
    fn redraw_positions(&mut self, _state: &GameState) {}

    fn render_score(&mut self, _score: u64) {}

    fn select_cell(&mut self, _cell: Cell, _highlight: Highlight) {}

    fn deselect_cell(&mut self, _cell: Cell) {}

    /// Show details of the unit on `cell`. Formatting is up to the host.
    fn show_tooltip(&mut self, _cell: Cell, _character: &Character) {}

    fn hide_tooltip(&mut self, _cell: Cell) {}

    fn set_cursor(&mut self, _cursor: Cursor) {}

    /// Display `damage` over `cell`; return once the display is done.
    fn show_damage(&mut self, _cell: Cell, _damage: u32) {}

    fn show_error(&mut self, _message: &str) {}

    fn show_game_over(&mut self, _summary: &GameOverSummary) {}
}

/// Presenter that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
