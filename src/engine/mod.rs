//! Turn orchestration and the UI seam.

pub mod presenter;
pub mod turn;

pub use presenter::{Cursor, GameOverSummary, Highlight, NullPresenter, Presenter};
pub use turn::{CellHint, ClickOutcome, TurnEnd, TurnEngine, TurnReport, TurnState};
