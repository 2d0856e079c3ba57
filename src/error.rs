//! Error types.
//!
//! - `ActionError`: a player action the rules refuse. Reported to the
//!   presenter, state unchanged.
//! - `PersistenceError`: missing or unreadable saved state. Always
//!   recoverable.
//! - `ConfigError`: a config no match can be set up with.

use thiserror::Error;

use crate::core::Cell;

/// A player action rejected by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("this is not your unit")]
    NotYourUnit,
    #[error("illegal action")]
    IllegalAction,
    #[error("no unit selected")]
    NoSelection,
    #[error("cell {0} is not on the board")]
    OutOfBounds(Cell),
}

/// Saved state could not be produced or read back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no saved game")]
    NoSavedGame,
    #[error("failed to encode state: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode state: {0}")]
    Decode(#[source] bincode::Error),
    #[error("saved state is invalid: {0}")]
    InvalidState(String),
}

/// Invalid `GameConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {0} is too small (minimum 4)")]
    BoardTooSmall(usize),
    #[error("{count} units per side cannot be placed in {capacity} spawn cells")]
    UnitCount { count: usize, capacity: usize },
    #[error("at least one stage is required")]
    NoStages,
    #[error("recruit max level must be at least 1")]
    RecruitLevel,
}

/// Any error surfaced by the engine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
