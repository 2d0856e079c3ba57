//! Core engine types: unit handles, sides, board geometry, RNG,
//! configuration, actions and game state.

pub mod entity;
pub mod side;
pub mod board;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::UnitId;
pub use side::{Side, SideMap};
pub use board::{Board, Cell, TileKind};
pub use rng::GameRng;
pub use config::{GameConfig, Theme};
pub use action::Action;
pub use state::{GameState, PositionedCharacter, SavedGame, SavedUnit};
