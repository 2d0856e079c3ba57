//! # tactics-engine
//!
//! Rules engine for a turn-based tactical board game: two teams of typed
//! units share a square grid and alternate attacking or moving until one
//! side is wiped out, across a fixed sequence of themed stages.
//!
//! ## Design Principles
//!
//! 1. **Handles, not links**: units live in an arena inside `GameState`;
//!    teams, positions and the selection refer to them by `UnitId`.
//!
//! 2. **Explicit turn state**: the engine's `TurnState` replaces any global
//!    "busy" flag. Input is only accepted while `Idle`.
//!
//! 3. **Injected collaborators**: rendering (`Presenter`), storage
//!    (`KeyValueStore`) and the opponent (`OpponentPolicy`) are type
//!    parameters of `TurnEngine`.
//!
//! 4. **Deterministic**: all randomness comes from a seeded `GameRng`; the
//!    opponent policy uses none.
//!
//! ## Modules
//!
//! - `core`: Unit handles, sides, board geometry, RNG, configuration,
//!   actions, game state
//! - `units`: Unit kinds, characters, teams, the unit generator
//! - `rules`: Movement and attack legality, combat, initial placement
//! - `ai`: Opponent decision policy
//! - `engine`: Turn engine and the presenter seam
//! - `persistence`: Key-value store seam and save/load service
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use tactics_engine::{GameConfig, MemoryStore, NullPresenter, Side, TurnEngine};
//!
//! let mut engine =
//!     TurnEngine::with_heuristic(GameConfig::default(), NullPresenter, MemoryStore::new()).unwrap();
//! engine.new_game();
//!
//! assert_eq!(engine.state().team(Side::Human).len(), 4);
//! assert_eq!(engine.state().current_level, 1);
//! ```

pub mod core;
pub mod units;
pub mod rules;
pub mod ai;
pub mod engine;
pub mod persistence;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    UnitId, Side, SideMap,
    Board, Cell, TileKind,
    GameRng,
    GameConfig, Theme,
    Action,
    GameState, PositionedCharacter, SavedGame, SavedUnit,
};

pub use crate::units::{Character, HealthLevel, Team, UnitGenerator, UnitKind};

pub use crate::rules::{
    AttackReport, AttackValidator, CombatResolver, MovementValidator,
};

pub use crate::ai::{HeuristicOpponent, OpponentPolicy};

pub use crate::engine::{
    CellHint, ClickOutcome, Cursor, GameOverSummary, Highlight,
    NullPresenter, Presenter,
    TurnEnd, TurnEngine, TurnReport, TurnState,
};

pub use crate::persistence::{KeyValueStore, MemoryStore, StateService};

pub use crate::error::{ActionError, ConfigError, GameError, PersistenceError};
