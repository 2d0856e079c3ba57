//! Game state: the single mutable snapshot of a match in progress.
//!
//! ## Layout
//!
//! Units live in an arena keyed by `UnitId`. Everything else refers to
//! units by handle:
//! - `teams`: per-side membership, in recruitment order
//! - `positioned`: the unit-to-cell bindings, in placement order
//! - `selected`: the human unit currently selected, if any
//!
//! Removing a unit through `remove_unit` drops it from all of these at once.
//!
//! ## SavedGame
//!
//! The persisted form. It carries full unit attributes and positions but no
//! handles and no selection; `GameState::restore` rebuilds the arena and
//! teams from it, deriving team membership from each unit's kind.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};
use super::config::{GameConfig, Theme};
use super::entity::UnitId;
use super::side::{Side, SideMap};
use crate::error::PersistenceError;
use crate::units::{Character, Team, MAX_HEALTH};

/// A unit bound to a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionedCharacter {
    pub unit: UnitId,
    pub position: Cell,
}

/// A unit as written to storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedUnit {
    pub character: Character,
    pub position: Cell,
}

/// Persisted match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub current_level: u32,
    pub score: u64,
    pub units: Vec<SavedUnit>,
}

/// Complete state of a match.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,

    /// Current level (starts at 1).
    pub current_level: u32,

    /// Damage dealt by the human side so far.
    pub score: u64,

    selected: Option<UnitId>,
    units: FxHashMap<UnitId, Character>,
    positioned: Vector<PositionedCharacter>,
    teams: SideMap<Team>,
    next_unit_id: UnitId,
}

impl GameState {
    /// Create an empty state at level 1.
    #[must_use]
    pub fn new(board: Board, team_capacity: usize) -> Self {
        Self {
            board,
            current_level: 1,
            score: 0,
            selected: None,
            units: FxHashMap::default(),
            positioned: Vector::new(),
            teams: SideMap::new(|side| Team::new(side, team_capacity)),
            next_unit_id: UnitId::FIRST,
        }
    }

    /// The board this match is played on.
    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Theme of the current level, if the level is playable.
    #[must_use]
    pub fn theme(&self, config: &GameConfig) -> Option<Theme> {
        config.theme_for_level(self.current_level)
    }

    // === Units ===

    /// Add a new unit to the arena and to the team its kind fights for.
    ///
    /// Returns `None` (and adds nothing) if that team is full.
    pub fn spawn(&mut self, character: Character) -> Option<UnitId> {
        let id = self.next_unit_id;
        if !self.teams[character.kind.side()].add(id) {
            return None;
        }
        self.units.insert(id, character);
        self.next_unit_id = id.next();
        Some(id)
    }

    /// Look up a unit.
    #[must_use]
    pub fn character(&self, unit: UnitId) -> Option<&Character> {
        self.units.get(&unit)
    }

    /// Look up a unit for mutation.
    pub fn character_mut(&mut self, unit: UnitId) -> Option<&mut Character> {
        self.units.get_mut(&unit)
    }

    /// Side a unit fights for.
    #[must_use]
    pub fn side_of(&self, unit: UnitId) -> Option<Side> {
        Side::ALL.into_iter().find(|&side| self.teams[side].contains(unit))
    }

    /// A side's team.
    #[must_use]
    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side]
    }

    /// Members of a side with their state, in recruitment order.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = (UnitId, &Character)> + '_ {
        self.teams[side]
            .members()
            .iter()
            .filter_map(|&id| self.units.get(&id).map(|c| (id, c)))
    }

    /// Remove a unit from the arena, its team, the board and the selection.
    pub fn remove_unit(&mut self, unit: UnitId) -> Option<Character> {
        let character = self.units.remove(&unit)?;
        for (_, team) in self.teams.iter_mut() {
            team.remove(unit);
        }
        self.positioned.retain(|p| p.unit != unit);
        if self.selected == Some(unit) {
            self.selected = None;
        }
        Some(character)
    }

    // === Positions ===

    /// All unit bindings in placement order.
    #[must_use]
    pub fn positioned(&self) -> &Vector<PositionedCharacter> {
        &self.positioned
    }

    /// Unit standing on a cell.
    #[must_use]
    pub fn unit_at(&self, cell: Cell) -> Option<UnitId> {
        self.positioned.iter().find(|p| p.position == cell).map(|p| p.unit)
    }

    /// State of the unit standing on a cell.
    #[must_use]
    pub fn character_at(&self, cell: Cell) -> Option<&Character> {
        self.unit_at(cell).and_then(|id| self.character(id))
    }

    /// Check whether a cell holds a unit.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.unit_at(cell).is_some()
    }

    /// Cell a unit stands on.
    #[must_use]
    pub fn position_of(&self, unit: UnitId) -> Option<Cell> {
        self.positioned.iter().find(|p| p.unit == unit).map(|p| p.position)
    }

    /// Bind an unplaced unit to a free cell.
    ///
    /// Returns false if the unit is unknown or already placed, or the cell
    /// is off the board or taken.
    pub fn place(&mut self, unit: UnitId, cell: Cell) -> bool {
        if !self.units.contains_key(&unit)
            || !self.board.contains(cell)
            || self.is_occupied(cell)
            || self.position_of(unit).is_some()
        {
            return false;
        }
        self.positioned.push_back(PositionedCharacter { unit, position: cell });
        true
    }

    /// Move a placed unit to a free cell (or leave it where it is).
    ///
    /// Returns false if the unit is not on the board, or the destination is
    /// off the board or held by another unit.
    pub fn move_unit(&mut self, unit: UnitId, to: Cell) -> bool {
        if !self.board.contains(to) {
            return false;
        }
        if self.unit_at(to).is_some_and(|other| other != unit) {
            return false;
        }
        match self.positioned.iter().position(|p| p.unit == unit) {
            Some(index) => {
                self.positioned.set(index, PositionedCharacter { unit, position: to });
                true
            }
            None => false,
        }
    }

    /// Unbind every unit from the board. Units stay in the arena and teams.
    pub fn clear_positions(&mut self) {
        self.positioned.clear();
    }

    // === Selection ===

    /// The selected human unit.
    #[must_use]
    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Select a unit. Only placed human units can be selected.
    ///
    /// Returns true if the selection changed to `unit`.
    pub fn select(&mut self, unit: UnitId) -> bool {
        if self.side_of(unit) != Some(Side::Human) || self.position_of(unit).is_none() {
            return false;
        }
        self.selected = Some(unit);
        true
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // === Persistence ===

    /// Capture the persisted form of this state.
    #[must_use]
    pub fn snapshot(&self) -> SavedGame {
        let units = self
            .positioned
            .iter()
            .filter_map(|p| {
                self.character(p.unit).map(|c| SavedUnit {
                    character: c.clone(),
                    position: p.position,
                })
            })
            .collect();

        SavedGame {
            current_level: self.current_level,
            score: self.score,
            units,
        }
    }

    /// Rebuild a state from its persisted form.
    ///
    /// Units get fresh handles in saved order; team membership follows each
    /// unit's kind.
    pub fn restore(saved: &SavedGame, config: &GameConfig) -> Result<Self, PersistenceError> {
        if saved.current_level == 0 || config.theme_for_level(saved.current_level).is_none() {
            return Err(PersistenceError::InvalidState(format!(
                "level {} is not playable",
                saved.current_level
            )));
        }

        let mut state = Self::new(Board::new(config.board_size), config.initial_unit_count);
        state.current_level = saved.current_level;
        state.score = saved.score;

        for entry in &saved.units {
            if entry.character.health > MAX_HEALTH {
                return Err(PersistenceError::InvalidState(format!(
                    "health {} exceeds {}",
                    entry.character.health, MAX_HEALTH
                )));
            }
            // Dead units never stay on the board.
            if entry.character.is_dead() {
                return Err(PersistenceError::InvalidState(format!(
                    "dead {} at cell {}",
                    entry.character.kind, entry.position
                )));
            }
            if entry.character.level == 0 {
                return Err(PersistenceError::InvalidState(format!(
                    "{} at cell {} has level 0",
                    entry.character.kind, entry.position
                )));
            }
            let id = state.spawn(entry.character.clone()).ok_or_else(|| {
                PersistenceError::InvalidState(format!("too many {} units", entry.character.kind.side()))
            })?;
            if !state.place(id, entry.position) {
                return Err(PersistenceError::InvalidState(format!(
                    "cell {} is off the board or taken",
                    entry.position
                )));
            }
        }

        Ok(state)
    }
}
