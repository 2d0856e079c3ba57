//! The turn engine.
//!
//! `TurnEngine` owns the match and runs the player action → resolution →
//! opponent reply → level check cycle.
//!
//! ## Turn states
//!
//! ```text
//! Idle ──click──▶ PlayerAction ──▶ OpponentAction ──▶ Idle
//!                      │                  │
//!                      ├─level complete─▶ LevelTransition ──▶ Idle
//!                      │                  │                  │
//!                      └──────────────────┴───────────────▶ GameOver
//! ```
//!
//! Input is accepted only in `Idle`; every other state is blocked and
//! clicks and hovers are ignored. Each operation runs to completion before
//! returning, so the opponent's whole reply happens inside the click that
//! triggered it. `GameOver` stays until `new_game` or a successful
//! `load_game`.
//!
//! ## Randomness
//!
//! Unit recruitment and placement draw from two independent streams derived
//! from the configured seed, so the same config and the same sequence of
//! calls reproduce the same match.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::presenter::{Cursor, GameOverSummary, Highlight, Presenter};
use crate::ai::{HeuristicOpponent, OpponentPolicy};
use crate::core::{Action, Board, Cell, GameConfig, GameRng, GameState, Side, UnitId};
use crate::error::{ActionError, ConfigError, PersistenceError};
use crate::persistence::{KeyValueStore, StateService};
use crate::rules::{place_team, AttackReport, AttackValidator, CombatResolver, MovementValidator};
use crate::units::UnitGenerator;

/// Where the engine is in the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for player input.
    #[default]
    Idle,
    PlayerAction,
    OpponentAction,
    LevelTransition,
    /// The match is over.
    GameOver,
}

impl TurnState {
    /// Check whether player input is currently refused.
    #[must_use]
    pub fn is_blocked(self) -> bool {
        self != TurnState::Idle
    }
}

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEnd {
    /// Back to the player.
    Continue,
    /// The computer side was wiped out; play continues on this level.
    NextLevel(u32),
    GameOver(GameOverSummary),
}

/// A completed player action and everything it set off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: Action,
    /// The player's attack, if the action was one.
    pub attack: Option<AttackReport>,
    /// The opponent's reply, if it got to act.
    pub opponent: Option<Action>,
    pub end: TurnEnd,
}

/// Result of clicking a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Input was blocked.
    Ignored,
    Selected(UnitId),
    Acted(TurnReport),
}

/// What clicking a hovered cell would do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellHint {
    /// No selection, blocked, or off the board.
    #[default]
    None,
    /// An own unit: clicking selects it.
    Inspect,
    Move,
    Attack,
    NotAllowed,
}

impl CellHint {
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            CellHint::None => Cursor::Auto,
            CellHint::Inspect | CellHint::Move => Cursor::Pointer,
            CellHint::Attack => Cursor::Crosshair,
            CellHint::NotAllowed => Cursor::NotAllowed,
        }
    }
}

/// Runs a match.
pub struct TurnEngine<P, S, A = HeuristicOpponent> {
    config: GameConfig,
    state: GameState,
    turn: TurnState,
    unit_rng: GameRng,
    placement_rng: GameRng,
    presenter: P,
    service: StateService<S>,
    policy: A,
}

impl<P: Presenter, S: KeyValueStore> TurnEngine<P, S, HeuristicOpponent> {
    /// Create an engine playing against the built-in heuristic.
    pub fn with_heuristic(config: GameConfig, presenter: P, store: S) -> Result<Self, ConfigError> {
        Self::new(config, presenter, store, HeuristicOpponent)
    }
}

impl<P: Presenter, S: KeyValueStore, A: OpponentPolicy> TurnEngine<P, S, A> {
    /// Create an engine.
    ///
    /// The engine starts with an empty board; call `new_game` or
    /// `load_game` to begin.
    pub fn new(config: GameConfig, presenter: P, store: S, policy: A) -> Result<Self, ConfigError> {
        config.validate()?;

        let root = GameRng::new(config.seed);
        let state = GameState::new(Board::new(config.board_size), config.initial_unit_count);

        Ok(Self {
            unit_rng: root.for_context("units"),
            placement_rng: root.for_context("placement"),
            config,
            state,
            turn: TurnState::Idle,
            presenter,
            service: StateService::new(store),
            policy,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the match, for hosts that set up custom positions.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn service(&self) -> &StateService<S> {
        &self.service
    }

    // === Match lifecycle ===

    /// Start a fresh match at level 1 with full, newly recruited teams.
    pub fn new_game(&mut self) {
        self.state = GameState::new(Board::new(self.config.board_size), self.config.initial_unit_count);
        self.recruit();
        self.place_all();
        self.turn = TurnState::Idle;
        self.redraw_level();

        info!(seed = self.config.seed, units = self.state.positioned().len(), "new game");
    }

    /// Save the match. Ignored (returns `Ok(false)`) while input is blocked.
    pub fn save_game(&mut self) -> Result<bool, PersistenceError> {
        if self.turn.is_blocked() {
            debug!(turn = ?self.turn, "save ignored while blocked");
            return Ok(false);
        }
        self.service.save(&self.state.snapshot())?;
        info!(level = self.state.current_level, score = self.state.score, "game saved");
        Ok(true)
    }

    /// Replace the match with the saved one.
    ///
    /// On failure the current match is left untouched and the presenter is
    /// told why.
    pub fn load_game(&mut self) -> Result<(), PersistenceError> {
        let restored = self
            .service
            .load()
            .and_then(|saved| GameState::restore(&saved, &self.config));

        match restored {
            Ok(state) => {
                self.state = state;
                self.turn = TurnState::Idle;
                self.redraw_level();
                info!(level = self.state.current_level, score = self.state.score, "game loaded");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "load failed");
                self.presenter.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    // === Player input ===

    /// Handle a click on a cell.
    ///
    /// - own unit: select it (re-selection allowed)
    /// - enemy within the selected unit's attack square: attack it
    /// - free cell within the selected unit's move rays: move there
    ///
    /// Anything else is refused with an `ActionError`, which the presenter
    /// also shows. A legal attack or move is followed by the rest of the
    /// turn before this returns.
    pub fn click_cell(&mut self, cell: Cell) -> Result<ClickOutcome, ActionError> {
        if self.turn.is_blocked() {
            debug!(cell, turn = ?self.turn, "click ignored");
            return Ok(ClickOutcome::Ignored);
        }
        if !self.state.board().contains(cell) {
            return Err(self.refuse(ActionError::OutOfBounds(cell)));
        }

        let occupant = self.state.unit_at(cell);
        if let Some(unit) = occupant {
            if self.state.side_of(unit) == Some(Side::Human) {
                self.select(unit);
                return Ok(ClickOutcome::Selected(unit));
            }
        }

        let Some(selected) = self.state.selected() else {
            let err = if occupant.is_some() {
                ActionError::NotYourUnit
            } else {
                ActionError::NoSelection
            };
            return Err(self.refuse(err));
        };

        let action = match occupant {
            Some(target) if AttackValidator::is_valid_attack(&self.state, selected, cell) => Action::Attack {
                attacker: selected,
                target,
            },
            None if MovementValidator::is_valid_move(&self.state, selected, cell) => Action::Move {
                unit: selected,
                to: cell,
            },
            _ => return Err(self.refuse(ActionError::IllegalAction)),
        };

        Ok(ClickOutcome::Acted(self.play(action)))
    }

    /// Preview what clicking `cell` would do and highlight it.
    pub fn hover_cell(&mut self, cell: Cell) -> CellHint {
        if self.turn.is_blocked() || !self.state.board().contains(cell) {
            return CellHint::None;
        }

        let occupant = self.state.unit_at(cell);
        if let Some(character) = self.state.character_at(cell) {
            self.presenter.show_tooltip(cell, character);
        }

        let Some(selected) = self.state.selected() else {
            return CellHint::None;
        };

        let hint = if occupant.is_some_and(|unit| self.state.side_of(unit) == Some(Side::Human)) {
            CellHint::Inspect
        } else if MovementValidator::is_valid_move(&self.state, selected, cell) {
            self.presenter.select_cell(cell, Highlight::Move);
            CellHint::Move
        } else if AttackValidator::is_valid_attack(&self.state, selected, cell) {
            self.presenter.select_cell(cell, Highlight::Attack);
            CellHint::Attack
        } else {
            CellHint::NotAllowed
        };

        self.presenter.set_cursor(hint.cursor());
        hint
    }

    /// Undo the hover feedback for `cell`, keeping the selection highlight.
    pub fn leave_cell(&mut self, cell: Cell) {
        if self.turn.is_blocked() {
            return;
        }
        self.presenter.set_cursor(Cursor::Auto);
        self.presenter.hide_tooltip(cell);

        let selected_cell = self.state.selected().and_then(|unit| self.state.position_of(unit));
        if selected_cell != Some(cell) {
            self.presenter.deselect_cell(cell);
        }
    }

    // === Turn flow ===

    /// Let the opponent act once.
    ///
    /// Returns the action taken (if the policy found one) and how the turn
    /// ended. Illegal actions from the policy are dropped.
    pub fn opponent_turn(&mut self) -> (Option<Action>, TurnEnd) {
        if self.turn == TurnState::GameOver {
            return (None, TurnEnd::GameOver(self.summary()));
        }
        self.turn = TurnState::OpponentAction;

        let action = self
            .policy
            .choose_action(&self.state, Side::Computer)
            .filter(|action| self.is_legal(action));

        let Some(action) = action else {
            debug!("opponent passes");
            self.turn = TurnState::Idle;
            return (None, TurnEnd::Continue);
        };
        debug!(?action, "opponent acts");

        let report = self.execute(action);
        if report.is_some_and(|r| r.game_over) {
            return (Some(action), TurnEnd::GameOver(self.game_over()));
        }

        self.turn = TurnState::Idle;
        (Some(action), TurnEnd::Continue)
    }

    /// Advance to the next level, or end the match after the last one.
    ///
    /// Every unit on the board levels up, both teams are topped up with
    /// fresh recruits and everyone is placed again.
    pub fn to_next_level(&mut self) -> TurnEnd {
        self.turn = TurnState::LevelTransition;
        self.state.current_level += 1;

        if self.state.theme(&self.config).is_none() {
            info!(level = self.state.current_level, "all stages cleared");
            return TurnEnd::GameOver(self.game_over());
        }

        let survivors: Vec<UnitId> = self.state.positioned().iter().map(|p| p.unit).collect();
        for unit in &survivors {
            if let Some(character) = self.state.character_mut(*unit) {
                character.level_up();
            }
        }

        self.clear_selection();
        self.recruit();
        self.place_all();
        self.redraw_level();
        self.turn = TurnState::Idle;

        info!(
            level = self.state.current_level,
            survivors = survivors.len(),
            "level started"
        );
        TurnEnd::NextLevel(self.state.current_level)
    }

    /// Run a legal player action and the rest of the turn.
    fn play(&mut self, action: Action) -> TurnReport {
        self.turn = TurnState::PlayerAction;
        debug!(?action, "player acts");

        // Acting spends the selection.
        self.clear_selection();
        let attack = self.execute(action);
        let mut opponent = None;

        let end = match attack {
            Some(report) if report.game_over => TurnEnd::GameOver(self.game_over()),
            Some(report) if report.level_complete => self.to_next_level(),
            _ => {
                let (reply, end) = self.opponent_turn();
                opponent = reply;
                end
            }
        };

        TurnReport {
            player: action,
            attack,
            opponent,
            end,
        }
    }

    /// Apply an action to the state and redraw.
    fn execute(&mut self, action: Action) -> Option<AttackReport> {
        match action {
            Action::Attack { attacker, target } => {
                let presenter = &mut self.presenter;
                let report = CombatResolver::resolve_attack(&mut self.state, attacker, target, |cell, damage| {
                    presenter.show_damage(cell, damage)
                })?;

                self.presenter.deselect_cell(report.target_cell);
                self.presenter.redraw_positions(&self.state);
                self.presenter.render_score(self.state.score);
                Some(report)
            }
            Action::Move { unit, to } => {
                self.state.move_unit(unit, to);
                self.presenter.redraw_positions(&self.state);
                None
            }
        }
    }

    fn is_legal(&self, action: &Action) -> bool {
        let legal = match *action {
            Action::Attack { attacker, target } => self
                .state
                .position_of(target)
                .is_some_and(|cell| AttackValidator::is_valid_attack(&self.state, attacker, cell)),
            Action::Move { unit, to } => {
                self.state.position_of(unit) == Some(to) || MovementValidator::is_valid_move(&self.state, unit, to)
            }
        };
        if !legal {
            warn!(?action, "policy chose an illegal action");
        }
        legal
    }

    /// End the match: record the hi score and show the summary.
    fn game_over(&mut self) -> GameOverSummary {
        self.turn = TurnState::GameOver;
        self.clear_selection();

        let previous = self.service.load_hi_score();
        let score = self.state.score;
        let summary = GameOverSummary {
            score,
            hi_score: previous.max(score),
            new_record: score > previous,
        };

        if summary.new_record {
            if let Err(err) = self.service.save_hi_score(score) {
                warn!(error = %err, "failed to save hi score");
            }
        }

        info!(score, hi_score = summary.hi_score, "game over");
        self.presenter.show_game_over(&summary);
        summary
    }

    /// Summary of a match that has already ended.
    fn summary(&self) -> GameOverSummary {
        let hi_score = self.service.load_hi_score();
        GameOverSummary {
            score: self.state.score,
            hi_score: hi_score.max(self.state.score),
            new_record: false,
        }
    }

    // === Helpers ===

    fn refuse(&mut self, err: ActionError) -> ActionError {
        debug!(error = %err, "action refused");
        self.presenter.show_error(&err.to_string());
        err
    }

    fn select(&mut self, unit: UnitId) {
        if let Some(cell) = self.state.selected().and_then(|prev| self.state.position_of(prev)) {
            self.presenter.deselect_cell(cell);
        }
        if self.state.select(unit) {
            if let Some(cell) = self.state.position_of(unit) {
                self.presenter.select_cell(cell, Highlight::Selected);
            }
        }
    }

    fn clear_selection(&mut self) {
        if let Some(cell) = self.state.selected().and_then(|unit| self.state.position_of(unit)) {
            self.presenter.deselect_cell(cell);
        }
        self.state.clear_selection();
    }

    /// Fill both teams' vacancies with generated units.
    fn recruit(&mut self) {
        for side in Side::ALL {
            let team = self.state.team(side);
            let (kinds, vacancies) = (team.allowed_kinds(), team.vacancies());
            let recruits: Vec<_> = UnitGenerator::new(
                kinds,
                self.config.recruit_max_level,
                &mut self.unit_rng,
            )
            .take(vacancies)
            .collect();

            for character in recruits {
                self.state.spawn(character);
            }
            debug!(%side, recruited = vacancies, "team topped up");
        }
    }

    /// Clear the board and place both sides, human first.
    fn place_all(&mut self) {
        self.state.clear_positions();
        place_team(&mut self.state, Side::Human, &mut self.placement_rng);
        place_team(&mut self.state, Side::Computer, &mut self.placement_rng);
    }

    fn redraw_level(&mut self) {
        if let Some(theme) = self.state.theme(&self.config) {
            self.presenter.draw_board(theme, self.state.board());
        }
        self.presenter.redraw_positions(&self.state);
        self.presenter.render_score(self.state.score);
    }
}
