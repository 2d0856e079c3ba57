//! Turn engine integration tests.
//!
//! Matches are set up by hand through `state_mut` so every position is
//! known; a recording presenter captures what the engine asks the UI to do.

use tactics_engine::core::{Cell, GameState};
use tactics_engine::engine::{
    CellHint, ClickOutcome, Cursor, GameOverSummary, Highlight, Presenter, TurnEnd, TurnEngine,
    TurnState,
};
use tactics_engine::persistence::{KeyValueStore, MemoryStore, StateService, STATE_KEY};
use tactics_engine::units::{Character, UnitKind};
use tactics_engine::{Action, ActionError, Board, GameConfig, PersistenceError, Side, Theme, UnitId};
use tracing_subscriber::EnvFilter;

// =============================================================================
// Helpers
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Event {
    DrawBoard(Theme),
    Redraw,
    Score(u64),
    Select(Cell, Highlight),
    Deselect(Cell),
    Tooltip(Cell),
    HideTooltip(Cell),
    Cursor(Cursor),
    Damage(Cell, u32),
    Error(String),
    GameOver(GameOverSummary),
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    fn count(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }
}

impl Presenter for Recorder {
    fn draw_board(&mut self, theme: Theme, _board: Board) {
        self.events.push(Event::DrawBoard(theme));
    }

    fn redraw_positions(&mut self, _state: &GameState) {
        self.events.push(Event::Redraw);
    }

    fn render_score(&mut self, score: u64) {
        self.events.push(Event::Score(score));
    }

    fn select_cell(&mut self, cell: Cell, highlight: Highlight) {
        self.events.push(Event::Select(cell, highlight));
    }

    fn deselect_cell(&mut self, cell: Cell) {
        self.events.push(Event::Deselect(cell));
    }

    fn show_tooltip(&mut self, cell: Cell, _character: &Character) {
        self.events.push(Event::Tooltip(cell));
    }

    fn hide_tooltip(&mut self, cell: Cell) {
        self.events.push(Event::HideTooltip(cell));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.events.push(Event::Cursor(cursor));
    }

    fn show_damage(&mut self, cell: Cell, damage: u32) {
        self.events.push(Event::Damage(cell, damage));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_owned()));
    }

    fn show_game_over(&mut self, summary: &GameOverSummary) {
        self.events.push(Event::GameOver(*summary));
    }
}

type Engine = TurnEngine<Recorder, MemoryStore>;

/// Log engine events with `RUST_LOG=tactics_engine=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine_with(config: GameConfig) -> Engine {
    init_tracing();
    TurnEngine::with_heuristic(config, Recorder::default(), MemoryStore::new()).unwrap()
}

fn engine() -> Engine {
    engine_with(GameConfig::default())
}

fn cell(x: usize, y: usize) -> Cell {
    y * 8 + x
}

fn put(engine: &mut Engine, kind: UnitKind, at: Cell) -> UnitId {
    let state = engine.state_mut();
    let id = state.spawn(Character::new(kind, 1)).unwrap();
    assert!(state.place(id, at));
    id
}

fn acted(outcome: Result<ClickOutcome, ActionError>) -> tactics_engine::TurnReport {
    match outcome {
        Ok(ClickOutcome::Acted(report)) => report,
        other => panic!("expected an action, got {other:?}"),
    }
}

// =============================================================================
// New Game
// =============================================================================

#[test]
fn test_new_game_draws_first_stage() {
    let mut engine = engine();
    engine.new_game();

    let state = engine.state();
    assert_eq!(state.current_level, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.positioned().len(), 8);
    for p in state.positioned().iter() {
        let column = state.board().to_xy(p.position).0;
        match state.side_of(p.unit) {
            Some(Side::Human) => assert!(column <= 1),
            Some(Side::Computer) => assert!(column >= 6),
            None => panic!("unit without a team"),
        }
    }
    assert_eq!(engine.presenter().events[0], Event::DrawBoard(Theme::Prairie));
}

#[test]
fn test_new_game_is_reproducible() {
    let mut a = engine();
    let mut b = engine();
    a.new_game();
    b.new_game();

    assert_eq!(a.state().snapshot(), b.state().snapshot());

    let mut c = engine_with(GameConfig::default().with_seed(7));
    c.new_game();
    assert_ne!(a.state().snapshot(), c.state().snapshot());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_select_and_reselect() {
    let mut engine = engine();
    let first = put(&mut engine, UnitKind::Swordsman, cell(0, 0));
    let second = put(&mut engine, UnitKind::Bowman, cell(1, 1));

    assert_eq!(engine.click_cell(cell(0, 0)), Ok(ClickOutcome::Selected(first)));
    assert_eq!(engine.click_cell(cell(1, 1)), Ok(ClickOutcome::Selected(second)));

    assert_eq!(engine.state().selected(), Some(second));
    let events = &engine.presenter().events;
    assert!(events.contains(&Event::Select(cell(0, 0), Highlight::Selected)));
    assert!(events.contains(&Event::Deselect(cell(0, 0))));
    assert!(events.contains(&Event::Select(cell(1, 1), Highlight::Selected)));
}

#[test]
fn test_enemy_click_without_selection() {
    let mut engine = engine();
    put(&mut engine, UnitKind::Vampire, cell(6, 6));

    assert_eq!(engine.click_cell(cell(6, 6)), Err(ActionError::NotYourUnit));
    assert!(engine
        .presenter()
        .events
        .contains(&Event::Error("this is not your unit".into())));
    assert_eq!(engine.turn_state(), TurnState::Idle);
}

#[test]
fn test_illegal_targets_leave_state_unchanged() {
    let mut engine = engine();
    put(&mut engine, UnitKind::Magician, cell(0, 0));
    put(&mut engine, UnitKind::Vampire, cell(6, 6));
    engine.click_cell(cell(0, 0)).unwrap();
    let before = engine.state().snapshot();

    // Enemy outside attack range 4.
    assert_eq!(engine.click_cell(cell(6, 6)), Err(ActionError::IllegalAction));
    // Move range 1.
    assert_eq!(engine.click_cell(cell(2, 2)), Err(ActionError::IllegalAction));
    // Knight step.
    assert_eq!(engine.click_cell(cell(1, 2)), Err(ActionError::IllegalAction));

    assert_eq!(engine.state().snapshot(), before);
    assert_eq!(engine.turn_state(), TurnState::Idle);
    assert_eq!(engine.presenter().count(|e| matches!(e, Event::Error(_))), 3);
}

// =============================================================================
// Player Actions
// =============================================================================

#[test]
fn test_attack_then_opponent_reply() {
    let mut engine = engine();
    let hero = put(&mut engine, UnitKind::Swordsman, cell(3, 3));
    let vampire = put(&mut engine, UnitKind::Vampire, cell(4, 3));
    put(&mut engine, UnitKind::Daemon, cell(7, 7));

    engine.click_cell(cell(3, 3)).unwrap();
    let report = acted(engine.click_cell(cell(4, 3)));

    assert_eq!(
        report.player,
        Action::Attack {
            attacker: hero,
            target: vampire
        }
    );
    assert_eq!(report.attack.map(|a| a.damage), Some(15));
    // The vampire hits back: it out-attacks the daemon and stands next to the hero.
    assert_eq!(
        report.opponent,
        Some(Action::Attack {
            attacker: vampire,
            target: hero
        })
    );
    assert_eq!(report.end, TurnEnd::Continue);

    let state = engine.state();
    assert_eq!(state.character(vampire).unwrap().health, 35);
    assert_eq!(state.character(hero).unwrap().health, 35);
    assert_eq!(state.score, 15);
    assert_eq!(state.selected(), None);
    assert_eq!(engine.turn_state(), TurnState::Idle);

    let damage: Vec<_> = engine
        .presenter()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Damage(..)))
        .cloned()
        .collect();
    assert_eq!(
        damage,
        vec![Event::Damage(cell(4, 3), 15), Event::Damage(cell(3, 3), 15)]
    );
}

#[test]
fn test_move_then_ranged_reply() {
    let mut engine = engine();
    let hero = put(&mut engine, UnitKind::Swordsman, cell(0, 0));
    let daemon = put(&mut engine, UnitKind::Daemon, cell(7, 7));

    engine.click_cell(cell(0, 0)).unwrap();
    let report = acted(engine.click_cell(cell(3, 3)));

    assert_eq!(report.player, Action::Move { unit: hero, to: cell(3, 3) });
    assert_eq!(report.attack, None);
    assert_eq!(
        report.opponent,
        Some(Action::Attack {
            attacker: daemon,
            target: hero
        })
    );
    // 10 attack against 10 defence: the 10% floor applies.
    assert_eq!(engine.state().character(hero).unwrap().health, 49);
    assert_eq!(engine.state().position_of(hero), Some(cell(3, 3)));
    // Moving spends the selection.
    assert_eq!(engine.state().selected(), None);
    assert!(engine.presenter().events.contains(&Event::Deselect(cell(0, 0))));
    // Opponent damage never scores.
    assert_eq!(engine.state().score, 0);
}

#[test]
fn test_killing_last_enemy_advances_level() {
    let mut engine = engine();
    let hero = put(&mut engine, UnitKind::Swordsman, cell(3, 3));
    let vampire = put(&mut engine, UnitKind::Vampire, cell(4, 3));
    engine.state_mut().character_mut(vampire).unwrap().health = 10;

    engine.click_cell(cell(3, 3)).unwrap();
    let report = acted(engine.click_cell(cell(4, 3)));

    assert!(report.attack.is_some_and(|a| a.killed && a.level_complete));
    assert_eq!(report.opponent, None);
    assert_eq!(report.end, TurnEnd::NextLevel(2));

    let state = engine.state();
    assert_eq!(state.current_level, 2);
    // Score counts damage dealt, even past the target's remaining health.
    assert_eq!(state.score, 15);
    assert_eq!(state.selected(), None);

    let leveled = state.character(hero).unwrap();
    assert_eq!(leveled.level, 2);
    assert_eq!(leveled.health, 100);
    assert_eq!(leveled.attack, 52);

    assert_eq!(state.team(Side::Human).len(), 4);
    assert_eq!(state.team(Side::Computer).len(), 4);
    assert_eq!(state.positioned().len(), 8);
    assert!(engine.presenter().events.contains(&Event::DrawBoard(Theme::Desert)));
    assert_eq!(engine.turn_state(), TurnState::Idle);
}

// =============================================================================
// Game Over
// =============================================================================

#[test]
fn test_opponent_kill_ends_game() {
    let mut engine = engine();
    let hero = put(&mut engine, UnitKind::Swordsman, cell(0, 0));
    let undead = put(&mut engine, UnitKind::Undead, cell(3, 2));
    engine.state_mut().character_mut(hero).unwrap().health = 5;

    engine.click_cell(cell(0, 0)).unwrap();
    let report = acted(engine.click_cell(cell(2, 2)));

    assert_eq!(
        report.opponent,
        Some(Action::Attack {
            attacker: undead,
            target: hero
        })
    );
    let summary = GameOverSummary {
        score: 0,
        hi_score: 0,
        new_record: false,
    };
    assert_eq!(report.end, TurnEnd::GameOver(summary));
    assert_eq!(engine.turn_state(), TurnState::GameOver);
    assert!(engine.state().team(Side::Human).is_empty());

    // Input is ignored from now on.
    assert_eq!(engine.click_cell(cell(3, 2)), Ok(ClickOutcome::Ignored));
    assert_eq!(engine.hover_cell(cell(3, 2)), CellHint::None);
    assert_eq!(engine.presenter().count(|e| matches!(e, Event::GameOver(_))), 1);
}

#[test]
fn test_clearing_last_stage_ends_game_once() {
    let config = GameConfig::default().with_stages(vec![Theme::Prairie]);
    let mut engine = engine_with(config);
    put(&mut engine, UnitKind::Swordsman, cell(3, 3));
    let vampire = put(&mut engine, UnitKind::Vampire, cell(4, 3));
    engine.state_mut().character_mut(vampire).unwrap().health = 10;

    engine.click_cell(cell(3, 3)).unwrap();
    let report = acted(engine.click_cell(cell(4, 3)));

    let summary = GameOverSummary {
        score: 15,
        hi_score: 15,
        new_record: true,
    };
    assert_eq!(report.end, TurnEnd::GameOver(summary));
    assert_eq!(engine.service().load_hi_score(), 15);
    assert_eq!(engine.presenter().count(|e| matches!(e, Event::GameOver(_))), 1);

    // A later opponent turn does not end the match again.
    let (action, end) = engine.opponent_turn();
    assert_eq!(action, None);
    assert!(matches!(end, TurnEnd::GameOver(_)));
    assert_eq!(engine.presenter().count(|e| matches!(e, Event::GameOver(_))), 1);
}

#[test]
fn test_hi_score_not_lowered() {
    let mut service = StateService::new(MemoryStore::new());
    service.save_hi_score(100).unwrap();

    let mut engine =
        TurnEngine::with_heuristic(GameConfig::default(), Recorder::default(), service.store().clone())
            .unwrap();
    let hero = put(&mut engine, UnitKind::Swordsman, cell(0, 0));
    put(&mut engine, UnitKind::Undead, cell(3, 2));
    engine.state_mut().character_mut(hero).unwrap().health = 5;
    engine.state_mut().score = 3;

    engine.click_cell(cell(0, 0)).unwrap();
    let report = acted(engine.click_cell(cell(2, 2)));

    assert_eq!(
        report.end,
        TurnEnd::GameOver(GameOverSummary {
            score: 3,
            hi_score: 100,
            new_record: false
        })
    );
    assert_eq!(engine.service().load_hi_score(), 100);
}

// =============================================================================
// Hover
// =============================================================================

#[test]
fn test_hover_hints() {
    let mut engine = engine();
    put(&mut engine, UnitKind::Bowman, cell(2, 2));
    put(&mut engine, UnitKind::Magician, cell(0, 0));
    put(&mut engine, UnitKind::Vampire, cell(4, 4));

    // Nothing selected: tooltips only.
    assert_eq!(engine.hover_cell(cell(4, 4)), CellHint::None);
    assert!(engine.presenter().events.contains(&Event::Tooltip(cell(4, 4))));

    engine.click_cell(cell(2, 2)).unwrap();

    assert_eq!(engine.hover_cell(cell(3, 3)), CellHint::Move);
    assert_eq!(engine.hover_cell(cell(4, 4)), CellHint::Attack);
    assert_eq!(engine.hover_cell(cell(5, 2)), CellHint::NotAllowed);
    assert_eq!(engine.hover_cell(cell(0, 0)), CellHint::Inspect);
    assert_eq!(engine.hover_cell(99), CellHint::None);

    let events = &engine.presenter().events;
    assert!(events.contains(&Event::Select(cell(3, 3), Highlight::Move)));
    assert!(events.contains(&Event::Select(cell(4, 4), Highlight::Attack)));
    assert!(events.contains(&Event::Cursor(Cursor::Crosshair)));
    assert!(events.contains(&Event::Cursor(Cursor::NotAllowed)));
}

#[test]
fn test_leave_keeps_selection_highlight() {
    let mut engine = engine();
    put(&mut engine, UnitKind::Bowman, cell(2, 2));
    engine.click_cell(cell(2, 2)).unwrap();
    engine.presenter_mut().events.clear();

    engine.leave_cell(cell(2, 2));
    assert!(!engine.presenter().events.contains(&Event::Deselect(cell(2, 2))));

    engine.leave_cell(cell(3, 3));
    let events = &engine.presenter().events;
    assert!(events.contains(&Event::Deselect(cell(3, 3))));
    assert!(events.contains(&Event::HideTooltip(cell(3, 3))));
    assert!(events.contains(&Event::Cursor(Cursor::Auto)));
}

// =============================================================================
// Save / Load
// =============================================================================

#[test]
fn test_save_and_load() {
    let mut engine = engine();
    engine.new_game();
    engine.state_mut().score = 42;
    assert!(engine.save_game().unwrap());
    let saved = engine.state().snapshot();

    engine.new_game();
    engine.state_mut().current_level = 3;
    engine.load_game().unwrap();

    assert_eq!(engine.state().snapshot(), saved);
    assert_eq!(engine.state().selected(), None);
    assert_eq!(engine.turn_state(), TurnState::Idle);
}

#[test]
fn test_load_without_save_keeps_match() {
    let mut engine = engine();
    engine.new_game();
    let before = engine.state().snapshot();

    let err = engine.load_game().unwrap_err();

    assert!(matches!(err, PersistenceError::NoSavedGame));
    assert_eq!(engine.state().snapshot(), before);
    assert!(engine.presenter().events.contains(&Event::Error("no saved game".into())));
}

#[test]
fn test_load_corrupt_state() {
    let mut store = MemoryStore::new();
    store.set(STATE_KEY, vec![1, 2, 3]);
    let mut engine = TurnEngine::with_heuristic(GameConfig::default(), Recorder::default(), store).unwrap();

    assert!(matches!(engine.load_game(), Err(PersistenceError::Decode(_))));
}

#[test]
fn test_save_ignored_after_game_over() {
    let config = GameConfig::default().with_stages(vec![Theme::Prairie]);
    let mut engine = engine_with(config);
    engine.to_next_level();

    assert_eq!(engine.turn_state(), TurnState::GameOver);
    assert!(!engine.save_game().unwrap());
    assert!(engine.service().store().get(STATE_KEY).is_none());
}

#[test]
fn test_load_recovers_from_game_over() {
    let mut engine = engine();
    engine.new_game();
    engine.save_game().unwrap();
    engine.state_mut().current_level = 4;
    engine.to_next_level();
    assert_eq!(engine.turn_state(), TurnState::GameOver);

    engine.load_game().unwrap();

    assert_eq!(engine.turn_state(), TurnState::Idle);
    assert_eq!(engine.state().current_level, 1);
}
