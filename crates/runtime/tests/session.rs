//! Full sessions driven through the controller with a recording front-end.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use game_core::{
    Board, CellIndex, GameState, PositionedUnit, SavedGame, SavedUnit, Side, Unit, UnitKind,
};
use runtime::{
    CursorKind, Event, GameController, Highlight, InMemorySaveRepo, InputEvent,
    PassActionProvider, PresentationGateway, ProgressionEvent, RuntimeConfig, SaveRepository,
    Theme, Topic,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    DrawBoard(Theme),
    Redraw(usize),
    Select(CellIndex, Highlight),
    Deselect(CellIndex),
    DeselectColors(Highlight),
    Tooltip(String, CellIndex),
    HideTooltip(CellIndex),
    Cursor(CursorKind),
    Message(String),
    Error(String),
    Damage(CellIndex, u32),
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Error(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl PresentationGateway for Recorder {
    fn draw_board(&self, theme: Theme) {
        self.push(Call::DrawBoard(theme));
    }
    fn redraw(&self, positions: &[PositionedUnit]) {
        self.push(Call::Redraw(positions.len()));
    }
    fn select_cell(&self, cell: CellIndex, color: Highlight) {
        self.push(Call::Select(cell, color));
    }
    fn deselect_cell(&self, cell: CellIndex) {
        self.push(Call::Deselect(cell));
    }
    fn deselect_by_color(&self, colors: Highlight) {
        self.push(Call::DeselectColors(colors));
    }
    fn show_tooltip(&self, text: &str, cell: CellIndex) {
        self.push(Call::Tooltip(text.to_string(), cell));
    }
    fn hide_tooltip(&self, cell: CellIndex) {
        self.push(Call::HideTooltip(cell));
    }
    fn set_cursor(&self, cursor: CursorKind) {
        self.push(Call::Cursor(cursor));
    }
    fn show_message(&self, text: &str) {
        self.push(Call::Message(text.to_string()));
    }
    fn show_error(&self, text: &str) {
        self.push(Call::Error(text.to_string()));
    }
    async fn show_damage(&self, cell: CellIndex, damage: u32) {
        self.push(Call::Damage(cell, damage));
    }
}

/// Places a level-1 unit of `kind` with `health` at `cell`.
fn place(state: &mut GameState, kind: UnitKind, cell: u32, health: u32) {
    let id = state.allocate_unit_id();
    state.roster_mut(kind.side()).add(id).unwrap();
    let mut unit = Unit::new(id, kind, 1).unwrap();
    unit.health = health;
    state.positions.push(PositionedUnit::new(unit, CellIndex(cell)));
}

fn seeded() -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(7),
        ..RuntimeConfig::default()
    }
}

struct Session {
    controller: GameController,
    screen: Arc<Recorder>,
    saves: Arc<InMemorySaveRepo>,
}

fn session(state: GameState) -> Session {
    session_with(state, InMemorySaveRepo::new())
}

fn session_with(state: GameState, saves: InMemorySaveRepo) -> Session {
    let screen = Arc::new(Recorder::default());
    let saves = Arc::new(saves);
    let controller = GameController::builder()
        .config(seeded())
        .initial_state(state)
        .presentation(screen.clone())
        .repository(saves.clone())
        .build()
        .unwrap();
    Session {
        controller,
        screen,
        saves,
    }
}

fn health_at(controller: &GameController, cell: u32) -> Option<u32> {
    controller
        .state()
        .unit_at(CellIndex(cell))
        .map(|entry| entry.unit.health)
}

#[tokio::test]
async fn bowman_strike_on_daemon_deals_fifteen() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 1, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    assert_eq!(controller.state().selected, Some(CellIndex(0)));

    controller.on_cell_click(CellIndex(1)).await.unwrap();

    assert!(screen.calls().contains(&Call::Damage(CellIndex(1), 15)));
    // the daemon answered from range, so the bowman took a hit too
    assert_eq!(health_at(&controller, 1), Some(85));
    assert_eq!(health_at(&controller, 0), Some(99));
    assert_eq!(controller.state().turn_owner, Side::Home);
}

#[tokio::test]
async fn damage_cue_finishes_before_health_changes() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 1, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    screen.clear();
    controller.on_cell_click(CellIndex(1)).await.unwrap();

    let calls = screen.calls();
    let cue = calls
        .iter()
        .position(|call| *call == Call::Damage(CellIndex(1), 15))
        .unwrap();
    let redraw = calls
        .iter()
        .position(|call| matches!(call, Call::Redraw(_)))
        .unwrap();
    assert!(cue < redraw);
}

#[tokio::test]
async fn move_hands_the_turn_over_and_back() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Swordsman, 0, 100);
    place(&mut state, UnitKind::Undead, 7, 100);
    let screen = Arc::new(Recorder::default());
    let mut controller = GameController::builder()
        .config(seeded())
        .initial_state(state)
        .presentation(screen.clone())
        .opponent(PassActionProvider)
        .build()
        .unwrap();
    let mut turns = controller.subscribe(Topic::Session);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    controller.on_cell_click(CellIndex(16)).await.unwrap();

    assert!(controller.state().unit_at(CellIndex(16)).is_some());
    assert_eq!(controller.state().selected, Some(CellIndex(16)));
    assert_eq!(controller.state().turn_owner, Side::Home);
    assert!(screen.calls().contains(&Call::Select(CellIndex(16), Highlight::YELLOW)));

    let mut owners = Vec::new();
    while let Ok(event) = turns.try_recv() {
        if let Event::Session(runtime::SessionEvent::TurnPassed { owner }) = event {
            owners.push(owner);
        }
    }
    assert_eq!(owners, vec![Side::Opponent, Side::Home]);
}

#[tokio::test]
async fn illegal_click_reports_and_keeps_the_turn() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Magician, 0, 100);
    place(&mut state, UnitKind::Vampire, 63, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    let before = controller.state().clone();
    // (1, 2) is neither a line nor within the magician's single step
    controller.on_cell_click(CellIndex(10)).await.unwrap();

    assert_eq!(controller.state(), &before);
    assert_eq!(screen.errors().len(), 1);
}

#[tokio::test]
async fn click_without_selection_on_empty_cell_does_nothing() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Magician, 0, 100);
    place(&mut state, UnitKind::Vampire, 63, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);
    let before = controller.state().clone();

    controller.on_cell_click(CellIndex(5)).await.unwrap();
    controller.on_cell_click(CellIndex(63)).await.unwrap();

    assert_eq!(controller.state(), &before);
    assert!(screen.errors().is_empty());
}

#[tokio::test]
async fn clearing_stage_two_advances_to_stage_three() {
    let mut state = GameState::empty();
    state.stage = 2;
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 1, 10);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);
    let mut progression = controller.subscribe(Topic::Progression);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    controller.on_cell_click(CellIndex(1)).await.unwrap();

    let state = controller.state();
    assert_eq!(state.stage, 3);
    assert_eq!(state.score, 100);
    assert_eq!(state.home.len(), 4);
    assert_eq!(state.opponent.len(), 4);
    assert_eq!(state.turn_owner, Side::Home);
    assert_eq!(state.selected, None);
    assert!(!state.blocked);

    let veteran = state
        .units_of(Side::Home)
        .find(|entry| entry.unit.kind == UnitKind::Bowman && entry.unit.level == 2);
    assert!(veteran.is_some());
    assert!(screen.calls().contains(&Call::DrawBoard(Theme::Arctic)));
    assert_eq!(
        progression.try_recv().unwrap(),
        Event::Progression(ProgressionEvent::StageAdvanced {
            stage: 3,
            score: 100
        })
    );
}

#[tokio::test]
async fn clearing_the_final_stage_blocks_the_game() {
    let mut state = GameState::empty();
    state.stage = 4;
    state.score = 250;
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 1, 10);
    let Session {
        mut controller,
        ..
    } = session(state);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    controller.on_cell_click(CellIndex(1)).await.unwrap();

    assert!(controller.state().blocked);
    assert_eq!(controller.state().score, 250);
    assert_eq!(controller.state().stage, 4);

    let frozen = controller.state().clone();
    controller.on_cell_click(CellIndex(0)).await.unwrap();
    controller.on_cell_click(CellIndex(9)).await.unwrap();
    assert_eq!(controller.state(), &frozen);
}

#[tokio::test]
async fn losing_the_last_home_unit_starts_over() {
    let mut state = GameState::empty();
    state.stage = 3;
    state.score = 400;
    state.turn_owner = Side::Opponent;
    place(&mut state, UnitKind::Swordsman, 0, 10);
    place(&mut state, UnitKind::Undead, 1, 100);
    let Session {
        mut controller,
        ..
    } = session(state);
    let mut progression = controller.subscribe(Topic::Progression);

    controller.run_opponent_turn().await.unwrap();

    let state = controller.state();
    assert_eq!(state.stage, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.home.len(), 2);
    assert_eq!(state.opponent.len(), 2);
    assert_eq!(state.turn_owner, Side::Home);
    assert!(!state.blocked);
    assert_eq!(
        progression.try_recv().unwrap(),
        Event::Progression(ProgressionEvent::Defeat { stage: 3 })
    );
}

#[tokio::test]
async fn opponent_turn_is_a_no_op_on_the_home_turn() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Swordsman, 0, 100);
    place(&mut state, UnitKind::Undead, 1, 100);
    let Session {
        mut controller,
        ..
    } = session(state);
    let before = controller.state().clone();

    controller.run_opponent_turn().await.unwrap();

    assert_eq!(controller.state(), &before);
}

#[tokio::test]
async fn save_then_load_restores_the_same_game() {
    let mut state = GameState::empty();
    state.stage = 2;
    state.score = 180;
    place(&mut state, UnitKind::Bowman, 8, 64);
    place(&mut state, UnitKind::Magician, 16, 100);
    place(&mut state, UnitKind::Vampire, 15, 30);
    state.selected = Some(CellIndex(8));
    let Session {
        mut controller,
        saves,
        ..
    } = session(state);
    let saved = controller.state().to_saved();

    controller.on_save_game().unwrap();
    assert_eq!(saves.load().unwrap(), Some(saved.clone()));

    controller.on_new_game().unwrap();
    assert_eq!(controller.state().stage, 1);

    controller.dispatch(InputEvent::LoadGame).await.unwrap();
    assert_eq!(controller.state().to_saved(), saved);
    assert_eq!(controller.state().selected, Some(CellIndex(8)));
}

#[tokio::test]
async fn load_skips_unknown_unit_types() {
    let saved = SavedGame {
        turn_owner: Side::Home,
        stage: 1,
        score: 0,
        selected: None,
        units: Some(vec![
            SavedUnit {
                kind: "swordsman".into(),
                level: 1,
                health: 100,
                position: CellIndex(0),
            },
            SavedUnit {
                kind: "dragon".into(),
                level: 1,
                health: 100,
                position: CellIndex(5),
            },
            SavedUnit {
                kind: "daemon".into(),
                level: 1,
                health: 100,
                position: CellIndex(7),
            },
        ]),
    };
    let Session {
        mut controller,
        screen,
        ..
    } = session_with(GameState::empty(), InMemorySaveRepo::with_save(saved));

    controller.on_load_game().await.unwrap();

    assert_eq!(controller.state().positions.len(), 2);
    assert!(controller.state().unit_at(CellIndex(5)).is_none());
    let errors = screen.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("dragon"));
}

#[tokio::test]
async fn load_without_surviving_opponents_clears_the_stage() {
    let saved = SavedGame {
        turn_owner: Side::Home,
        stage: 2,
        score: 10,
        selected: None,
        units: Some(vec![
            SavedUnit {
                kind: "bowman".into(),
                level: 2,
                health: 100,
                position: CellIndex(0),
            },
            SavedUnit {
                kind: "dragon".into(),
                level: 2,
                health: 100,
                position: CellIndex(7),
            },
            SavedUnit {
                kind: "wyvern".into(),
                level: 2,
                health: 100,
                position: CellIndex(15),
            },
        ]),
    };
    let Session {
        mut controller,
        screen,
        ..
    } = session_with(GameState::empty(), InMemorySaveRepo::with_save(saved));
    let mut progression = controller.subscribe(Topic::Progression);

    controller.on_load_game().await.unwrap();

    let state = controller.state();
    assert_eq!(state.stage, 3);
    assert_eq!(state.score, 110);
    assert_eq!(state.home.len(), 4);
    assert_eq!(state.opponent.len(), 4);
    assert_eq!(state.turn_owner, Side::Home);
    assert_eq!(screen.errors().len(), 1);
    assert_eq!(
        progression.try_recv().unwrap(),
        Event::Progression(ProgressionEvent::StageAdvanced {
            stage: 3,
            score: 110
        })
    );
}

#[tokio::test]
async fn load_without_home_units_starts_over() {
    let saved = SavedGame {
        turn_owner: Side::Home,
        stage: 3,
        score: 250,
        selected: None,
        units: Some(vec![
            SavedUnit {
                kind: "paladin".into(),
                level: 3,
                health: 100,
                position: CellIndex(0),
            },
            SavedUnit {
                kind: "vampire".into(),
                level: 3,
                health: 100,
                position: CellIndex(7),
            },
        ]),
    };
    let Session {
        mut controller,
        ..
    } = session_with(GameState::empty(), InMemorySaveRepo::with_save(saved));

    controller.on_load_game().await.unwrap();

    let state = controller.state();
    assert_eq!(state.stage, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.home.len(), 2);
    assert_eq!(state.opponent.len(), 2);
}

#[tokio::test]
async fn load_without_a_save_reports_it() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 7, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);
    let before = controller.state().clone();

    controller.on_load_game().await.unwrap();

    assert_eq!(controller.state(), &before);
    assert_eq!(screen.errors(), vec!["No saved game available".to_string()]);
}

#[tokio::test]
async fn load_on_the_opponent_turn_plays_it() {
    let saved = SavedGame {
        turn_owner: Side::Opponent,
        stage: 1,
        score: 0,
        selected: None,
        units: Some(vec![
            SavedUnit {
                kind: "swordsman".into(),
                level: 1,
                health: 100,
                position: CellIndex(0),
            },
            SavedUnit {
                kind: "undead".into(),
                level: 1,
                health: 100,
                position: CellIndex(1),
            },
        ]),
    };
    let Session {
        mut controller,
        ..
    } = session_with(GameState::empty(), InMemorySaveRepo::with_save(saved));

    controller.on_load_game().await.unwrap();

    assert_eq!(health_at(&controller, 0), Some(70));
    assert_eq!(controller.state().turn_owner, Side::Home);
}

#[tokio::test]
async fn hover_marks_targets_and_leave_clears_them() {
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 2, 100);
    let Session {
        mut controller,
        screen,
        ..
    } = session(state);

    controller.on_cell_click(CellIndex(0)).await.unwrap();
    screen.clear();

    controller.on_cell_enter(CellIndex(2));
    controller.on_cell_leave(CellIndex(2));

    let calls = screen.calls();
    assert!(matches!(&calls[0], Call::Tooltip(_, cell) if *cell == CellIndex(2)));
    assert!(calls.contains(&Call::Cursor(CursorKind::Crosshair)));
    assert!(calls.contains(&Call::Select(CellIndex(2), Highlight::RED)));
    assert!(calls.contains(&Call::HideTooltip(CellIndex(2))));
    assert!(calls.contains(&Call::DeselectColors(Highlight::GREEN | Highlight::RED)));
    assert_eq!(controller.state().selected, Some(CellIndex(0)));
}

#[tokio::test]
async fn ui_redraws_track_the_board() {
    let board = Board::new(8);
    let mut state = GameState::empty();
    place(&mut state, UnitKind::Bowman, 0, 100);
    place(&mut state, UnitKind::Daemon, 7, 100);
    let Session {
        controller,
        screen,
        ..
    } = session(state);

    controller.start();

    assert_eq!(controller.board(), &board);
    let calls = screen.calls();
    assert_eq!(calls[0], Call::DrawBoard(Theme::Prairie));
    assert!(calls.contains(&Call::Redraw(2)));
}
