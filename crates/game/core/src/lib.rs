//! Deterministic rules for the skirmish game.
//!
//! `game-core` defines units and rosters, board geometry, the legality of
//! moves and attacks, damage, and stage progression. It performs no I/O and
//! holds no clocks: randomness arrives through [`env::RandomSource`] and all
//! state mutation flows through [`engine::GameEngine`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, AttackAction, AttackError, MoveAction,
    MoveError, MoveWindow, can_attack, can_move, move_window,
};
pub use combat::{PendingStrike, StrikeReport, calculate_damage};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, GameEngine, Outcome, ProgressionError, StageAdvance, TransitionPhase,
    TransitionPhaseError, new_game,
};
pub use env::{
    Board, PcgRng, PlacementError, RandomSource, RngOracle, RollContext, SeededRandom,
    place_units,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    CellIndex, ConstructionError, Coord, GameState, PositionedUnit, RestoreIssue, RestoredGame,
    Roster, RosterError, SavedGame, SavedUnit, Side, Unit, UnitId, UnitKind, UnitProfile,
};
