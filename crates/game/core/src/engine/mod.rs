//! Action execution and stage progression.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation the controller performs (selection, moves, strikes, turn
//! hand-over, stage advancement) goes through it, and every action runs the
//! pre_validate → apply → post_validate pipeline.
//!
//! Attacks are split in two: [`GameEngine::resolve_attack`] validates and
//! prices the strike, [`GameEngine::commit_attack`] lands it. The caller plays
//! the damage cue in between.

mod errors;
mod progression;
mod transition;

pub use errors::{ExecuteError, ProgressionError, TransitionPhase, TransitionPhaseError};
pub use progression::{Outcome, StageAdvance, new_game, outcome};

use crate::action::{Action, ActionError, AttackAction, MoveAction};
use crate::combat::{PendingStrike, StrikeReport};
use crate::env::{Board, RandomSource};
use crate::state::{CellIndex, GameState, Side};

use transition::drive_transition;

pub struct GameEngine<'a> {
    state: &'a mut GameState,
    board: &'a Board,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, board: &'a Board) -> Self {
        Self { state, board }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Selects the unit on `cell` for the side whose turn it is.
    ///
    /// Any previous selection is replaced. Nothing else changes.
    pub fn select(&mut self, cell: CellIndex) -> Result<(), ActionError> {
        self.ensure_open()?;
        let side = self.state.turn_owner;
        if self.state.side_at(cell) != Some(side) {
            return Err(ActionError::Unreachable { cell });
        }
        self.state.selected = Some(cell);
        Ok(())
    }

    /// Interprets a click on `cell` by the current selection.
    ///
    /// An empty cell yields a move, an enemy yields an attack. Anything that
    /// is not legal comes back as the reason it was refused.
    pub fn intent_for(&self, cell: CellIndex) -> Result<Action, ActionError> {
        self.ensure_open()?;
        let from = self.state.selected.ok_or(ActionError::NothingSelected)?;
        let side = self.state.turn_owner;

        match self.state.side_at(cell) {
            None => {
                let action = MoveAction::new(from, cell);
                action.check(self.state, self.board)?;
                Ok(action.into())
            }
            Some(owner) if owner != side => {
                let action = AttackAction::new(from, cell);
                action.preview(self.state, self.board)?;
                Ok(action.into())
            }
            Some(_) => Err(ActionError::Unreachable { cell }),
        }
    }

    /// Moves a unit of the current side. The turn stays with the caller.
    pub fn move_unit(&mut self, action: MoveAction) -> Result<(), ExecuteError> {
        self.ensure_actor(action.from)?;
        drive_transition(&action, self.state, self.board).map_err(ExecuteError::Move)
    }

    /// Validates a strike and computes its damage. Health is untouched.
    pub fn resolve_attack(&self, action: AttackAction) -> Result<PendingStrike, ExecuteError> {
        self.ensure_actor(action.attacker)?;
        action
            .preview(self.state, self.board)
            .map_err(|error| {
                ExecuteError::Attack(TransitionPhaseError::new(TransitionPhase::PreValidate, error))
            })
    }

    /// Lands a strike produced by [`Self::resolve_attack`], removing the
    /// target if its health runs out.
    pub fn commit_attack(&mut self, strike: PendingStrike) -> Result<StrikeReport, ExecuteError> {
        let action = AttackAction::from(strike);
        drive_transition(&action, self.state, self.board).map_err(ExecuteError::Attack)
    }

    /// Hands the turn to the other side.
    pub fn pass_turn(&mut self) -> Side {
        self.state.turn_owner = self.state.turn_owner.opposite();
        self.state.turn_owner
    }

    pub fn outcome(&self) -> Outcome {
        outcome(self.state)
    }

    /// Advances after a cleared stage. See [`StageAdvance`].
    pub fn advance_stage(
        &mut self,
        rng: &mut dyn RandomSource,
    ) -> Result<StageAdvance, ProgressionError> {
        progression::advance_stage(self.state, self.board, rng)
    }

    /// Freezes the game after the final stage. No other field changes.
    pub fn block(&mut self) {
        self.state.blocked = true;
    }

    fn ensure_open(&self) -> Result<(), ActionError> {
        if self.state.blocked {
            return Err(ActionError::GameBlocked);
        }
        Ok(())
    }

    fn ensure_actor(&self, cell: CellIndex) -> Result<(), ActionError> {
        self.ensure_open()?;
        let side = self.state.turn_owner;
        if self.state.side_at(cell) != Some(side) {
            return Err(ActionError::NotYourTurn {
                side: side.opposite(),
            });
        }
        Ok(())
    }
}
