//! Player and opponent actions.
//!
//! Both sides act through the same two transitions: [`MoveAction`] relocates a
//! unit along a straight or diagonal line, [`AttackAction`] strikes an enemy
//! inside the attacker's range box. The legality predicates are exported on
//! their own so hover feedback and the opponent policy can query them without
//! building an action.

pub mod combat;
pub mod error;
pub mod movement;

pub use combat::{AttackAction, AttackError, can_attack};
pub use error::ActionError;
pub use movement::{MoveAction, MoveError, MoveWindow, can_move, move_window};

use crate::combat::PendingStrike;
use crate::env::Board;
use crate::state::{CellIndex, GameState};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. Hooks receive read-only board
/// geometry and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Cell of the unit performing this action.
    fn actor(&self) -> CellIndex;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _board: &Board) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Assumes `pre_validate` already succeeded.
    fn apply(&self, state: &mut GameState, board: &Board) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _board: &Board) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A single turn's worth of intent for either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
}

impl Action {
    pub fn actor(&self) -> CellIndex {
        match self {
            Action::Move(action) => action.actor(),
            Action::Attack(action) => action.actor(),
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Action::Attack(_))
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Action::Move(action)
    }
}

impl From<AttackAction> for Action {
    fn from(action: AttackAction) -> Self {
        Action::Attack(action)
    }
}

/// Result of applying an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionResult {
    Moved { from: CellIndex, to: CellIndex },
    Strike(PendingStrike),
}
