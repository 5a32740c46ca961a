//! The InvalidAction family surfaced to the player.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CellIndex, Side};

use super::{AttackError, MoveError};

/// A click or opponent intent that is neither a legal move nor a legal attack.
///
/// Never mutates state; the controller reports it and keeps the turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameBlocked,

    #[error("it is not the {side} side's turn")]
    NotYourTurn { side: Side },

    #[error("no unit is selected")]
    NothingSelected,

    #[error("invalid move: {0}")]
    Move(#[from] MoveError),

    #[error("invalid attack: {0}")]
    Attack(#[from] AttackError),

    #[error("cell {cell} is neither a free cell in range nor an enemy in reach")]
    Unreachable { cell: CellIndex },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::GameBlocked => "ACTION_GAME_BLOCKED",
            ActionError::NotYourTurn { .. } => "ACTION_NOT_YOUR_TURN",
            ActionError::NothingSelected => "ACTION_NOTHING_SELECTED",
            ActionError::Move(error) => error.error_code(),
            ActionError::Attack(error) => error.error_code(),
            ActionError::Unreachable { .. } => "ACTION_INVALID",
        }
    }
}
