//! Error types for the action pipeline and stage progression.

use crate::action::{ActionError, AttackError, MoveError};
use crate::env::PlacementError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ConstructionError, RosterError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Rejected(#[from] ActionError),

    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),
}

impl ExecuteError {
    /// True when the action was refused before any mutation, i.e. the
    /// player should see an InvalidAction message and keep the turn.
    pub fn is_invalid_action(&self) -> bool {
        match self {
            ExecuteError::Rejected(_) => true,
            ExecuteError::Move(inner) => inner.phase == TransitionPhase::PreValidate,
            ExecuteError::Attack(inner) => inner.phase == TransitionPhase::PreValidate,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        if self.is_invalid_action() {
            ErrorSeverity::Recoverable
        } else {
            ErrorSeverity::Internal
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Rejected(error) => error.error_code(),
            ExecuteError::Move(inner) => inner.error.error_code(),
            ExecuteError::Attack(inner) => inner.error.error_code(),
        }
    }
}

/// Failures while building rosters for a new game or a new stage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ProgressionError::Construction(error) => error.severity(),
            ProgressionError::Roster(error) => error.severity(),
            ProgressionError::Placement(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProgressionError::Construction(error) => error.error_code(),
            ProgressionError::Roster(error) => error.error_code(),
            ProgressionError::Placement(error) => error.error_code(),
        }
    }
}
