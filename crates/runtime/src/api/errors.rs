//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules engine and the save repository so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ExecuteError, ProgressionError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("action rejected by the engine: {0}")]
    Execute(#[from] ExecuteError),

    #[error("failed to set up rosters: {0}")]
    Progression(#[from] ProgressionError),
}
