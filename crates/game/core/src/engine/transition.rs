//! Three-phase transition driver.

use crate::action::ActionTransition;
use crate::env::Board;
use crate::state::GameState;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs a transition through its phases and returns the apply result.
///
/// 1. `pre_validate` checks preconditions before mutation
/// 2. `apply` mutates the game state
/// 3. `post_validate` verifies postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    board: &Board,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, board)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, board)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, board)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}
