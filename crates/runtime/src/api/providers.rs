//! Asynchronous abstraction for sourcing the opponent's intent.
//!
//! The controller asks an [`ActionProvider`] for one action per opponent
//! turn, so tests can swap the built-in policy for a scripted one.
use async_trait::async_trait;
use game_core::{Action, Board, GameState, RandomSource};

use super::errors::Result;

#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Picks at most one action for the side whose turn it is.
    ///
    /// `Ok(None)` means the side has nothing legal to do and passes.
    async fn provide_action(
        &self,
        state: &GameState,
        board: &Board,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<Action>>;
}

/// Provider that never acts. Useful when a test only exercises the home side.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn provide_action(
        &self,
        _state: &GameState,
        _board: &Board,
        _rng: &mut dyn RandomSource,
    ) -> Result<Option<Action>> {
        Ok(None)
    }
}
