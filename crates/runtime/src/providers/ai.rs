//! Built-in opponent policy.

use async_trait::async_trait;
use game_core::{
    Action, AttackAction, Board, CellIndex, GameState, MoveAction, RandomSource, RollContext,
    can_attack, move_window,
};

use crate::api::{ActionProvider, Result};

/// Attack the weakest reachable enemy, otherwise wander.
///
/// 1. Every acting unit is paired with every enemy it can strike, both in
///    position-list order. The pair whose target has the lowest health wins;
///    on equal health the first pair found is kept.
/// 2. With no strike available, one acting unit is drawn uniformly and moves
///    to a uniformly drawn move-legal cell inside a ±4 window around it.
/// 3. If that unit cannot move anywhere, the turn passes without an action.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestHealthAiProvider;

impl LowestHealthAiProvider {
    pub fn new() -> Self {
        Self
    }

    fn weakest_target(state: &GameState, board: &Board) -> Option<AttackAction> {
        let side = state.turn_owner;
        let mut best: Option<(u32, AttackAction)> = None;

        for attacker in state.units_of(side) {
            for target in state.units_of(side.opposite()) {
                if !can_attack(state, board, attacker.position, target.position) {
                    continue;
                }
                let health = target.unit.health;
                if best.is_none_or(|(lowest, _)| health < lowest) {
                    best = Some((health, AttackAction::new(attacker.position, target.position)));
                }
            }
        }

        best.map(|(_, action)| action)
    }
}

#[async_trait]
impl ActionProvider for LowestHealthAiProvider {
    async fn provide_action(
        &self,
        state: &GameState,
        board: &Board,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<Action>> {
        if let Some(attack) = Self::weakest_target(state, board) {
            tracing::debug!(
                attacker = %attack.attacker,
                victim = %attack.target,
                "opponent strikes the weakest target in reach"
            );
            return Ok(Some(attack.into()));
        }

        let movers: Vec<CellIndex> = state
            .units_of(state.turn_owner)
            .map(|entry| entry.position)
            .collect();
        if movers.is_empty() {
            return Ok(None);
        }
        let from = movers[rng.index(RollContext::AiUnit, movers.len())];

        let candidates = move_window(state, board, from);
        if candidates.is_empty() {
            tracing::debug!(unit = %from, "opponent unit has nowhere to move");
            return Ok(None);
        }

        let to = candidates[rng.index(RollContext::AiMove, candidates.len())];
        tracing::debug!(from = %from, to = %to, "opponent moves");
        Ok(Some(MoveAction::new(from, to).into()))
    }
}
