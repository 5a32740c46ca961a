use crate::action::ActionTransition;
use crate::combat::{PendingStrike, StrikeReport, apply_damage, calculate_damage};
use crate::env::Board;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CellIndex, GameState, PositionedUnit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("no attacker stands on cell {cell}")]
    NoAttacker { cell: CellIndex },

    #[error("no unit stands on target cell {cell}")]
    NoTarget { cell: CellIndex },

    #[error("a unit cannot attack itself")]
    SelfTarget,

    #[error("units on {attacker} and {target} fight for the same side")]
    SameSide {
        attacker: CellIndex,
        target: CellIndex,
    },

    #[error("target {target} is {distance} cells away, reach is {range}")]
    OutOfRange {
        target: CellIndex,
        distance: u32,
        range: u32,
    },

    #[error("defeated unit still occupies cell {cell}")]
    DefeatedStillPlaced { cell: CellIndex },
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::DefeatedStillPlaced { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::NoAttacker { .. } => "ATTACK_NO_ATTACKER",
            AttackError::NoTarget { .. } => "ATTACK_NO_TARGET",
            AttackError::SelfTarget => "ATTACK_SELF_TARGET",
            AttackError::SameSide { .. } => "ATTACK_SAME_SIDE",
            AttackError::OutOfRange { .. } => "ATTACK_OUT_OF_RANGE",
            AttackError::DefeatedStillPlaced { .. } => "ATTACK_DEFEATED_STILL_PLACED",
        }
    }
}

/// Strike from the unit on `attacker` at the enemy on `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker: CellIndex,
    pub target: CellIndex,
}

impl AttackAction {
    pub fn new(attacker: CellIndex, target: CellIndex) -> Self {
        Self { attacker, target }
    }

    /// Validates the strike and computes its damage without touching health.
    pub fn preview(&self, state: &GameState, board: &Board) -> Result<PendingStrike, AttackError> {
        self.pre_validate(state, board)?;
        let (attacker, target) = self.units(state)?;
        Ok(PendingStrike {
            attacker: self.attacker,
            target: self.target,
            damage: calculate_damage(&attacker.unit, &target.unit),
        })
    }

    fn units<'s>(
        &self,
        state: &'s GameState,
    ) -> Result<(&'s PositionedUnit, &'s PositionedUnit), AttackError> {
        let attacker = state
            .unit_at(self.attacker)
            .ok_or(AttackError::NoAttacker {
                cell: self.attacker,
            })?;
        let target = state
            .unit_at(self.target)
            .ok_or(AttackError::NoTarget { cell: self.target })?;
        Ok((attacker, target))
    }
}

impl From<PendingStrike> for AttackAction {
    fn from(strike: PendingStrike) -> Self {
        Self::new(strike.attacker, strike.target)
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = StrikeReport;

    fn actor(&self) -> CellIndex {
        self.attacker
    }

    fn pre_validate(&self, state: &GameState, board: &Board) -> Result<(), Self::Error> {
        if self.attacker == self.target {
            return Err(AttackError::SelfTarget);
        }
        let (attacker, target) = self.units(state)?;

        let attacker_side = state.side_of(attacker.unit.id);
        if attacker_side.is_none() || attacker_side == state.side_of(target.unit.id) {
            return Err(AttackError::SameSide {
                attacker: self.attacker,
                target: self.target,
            });
        }

        let distance = board
            .index_to_coord(self.attacker)
            .chebyshev(board.index_to_coord(self.target));
        let range = attacker.unit.attack_range();
        if distance > range {
            return Err(AttackError::OutOfRange {
                target: self.target,
                distance,
                range,
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, _board: &Board) -> Result<StrikeReport, Self::Error> {
        let (attacker, target) = self.units(state)?;
        let damage = calculate_damage(&attacker.unit, &target.unit);
        let attacker_id = attacker.unit.id;
        let target_id = target.unit.id;

        let entry = state
            .unit_at_mut(self.target)
            .ok_or(AttackError::NoTarget { cell: self.target })?;
        entry.unit.health = apply_damage(entry.unit.health, damage);
        let remaining_health = entry.unit.health;

        let defeated = entry.unit.is_defeated();
        if defeated {
            state.remove_unit_at(self.target);
        }

        Ok(StrikeReport {
            attacker: attacker_id,
            target: target_id,
            target_cell: self.target,
            damage,
            remaining_health,
            defeated,
        })
    }

    fn post_validate(&self, state: &GameState, _board: &Board) -> Result<(), Self::Error> {
        match state.unit_at(self.target) {
            Some(entry) if entry.unit.is_defeated() => {
                Err(AttackError::DefeatedStillPlaced { cell: self.target })
            }
            _ => Ok(()),
        }
    }
}

/// True if the unit on `attacker` may strike the unit on `target`: both cells
/// hold units of opposing rosters and the target lies inside the attacker's
/// range box (Chebyshev distance).
pub fn can_attack(state: &GameState, board: &Board, attacker: CellIndex, target: CellIndex) -> bool {
    board.contains(attacker)
        && board.contains(target)
        && AttackAction::new(attacker, target)
            .pre_validate(state, board)
            .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Unit, UnitKind};

    fn place(state: &mut GameState, kind: UnitKind, cell: u32) {
        let id = state.allocate_unit_id();
        state.roster_mut(kind.side()).add(id).unwrap();
        state
            .positions
            .push(PositionedUnit::new(Unit::new(id, kind, 1).unwrap(), CellIndex(cell)));
    }

    #[test]
    fn attack_reach_is_a_box_not_a_line() {
        let board = Board::new(8);
        let mut state = GameState::empty();
        place(&mut state, UnitKind::Bowman, 0);
        // (2, 1) is not on a line from (0, 0) but inside the 2-cell box
        place(&mut state, UnitKind::Daemon, 17);
        place(&mut state, UnitKind::Vampire, 3);

        assert!(can_attack(&state, &board, CellIndex(0), CellIndex(17)));
        assert!(!can_attack(&state, &board, CellIndex(0), CellIndex(3)));
    }

    #[test]
    fn same_side_and_self_are_rejected() {
        let board = Board::new(8);
        let mut state = GameState::empty();
        place(&mut state, UnitKind::Bowman, 0);
        place(&mut state, UnitKind::Swordsman, 1);

        assert!(!can_attack(&state, &board, CellIndex(0), CellIndex(1)));
        assert_eq!(
            AttackAction::new(CellIndex(0), CellIndex(0)).pre_validate(&state, &board),
            Err(AttackError::SelfTarget)
        );
    }

    #[test]
    fn preview_leaves_health_untouched_and_apply_lands_it() {
        let board = Board::new(8);
        let mut state = GameState::empty();
        place(&mut state, UnitKind::Bowman, 0);
        place(&mut state, UnitKind::Daemon, 1);
        let action = AttackAction::new(CellIndex(0), CellIndex(1));

        let strike = action.preview(&state, &board).unwrap();
        assert_eq!(strike.damage, 15);
        assert_eq!(state.unit_at(CellIndex(1)).unwrap().unit.health, 100);

        let report = action.apply(&mut state, &board).unwrap();
        assert_eq!((report.damage, report.remaining_health), (15, 85));
        assert!(!report.defeated);
    }

    #[test]
    fn lethal_strike_removes_the_target_everywhere() {
        let board = Board::new(8);
        let mut state = GameState::empty();
        place(&mut state, UnitKind::Swordsman, 0);
        place(&mut state, UnitKind::Daemon, 1);
        state.unit_at_mut(CellIndex(1)).unwrap().unit.health = 20;
        let target_id = state.unit_at(CellIndex(1)).unwrap().unit.id;

        let action = AttackAction::new(CellIndex(0), CellIndex(1));
        let report = action.apply(&mut state, &board).unwrap();
        action.post_validate(&state, &board).unwrap();

        assert!(report.defeated);
        assert!(state.unit_at(CellIndex(1)).is_none());
        assert!(!state.opponent.contains(target_id));
    }
}
