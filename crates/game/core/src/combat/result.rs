//! Strike bookkeeping shared by the engine and the runtime.

use crate::state::{CellIndex, UnitId};

/// An attack that passed validation but has not touched health yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingStrike {
    pub attacker: CellIndex,
    pub target: CellIndex,
    pub damage: u32,
}

/// What a committed strike did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeReport {
    pub attacker: UnitId,
    pub target: UnitId,
    pub target_cell: CellIndex,
    pub damage: u32,
    pub remaining_health: u32,
    /// Target reached zero health and was removed from the board.
    pub defeated: bool,
}
