//! Event types for different topics.

use game_core::{CellIndex, Side, UnitKind};
use serde::{Deserialize, Serialize};

/// Moves and strikes on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    UnitMoved {
        side: Side,
        from: CellIndex,
        to: CellIndex,
    },

    UnitAttacked {
        attacker: CellIndex,
        target: CellIndex,
        damage: u32,
        remaining_health: u32,
    },

    /// A unit ran out of health and left the board and its roster.
    UnitDefeated {
        kind: UnitKind,
        side: Side,
        cell: CellIndex,
    },
}

/// Stage transitions and the end of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    StageAdvanced { stage: u32, score: u32 },

    /// Final stage cleared; the game is blocked.
    Victory { score: u32 },

    /// Home roster wiped out; a fresh game follows.
    Defeat { stage: u32 },
}

/// Session lifecycle and turn hand-over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    GameStarted,
    GameSaved,
    GameLoaded { stage: u32, skipped_units: usize },
    TurnPassed { owner: Side },
}
