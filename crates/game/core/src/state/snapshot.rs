//! Flat save format and the rebuild of a [`GameState`] from it.
//!
//! Layout (camelCase keys):
//!
//! ```text
//! { turnOwner: "HOME" | "OPPONENT", stage, score, selected: int | null,
//!   units: [ { type, level, health, position } ] }
//! ```
//!
//! Unit type tags stay plain strings here so a tag outside the six known
//! kinds surfaces as [`RestoreIssue::UnknownPersistedType`] instead of failing
//! the whole load.

use super::{CellIndex, GameState, PositionedUnit, Side, Unit, UnitKind};
use crate::config::GameConfig;
use crate::env::Board;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SavedGame {
    pub turn_owner: Side,
    pub stage: u32,
    pub score: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected: Option<CellIndex>,
    /// `None` when the field is missing, which counts as "no save".
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: Option<Vec<SavedUnit>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedUnit {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub level: u32,
    pub health: u32,
    pub position: CellIndex,
}

/// A persisted unit row that was skipped during restore.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RestoreIssue {
    #[error("unknown unit type '{tag}' at cell {position}")]
    UnknownPersistedType { tag: String, position: CellIndex },

    #[error("{kind} at cell {position} has invalid level {level}")]
    InvalidLevel {
        kind: UnitKind,
        level: u32,
        position: CellIndex,
    },

    #[error("{kind} at cell {position} has no health left")]
    Fallen { kind: UnitKind, position: CellIndex },

    #[error("{kind} at cell {position} is outside the board")]
    OutOfBoard { kind: UnitKind, position: CellIndex },

    #[error("{kind} at cell {position} shares its cell with an earlier unit")]
    DuplicatePosition { kind: UnitKind, position: CellIndex },
}

impl GameError for RestoreIssue {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RestoreIssue::UnknownPersistedType { .. } => "RESTORE_UNKNOWN_PERSISTED_TYPE",
            RestoreIssue::InvalidLevel { .. } => "RESTORE_INVALID_LEVEL",
            RestoreIssue::Fallen { .. } => "RESTORE_FALLEN_UNIT",
            RestoreIssue::OutOfBoard { .. } => "RESTORE_OUT_OF_BOARD",
            RestoreIssue::DuplicatePosition { .. } => "RESTORE_DUPLICATE_POSITION",
        }
    }
}

/// Outcome of [`SavedGame::restore`]: the rebuilt state plus every skipped row.
#[derive(Clone, Debug)]
pub struct RestoredGame {
    pub state: GameState,
    pub issues: Vec<RestoreIssue>,
}

impl SavedGame {
    /// True if this save carries a unit list.
    pub fn is_present(&self) -> bool {
        self.units.is_some()
    }

    /// Rebuilds a game state. Returns `None` when the unit list is missing.
    ///
    /// Each unit is constructed from its tag and level (so level-ups are
    /// reapplied) and then gets the persisted health, capped at
    /// [`GameConfig::HEALTH_CAP`]. Rows with no health left are skipped. Its
    /// roster is chosen by which side's kind set holds the tag.
    pub fn restore(&self, board: &Board) -> Option<RestoredGame> {
        let units = self.units.as_ref()?;

        let mut state = GameState::empty();
        state.turn_owner = self.turn_owner;
        state.stage = self.stage.clamp(1, GameConfig::MAX_STAGE);
        state.score = self.score;

        let mut issues = Vec::new();
        for saved in units {
            match restore_unit(&mut state, board, saved) {
                Ok(entry) => {
                    let side = entry.unit.side();
                    // Ids are freshly allocated, so the roster insert cannot collide.
                    let _ = state.roster_mut(side).add(entry.unit.id);
                    state.positions.push(entry);
                }
                Err(issue) => issues.push(issue),
            }
        }

        state.selected = self
            .selected
            .filter(|cell| state.side_at(*cell) == Some(Side::Home));
        state.blocked = state.stage == GameConfig::MAX_STAGE
            && state.opponent.is_empty()
            && !state.home.is_empty();

        Some(RestoredGame { state, issues })
    }
}

fn restore_unit(
    state: &mut GameState,
    board: &Board,
    saved: &SavedUnit,
) -> Result<PositionedUnit, RestoreIssue> {
    let position = saved.position;
    let kind: UnitKind = saved
        .kind
        .parse()
        .map_err(|_| RestoreIssue::UnknownPersistedType {
            tag: saved.kind.clone(),
            position,
        })?;

    if !board.contains(position) {
        return Err(RestoreIssue::OutOfBoard { kind, position });
    }
    if state.is_occupied(position) {
        return Err(RestoreIssue::DuplicatePosition { kind, position });
    }
    if saved.health == 0 {
        return Err(RestoreIssue::Fallen { kind, position });
    }

    let invalid_level = || RestoreIssue::InvalidLevel {
        kind,
        level: saved.level,
        position,
    };
    let level = u8::try_from(saved.level).map_err(|_| invalid_level())?;
    let id = state.allocate_unit_id();
    let mut unit = Unit::new(id, kind, level).map_err(|_| invalid_level())?;
    unit.health = saved.health.min(GameConfig::HEALTH_CAP);

    Ok(PositionedUnit::new(unit, position))
}

impl GameState {
    /// Flattens the state into the save format, keeping position-list order.
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            turn_owner: self.turn_owner,
            stage: self.stage,
            score: self.score,
            selected: self.selected,
            units: Some(
                self.positions
                    .iter()
                    .map(|entry| SavedUnit {
                        kind: entry.unit.kind.to_string(),
                        level: u32::from(entry.unit.level),
                        health: entry.unit.health,
                        position: entry.position,
                    })
                    .collect(),
            ),
        }
    }
}
