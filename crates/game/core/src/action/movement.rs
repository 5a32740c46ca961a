use arrayvec::ArrayVec;

use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::env::Board;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CellIndex, Coord, GameState};

/// Candidate cells from one move-window search.
pub type MoveWindow = ArrayVec<CellIndex, { GameConfig::AI_WINDOW_CELLS }>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("no unit stands on cell {origin}")]
    NoUnit { origin: CellIndex },

    #[error("destination {destination} is outside the board")]
    OutOfBounds { destination: CellIndex },

    #[error("destination {destination} is occupied")]
    Occupied { destination: CellIndex },

    #[error("destination {destination} is not on a straight or diagonal line")]
    NotALine { destination: CellIndex },

    #[error("destination {destination} is {distance} cells away, range is {range}")]
    OutOfRange {
        destination: CellIndex,
        distance: u32,
        range: u32,
    },

    #[error("unit did not arrive at {destination}")]
    PositionDesync { destination: CellIndex },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::PositionDesync { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::NoUnit { .. } => "MOVE_NO_UNIT",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
            MoveError::NotALine { .. } => "MOVE_NOT_A_LINE",
            MoveError::OutOfRange { .. } => "MOVE_OUT_OF_RANGE",
            MoveError::PositionDesync { .. } => "MOVE_POSITION_DESYNC",
        }
    }
}

/// Relocates the unit on `from` to the empty cell `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub from: CellIndex,
    pub to: CellIndex,
}

impl MoveAction {
    pub fn new(from: CellIndex, to: CellIndex) -> Self {
        Self { from, to }
    }

    /// Checks geometry and occupancy without touching state.
    pub fn check(&self, state: &GameState, board: &Board) -> Result<(), MoveError> {
        let mover = state
            .unit_at(self.from)
            .ok_or(MoveError::NoUnit { origin: self.from })?;

        let destination = self.to;
        if !board.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if state.is_occupied(destination) {
            return Err(MoveError::Occupied { destination });
        }

        let (dr, dc) = board
            .index_to_coord(self.from)
            .offset_to(board.index_to_coord(destination));
        if dr != 0 && dc != 0 && dr != dc {
            return Err(MoveError::NotALine { destination });
        }

        let distance = dr.max(dc);
        let range = mover.unit.move_range();
        if distance > range {
            return Err(MoveError::OutOfRange {
                destination,
                distance,
                range,
            });
        }

        Ok(())
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = ();

    fn actor(&self) -> CellIndex {
        self.from
    }

    fn pre_validate(&self, state: &GameState, board: &Board) -> Result<(), Self::Error> {
        self.check(state, board)
    }

    fn apply(&self, state: &mut GameState, _board: &Board) -> Result<(), Self::Error> {
        let entry = state
            .unit_at_mut(self.from)
            .ok_or(MoveError::NoUnit { origin: self.from })?;
        entry.position = self.to;

        if state.selected == Some(self.from) {
            state.selected = Some(self.to);
        }
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _board: &Board) -> Result<(), Self::Error> {
        if state.is_occupied(self.from) || !state.is_occupied(self.to) {
            return Err(MoveError::PositionDesync {
                destination: self.to,
            });
        }
        Ok(())
    }
}

/// True if the unit on `from` may move to `to`: the destination is on the
/// board and empty, lies on the same row, column, or diagonal, and is no
/// further than the unit's move range.
pub fn can_move(state: &GameState, board: &Board, from: CellIndex, to: CellIndex) -> bool {
    MoveAction::new(from, to).check(state, board).is_ok()
}

/// Move-legal cells inside the ±[`GameConfig::AI_SEARCH_RADIUS`] window
/// around `from`, clipped to the board, in row-major order.
pub fn move_window(state: &GameState, board: &Board, from: CellIndex) -> MoveWindow {
    let radius = GameConfig::AI_SEARCH_RADIUS;
    let origin = board.index_to_coord(from);
    let last = board.size().saturating_sub(1);
    let rows = origin.row.saturating_sub(radius)..=(origin.row + radius).min(last);

    rows.flat_map(|row| {
        let cols = origin.col.saturating_sub(radius)..=(origin.col + radius).min(last);
        cols.map(move |col| Coord::new(row, col))
    })
    .map(|coord| board.coord_to_index(coord))
    .filter(|&cell| can_move(state, board, from, cell))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PositionedUnit, Unit, UnitKind};

    fn board_with(kind: UnitKind, cell: u32) -> (GameState, Board) {
        let mut state = GameState::empty();
        let id = state.allocate_unit_id();
        state.roster_mut(kind.side()).add(id).unwrap();
        state
            .positions
            .push(PositionedUnit::new(Unit::new(id, kind, 1).unwrap(), CellIndex(cell)));
        (state, Board::new(8))
    }

    #[test]
    fn swordsman_moves_along_lines_up_to_four() {
        // swordsman on (3, 3) = 27
        let (state, board) = board_with(UnitKind::Swordsman, 27);
        let at = |row, col| board.coord_to_index(Coord::new(row, col));

        assert!(can_move(&state, &board, CellIndex(27), at(3, 7)));
        assert!(can_move(&state, &board, CellIndex(27), at(7, 7)));
        assert!(can_move(&state, &board, CellIndex(27), at(0, 3)));
        assert!(!can_move(&state, &board, CellIndex(27), at(4, 5)));
        assert!(!can_move(&state, &board, CellIndex(27), at(3, 3)));
    }

    #[test]
    fn knight_offsets_are_illegal_at_any_range() {
        let (state, board) = board_with(UnitKind::Swordsman, 0);
        // (1, 2) is within range 4 but neither straight nor diagonal
        assert_eq!(
            MoveAction::new(CellIndex(0), CellIndex(10)).check(&state, &board),
            Err(MoveError::NotALine {
                destination: CellIndex(10)
            })
        );
    }

    #[test]
    fn magician_only_steps_one_cell() {
        let (state, board) = board_with(UnitKind::Magician, 0);
        assert!(can_move(&state, &board, CellIndex(0), CellIndex(9)));
        assert!(matches!(
            MoveAction::new(CellIndex(0), CellIndex(18)).check(&state, &board),
            Err(MoveError::OutOfRange { distance: 2, range: 1, .. })
        ));
    }

    #[test]
    fn apply_moves_the_unit_and_its_selection() {
        let (mut state, board) = board_with(UnitKind::Bowman, 0);
        state.selected = Some(CellIndex(0));
        let action = MoveAction::new(CellIndex(0), CellIndex(2));

        action.pre_validate(&state, &board).unwrap();
        action.apply(&mut state, &board).unwrap();
        action.post_validate(&state, &board).unwrap();

        assert!(state.unit_at(CellIndex(2)).is_some());
        assert_eq!(state.selected, Some(CellIndex(2)));
    }

    #[test]
    fn move_window_is_clipped_to_the_board() {
        let (mut state, board) = board_with(UnitKind::Bowman, 0);
        let id = state.allocate_unit_id();
        state.roster_mut(UnitKind::Daemon.side()).add(id).unwrap();
        state.positions.push(PositionedUnit::new(
            Unit::new(id, UnitKind::Daemon, 1).unwrap(),
            CellIndex(2),
        ));

        // daemon on (0, 2) with move range 1, bowman on its left
        let cells = move_window(&state, &board, CellIndex(2));
        assert_eq!(
            cells.as_slice(),
            &[CellIndex(1), CellIndex(3), CellIndex(9), CellIndex(10), CellIndex(11)]
        );
    }
}
