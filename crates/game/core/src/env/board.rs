//! Board addressing and spawn placement.

use crate::config::GameConfig;
use crate::env::{RandomSource, RollContext};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CellIndex, Coord, PositionedUnit, Side, Unit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("roster of {roster} units does not fit into {available} spawn cells")]
    InsufficientSpawnSlots { roster: usize, available: usize },
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            PlacementError::InsufficientSpawnSlots { .. } => "PLACEMENT_INSUFFICIENT_SPAWN_SLOTS",
        }
    }
}

/// Square board of side `size`, addressed by linear [`CellIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: u32,
}

impl Board {
    pub const fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_size)
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    pub const fn cell_count(&self) -> u32 {
        self.size * self.size
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        index.0 < self.cell_count()
    }

    pub fn contains_coord(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    pub fn index_to_coord(&self, index: CellIndex) -> Coord {
        debug_assert!(self.contains(index), "cell {index} outside {}x{} board", self.size, self.size);
        Coord::new(index.0 / self.size, index.0 % self.size)
    }

    pub fn coord_to_index(&self, coord: Coord) -> CellIndex {
        debug_assert!(self.contains_coord(coord), "{coord:?} outside {}x{} board", self.size, self.size);
        CellIndex(coord.row * self.size + coord.col)
    }

    /// Spawn cells for `side`, row by row, skipping anything in `occupied`.
    ///
    /// Home spawns on the leftmost [`GameConfig::SPAWN_COLUMNS`] columns, the
    /// opponent on the rightmost ones.
    pub fn spawn_cells(&self, side: Side, occupied: &[CellIndex]) -> Vec<CellIndex> {
        let columns = GameConfig::SPAWN_COLUMNS.min(self.size);
        let first_col = match side {
            Side::Home => 0,
            Side::Opponent => self.size - columns,
        };

        (0..self.size)
            .flat_map(|row| (first_col..first_col + columns).map(move |col| Coord::new(row, col)))
            .map(|coord| self.coord_to_index(coord))
            .filter(|cell| !occupied.contains(cell))
            .collect()
    }
}

/// Assigns every unit a distinct cell drawn uniformly from `candidates`.
///
/// Nothing is consumed from `rng` when the roster does not fit.
pub fn place_units(
    units: Vec<Unit>,
    mut candidates: Vec<CellIndex>,
    rng: &mut dyn RandomSource,
) -> Result<Vec<PositionedUnit>, PlacementError> {
    if units.len() > candidates.len() {
        return Err(PlacementError::InsufficientSpawnSlots {
            roster: units.len(),
            available: candidates.len(),
        });
    }

    Ok(units
        .into_iter()
        .map(|unit| {
            let pick = rng.index(RollContext::Placement, candidates.len());
            let position = candidates.swap_remove(pick);
            PositionedUnit::new(unit, position)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SeededRandom;
    use crate::state::{UnitId, UnitKind};

    fn units(count: u32) -> Vec<Unit> {
        (0..count)
            .map(|id| Unit::new(UnitId(id), UnitKind::Bowman, 1).unwrap())
            .collect()
    }

    #[test]
    fn index_and_coord_convert_both_ways() {
        let board = Board::new(8);
        assert_eq!(board.index_to_coord(CellIndex(0)), Coord::new(0, 0));
        assert_eq!(board.index_to_coord(CellIndex(9)), Coord::new(1, 1));
        assert_eq!(board.index_to_coord(CellIndex(63)), Coord::new(7, 7));
        assert_eq!(board.coord_to_index(Coord::new(4, 5)), CellIndex(37));
    }

    #[test]
    fn spawn_cells_cover_the_two_edge_columns() {
        let board = Board::new(8);
        let home = board.spawn_cells(Side::Home, &[]);
        assert_eq!(home.len(), 16);
        assert_eq!(&home[..4], &[CellIndex(0), CellIndex(1), CellIndex(8), CellIndex(9)]);

        let opponent = board.spawn_cells(Side::Opponent, &[CellIndex(6), CellIndex(63)]);
        assert_eq!(opponent.len(), 14);
        assert_eq!(opponent[0], CellIndex(7));
        assert!(!opponent.contains(&CellIndex(63)));
    }

    #[test]
    fn placement_uses_distinct_candidate_cells() {
        let board = Board::new(8);
        let candidates = board.spawn_cells(Side::Home, &[]);
        let mut rng = SeededRandom::new(3);

        let placed = place_units(units(5), candidates.clone(), &mut rng).unwrap();
        let mut cells: Vec<CellIndex> = placed.iter().map(|p| p.position).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|cell| candidates.contains(cell)));
    }

    #[test]
    fn placement_fails_when_roster_exceeds_candidates() {
        let mut rng = SeededRandom::new(3);
        let err = place_units(units(3), vec![CellIndex(0), CellIndex(1)], &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlacementError::InsufficientSpawnSlots {
                roster: 3,
                available: 2
            }
        );
        assert_eq!(rng.nonce(), 0);
    }
}
