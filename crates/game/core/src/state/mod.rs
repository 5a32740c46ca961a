//! Authoritative game state representation.
//!
//! [`GameState`] is the single mutable aggregate: turn owner, stage, score,
//! selection, both rosters and the ordered list of positioned units. Runtime
//! layers read it freely but mutate it only through [`crate::GameEngine`].
pub mod snapshot;
pub mod types;

pub use snapshot::{RestoreIssue, RestoredGame, SavedGame, SavedUnit};
pub use types::{
    CellIndex, ConstructionError, Coord, Roster, RosterError, Side, Unit, UnitId, UnitKind,
    UnitProfile,
};

use crate::config::GameConfig;
use crate::env::{RandomSource, RollContext};

/// A unit standing on a board cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionedUnit {
    pub unit: Unit,
    pub position: CellIndex,
}

impl PositionedUnit {
    pub fn new(unit: Unit, position: CellIndex) -> Self {
        Self { unit, position }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Side allowed to act.
    pub turn_owner: Side,
    /// Current stage, `1..=GameConfig::MAX_STAGE`.
    pub stage: u32,
    pub score: u32,
    /// Cell of the home unit picked for the next action.
    pub selected: Option<CellIndex>,
    /// Every unit on the board. A cell holds at most one entry.
    pub positions: Vec<PositionedUnit>,
    pub home: Roster,
    pub opponent: Roster,
    /// Set on final victory; freezes all input.
    pub blocked: bool,

    /// Sequential unit id allocator, never reused within a game.
    next_unit_id: u32,
}

impl GameState {
    /// Creates an empty stage-1 state with no units.
    pub fn empty() -> Self {
        Self {
            turn_owner: Side::Home,
            stage: 1,
            score: 0,
            selected: None,
            positions: Vec::new(),
            home: Roster::new(),
            opponent: Roster::new(),
            blocked: false,
            next_unit_id: 0,
        }
    }

    pub fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Home => &self.home,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Home => &mut self.home,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Side whose roster holds `unit`, if any.
    pub fn side_of(&self, unit: UnitId) -> Option<Side> {
        if self.home.contains(unit) {
            Some(Side::Home)
        } else if self.opponent.contains(unit) {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn unit_at(&self, cell: CellIndex) -> Option<&PositionedUnit> {
        self.positions.iter().find(|entry| entry.position == cell)
    }

    pub fn unit_at_mut(&mut self, cell: CellIndex) -> Option<&mut PositionedUnit> {
        self.positions.iter_mut().find(|entry| entry.position == cell)
    }

    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.unit_at(cell).is_some()
    }

    /// Side controlling the unit on `cell`.
    pub fn side_at(&self, cell: CellIndex) -> Option<Side> {
        self.unit_at(cell).and_then(|entry| self.side_of(entry.unit.id))
    }

    /// Positioned units belonging to `side`, in position-list order.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &PositionedUnit> + '_ {
        let roster = self.roster(side);
        self.positions
            .iter()
            .filter(move |entry| roster.contains(entry.unit.id))
    }

    pub fn occupied_cells(&self) -> Vec<CellIndex> {
        self.positions.iter().map(|entry| entry.position).collect()
    }

    /// Removes the unit on `cell` from the board and from its roster,
    /// clearing the selection if it pointed there.
    pub fn remove_unit_at(&mut self, cell: CellIndex) -> Option<Unit> {
        let index = self.positions.iter().position(|entry| entry.position == cell)?;
        let removed = self.positions.remove(index).unit;
        self.home.delete(removed.id);
        self.opponent.delete(removed.id);
        if self.selected == Some(cell) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Creates `count` units for `side` at `level`, each kind drawn uniformly
    /// from the side's kind set. Units are not enlisted or placed.
    pub fn generate_units(
        &mut self,
        side: Side,
        level: u8,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Unit>, ConstructionError> {
        let kinds = UnitKind::allowed_for(side);
        (0..count)
            .map(|_| {
                let kind = kinds[rng.index(RollContext::Generation, kinds.len())];
                let id = self.allocate_unit_id();
                Unit::new(id, kind, level)
            })
            .collect()
    }

    /// Stage level new units are generated at.
    pub fn stage_level(&self) -> u8 {
        self.stage.clamp(1, u32::from(GameConfig::MAX_LEVEL)) as u8
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}
