pub mod common;
pub mod roster;
pub mod unit;

pub use common::{CellIndex, Coord, Side, UnitId};
pub use roster::{Roster, RosterError};
pub use unit::{ConstructionError, Unit, UnitKind, UnitProfile};
