use std::fmt;

/// Unique identifier for a unit. Allocated by [`crate::GameState`] and never reused
/// within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Linear board address: `row * board_size + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellIndex(pub u32);

impl CellIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row/column pair recovered from a [`CellIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u32,
    pub col: u32,
}

impl Coord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Absolute row and column offsets to `other`.
    pub fn offset_to(self, other: Coord) -> (u32, u32) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// Chebyshev distance, the metric attack ranges use.
    pub fn chebyshev(self, other: Coord) -> u32 {
        let (dr, dc) = self.offset_to(other);
        dr.max(dc)
    }
}

/// Which roster a unit fights for, and whose turn it is.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Side {
    /// Human-controlled roster.
    #[default]
    Home,
    /// Computer-controlled roster.
    Opponent,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Opponent,
            Side::Opponent => Side::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_takes_the_larger_axis() {
        let a = Coord::new(2, 3);
        assert_eq!(a.chebyshev(Coord::new(5, 4)), 3);
        assert_eq!(a.chebyshev(Coord::new(2, 3)), 0);
        assert_eq!(a.chebyshev(Coord::new(0, 7)), 4);
    }

    #[test]
    fn side_parses_persisted_tags() {
        assert_eq!("HOME".parse::<Side>().unwrap(), Side::Home);
        assert_eq!("opponent".parse::<Side>().unwrap(), Side::Opponent);
        assert_eq!(Side::Home.opposite(), Side::Opponent);
    }
}
