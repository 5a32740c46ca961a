/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side length of the square board. Cells are addressed `0..board_size²`.
    pub board_size: u32,
}

impl GameConfig {
    // ===== fixed rules =====
    /// Final stage. Clearing it blocks the game for good.
    pub const MAX_STAGE: u32 = 4;
    /// Highest level a unit can reach through stage progression.
    pub const MAX_LEVEL: u8 = 4;
    /// Units per roster on stage 1. Stage `s` fields `s + 1` units per side.
    pub const INITIAL_ROSTER_SIZE: usize = 2;
    /// Number of board columns on each edge used as spawn cells.
    pub const SPAWN_COLUMNS: u32 = 2;
    /// Half-width of the window the opponent searches for a move destination.
    pub const AI_SEARCH_RADIUS: u32 = 4;
    /// Cells in that window when it is not clipped by the board edge.
    pub const AI_WINDOW_CELLS: usize =
        ((2 * Self::AI_SEARCH_RADIUS + 1) * (2 * Self::AI_SEARCH_RADIUS + 1)) as usize;
    /// Health every unit starts with, and the ceiling leveling restores to.
    pub const HEALTH_CAP: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: u32 = 8;
    /// Smallest board whose two spawn strips are disjoint and each hold a
    /// final-stage roster.
    pub const MIN_BOARD_SIZE: u32 = 4;

    pub fn new() -> Self {
        Self {
            board_size: Self::DEFAULT_BOARD_SIZE,
        }
    }

    pub fn with_board_size(board_size: u32) -> Self {
        Self { board_size }
    }

    /// Roster size both sides are rebuilt to when `stage` begins.
    pub const fn roster_size_for(stage: u32) -> usize {
        stage as usize + 1
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
