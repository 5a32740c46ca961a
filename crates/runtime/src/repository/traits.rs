//! Repository contract for the single save slot.

use game_core::SavedGame;

use super::error::Result;

/// Persistence gateway behind save/load.
///
/// The repository stores one flat [`SavedGame`] and hands it back verbatim.
/// It never interprets unit rows; restoring them is the controller's job.
pub trait SaveRepository: Send + Sync {
    fn save(&self, game: &SavedGame) -> Result<()>;

    /// Returns `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<SavedGame>>;
}
