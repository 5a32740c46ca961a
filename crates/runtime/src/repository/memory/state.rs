//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::SavedGame;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Keeps the save slot in memory.
#[derive(Default)]
pub struct InMemorySaveRepo {
    slot: RwLock<Option<SavedGame>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a pre-filled slot.
    pub fn with_save(game: SavedGame) -> Self {
        Self {
            slot: RwLock::new(Some(game)),
        }
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn save(&self, game: &SavedGame) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(game.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedGame>> {
        let slot = self.slot.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }
}
