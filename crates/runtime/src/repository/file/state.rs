//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SavedGame;

use crate::repository::{RepositoryError, Result, SaveRepository};

const SAVE_FILE: &str = "savegame.json";

/// Stores the save slot as pretty-printed JSON in `base_dir/savegame.json`.
///
/// Writes go to a temp file that is then renamed over the slot.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn save_path(&self) -> PathBuf {
        self.base_dir.join(SAVE_FILE)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, game: &SavedGame) -> Result<()> {
        let path = self.save_path();
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(game)?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved game to {}", path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedGame>> {
        let path = self.save_path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let game: SavedGame = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded game from {}", path.display());
        Ok(Some(game))
    }
}
