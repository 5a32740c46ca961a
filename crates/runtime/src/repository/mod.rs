//! Repository layer for the save slot.
//!
//! The controller hands a flat [`game_core::SavedGame`] to a
//! [`SaveRepository`] and gets the same value back on load. Two backends
//! ship: in-memory for tests and JSON files for the terminal client.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepo;
pub use traits::SaveRepository;
