//! Input events a front-end feeds into the controller.
use game_core::CellIndex;

/// Everything the presentation layer can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    CellEnter(CellIndex),
    CellLeave(CellIndex),
    CellClick(CellIndex),
    NewGame,
    SaveGame,
    LoadGame,
}
