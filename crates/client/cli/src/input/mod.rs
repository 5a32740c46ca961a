//! Input processing for the CLI client.
//!
//! Owns the mapping from raw `crossterm` events to controller input events.
//! The mouse hovers and clicks cells directly; the arrow keys drive a
//! keyboard cursor that produces the same enter/leave/click sequence.

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use game_core::{Board, CellIndex, Coord};
use ratatui::layout::Rect;
use runtime::InputEvent;

use crate::presentation::ui;

/// High-level outcome of processing a terminal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Exit the application.
    Quit,
    /// Forward to the controller.
    Dispatch(InputEvent),
    /// Repaint without touching the game.
    Redraw,
}

pub struct InputHandler {
    board: Board,
    hovered: Option<CellIndex>,
    key_cursor: Coord,
}

impl InputHandler {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            hovered: None,
            key_cursor: Coord::new(0, 0),
        }
    }

    /// Converts one terminal event into zero or more commands.
    ///
    /// `board_area` is where the board was last drawn, for mouse hit tests.
    pub fn handle(&mut self, event: TermEvent, board_area: Rect) -> Vec<Command> {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            TermEvent::Mouse(mouse) => self.handle_mouse(mouse, board_area),
            TermEvent::Resize(_, _) => vec![Command::Redraw],
            _ => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Command::Quit];
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Command::Quit],
            KeyCode::Char('n') => vec![Command::Dispatch(InputEvent::NewGame)],
            KeyCode::Char('s') => vec![Command::Dispatch(InputEvent::SaveGame)],
            KeyCode::Char('l') => vec![Command::Dispatch(InputEvent::LoadGame)],
            KeyCode::Up => self.step_cursor(-1, 0),
            KeyCode::Down => self.step_cursor(1, 0),
            KeyCode::Left => self.step_cursor(0, -1),
            KeyCode::Right => self.step_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cell = self.board.coord_to_index(self.key_cursor);
                let mut commands = self.hover(Some(cell));
                commands.push(Command::Dispatch(InputEvent::CellClick(cell)));
                commands
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, board_area: Rect) -> Vec<Command> {
        let cell = ui::cell_at(board_area, &self.board, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.hover(cell),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(cell) = cell else {
                    return Vec::new();
                };
                self.key_cursor = self.board.index_to_coord(cell);
                let mut commands = self.hover(Some(cell));
                commands.push(Command::Dispatch(InputEvent::CellClick(cell)));
                commands
            }
            _ => Vec::new(),
        }
    }

    fn step_cursor(&mut self, rows: i64, cols: i64) -> Vec<Command> {
        let last = i64::from(self.board.size()) - 1;
        let row = (i64::from(self.key_cursor.row) + rows).clamp(0, last);
        let col = (i64::from(self.key_cursor.col) + cols).clamp(0, last);
        // both are clamped into 0..size
        self.key_cursor = Coord::new(row as u32, col as u32);
        let cell = self.board.coord_to_index(self.key_cursor);
        self.hover(Some(cell))
    }

    /// Leave/enter pair for a change of hovered cell.
    fn hover(&mut self, cell: Option<CellIndex>) -> Vec<Command> {
        if cell == self.hovered {
            return Vec::new();
        }

        let mut commands = Vec::with_capacity(2);
        if let Some(previous) = self.hovered {
            commands.push(Command::Dispatch(InputEvent::CellLeave(previous)));
        }
        if let Some(next) = cell {
            commands.push(Command::Dispatch(InputEvent::CellEnter(next)));
        }
        self.hovered = cell;
        commands
    }
}
