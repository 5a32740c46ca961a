//! [`PresentationGateway`] backed by a ratatui terminal.
//!
//! Gateway calls only update the shared [`Screen`]. The app renders after
//! each input; the damage cue renders on its own because the controller
//! waits on it mid-turn.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use game_core::{Board, CellIndex, PositionedUnit};
use ratatui::layout::Rect;
use runtime::{CursorKind, Highlight, PresentationGateway, Theme};

use super::screen::{MessageLevel, Screen, Status};
use super::terminal::Tui;
use super::ui;

pub struct TerminalPresentation {
    screen: Mutex<Screen>,
    terminal: Mutex<Tui>,
    board: Board,
    damage_delay: Duration,
}

impl TerminalPresentation {
    pub fn new(
        terminal: Tui,
        board: Board,
        damage_delay: Duration,
        message_capacity: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            screen: Mutex::new(Screen::new(message_capacity)),
            terminal: Mutex::new(terminal),
            board,
            damage_delay,
        })
    }

    fn screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn render(&self) -> anyhow::Result<()> {
        let mut terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);
        let mut screen = self.screen();
        ui::render(&mut terminal, &mut screen, &self.board)
    }

    pub fn set_status(&self, status: Status) {
        self.screen().status = status;
    }

    pub fn push_message(&self, text: impl Into<String>, level: MessageLevel) {
        self.screen().messages.push(text, level);
    }

    pub fn board_area(&self) -> Rect {
        self.screen().board_area
    }
}

#[async_trait]
impl PresentationGateway for TerminalPresentation {
    fn draw_board(&self, theme: Theme) {
        let mut screen = self.screen();
        screen.theme = theme;
        screen.highlights.clear();
        screen.units.clear();
    }

    fn redraw(&self, positions: &[PositionedUnit]) {
        self.screen().units = positions.to_vec();
    }

    fn select_cell(&self, cell: CellIndex, color: Highlight) {
        self.screen().highlight(cell, color);
    }

    fn deselect_cell(&self, cell: CellIndex) {
        self.screen().clear_cell(cell);
    }

    fn deselect_by_color(&self, colors: Highlight) {
        self.screen().clear_colors(colors);
    }

    fn show_tooltip(&self, text: &str, cell: CellIndex) {
        self.screen().tooltip = Some((text.to_string(), cell));
    }

    fn hide_tooltip(&self, cell: CellIndex) {
        let mut screen = self.screen();
        if screen.tooltip.as_ref().is_some_and(|(_, shown)| *shown == cell) {
            screen.tooltip = None;
        }
    }

    fn set_cursor(&self, cursor: CursorKind) {
        self.screen().cursor = cursor;
    }

    fn show_message(&self, text: &str) {
        self.push_message(text, MessageLevel::Notice);
    }

    fn show_error(&self, text: &str) {
        self.push_message(text, MessageLevel::Error);
    }

    async fn show_damage(&self, cell: CellIndex, damage: u32) {
        self.screen().flash = Some((cell, damage));
        if let Err(error) = self.render() {
            tracing::warn!(%error, "failed to draw damage cue");
        }

        tokio::time::sleep(self.damage_delay).await;

        self.screen().flash = None;
    }
}
