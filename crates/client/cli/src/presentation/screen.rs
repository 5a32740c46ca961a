//! What the terminal currently shows, independent of how it is drawn.
//!
//! The presentation gateway writes into a [`Screen`]; [`super::ui`] reads it
//! back when a frame is rendered.
use std::collections::{HashMap, VecDeque};

use game_core::{CellIndex, PositionedUnit, Side};
use ratatui::layout::Rect;
use runtime::{CursorKind, Highlight, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Notice,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
}

/// Bounded log, oldest entries dropped first.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, level: MessageLevel) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry {
            text: text.into(),
            level,
        });
    }

    /// The newest `count` entries, newest last.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Header line contents, refreshed by the app after every input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    pub stage: u32,
    pub score: u32,
    pub turn: Side,
    pub blocked: bool,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            stage: 1,
            score: 0,
            turn: Side::Home,
            blocked: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Screen {
    pub theme: Theme,
    pub units: Vec<PositionedUnit>,
    pub highlights: HashMap<CellIndex, Highlight>,
    pub tooltip: Option<(String, CellIndex)>,
    pub cursor: CursorKind,
    /// Damage number currently shown on a cell.
    pub flash: Option<(CellIndex, u32)>,
    pub messages: MessageLog,
    pub status: Status,
    /// Inner area of the board panel in the last rendered frame.
    pub board_area: Rect,
}

impl Screen {
    pub fn new(message_capacity: usize) -> Self {
        Self {
            theme: Theme::Prairie,
            units: Vec::new(),
            highlights: HashMap::new(),
            tooltip: None,
            cursor: CursorKind::Auto,
            flash: None,
            messages: MessageLog::new(message_capacity),
            status: Status::default(),
            board_area: Rect::default(),
        }
    }

    pub fn highlight(&mut self, cell: CellIndex, color: Highlight) {
        *self.highlights.entry(cell).or_insert_with(Highlight::empty) |= color;
    }

    pub fn clear_cell(&mut self, cell: CellIndex) {
        self.highlights.remove(&cell);
    }

    pub fn clear_colors(&mut self, colors: Highlight) {
        self.highlights.retain(|_, marks| {
            marks.remove(colors);
            !marks.is_empty()
        });
    }

    pub fn unit_at(&self, cell: CellIndex) -> Option<&PositionedUnit> {
        self.units.iter().find(|entry| entry.position == cell)
    }
}
