//! Presentation gateway: everything the controller asks a front-end to show.
//!
//! Only [`PresentationGateway::show_damage`] is awaited. The controller holds
//! the game state exclusively across that await, so nothing else can mutate
//! the board until the cue completes.
use async_trait::async_trait;
use game_core::{
    Board, CellIndex, GameConfig, GameState, PositionedUnit, Side, Unit, can_attack, can_move,
};

bitflags::bitflags! {
    /// Cell highlight colours. Several can be cleared at once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Highlight: u8 {
        /// The selected home unit.
        const YELLOW = 1;
        /// A free cell the selection can move to.
        const GREEN = 1 << 1;
        /// An enemy the selection can strike.
        const RED = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CursorKind {
    #[default]
    Auto,
    Pointer,
    Crosshair,
    NotAllowed,
}

/// Board theme, one per stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Prairie,
    Desert,
    Arctic,
    Mountain,
}

impl Theme {
    pub fn for_stage(stage: u32) -> Theme {
        match stage.clamp(1, GameConfig::MAX_STAGE) {
            1 => Theme::Prairie,
            2 => Theme::Desert,
            3 => Theme::Arctic,
            _ => Theme::Mountain,
        }
    }
}

#[async_trait]
pub trait PresentationGateway: Send + Sync {
    fn draw_board(&self, theme: Theme);

    fn redraw(&self, positions: &[PositionedUnit]);

    fn select_cell(&self, cell: CellIndex, color: Highlight);

    fn deselect_cell(&self, cell: CellIndex);

    fn deselect_by_color(&self, colors: Highlight);

    fn show_tooltip(&self, text: &str, cell: CellIndex);

    fn hide_tooltip(&self, cell: CellIndex);

    fn set_cursor(&self, cursor: CursorKind);

    fn show_message(&self, text: &str);

    fn show_error(&self, text: &str);

    /// Plays the damage cue on `cell`. Returns once the cue is over.
    async fn show_damage(&self, cell: CellIndex, damage: u32);
}

/// Headless gateway that draws nothing and completes every cue immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

#[async_trait]
impl PresentationGateway for NullPresentation {
    fn draw_board(&self, _theme: Theme) {}
    fn redraw(&self, _positions: &[PositionedUnit]) {}
    fn select_cell(&self, _cell: CellIndex, _color: Highlight) {}
    fn deselect_cell(&self, _cell: CellIndex) {}
    fn deselect_by_color(&self, _colors: Highlight) {}
    fn show_tooltip(&self, _text: &str, _cell: CellIndex) {}
    fn hide_tooltip(&self, _cell: CellIndex) {}
    fn set_cursor(&self, _cursor: CursorKind) {}
    fn show_message(&self, _text: &str) {}
    fn show_error(&self, _text: &str) {}
    async fn show_damage(&self, _cell: CellIndex, _damage: u32) {}
}

/// Tooltip text for a unit: medal level, swords attack, shield defence,
/// heart health.
pub fn tooltip(unit: &Unit) -> String {
    format!(
        "\u{1F396}{} \u{2694}{} \u{1F6E1}{} \u{2764}{}",
        unit.level, unit.attack, unit.defence, unit.health
    )
}

/// Cursor and optional highlight for hovering `cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverFeedback {
    pub cursor: CursorKind,
    pub highlight: Option<Highlight>,
}

impl HoverFeedback {
    const fn cursor(cursor: CursorKind) -> Self {
        Self {
            cursor,
            highlight: None,
        }
    }
}

/// Decides hover feedback from the current selection. Reads state only.
pub fn hover_feedback(state: &GameState, board: &Board, cell: CellIndex) -> HoverFeedback {
    if state.blocked {
        return HoverFeedback::cursor(CursorKind::Auto);
    }

    let hovered = state.side_at(cell);
    let Some(from) = state.selected else {
        return match hovered {
            Some(Side::Home) => HoverFeedback::cursor(CursorKind::Pointer),
            _ => HoverFeedback::cursor(CursorKind::Auto),
        };
    };

    match hovered {
        Some(Side::Home) => HoverFeedback::cursor(CursorKind::Pointer),
        None if can_move(state, board, from, cell) => HoverFeedback {
            cursor: CursorKind::Pointer,
            highlight: Some(Highlight::GREEN),
        },
        Some(Side::Opponent) if can_attack(state, board, from, cell) => HoverFeedback {
            cursor: CursorKind::Crosshair,
            highlight: Some(Highlight::RED),
        },
        _ => HoverFeedback::cursor(CursorKind::NotAllowed),
    }
}
