//! UI rendering with Ratatui on top of the [`Screen`] model.
//!
//! Layout: header, board beside a detail panel, message log, footer.
//! Each board cell is [`CELL_WIDTH`] columns by one row, which is what
//! [`cell_at`] inverts for mouse hit testing.
use anyhow::Result;
use game_core::{Board, CellIndex, Coord, Side, UnitKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use runtime::{Highlight, Theme};

use super::screen::{MessageLevel, Screen};
use super::terminal::Tui;

pub const CELL_WIDTH: u16 = 4;
pub const MESSAGE_PANEL_HEIGHT: u16 = 7;

pub fn render(terminal: &mut Tui, screen: &mut Screen, board: &Board) -> Result<()> {
    let mut board_area = screen.board_area;
    terminal.draw(|frame| board_area = render_frame(frame, screen, board))?;
    screen.board_area = board_area;
    Ok(())
}

/// Board cell under a terminal position, if any.
pub fn cell_at(area: Rect, board: &Board, column: u16, row: u16) -> Option<CellIndex> {
    if column < area.x || row < area.y {
        return None;
    }
    let col = u32::from((column - area.x) / CELL_WIDTH);
    let row = u32::from(row - area.y);
    let coord = Coord::new(row, col);
    board
        .contains_coord(coord)
        .then(|| board.coord_to_index(coord))
}

fn render_frame(frame: &mut Frame, screen: &Screen, board: &Board) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(MESSAGE_PANEL_HEIGHT),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], screen);

    let board_width = u16::try_from(board.size())
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(0)])
        .split(chunks[1]);

    let board_area = render_board(frame, middle[0], screen, board);
    render_details(frame, middle[1], screen);
    render_messages(frame, chunks[2], screen);
    render_footer(frame, chunks[3]);
    board_area
}

fn render_header(frame: &mut Frame, area: Rect, screen: &Screen) {
    let status = screen.status;
    let turn = if status.blocked {
        Span::styled("game over", Style::default().fg(Color::Magenta))
    } else {
        match status.turn {
            Side::Home => Span::styled("your turn", Style::default().fg(Color::LightGreen)),
            Side::Opponent => Span::styled("opponent", Style::default().fg(Color::LightRed)),
        }
    };

    let text = Line::from(vec![
        Span::raw("Stage: "),
        Span::styled(
            status.stage.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Score: "),
        Span::styled(status.score.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        turn,
        Span::raw(" | Cursor: "),
        Span::raw(screen.cursor.as_ref().to_string()),
    ]);

    let header = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Skirmish ({})", screen.theme)),
    );
    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, area: Rect, screen: &Screen, board: &Board) -> Rect {
    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);

    let lines: Vec<Line> = (0..board.size())
        .map(|row| {
            let spans: Vec<Span> = (0..board.size())
                .map(|col| {
                    let cell = board.coord_to_index(Coord::new(row, col));
                    cell_span(screen, cell, (row + col) % 2 == 0)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
    inner
}

fn cell_span(screen: &Screen, cell: CellIndex, light: bool) -> Span<'static> {
    let background = match screen.highlights.get(&cell) {
        Some(marks) if marks.contains(Highlight::RED) => Color::Red,
        Some(marks) if marks.contains(Highlight::GREEN) => Color::Green,
        Some(marks) if marks.contains(Highlight::YELLOW) => Color::Yellow,
        _ => tile_color(screen.theme, light),
    };
    let style = Style::default().bg(background);

    if let Some((flashed, damage)) = screen.flash {
        if flashed == cell {
            return Span::styled(
                format!("{:^4}", format!("-{damage}")),
                style.fg(Color::White).add_modifier(Modifier::BOLD),
            );
        }
    }

    match screen.unit_at(cell) {
        Some(entry) => {
            let colour = match entry.unit.side() {
                Side::Home => Color::Blue,
                Side::Opponent => Color::Black,
            };
            Span::styled(
                format!(" {}{} ", glyph(entry.unit.kind), entry.unit.level),
                style.fg(colour).add_modifier(Modifier::BOLD),
            )
        }
        None => Span::styled("    ", style),
    }
}

fn glyph(kind: UnitKind) -> char {
    match kind {
        UnitKind::Swordsman => 'S',
        UnitKind::Bowman => 'B',
        UnitKind::Magician => 'M',
        UnitKind::Daemon => 'D',
        UnitKind::Undead => 'U',
        UnitKind::Vampire => 'V',
    }
}

fn tile_color(theme: Theme, light: bool) -> Color {
    let (base, shade) = match theme {
        Theme::Prairie => ((126, 178, 88), (108, 156, 72)),
        Theme::Desert => ((224, 196, 132), (204, 174, 112)),
        Theme::Arctic => ((214, 230, 240), (190, 210, 226)),
        Theme::Mountain => ((150, 140, 128), (128, 118, 108)),
    };
    let (r, g, b) = if light { base } else { shade };
    Color::Rgb(r, g, b)
}

fn render_details(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut lines = Vec::new();
    if let Some((text, cell)) = &screen.tooltip {
        if let Some(entry) = screen.unit_at(*cell) {
            lines.push(Line::from(Span::styled(
                format!("{} ({})", entry.unit.kind, entry.unit.side()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(text.clone()));
        lines.push(Line::from(format!("cell {cell}")));
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Unit"));
    frame.render_widget(panel, area);
}

fn render_messages(frame: &mut Frame, area: Rect, screen: &Screen) {
    let visible = usize::from(MESSAGE_PANEL_HEIGHT.saturating_sub(2));
    let items: Vec<ListItem> = screen
        .messages
        .recent(visible)
        .map(|entry| {
            let style = match entry.level {
                MessageLevel::Info => Style::default().fg(Color::Gray),
                MessageLevel::Notice => Style::default().fg(Color::Yellow),
                MessageLevel::Error => Style::default().fg(Color::LightRed),
            };
            ListItem::new(Line::from(Span::styled(entry.text.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Messages"));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("mouse/arrows", Style::default().fg(Color::Cyan)),
        Span::raw(" hover  "),
        Span::styled("click/enter", Style::default().fg(Color::Cyan)),
        Span::raw(" select or act  "),
        Span::styled("n", Style::default().fg(Color::Cyan)),
        Span::raw(" new  "),
        Span::styled("s", Style::default().fg(Color::Cyan)),
        Span::raw(" save  "),
        Span::styled("l", Style::default().fg(Color::Cyan)),
        Span::raw(" load  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_columns_in_cell_widths() {
        let board = Board::new(8);
        let area = Rect::new(1, 4, 32, 8);

        assert_eq!(cell_at(area, &board, 1, 4), Some(CellIndex(0)));
        assert_eq!(cell_at(area, &board, 4, 4), Some(CellIndex(0)));
        assert_eq!(cell_at(area, &board, 5, 4), Some(CellIndex(1)));
        assert_eq!(cell_at(area, &board, 9, 6), Some(CellIndex(18)));
        assert_eq!(cell_at(area, &board, 0, 4), None);
        assert_eq!(cell_at(area, &board, 33, 4), None);
        assert_eq!(cell_at(area, &board, 1, 12), None);
    }
}
