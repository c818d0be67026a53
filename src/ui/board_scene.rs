//! Minesweeper board rendering.

use crate::board::{Board, Cell};
use crate::constants::{CELL_HEIGHT, CELL_WIDTH};
use crate::controller::GameStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel on the right.
const INFO_PANEL_WIDTH: u16 = 24;

/// Render the whole game scene. Returns the screen rectangle the grid
/// occupies, for mapping clicks back to cells.
pub fn render_board(frame: &mut Frame, area: Rect, board: &Board, status: GameStatus) -> Rect {
    frame.render_widget(Clear, area);

    // Split: Grid on left, info panel on right
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(INFO_PANEL_WIDTH),
        ])
        .split(area);

    let grid = render_grid(frame, chunks[0], board, status);
    render_info_panel(frame, chunks[1], board, status);

    if status != GameStatus::Ongoing {
        render_game_over_overlay(frame, chunks[0], status);
    }

    grid
}

/// Screen rectangle of a `size x size` grid centered in `inner`, clipped to it.
pub fn grid_rect(inner: Rect, size: usize) -> Rect {
    let cells = u16::try_from(size).unwrap_or(u16::MAX);
    let grid_width = cells.saturating_mul(CELL_WIDTH);
    let grid_height = cells.saturating_mul(CELL_HEIGHT);

    let x = inner.x + inner.width.saturating_sub(grid_width) / 2;
    let y = inner.y + inner.height.saturating_sub(grid_height) / 2;

    Rect::new(
        x,
        y,
        grid_width.min(inner.width),
        grid_height.min(inner.height),
    )
}

/// Map a screen position inside `grid` to (row, col).
pub fn cell_at(grid: Rect, size: usize, x: u16, y: u16) -> Option<(usize, usize)> {
    if x < grid.x || y < grid.y || x >= grid.right() || y >= grid.bottom() {
        return None;
    }

    let row = ((y - grid.y) / CELL_HEIGHT) as usize;
    let col = ((x - grid.x) / CELL_WIDTH) as usize;
    (row < size && col < size).then_some((row, col))
}

fn render_grid(frame: &mut Frame, area: Rect, board: &Board, status: GameStatus) -> Rect {
    let block = Block::default()
        .title(" Minesweeper ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = grid_rect(inner, board.size());

    for (row, cells) in board.rows().enumerate() {
        let y = grid.y + row as u16 * CELL_HEIGHT;
        if y >= grid.bottom() {
            break;
        }

        let spans: Vec<Span> = cells
            .iter()
            .map(|cell| {
                let (text, color) = get_cell_display(cell, status);
                Span::styled(text, Style::default().fg(color))
            })
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(grid.x, y, grid.width, CELL_HEIGHT),
        );
    }

    grid
}

/// Get the display text and color for a cell.
fn get_cell_display(cell: &Cell, status: GameStatus) -> (&'static str, Color) {
    if !cell.is_revealed() {
        if cell.is_flagged() {
            return ("F ", Color::Red);
        }
        // Show where the mines were once the game is lost
        if status == GameStatus::Lost && cell.has_mine() {
            return ("* ", Color::Red);
        }
        return ("# ", Color::Gray);
    }

    if cell.has_mine() {
        return ("* ", Color::Red);
    }

    match cell.adjacent_mines() {
        0 => (". ", Color::DarkGray),
        1 => ("1 ", Color::Blue),
        2 => ("2 ", Color::Green),
        3 => ("3 ", Color::Red),
        4 => ("4 ", Color::Magenta),
        5 => ("5 ", Color::Yellow),
        6 => ("6 ", Color::Cyan),
        7 => ("7 ", Color::Gray),
        8 => ("8 ", Color::White),
        _ => ("? ", Color::White),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, board: &Board, status: GameStatus) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let remaining = board.mines_remaining();
    let remaining_color = if remaining < 0 {
        Color::Red
    } else {
        Color::White
    };

    let (status_text, status_color) = match status {
        GameStatus::Ongoing => ("Sweeping...", Color::Green),
        GameStatus::Lost => ("Boom!", Color::Red),
        GameStatus::Won => ("Cleared!", Color::Green),
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Minesweeper",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(
                format!("{}x{}", board.size(), board.size()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Mines: ", label),
            Span::styled(
                board.mine_count().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Remaining: ", label),
            Span::styled(remaining.to_string(), Style::default().fg(remaining_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(""),
    ];

    if status == GameStatus::Ongoing {
        for control in ["[L-Click] Reveal", "[R-Click] Flag", "[Q] Quit"] {
            lines.push(Line::from(Span::styled(control, label)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over_overlay(frame: &mut Frame, area: Rect, status: GameStatus) {
    let (title, color) = match status {
        GameStatus::Won => ("Board Cleared!", Color::Green),
        _ => ("Game Over!", Color::Red),
    };

    // Center overlay
    let width = 30.min(area.width);
    let height = 5.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Any key to exit]",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
