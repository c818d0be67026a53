//! Crossterm/ratatui implementation of `Display`.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use super::board_scene::{cell_at, render_board};
use crate::board::Board;
use crate::constants::POLL_INTERVAL_MS;
use crate::controller::GameStatus;
use crate::display::{ClickButton, Display, InputEvent};

/// Full-screen terminal display with mouse capture. The terminal is restored
/// when this is dropped.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Where the grid was drawn last frame, and its size in cells.
    grid: Option<(Rect, usize)>,
    poll_interval: Duration,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        // Drop only runs once Self exists, so undo raw mode by hand until then
        let terminal = undo_on_error(Self::enter_screen(), || {
            let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(Self {
            terminal,
            grid: None,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        })
    }

    fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    /// Block until any key press or mouse press.
    pub fn wait_for_dismiss(&mut self) -> io::Result<()> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    return Ok(())
                }
                _ => {}
            }
        }
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

impl Display for TerminalDisplay {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();

        if event::poll(self.poll_interval)? {
            // Drain everything already queued
            loop {
                if let Some(input) = translate_event(&event::read()?) {
                    events.push(input);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        Ok(events)
    }

    fn pixel_to_cell(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let (grid, size) = self.grid?;
        cell_at(grid, size, x, y)
    }

    fn render(&mut self, board: &Board, status: GameStatus) -> io::Result<()> {
        let mut grid = Rect::default();
        self.terminal.draw(|frame| {
            grid = render_board(frame, frame.size(), board, status);
        })?;
        self.grid = Some((grid, board.size()));
        Ok(())
    }
}

/// Run `undo` when `result` is an error, then pass the result through.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Map a crossterm event to game input. Unrelated events yield `None`.
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            _ => None,
        },
        Event::Mouse(mouse) => {
            let button = match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => ClickButton::Primary,
                MouseEventKind::Down(MouseButton::Right) => ClickButton::Secondary,
                _ => return None,
            };
            Some(InputEvent::Click {
                x: mouse.column,
                y: mouse.row,
                button,
            })
        }
        _ => None,
    }
}
