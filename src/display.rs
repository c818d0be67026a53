//! Boundary between the game core and whatever draws it and reads input.

use std::io;

use crate::board::Board;
use crate::controller::GameStatus;

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    /// Reveal (left button).
    Primary,
    /// Flag (right button).
    Secondary,
}

/// Raw input reported by a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Click at screen coordinates (terminal column, row).
    Click { x: u16, y: u16, button: ClickButton },
}

/// Renders the board and reports input.
pub trait Display {
    /// Wait briefly for input and return every pending event in arrival order.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Map screen coordinates to a grid cell (row, col), or `None` when the
    /// point is not over the grid.
    fn pixel_to_cell(&self, x: u16, y: u16) -> Option<(usize, usize)>;

    /// Draw the current board. Never mutates it.
    fn render(&mut self, board: &Board, status: GameStatus) -> io::Result<()>;
}
