//! Game session state machine.
//!
//! Owns the board, turns clicks into board operations and drives the
//! render/input loop of a `Display`.

use std::io;
use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::board::Board;
use crate::display::{ClickButton, Display, InputEvent};

/// Session state. `Lost` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Lost,
    Won,
}

/// What a single click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// Safe reveal that opened this many cells.
    Revealed(usize),
    FlagToggled { flagged: bool },
    /// Primary click on a mine. The game is lost.
    MineHit,
    /// The reveal opened the last safe cell. The game is won.
    Cleared,
}

#[derive(Debug)]
pub struct GameController {
    board: Board,
    status: GameStatus,
}

impl GameController {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    /// Apply a click on grid cell (row, col).
    pub fn handle_click(&mut self, row: usize, col: usize, button: ClickButton) -> ClickOutcome {
        if self.is_over() || !self.board.contains(row, col) {
            return ClickOutcome::Ignored;
        }

        match button {
            ClickButton::Primary => self.reveal(row, col),
            ClickButton::Secondary => self.toggle_flag(row, col),
        }
    }

    fn reveal(&mut self, row: usize, col: usize) -> ClickOutcome {
        if self.board.is_flagged(row, col) {
            return ClickOutcome::Ignored;
        }

        // Mine check comes before any flood fill
        if self.board.is_mine(row, col) {
            self.status = GameStatus::Lost;
            info!(row, col, "mine hit, game lost");
            return ClickOutcome::MineHit;
        }

        let opened = self.board.reveal(row, col);
        if opened > 0 && self.board.is_cleared() {
            self.status = GameStatus::Won;
            info!(row, col, "board cleared, game won");
            return ClickOutcome::Cleared;
        }

        ClickOutcome::Revealed(opened)
    }

    fn toggle_flag(&mut self, row: usize, col: usize) -> ClickOutcome {
        // Flags only mean something on hidden cells
        if self.board.is_revealed(row, col) {
            return ClickOutcome::Ignored;
        }

        self.board.toggle_flag(row, col);
        let flagged = self.board.is_flagged(row, col);
        debug!(row, col, flagged, "flag toggled");
        ClickOutcome::FlagToggled { flagged }
    }

    /// Apply one input event. Breaks on `Quit`.
    pub fn handle_event<D: Display>(&mut self, display: &D, event: InputEvent) -> ControlFlow<()> {
        match event {
            InputEvent::Quit => ControlFlow::Break(()),
            InputEvent::Click { x, y, button } => {
                match display.pixel_to_cell(x, y) {
                    Some((row, col)) => {
                        self.handle_click(row, col, button);
                    }
                    None => debug!(x, y, "click outside grid ignored"),
                }
                ControlFlow::Continue(())
            }
        }
    }

    /// Run the session until the player quits or the game ends.
    ///
    /// Returns the final status; `Ongoing` means the player quit.
    pub fn run<D: Display>(&mut self, display: &mut D) -> io::Result<GameStatus> {
        display.render(&self.board, self.status)?;

        while !self.is_over() {
            for event in display.poll_events()? {
                // Input after the game ends is dropped
                if self.is_over() {
                    break;
                }
                if self.handle_event(display, event).is_break() {
                    info!("player quit");
                    return Ok(self.status);
                }
            }

            display.render(&self.board, self.status)?;
        }

        Ok(self.status)
    }
}
