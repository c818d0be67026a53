//! Minesweeper - terminal game library
//!
//! The grid model and game state machine, plus the terminal display that
//! drives them.

pub mod board;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod logging;
pub mod ui;
pub mod utils;

pub use board::{Board, BoardError, Cell};
pub use controller::{ClickOutcome, GameController, GameStatus};
pub use display::{ClickButton, Display, InputEvent};
