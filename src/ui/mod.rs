//! Terminal front end: board rendering and the crossterm-backed `Display`.

pub mod board_scene;
pub mod terminal;

pub use terminal::TerminalDisplay;
