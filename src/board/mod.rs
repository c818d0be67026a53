//! Minesweeper grid: cells, mine placement, adjacency counts and flood-fill reveal.

pub mod logic;
pub mod types;

pub use logic::get_neighbors;
pub use types::{Board, BoardError, Cell};
