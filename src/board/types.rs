//! Minesweeper grid data structures.
//!
//! A square grid of cells indexed as `grid[row][col]`.

use thiserror::Error;

/// Represents a single cell in the minesweeper grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) has_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    /// Number of adjacent mines (0-8).
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            has_mine: false,
            revealed: false,
            flagged: false,
            adjacent_mines: 0,
        }
    }

    /// Flip the flag. Callers decide whether the cell may be flagged.
    pub fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }
}

/// Board setup failures. All of them are fatal configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("a {size}x{size} grid has more cells than can be addressed")]
    GridTooLarge { size: usize },
    #[error("{mines} mines do not fit on a grid of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("mine at ({row}, {col}) is outside a {size}x{size} grid")]
    MineOutOfBounds { row: usize, col: usize, size: usize },
}

/// Square minefield owning all of its cells.
#[derive(Debug, Clone)]
pub struct Board {
    /// The game grid, indexed as grid[row][col].
    pub(crate) grid: Vec<Vec<Cell>>,
    /// Number of rows and columns.
    pub(crate) size: usize,
    /// Number of mine cells.
    pub(crate) mine_count: usize,
    /// Number of non-mine cells revealed so far.
    pub(crate) safe_revealed: usize,
}

/// Number of cells on a `size x size` grid, or `GridTooLarge` when that
/// overflows `usize`.
pub(crate) fn cell_count(size: usize) -> Result<usize, BoardError> {
    size.checked_mul(size).ok_or(BoardError::GridTooLarge { size })
}

impl Board {
    /// Allocate an empty `size x size` grid. Mines and counts are filled in by
    /// `place_mines` and `compute_adjacency`.
    pub(crate) fn empty(size: usize) -> Self {
        let grid = (0..size)
            .map(|row| (0..size).map(|col| Cell::new(row, col)).collect())
            .collect();

        Self {
            grid,
            size,
            mine_count: 0,
            safe_revealed: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    /// Whether (row, col) lies on the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Checked cell lookup.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row)?.get(col)
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    /// # Panics
    /// Panics if (row, col) is off the grid.
    pub fn is_mine(&self, row: usize, col: usize) -> bool {
        self.grid[row][col].has_mine
    }

    /// # Panics
    /// Panics if (row, col) is off the grid.
    pub fn is_revealed(&self, row: usize, col: usize) -> bool {
        self.grid[row][col].revealed
    }

    /// # Panics
    /// Panics if (row, col) is off the grid.
    pub fn is_flagged(&self, row: usize, col: usize) -> bool {
        self.grid[row][col].flagged
    }

    /// # Panics
    /// Panics if (row, col) is off the grid.
    pub fn adjacent_mine_count(&self, row: usize, col: usize) -> u8 {
        self.grid[row][col].adjacent_mines
    }

    /// Flip the flag on a cell. Does not check whether the cell is revealed.
    ///
    /// # Panics
    /// Panics if (row, col) is off the grid.
    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        self.grid[row][col].toggle_flag();
    }

    /// Number of flags on unrevealed cells.
    pub fn flags_placed(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.flagged && !cell.revealed)
            .count()
    }

    /// Mines minus flags. Negative when the player over-flags.
    pub fn mines_remaining(&self) -> i64 {
        self.mine_count as i64 - self.flags_placed() as i64
    }

    pub fn safe_cells_revealed(&self) -> usize {
        self.safe_revealed
    }

    /// True once every non-mine cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        cell_count(self.size).is_ok_and(|cells| self.safe_revealed + self.mine_count == cells)
    }
}
