//! Minesweeper board logic: mine placement, adjacency counting and flood-fill reveal.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::types::cell_count;
use super::{Board, BoardError};

/// Get valid neighbor coordinates for a cell on a `size x size` grid.
///
/// Returns (row, col) tuples for all on-grid neighbors (up to 8 directions).
pub fn get_neighbors(row: usize, col: usize, size: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for d_row in -1i64..=1 {
        for d_col in -1i64..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }

            let new_row = row as i64 + d_row;
            let new_col = col as i64 + d_col;

            if new_row >= 0 && new_row < size as i64 && new_col >= 0 && new_col < size as i64 {
                neighbors.push((new_row as usize, new_col as usize));
            }
        }
    }

    neighbors
}

impl Board {
    /// Build a board with `mine_count` mines at random positions and
    /// precomputed adjacency counts.
    ///
    /// Preconditions are checked before anything is allocated.
    pub fn generate<R: Rng>(
        size: usize,
        mine_count: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::EmptyGrid);
        }
        let cells = cell_count(size)?;
        if mine_count > cells {
            return Err(BoardError::TooManyMines {
                mines: mine_count,
                cells,
            });
        }

        let mut board = Board::empty(size);
        board.place_mines(mine_count, rng)?;
        board.compute_adjacency();

        debug!(size, mine_count, "generated board");
        Ok(board)
    }

    /// Build a board with mines at exactly the given positions.
    ///
    /// Repeated positions count once.
    pub fn from_mines(size: usize, mines: &[(usize, usize)]) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::EmptyGrid);
        }
        cell_count(size)?;

        let mut board = Board::empty(size);
        for &(row, col) in mines {
            if !board.contains(row, col) {
                return Err(BoardError::MineOutOfBounds { row, col, size });
            }
            if !board.grid[row][col].has_mine {
                board.grid[row][col].has_mine = true;
                board.mine_count += 1;
            }
        }
        board.compute_adjacency();

        Ok(board)
    }

    /// Mark `mine_count` distinct cells as mines, chosen uniformly at random.
    ///
    /// Expects a board without mines.
    pub(crate) fn place_mines<R: Rng>(
        &mut self,
        mine_count: usize,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let cells = cell_count(self.size)?;
        if mine_count > cells {
            return Err(BoardError::TooManyMines {
                mines: mine_count,
                cells,
            });
        }

        let mut positions: Vec<(usize, usize)> = (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .collect();

        // Shuffle and take the required number of mines
        positions.shuffle(rng);
        for &(row, col) in positions.iter().take(mine_count) {
            self.grid[row][col].has_mine = true;
        }
        self.mine_count = mine_count;

        Ok(())
    }

    /// Calculate adjacent mine counts for all cells.
    pub(crate) fn compute_adjacency(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                let count = get_neighbors(row, col, self.size)
                    .into_iter()
                    .filter(|&(n_row, n_col)| self.grid[n_row][n_col].has_mine)
                    .count();

                self.grid[row][col].adjacent_mines = count as u8;
            }
        }
    }

    /// Reveal a cell and flood-fill outward through zero-count cells.
    ///
    /// Off-grid, revealed and flagged targets are skipped. A cell with no
    /// adjacent mines queues all of its neighbors, so the fill covers the
    /// connected zero region plus its numbered border. Does not check for
    /// mines; that is the caller's job.
    ///
    /// Returns the number of newly revealed cells.
    pub fn reveal(&mut self, row: usize, col: usize) -> usize {
        let mut stack: Vec<(usize, usize)> = vec![(row, col)];
        let mut newly_revealed = 0;

        while let Some((row, col)) = stack.pop() {
            let Some(cell) = self.grid.get_mut(row).and_then(|cells| cells.get_mut(col)) else {
                continue;
            };

            if cell.revealed || cell.flagged {
                continue;
            }

            cell.revealed = true;
            newly_revealed += 1;
            if !cell.has_mine {
                self.safe_revealed += 1;
            }

            if cell.adjacent_mines == 0 {
                stack.extend(get_neighbors(row, col, self.size));
            }
        }

        debug!(row, col, newly_revealed, "reveal");
        newly_revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn revealed_cells(board: &Board) -> Vec<(usize, usize)> {
        board
            .rows()
            .flatten()
            .filter(|cell| cell.is_revealed())
            .map(|cell| (cell.row(), cell.col()))
            .collect()
    }

    #[test]
    fn test_get_neighbors_center() {
        // Center cell should have 8 neighbors
        let neighbors = get_neighbors(4, 4, 9);
        assert_eq!(neighbors.len(), 8);

        let expected = vec![
            (3, 3),
            (3, 4),
            (3, 5),
            (4, 3),
            (4, 5),
            (5, 3),
            (5, 4),
            (5, 5),
        ];
        for pos in expected {
            assert!(neighbors.contains(&pos), "Missing neighbor {:?}", pos);
        }
    }

    #[test]
    fn test_get_neighbors_corner() {
        let neighbors = get_neighbors(0, 0, 9);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&(0, 1)));
        assert!(neighbors.contains(&(1, 0)));
        assert!(neighbors.contains(&(1, 1)));

        let neighbors = get_neighbors(8, 8, 9);
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.contains(&(7, 7)));
        assert!(neighbors.contains(&(7, 8)));
        assert!(neighbors.contains(&(8, 7)));
    }

    #[test]
    fn test_get_neighbors_edge() {
        assert_eq!(get_neighbors(0, 4, 9).len(), 5);
        assert_eq!(get_neighbors(4, 0, 9).len(), 5);
    }

    #[test]
    fn test_get_neighbors_single_cell_grid() {
        assert!(get_neighbors(0, 0, 1).is_empty());
    }

    #[test]
    fn test_generate_mine_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::generate(20, 40, &mut rng).unwrap();

        let mine_count = board.rows().flatten().filter(|cell| cell.has_mine()).count();
        assert_eq!(mine_count, 40);
        assert_eq!(board.mine_count(), 40);
    }

    #[test]
    fn test_generate_extremes() {
        let mut rng = StdRng::seed_from_u64(7);

        let none = Board::generate(5, 0, &mut rng).unwrap();
        assert_eq!(none.rows().flatten().filter(|c| c.has_mine()).count(), 0);

        let full = Board::generate(5, 25, &mut rng).unwrap();
        assert_eq!(full.rows().flatten().filter(|c| c.has_mine()).count(), 25);
        // Every cell is a mine, so the board counts as cleared from the start
        assert!(full.is_cleared());
    }

    #[test]
    fn test_generate_rejects_too_many_mines() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = Board::generate(3, 10, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            BoardError::TooManyMines { mines: 10, cells: 9 }
        );
    }

    #[test]
    fn test_generate_rejects_empty_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            Board::generate(0, 0, &mut rng).unwrap_err(),
            BoardError::EmptyGrid
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_generate_rejects_overflowing_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        let size = 1usize << 32;

        assert_eq!(
            Board::generate(size, 0, &mut rng).unwrap_err(),
            BoardError::GridTooLarge { size }
        );
        assert_eq!(
            Board::from_mines(size, &[]).unwrap_err(),
            BoardError::GridTooLarge { size }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_generate_checks_mines_before_allocating() {
        // 2^20 squared fits, but a grid that big must not be built for a bad count
        let mut rng = StdRng::seed_from_u64(42);
        let size = 1usize << 20;

        assert_eq!(
            Board::generate(size, usize::MAX, &mut rng).unwrap_err(),
            BoardError::TooManyMines {
                mines: usize::MAX,
                cells: size * size
            }
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let board1 = Board::generate(9, 10, &mut rng1).unwrap();
        let board2 = Board::generate(9, 10, &mut rng2).unwrap();

        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(
                    board1.is_mine(row, col),
                    board2.is_mine(row, col),
                    "Mine placement differs at ({}, {})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn test_adjacent_counts() {
        // Mines at (0,0), (0,1), (1,0) - forming an L in top-left
        let board = Board::from_mines(9, &[(0, 0), (0, 1), (1, 0)]).unwrap();

        assert_eq!(board.adjacent_mine_count(1, 1), 3);
        assert_eq!(board.adjacent_mine_count(0, 2), 1);
        assert_eq!(board.adjacent_mine_count(2, 0), 1);
        assert_eq!(board.adjacent_mine_count(2, 2), 0);

        // Mine cells count their mine neighbors too
        assert_eq!(board.adjacent_mine_count(0, 0), 2);
    }

    #[test]
    fn test_adjacent_counts_match_neighbors_exactly() {
        let mut rng = StdRng::seed_from_u64(1234);
        let board = Board::generate(12, 30, &mut rng).unwrap();

        for row in 0..12 {
            for col in 0..12 {
                let expected = get_neighbors(row, col, 12)
                    .into_iter()
                    .filter(|&(r, c)| board.is_mine(r, c))
                    .count() as u8;
                assert_eq!(
                    board.adjacent_mine_count(row, col),
                    expected,
                    "Wrong count at ({}, {})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn test_corner_and_edge_count_limits() {
        // Fully mined board: counts equal neighbor counts
        let mines: Vec<(usize, usize)> =
            (0..4).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
        let board = Board::from_mines(4, &mines).unwrap();

        assert_eq!(board.adjacent_mine_count(0, 0), 3);
        assert_eq!(board.adjacent_mine_count(0, 2), 5);
        assert_eq!(board.adjacent_mine_count(2, 2), 8);
    }

    #[test]
    fn test_from_mines_duplicates_and_bounds() {
        let board = Board::from_mines(3, &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(board.mine_count(), 1);

        assert_eq!(
            Board::from_mines(3, &[(3, 0)]).unwrap_err(),
            BoardError::MineOutOfBounds {
                row: 3,
                col: 0,
                size: 3
            }
        );
    }

    #[test]
    fn test_reveal_numbered_cell_stops() {
        // 3x3 with the mine in the middle: every other cell touches it
        let mut board = Board::from_mines(3, &[(1, 1)]).unwrap();

        let revealed = board.reveal(0, 0);
        assert_eq!(revealed, 1);
        assert_eq!(revealed_cells(&board), vec![(0, 0)]);
    }

    #[test]
    fn test_reveal_empty_board_floods_everything() {
        let mut board = Board::from_mines(5, &[]).unwrap();

        let revealed = board.reveal(2, 2);
        assert_eq!(revealed, 25);
        assert!(board.is_cleared());
    }

    #[test]
    fn test_reveal_flagged_is_noop() {
        let mut board = Board::from_mines(5, &[]).unwrap();
        board.toggle_flag(2, 2);

        assert_eq!(board.reveal(2, 2), 0);
        assert!(!board.is_revealed(2, 2));
        assert_eq!(board.safe_cells_revealed(), 0);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut board = Board::from_mines(5, &[(4, 4)]).unwrap();

        let first = board.reveal(0, 0);
        let before = revealed_cells(&board);

        assert_eq!(board.reveal(0, 0), 0);
        assert_eq!(revealed_cells(&board), before);
        assert_eq!(board.safe_cells_revealed(), first);
    }

    #[test]
    fn test_reveal_off_grid_is_noop() {
        let mut board = Board::from_mines(3, &[]).unwrap();

        assert_eq!(board.reveal(3, 0), 0);
        assert_eq!(board.reveal(0, usize::MAX), 0);
        assert!(revealed_cells(&board).is_empty());
    }

    #[test]
    fn test_flood_fill_stops_at_numbered_border() {
        // Mine column at col 3: cols 0-1 are zero, col 2 is the numbered border
        let mines: Vec<(usize, usize)> = (0..5).map(|r| (r, 3)).collect();
        let mut board = Board::from_mines(5, &mines).unwrap();

        board.reveal(2, 0);

        for row in 0..5 {
            // Zero region and its numbered border are open
            assert!(board.is_revealed(row, 0));
            assert!(board.is_revealed(row, 1));
            assert!(board.is_revealed(row, 2));
            // Nothing past the border
            assert!(!board.is_revealed(row, 3));
            assert!(!board.is_revealed(row, 4));
        }
        assert_eq!(board.safe_cells_revealed(), 15);
    }

    #[test]
    fn test_flood_fill_skips_flagged_cells() {
        let mut board = Board::from_mines(5, &[]).unwrap();
        board.toggle_flag(0, 4);

        let revealed = board.reveal(4, 0);
        assert_eq!(revealed, 24);
        assert!(!board.is_revealed(0, 4));
        assert!(board.is_flagged(0, 4));
    }

    #[test]
    fn test_flood_fill_handles_large_open_grid() {
        // Deep fills must not overflow the stack
        let mut board = Board::from_mines(300, &[]).unwrap();
        assert_eq!(board.reveal(0, 0), 300 * 300);
    }
}
