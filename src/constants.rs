// Grid constants
pub const GRID_SIZE: usize = 20;
pub const MINE_COUNT: usize = 40;

// Terminal geometry: each grid cell occupies CELL_WIDTH columns x CELL_HEIGHT rows
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

// Input polling
pub const POLL_INTERVAL_MS: u64 = 50;

// Files under ~/.minesweeper/
pub const APP_DIR_NAME: &str = ".minesweeper";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "minesweeper.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
