//! Tracing setup. Logs go to ~/.minesweeper/minesweeper.log so they never
//! draw over the terminal UI.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

use crate::constants::LOG_FILE_NAME;
use crate::utils::persistence::app_path;

pub fn log_path() -> io::Result<PathBuf> {
    app_path(LOG_FILE_NAME)
}

/// Install the global subscriber, appending to the log file.
pub fn init(level: Level) -> io::Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}
