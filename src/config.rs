//! Session configuration: ~/.minesweeper/config.json plus command-line overrides.

use std::io;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::board::{Board, BoardError};
use crate::constants::{DEFAULT_LOG_LEVEL, GRID_SIZE, MINE_COUNT};
use crate::utils::persistence::{load_json, save_json};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
    #[error("{0}")]
    InvalidArgument(String),
}

/// Session settings. Grid size and mine count are fixed constants and are
/// not configurable; unknown keys in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed RNG seed for reproducible boards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = load_json(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        Ok(())
    }

    /// Build the session board: `GRID_SIZE` x `GRID_SIZE` with `MINE_COUNT`
    /// mines, seeded from `seed` when set.
    pub fn generate_board(&self) -> Result<Board, ConfigError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Board::generate(GRID_SIZE, MINE_COUNT, &mut rng)?)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
    }
}

/// Options for a normal run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub seed: Option<u64>,
    /// Write the effective config file and exit.
    pub write_config: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(CliArgs),
    Version,
    Help,
}

/// Parse command-line arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--write-config" => cli.write_config = true,
            "--seed" => {
                let value = args.next().ok_or_else(|| {
                    ConfigError::InvalidArgument("--seed requires a value".to_string())
                })?;
                let seed = value.parse().map_err(|_| {
                    ConfigError::InvalidArgument(format!("invalid seed: {}", value))
                })?;
                cli.seed = Some(seed);
            }
            other => {
                return Err(ConfigError::InvalidArgument(format!(
                    "Unknown command: {}",
                    other
                )))
            }
        }
    }

    Ok(Command::Play(cli))
}
