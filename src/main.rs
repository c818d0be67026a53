use std::fmt;
use std::io;

use minesweeper::config::{parse_args, Command, Config};
use minesweeper::constants::{CONFIG_FILE_NAME, GRID_SIZE, MINE_COUNT};
use minesweeper::controller::{GameController, GameStatus};
use minesweeper::logging;
use minesweeper::ui::TerminalDisplay;
use minesweeper::utils::persistence::app_path;
use tracing::{info, Level};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Play(cli)) => cli,
        Ok(Command::Version) => {
            println!("minesweeper {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'minesweeper --help' for usage.");
            std::process::exit(1);
        }
    };

    // Configuration problems are fatal before the terminal is touched
    let config_path = app_path(CONFIG_FILE_NAME)?;
    let mut config = Config::load(&config_path).unwrap_or_else(|e| exit_with(e));
    config.apply_args(&cli);
    if let Err(e) = config.validate() {
        exit_with(format!("Invalid configuration: {}", e));
    }

    if cli.write_config {
        config.save(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let log_path = logging::init(config.log_level().unwrap_or(Level::INFO))?;

    let board = config.generate_board().unwrap_or_else(|e| exit_with(e));
    info!(
        grid_size = GRID_SIZE,
        mine_count = MINE_COUNT,
        seed = ?config.seed,
        log = %log_path.display(),
        "session started"
    );

    let mut controller = GameController::new(board);
    // Terminal is restored when the display drops at the end of this block
    let status = {
        let mut display = TerminalDisplay::new()?;
        let status = controller.run(&mut display)?;
        if status != GameStatus::Ongoing {
            display.wait_for_dismiss()?;
        }
        status
    };

    info!(?status, "session ended");
    match status {
        GameStatus::Lost => println!("Game Over!"),
        GameStatus::Won => println!("You win!"),
        GameStatus::Ongoing => {}
    }

    Ok(())
}

fn exit_with(message: impl fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn print_help() {
    println!("Minesweeper - terminal edition\n");
    println!("Usage: minesweeper [options]\n");
    println!("Options:");
    println!("  --seed <n>      Use a fixed seed for mine placement");
    println!("  --write-config  Write ~/.minesweeper/config.json and exit");
    println!("  --version       Show version information");
    println!("  --help          Show this help message\n");
    println!("Controls:");
    println!("  Left click      Reveal a cell");
    println!("  Right click     Flag or unflag a cell");
    println!("  q / Esc         Quit");
}
