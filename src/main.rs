//! blocktui — classic falling-block puzzle game in the terminal.

mod app;
mod board;
mod game;
mod input;
mod piece;
mod placement;
mod ui;

use anyhow::Result;
use app::{App, Ending};
use clap::Parser;
use piece::PIECE_SIZE;
use thiserror::Error;

/// Largest board side accepted from the command line.
pub const MAX_BOARD_SIDE: u16 = 256;

/// Options derived from CLI that affect game behaviour (board size, pacing, seed).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub tick_ms: u64,
    pub seed: Option<u64>,
    pub no_animation: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width {0} is too narrow; pieces need at least {min} columns", min = PIECE_SIZE)]
    TooNarrow(u16),
    #[error("board height must be at least 1")]
    NoRows,
    #[error("board side {0} is too large; at most {max} cells per side", max = MAX_BOARD_SIDE)]
    TooLarge(u16),
    #[error("tick interval must be at least 1 ms")]
    ZeroTick,
}

impl TryFrom<&Args> for GameConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if (args.width as usize) < PIECE_SIZE {
            return Err(ConfigError::TooNarrow(args.width));
        }
        if args.height == 0 {
            return Err(ConfigError::NoRows);
        }
        if let Some(side) = [args.width, args.height].into_iter().find(|&s| s > MAX_BOARD_SIDE) {
            return Err(ConfigError::TooLarge(side));
        }
        if args.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(Self {
            width: args.width as usize,
            height: args.height as usize,
            tick_ms: args.tick_ms,
            seed: args.seed,
            no_animation: args.no_animation,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::try_from(&args)?;
    let mut app = App::new(config);
    match app.run()? {
        Ending::GameOver => println!("Game Over!"),
        Ending::Quit => {}
    }
    Ok(())
}

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blocktui",
    version,
    about = "Falling-block puzzle in the terminal. Complete rows to clear them; the game ends when a new piece cannot enter.",
    long_about = "blocktui is a small terminal falling-block puzzle.\n\n\
        Pieces appear at the top centre and only move when you move them. A piece \
        locks as soon as it cannot go further down; full rows disappear and the \
        rows above drop. The game ends when a new piece is blocked at the top.\n\n\
        CONTROLS:\n  a / Left / h   Move left    d / Right / l   Move right\n  \
        s / Down / j   Drop one row  w / Up / k      Rotate\n  q / Esc        Quit"
)]
pub struct Args {
    /// Board width in columns (4 to 256).
    #[arg(long, default_value = "12", value_name = "COLS")]
    pub width: u16,

    /// Board height in rows (1 to 256).
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub height: u16,

    /// Milliseconds per tick (input poll, update, redraw).
    #[arg(long, default_value = "16", value_name = "MS")]
    pub tick_ms: u64,

    /// Seed for the piece sequence. Random if not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Disable line-clear flash.
    #[arg(long)]
    pub no_animation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("blocktui").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_classic_board() {
        let config = GameConfig::try_from(&parse(&[])).unwrap();
        assert_eq!((config.width, config.height), (12, 20));
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.seed, None);
        assert!(!config.no_animation);
    }

    #[test]
    fn flags_are_applied() {
        let args = parse(&[
            "--width", "10", "--height", "24", "--tick-ms", "50", "--seed", "7", "--no-animation",
        ]);
        let config = GameConfig::try_from(&args).unwrap();
        assert_eq!((config.width, config.height), (10, 24));
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.seed, Some(7));
        assert!(config.no_animation);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            GameConfig::try_from(&parse(&["--width", "3"])).unwrap_err(),
            ConfigError::TooNarrow(3)
        );
        assert_eq!(
            GameConfig::try_from(&parse(&["--height", "0"])).unwrap_err(),
            ConfigError::NoRows
        );
        assert_eq!(
            GameConfig::try_from(&parse(&["--tick-ms", "0"])).unwrap_err(),
            ConfigError::ZeroTick
        );
    }

    #[test]
    fn rejects_oversized_board() {
        assert_eq!(
            GameConfig::try_from(&parse(&["--height", "65535"])).unwrap_err(),
            ConfigError::TooLarge(65535)
        );
        assert_eq!(
            GameConfig::try_from(&parse(&["--width", "257"])).unwrap_err(),
            ConfigError::TooLarge(257)
        );
        let config = GameConfig::try_from(&parse(&["--width", "256", "--height", "256"])).unwrap();
        assert_eq!((config.width, config.height), (256, 256));
    }

    #[test]
    fn rejects_non_numeric_width() {
        assert!(Args::try_parse_from(["blocktui", "--width", "wide"]).is_err());
    }
}
