//! Command-line interface for the console game.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Two-player tic-tac-toe with a saved game history
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player console tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and TICTACTOE_DB)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a game at this console
    Play {
        /// Skip clearing the screen and the "Press Enter" pause
        #[arg(long)]
        quick: bool,
    },

    /// List recently recorded games with their moves
    History {
        /// Number of games to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Show win and draw counts across all recorded games
    Stats,
}
