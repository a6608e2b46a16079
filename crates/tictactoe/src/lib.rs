//! Two-player console tic-tac-toe with a SQLite game history.
//!
//! # Architecture
//!
//! - **Engine**: rules, turn order and outcomes live in `tictactoe_engine`
//! - **Recorder**: finished games and their moves are stored with diesel
//! - **Session**: the console driver that prompts, renders and records
//!
//! # Example
//!
//! ```no_run
//! use tictactoe::{AppConfig, ConsoleSession, GameRecorder};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let recorder = GameRecorder::open(config.db_path().clone())?;
//! let stdin = std::io::stdin();
//! let mut session = ConsoleSession::new(stdin.lock(), std::io::stdout(), config);
//! let summary = session.play(&recorder)?;
//! println!("{}", summary.outcome());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod render;
mod session;

pub use config::{AppConfig, ConfigError, DB_PATH_ENV};
pub use db::{
    DRAW_MARKER, DbError, DbErrorKind, GameId, GameMove, GameRecord, GameRecorder, GameResult,
    GameStore, NewGameMove, NewGameResult, OutcomeColumn, Tally,
};
pub use render::{BoardView, WELCOME_BANNER, clear_screen, render_record, render_tally};
pub use session::{ConsoleSession, SessionError, SessionSummary};
