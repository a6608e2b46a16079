//! Tic-tac-toe console entry point.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, Write};
use tictactoe::{
    AppConfig, ConsoleSession, GameRecorder, SessionError, render_record, render_tally,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Play { quick: false }) {
        Command::Play { quick } => run_play(config.with_interactive(!quick)),
        Command::History { limit } => run_history(&open_recorder(&config)?, limit),
        Command::Stats => run_stats(&open_recorder(&config)?),
    }
}

/// Open the configured store, failing the command if it is unreachable
fn open_recorder(config: &AppConfig) -> Result<GameRecorder> {
    GameRecorder::open(config.db_path().clone())
        .with_context(|| format!("Failed to open game database '{}'", config.db_path()))
}

/// Play one game on stdin/stdout
///
/// An unreachable store only costs the recording; the game is still played.
#[instrument(skip_all)]
fn run_play(config: AppConfig) -> Result<()> {
    let store = GameRecorder::open(config.db_path().clone());
    match &store {
        Ok(recorder) => info!(db_path = recorder.db_path(), "Game store ready"),
        Err(e) => warn!(error = %e, "Game store unavailable; this game will not be saved"),
    }

    let stdin = io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), io::stdout().lock(), config);

    match session.play(&store) {
        Ok(summary) => {
            info!(
                outcome = %summary.outcome(),
                recorded = summary.is_recorded(),
                "Session complete"
            );
            Ok(())
        }
        Err(SessionError::InputClosed) => {
            warn!("Input closed before the game finished; nothing recorded");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print recent games
#[instrument(skip(recorder))]
fn run_history(recorder: &GameRecorder, limit: i64) -> Result<()> {
    let games = recorder.recent_games(limit)?;
    let mut out = io::stdout().lock();

    if games.is_empty() {
        writeln!(out, "No games recorded yet.")?;
    }
    for game in &games {
        writeln!(out, "{}", render_record(game))?;
    }
    Ok(())
}

/// Print the overall tally
#[instrument(skip(recorder))]
fn run_stats(recorder: &GameRecorder) -> Result<()> {
    let tally = recorder.tally()?;
    write!(io::stdout().lock(), "{}", render_tally(&tally))?;
    Ok(())
}
