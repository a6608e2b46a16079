//! Console driver for one game: prompts, renders and records.

use std::io::{self, BufRead, Write};

use derive_getters::Getters;
use derive_more::{Display, Error};
use tictactoe_engine::{GameEngine, GameOutcome, Move, Placement, Player, Position, Snapshot};
use tracing::{debug, error, info, instrument, warn};

use crate::render::{BoardView, WELCOME_BANNER, clear_screen};
use crate::{AppConfig, DbError, GameId, GameStore};

/// Errors that end a console session before the game is decided.
#[derive(Debug, Display, Error)]
pub enum SessionError {
    /// Input ran out before the game reached an outcome.
    #[display("Input ended before the game finished")]
    InputClosed,
    /// Reading input or writing output failed.
    #[display("Console I/O error: {}", _0)]
    Io(io::Error),
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result of a finished console game.
///
/// The outcome stands whether or not the store accepted it; `record`
/// reports which.
#[derive(Debug, Getters)]
pub struct SessionSummary {
    outcome: GameOutcome,
    moves: Vec<Move>,
    record: Result<GameId, DbError>,
}

impl SessionSummary {
    /// Returns true if the game was persisted.
    pub fn is_recorded(&self) -> bool {
        self.record.is_ok()
    }
}

/// Plays one game between two people sharing a console.
#[derive(Debug)]
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    config: AppConfig,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    /// Creates a session reading moves from `input` and drawing to `output`.
    pub fn new(input: R, output: W, config: AppConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Consumes the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs a full game, then records it in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if input ends or console I/O fails before
    /// an outcome is reached. Nothing is recorded in that case. A store
    /// failure is not an error here; it is reported in the summary.
    #[instrument(skip(self, store))]
    pub fn play(&mut self, store: &impl GameStore) -> Result<SessionSummary, SessionError> {
        self.introduce()?;

        let mut engine = GameEngine::new();
        self.show_board(&engine.snapshot())?;

        let outcome = loop {
            let player = engine.current_player();
            let position = self.read_position(player)?;

            match engine.submit_move(position) {
                Placement::Accepted(mv) => {
                    debug!(%mv, "Move played");
                    self.show_board(&engine.snapshot())?;
                }
                Placement::Rejected(rejection) => {
                    debug!(%rejection, "Move rejected");
                    writeln!(self.output, "{}. Try again.", rejection)?;
                    continue;
                }
            }

            if let Some(outcome) = engine.evaluate_outcome() {
                break outcome;
            }
            engine.advance_turn();
        };

        writeln!(self.output, "{}", outcome)?;
        let moves = engine.snapshot().moves().clone();
        info!(outcome = %outcome, move_count = moves.len(), "Game finished");

        let record = store.record_game(outcome, &moves);
        match &record {
            Ok(game_id) => {
                writeln!(self.output, "Game saved as #{}.", game_id)?;
            }
            Err(e) => {
                error!(error = %e, "Failed to record game");
                writeln!(self.output, "Warning: the game result could not be saved.")?;
            }
        }
        self.output.flush()?;

        Ok(SessionSummary {
            outcome,
            moves,
            record,
        })
    }

    /// Clears the screen, prints the banner and waits for Enter.
    fn introduce(&mut self) -> Result<(), SessionError> {
        if *self.config.clear_screen() {
            self.clear();
        }
        write!(self.output, "{}", WELCOME_BANNER)?;

        if *self.config.wait_for_start() {
            write!(self.output, "Press Enter to continue...")?;
            self.output.flush()?;
            self.read_line()?.ok_or(SessionError::InputClosed)?;
        }
        Ok(())
    }

    /// Clearing is cosmetic; a failure is logged and play continues.
    fn clear(&mut self) {
        if let Err(e) = clear_screen(&mut self.output) {
            warn!(error = %e, "Failed to clear screen");
        }
    }

    fn show_board(&mut self, snapshot: &Snapshot) -> Result<(), SessionError> {
        write!(
            self.output,
            "\nCurrent Board:\n\n{}\n",
            BoardView(snapshot.board())
        )?;
        Ok(())
    }

    /// Prompts until the player types a number from 1 to 9.
    #[instrument(skip(self))]
    fn read_position(&mut self, player: Player) -> Result<Position, SessionError> {
        loop {
            write!(self.output, "Player {}, enter your move (1-9): ", player)?;
            self.output.flush()?;

            let line = self.read_line()?.ok_or(SessionError::InputClosed)?;
            let parsed = line
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|n| Position::from_number(n).ok());

            match parsed {
                Some(position) => return Ok(position),
                None => {
                    debug!(input = %line.trim(), "Invalid move input");
                    writeln!(
                        self.output,
                        "Invalid move. Please enter a number between 1 and 9."
                    )?;
                }
            }
        }
    }

    /// Reads one line. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }
}
