//! The game engine: board state, turn order and outcome detection.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

#[cfg(debug_assertions)]
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules::{has_line, is_full};
use crate::{Board, Move, Placement, Player, Position, Rejection, Square};

/// Fewest plies after which a line can exist (X needs three marks).
pub const MIN_MOVES_FOR_WIN: usize = 5;

/// Terminal result of a game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A player completed a line.
    #[display("Player {} wins!", _0)]
    Win(Player),
    /// All nine squares filled with no line.
    #[display("It's a draw!")]
    Draw,
}

impl GameOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(*player),
            GameOutcome::Draw => None,
        }
    }
}

/// Read-only copy of the engine state for rendering and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Snapshot {
    /// The board.
    board: Board,
    /// Player whose turn it is.
    current_player: Player,
    /// Number of accepted moves.
    move_count: usize,
    /// Accepted moves in chronological order.
    moves: Vec<Move>,
}

/// A replayed move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Replay move #{} at position {} rejected: {}", index, position, rejection)]
pub struct ReplayError {
    /// Zero-based index into the replayed sequence.
    pub index: usize,
    /// The rejected position.
    pub position: Position,
    /// Why the engine refused it.
    pub rejection: Rejection,
}

/// Tic-tac-toe engine for a single game.
///
/// A driver submits a move, evaluates the outcome and, while the game is
/// still running, advances the turn:
///
/// ```text
/// submit_move -> Accepted -> evaluate_outcome -> None -> advance_turn
///             -> Rejected (nothing changed, ask again)
/// ```
///
/// The move count is the length of the move log, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) moves: Vec<Move>,
}

impl GameEngine {
    /// Creates a game with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing game engine");
        Self {
            board: Board::new(),
            current_player: Player::X,
            moves: Vec::with_capacity(9),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose mark the next accepted move places.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of accepted moves.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Accepted moves in chronological order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Places the current player's mark at `position`.
    ///
    /// An occupied square, or any move after the game has ended, is
    /// rejected without touching the board, the turn or the move log.
    #[instrument(skip(self), fields(player = %self.current_player, move_count = self.moves.len()))]
    pub fn submit_move(&mut self, position: Position) -> Placement {
        if self.is_terminal() {
            warn!("Move submitted after the game ended");
            return Placement::Rejected(Rejection::GameOver);
        }

        if !self.board.is_empty(position) {
            warn!(position = %position, "Square already occupied");
            return Placement::Rejected(Rejection::OccupiedCell(position));
        }

        let mv = Move::new(self.current_player, position);
        self.board.set(position, Square::Occupied(self.current_player));
        self.moves.push(mv);
        debug!(row = mv.row(), col = mv.col(), "Move accepted");

        #[cfg(debug_assertions)]
        if let Err(violations) = EngineInvariants::check_all(self) {
            panic!("Engine invariants violated: {violations:?}");
        }

        Placement::Accepted(mv)
    }

    /// Submits a move by its user-facing number (1-9).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPosition`](crate::InvalidPosition) without touching
    /// the game if `number` is outside 1-9.
    #[instrument(skip(self))]
    pub fn submit_number(&mut self, number: i64) -> Result<Placement, crate::InvalidPosition> {
        let position = Position::from_number(number)?;
        Ok(self.submit_move(position))
    }

    /// Hands the turn to the other player.
    ///
    /// Only the player who placed the latest mark can pass the turn on, so
    /// this does nothing before the first move, when called twice after one
    /// move, or once the game is over.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn advance_turn(&mut self) {
        if self.is_terminal() {
            warn!("Turn advance requested after the game ended");
            return;
        }

        let last_mover = self.moves.last().map(|mv| mv.player());
        if last_mover != Some(self.current_player) {
            warn!("Turn already passed; waiting for a move");
            return;
        }

        self.current_player = self.current_player.opponent();
        debug!(next = %self.current_player, "Turn advanced");

        #[cfg(debug_assertions)]
        if let Err(violations) = EngineInvariants::check_all(self) {
            panic!("Engine invariants violated: {violations:?}");
        }
    }

    /// Evaluates the board after the latest accepted move.
    ///
    /// Returns `None` before [`MIN_MOVES_FOR_WIN`] moves. Otherwise checks
    /// all eight lines for the player who made the latest move, then
    /// reports a draw once all nine squares are filled.
    #[instrument(skip(self), fields(move_count = self.moves.len()))]
    pub fn evaluate_outcome(&self) -> Option<GameOutcome> {
        if self.moves.len() < MIN_MOVES_FOR_WIN {
            return None;
        }

        let mover = self.moves.last()?.player();
        if has_line(&self.board, mover) {
            debug!(winner = %mover, "Line completed");
            return Some(GameOutcome::Win(mover));
        }

        if self.moves.len() == 9 {
            debug_assert!(is_full(&self.board));
            debug!("Board full without a line");
            return Some(GameOutcome::Draw);
        }

        None
    }

    /// Returns true once the game has a winner or is drawn.
    pub fn is_terminal(&self) -> bool {
        self.evaluate_outcome().is_some()
    }

    /// Positions still open on the board.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::open_positions(&self.board)
    }

    /// Copies the current state for rendering or persistence.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current_player: self.current_player,
            move_count: self.moves.len(),
            moves: self.moves.clone(),
        }
    }

    /// Rebuilds a game by playing `positions` in order, alternating players.
    ///
    /// Stops early if the game ends; any positions after that are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] for the first position the engine rejects.
    #[instrument(skip(positions), fields(count = positions.len()))]
    pub fn replay(positions: &[Position]) -> Result<Self, ReplayError> {
        let mut engine = Self::new();

        for (index, position) in positions.iter().copied().enumerate() {
            match engine.submit_move(position) {
                Placement::Accepted(_) => {
                    if engine.evaluate_outcome().is_none() {
                        engine.advance_turn();
                    }
                }
                Placement::Rejected(rejection) => {
                    return Err(ReplayError {
                        index,
                        position,
                        rejection,
                    });
                }
            }
        }

        info!(move_count = engine.move_count(), "Game replayed");
        Ok(engine)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
