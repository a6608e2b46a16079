//! Moves and the result of submitting one.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Player, Position};

/// An accepted placement: a player's mark at a (row, col) cell.
///
/// Moves are appended to the engine's log exactly once, in the order they
/// were accepted, and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    player: Player,
    position: Position,
}

impl Move {
    /// Creates the move for `player` marking `position`.
    #[instrument]
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Board row (0-2).
    pub fn row(&self) -> u8 {
        self.position.cell().0 as u8
    }

    /// Board column (0-2).
    pub fn col(&self) -> u8 {
        self.position.cell().1 as u8
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position().label())
    }
}

/// Why a submitted move was not applied.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The square at the position is already occupied.
    #[display("Position {} is already occupied", _0)]
    OccupiedCell(Position),

    /// The game already has a winner or ended in a draw.
    #[display("The game is already over")]
    GameOver,
}

/// Result of submitting a move. Rejections leave the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The mark was placed and logged.
    Accepted(Move),
    /// Nothing changed.
    Rejected(Rejection),
}

impl Placement {
    /// Returns true if the move was applied.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Placement::Accepted(_))
    }
}
