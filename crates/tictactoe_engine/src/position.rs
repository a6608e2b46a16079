//! Board positions and the fixed 1-9 numbering players type in.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::Board;

/// (row, col) for each position, indexed by `number - 1`.
const CELLS: [(usize, usize); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// A position on the tic-tac-toe board.
///
/// Players address cells by the numbers 1-9 in row-major order, which
/// is also how an empty board is drawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (1)
    TopLeft,
    /// Top-center (2)
    TopCenter,
    /// Top-right (3)
    TopRight,
    /// Middle-left (4)
    MiddleLeft,
    /// Center (5)
    Center,
    /// Middle-right (6)
    MiddleRight,
    /// Bottom-left (7)
    BottomLeft,
    /// Bottom-center (8)
    BottomCenter,
    /// Bottom-right (9)
    BottomRight,
}

/// A number outside the 1-9 range was used as a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Position {} is out of range (expected 1-9)", number)]
pub struct InvalidPosition {
    /// The rejected number.
    pub number: i64,
}

impl Position {
    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// The user-facing number of this position (1-9).
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Resolves a user-facing number (1-9) to a position.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPosition`] for any number outside 1-9.
    #[instrument]
    pub fn from_number(number: i64) -> Result<Self, InvalidPosition> {
        if !(1..=9).contains(&number) {
            return Err(InvalidPosition { number });
        }
        Position::iter()
            .nth((number - 1) as usize)
            .ok_or(InvalidPosition { number })
    }

    /// The (row, col) cell for this position, both in 0..3.
    pub fn cell(self) -> (usize, usize) {
        CELLS[self as usize]
    }

    /// Finds the position occupying a (row, col) cell.
    #[instrument]
    pub fn from_cell(row: usize, col: usize) -> Option<Self> {
        Position::iter().find(|pos| pos.cell() == (row, col))
    }

    /// Filters positions by board state - returns only empty squares.
    #[instrument(skip(board))]
    pub fn open_positions(board: &Board) -> Vec<Position> {
        Position::iter().filter(|pos| board.is_empty(*pos)).collect()
    }
}

impl TryFrom<u8> for Position {
    type Error = InvalidPosition;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(i64::from(number))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
