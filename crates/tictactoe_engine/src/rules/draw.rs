//! Draw detection logic for tic-tac-toe.

use crate::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.rows().iter().flatten().all(|s| *s != Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, has_line};
    use strum::IntoEnumIterator;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board_without_line() {
        let mut board = Board::new();
        // X O X / O O X / X X O
        let marks = [
            Player::X,
            Player::O,
            Player::X,
            Player::O,
            Player::O,
            Player::X,
            Player::X,
            Player::X,
            Player::O,
        ];
        for (pos, mark) in Position::iter().zip(marks) {
            board.set(pos, Square::Occupied(mark));
        }
        assert!(is_full(&board));
        assert!(!has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }
}
