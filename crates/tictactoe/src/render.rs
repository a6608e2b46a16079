//! Console rendering of boards, banners and recorded games.

use std::fmt;
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tictactoe_engine::{Board, Position, Square};
use tracing::instrument;

use crate::{GameRecord, Tally};

/// Welcome banner and rules shown before the first move.
pub const WELCOME_BANNER: &str = concat!(
    "\n\n",
    "  ╔══════════════════════════════════════════════╗\n",
    "  ║                                              ║\n",
    "  ║             Welcome to Tic-Tac-Toe!          ║\n",
    "  ║                                              ║\n",
    "  ╚══════════════════════════════════════════════╝\n\n",
    "  Rules:\n",
    "  - Two players take turns marking a space on a 3x3 grid.\n",
    "  - The first player to get three of their marks in a row ",
    "(horizontally, vertically, or diagonally) wins.\n",
    "  - If all spaces are filled and no player has three in a row, it's a draw.\n\n",
);

/// Displays a board as a grid. Empty squares show their position number.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.0.rows().iter().enumerate() {
            let cells: Vec<String> = squares
                .iter()
                .enumerate()
                .map(|(col, square)| match square {
                    Square::Occupied(player) => player.symbol().to_string(),
                    Square::Empty => Position::from_cell(row, col)
                        .map(|pos| pos.number().to_string())
                        .unwrap_or_default(),
                })
                .collect();
            writeln!(f, "  {}", cells.join(" | "))?;
            if row < 2 {
                writeln!(f, " ---|---|---")?;
            }
        }
        Ok(())
    }
}

/// Clears the terminal and homes the cursor.
///
/// # Errors
///
/// Returns the underlying I/O error if the escape sequence cannot be written.
#[instrument(skip(out))]
pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Formats a recorded game: header line, then its moves in order.
#[instrument(skip(record), fields(game_id = %record.id()))]
pub fn render_record(record: &GameRecord) -> String {
    let mut text = format!(
        "Game #{} ({}): {}\n",
        record.id(),
        record.created_at().format("%Y-%m-%d %H:%M:%S"),
        record.outcome()
    );
    for (ply, mv) in record.moves().iter().enumerate() {
        text.push_str(&format!(
            "  {:>2}. {} at position {} (row {}, col {})\n",
            ply + 1,
            mv.player(),
            mv.position(),
            mv.row(),
            mv.col()
        ));
    }
    text
}

/// Formats the tally of all recorded games.
pub fn render_tally(tally: &Tally) -> String {
    format!(
        "Games played: {}\nX wins: {}\nO wins: {}\nDraws: {} ({:.1}%)\n",
        tally.games(),
        tally.x_wins(),
        tally.o_wins(),
        tally.draws(),
        tally.draw_rate()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::GameEngine;

    #[test]
    fn test_empty_board_shows_numbers() {
        let board = Board::new();
        let text = BoardView(&board).to_string();
        assert_eq!(
            text,
            "  1 | 2 | 3\n ---|---|---\n  4 | 5 | 6\n ---|---|---\n  7 | 8 | 9\n"
        );
    }

    #[test]
    fn test_marks_replace_numbers() {
        let engine = GameEngine::replay(&[Position::Center, Position::TopLeft])
            .expect("valid replay");
        let text = BoardView(engine.board()).to_string();
        assert!(text.starts_with("  O | 2 | 3\n"));
        assert!(text.contains("  4 | X | 6\n"));
    }

    #[test]
    fn test_clear_screen_writes_escape_codes() {
        let mut out = Vec::new();
        clear_screen(&mut out).expect("write to vec");
        assert!(!out.is_empty());
    }

    #[test]
    fn test_render_tally() {
        let text = render_tally(&Tally::new(4, 2, 1, 1));
        assert!(text.contains("X wins: 2"));
        assert!(text.contains("Draws: 1 (25.0%)"));
    }
}
