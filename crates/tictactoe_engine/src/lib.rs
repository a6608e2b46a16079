//! Pure tic-tac-toe rules for a two-player console game.
//!
//! The engine owns the board, the player to move and the chronological move
//! log for exactly one game. It performs no I/O; drivers submit positions,
//! ask for the outcome and hand the finished move log to a recorder.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameOutcome, Placement, Player, Position};
//!
//! let mut engine = GameEngine::new();
//! for number in [1, 4, 2, 5, 3] {
//!     let position = Position::from_number(number).unwrap();
//!     assert!(matches!(engine.submit_move(position), Placement::Accepted(_)));
//!     if engine.evaluate_outcome().is_some() {
//!         break;
//!     }
//!     engine.advance_turn();
//! }
//! assert_eq!(engine.evaluate_outcome(), Some(GameOutcome::Win(Player::X)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod invariants;
mod position;
mod rules;
mod types;

pub use action::{Move, Placement, Rejection};
pub use engine::{GameEngine, GameOutcome, MIN_MOVES_FOR_WIN, ReplayError, Snapshot};
pub use invariants::{
    AlternatingTurnInvariant, EngineInvariants, HistoryMatchesBoardInvariant, Invariant,
    InvariantSet, InvariantViolation, UniqueCellsInvariant,
};
pub use position::{InvalidPosition, Position};
pub use rules::{LINES, has_line, is_full};
pub use types::{Board, Player, Square};
