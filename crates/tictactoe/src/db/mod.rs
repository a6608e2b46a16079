//! Database persistence for finished games and their move history.

mod error;
mod models;
mod recorder;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{
    DRAW_MARKER, GameId, GameMove, GameRecord, GameResult, NewGameMove, NewGameResult,
    OutcomeColumn, Tally,
};
pub use recorder::{GameRecorder, GameStore};
