//! Database models and the domain records built from them.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use diesel::prelude::*;
use tictactoe_engine::{GameOutcome, Move, Player, Position};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Winner column value stored for a drawn game.
pub const DRAW_MARKER: &str = "";

/// Identifier generated by the store for a recorded game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From)]
pub struct GameId(i32);

impl GameId {
    /// Returns the raw row id.
    pub fn value(self) -> i32 {
        self.0
    }
}

/// Game result row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_result)]
pub struct GameResult {
    id: i32,
    winner: String,
    created_at: NaiveDateTime,
}

impl GameResult {
    /// Parses the stored winner column into a [`GameOutcome`].
    #[instrument(skip(self), fields(winner = %self.winner))]
    pub fn parse_outcome(&self) -> Result<GameOutcome, DbError> {
        GameOutcome::from_db_string(self.winner())
    }
}

/// Insertable game result. `created_at` is filled in by the database.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_result)]
pub struct NewGameResult {
    winner: String,
}

/// Move row, owned by a [`GameResult`].
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_moves)]
#[diesel(belongs_to(GameResult, foreign_key = game_id))]
pub struct GameMove {
    id: i32,
    game_id: i32,
    player: String,
    board_row: i32,
    board_col: i32,
    created_at: NaiveDateTime,
}

impl GameMove {
    /// Converts the stored row back into an engine [`Move`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the player or cell columns hold values the
    /// engine cannot represent.
    #[instrument(skip(self), fields(move_id = self.id))]
    pub fn to_move(&self) -> Result<Move, DbError> {
        let player = Player::from_symbol(&self.player)
            .ok_or_else(|| DbError::decode(format!("Invalid player: '{}'", self.player)))?;
        let position = usize::try_from(self.board_row)
            .ok()
            .zip(usize::try_from(self.board_col).ok())
            .and_then(|(row, col)| Position::from_cell(row, col))
            .ok_or_else(|| {
                DbError::decode(format!(
                    "Invalid cell: ({}, {})",
                    self.board_row, self.board_col
                ))
            })?;
        Ok(Move::new(player, position))
    }
}

/// Insertable move row for a given game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_moves)]
pub struct NewGameMove {
    game_id: i32,
    player: String,
    board_row: i32,
    board_col: i32,
}

impl NewGameMove {
    /// Builds the row for `mv` in game `game_id`, copying row, column and
    /// player verbatim.
    pub fn from_move(game_id: GameId, mv: &Move) -> Self {
        Self::new(
            game_id.value(),
            mv.player().symbol().to_string(),
            i32::from(mv.row()),
            i32::from(mv.col()),
        )
    }
}

/// Conversion between [`GameOutcome`] and the winner column.
pub trait OutcomeColumn: Sized {
    /// Converts the outcome to the string stored in the database.
    fn to_db_string(&self) -> &'static str;

    /// Parses the outcome from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid winner value.
    fn from_db_string(s: &str) -> Result<Self, DbError>;
}

impl OutcomeColumn for GameOutcome {
    fn to_db_string(&self) -> &'static str {
        self.winner().map_or(DRAW_MARKER, Player::symbol)
    }

    fn from_db_string(s: &str) -> Result<Self, DbError> {
        if s == DRAW_MARKER {
            return Ok(GameOutcome::Draw);
        }
        Player::from_symbol(s)
            .map(GameOutcome::Win)
            .ok_or_else(|| DbError::decode(format!("Invalid winner: '{}'", s)))
    }
}

/// A recorded game with its moves in the order they were played.
#[derive(Debug, Clone, Getters)]
pub struct GameRecord {
    id: GameId,
    outcome: GameOutcome,
    created_at: NaiveDateTime,
    moves: Vec<Move>,
}

impl GameRecord {
    /// Assembles a record from a result row and its move rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any stored value fails to parse.
    #[instrument(skip(result, moves), fields(game_id = result.id, move_count = moves.len()))]
    pub fn from_rows(result: GameResult, moves: &[GameMove]) -> Result<Self, DbError> {
        Ok(Self {
            id: GameId::from(result.id),
            outcome: result.parse_outcome()?,
            created_at: result.created_at,
            moves: moves
                .iter()
                .map(GameMove::to_move)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Win/draw counts across all recorded games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct Tally {
    games: i64,
    x_wins: i64,
    o_wins: i64,
    draws: i64,
}

impl Tally {
    /// Creates a new tally.
    #[instrument]
    pub fn new(games: i64, x_wins: i64, o_wins: i64, draws: i64) -> Self {
        Self {
            games,
            x_wins,
            o_wins,
            draws,
        }
    }

    /// Share of games that ended in a draw, as a percentage (0.0-100.0).
    #[instrument(skip(self))]
    pub fn draw_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.draws as f64 / self.games as f64) * 100.0
        }
    }
}
