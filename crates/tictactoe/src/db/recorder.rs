//! Recorder that persists finished games and reads them back.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictactoe_engine::{GameOutcome, Move};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    DRAW_MARKER, DbError, DbErrorKind, GameId, GameMove, GameRecord, GameResult, NewGameMove,
    NewGameResult, OutcomeColumn, Tally, schema,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Destination for finished games.
///
/// The console driver records through this seam so a game's announced
/// result never depends on which store sits behind it.
pub trait GameStore {
    /// Durably stores one finished game and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if nothing was stored. A failed call leaves no
    /// partial record behind.
    fn record_game(&self, outcome: GameOutcome, moves: &[Move]) -> Result<GameId, DbError>;
}

/// SQLite-backed recorder for game results and their moves.
#[derive(Debug, Clone)]
pub struct GameRecorder {
    db_path: String,
}

impl GameRecorder {
    /// Opens the database at `db_path`, creating the schema if needed.
    ///
    /// Safe to call on every startup: applied migrations are skipped and
    /// the tables are created with `IF NOT EXISTS`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path))]
    pub fn open(db_path: impl Into<String>) -> Result<Self, DbError> {
        let recorder = Self {
            db_path: db_path.into(),
        };
        recorder.ensure_schema()?;
        info!(path = %recorder.db_path, "GameRecorder ready");
        Ok(recorder)
    }

    /// Path of the backing database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn ensure_schema(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Migrate,
                    format!("Failed to apply migrations: {}", e),
                )
            })?;
        info!(applied = applied.len(), "Schema up to date");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connect,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        conn.batch_execute("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Records a finished game: one result row plus one row per move.
    ///
    /// Both inserts run in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if either insert fails; the transaction is
    /// rolled back and nothing is stored.
    #[instrument(skip(self, moves), fields(outcome = %outcome, move_count = moves.len()))]
    pub fn record_game(&self, outcome: GameOutcome, moves: &[Move]) -> Result<GameId, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let game_id = conn.transaction::<_, DbError, _>(|conn| {
            let result = diesel::insert_into(schema::game_result::table)
                .values(&NewGameResult::new(outcome.to_db_string().to_string()))
                .returning(GameResult::as_returning())
                .get_result::<GameResult>(conn)?;
            let game_id = GameId::from(*result.id());

            let rows: Vec<NewGameMove> = moves
                .iter()
                .map(|mv| NewGameMove::from_move(game_id, mv))
                .collect();
            if !rows.is_empty() {
                diesel::insert_into(schema::game_moves::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(game_id)
        })?;

        info!(game_id = %game_id, outcome = %outcome, "Game recorded");
        Ok(game_id)
    }

    /// Loads one recorded game with its moves. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a stored value is invalid.
    #[instrument(skip(self))]
    pub fn find_game(&self, id: GameId) -> Result<Option<GameRecord>, DbError> {
        debug!(game_id = %id, "Looking up game");
        let mut conn = self.connection()?;

        let Some(result) = schema::game_result::table
            .find(id.value())
            .select(GameResult::as_select())
            .first::<GameResult>(&mut conn)
            .optional()?
        else {
            debug!("Game not found");
            return Ok(None);
        };

        let moves = GameMove::belonging_to(&result)
            .select(GameMove::as_select())
            .order(schema::game_moves::id.asc())
            .load::<GameMove>(&mut conn)?;

        GameRecord::from_rows(result, &moves).map(Some)
    }

    /// Loads the most recent games, newest first, each with its moves in
    /// play order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a stored value is invalid.
    #[instrument(skip(self))]
    pub fn recent_games(&self, limit: i64) -> Result<Vec<GameRecord>, DbError> {
        debug!(limit, "Loading recent games");
        let mut conn = self.connection()?;

        let results = schema::game_result::table
            .select(GameResult::as_select())
            .order(schema::game_result::id.desc())
            .limit(limit)
            .load::<GameResult>(&mut conn)?;

        let moves = GameMove::belonging_to(&results)
            .select(GameMove::as_select())
            .order(schema::game_moves::id.asc())
            .load::<GameMove>(&mut conn)?;

        let grouped = moves.grouped_by(&results);
        let records = results
            .into_iter()
            .zip(grouped)
            .map(|(result, moves)| GameRecord::from_rows(result, &moves))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = records.len(), "Recent games loaded");
        Ok(records)
    }

    /// Counts wins per player and draws across all recorded games.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn tally(&self) -> Result<Tally, DbError> {
        debug!("Computing tally");
        let mut conn = self.connection()?;

        let winners = schema::game_result::table
            .select(schema::game_result::winner)
            .load::<String>(&mut conn)?;

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;

        for winner in &winners {
            match winner.as_str() {
                "X" => x_wins += 1,
                "O" => o_wins += 1,
                DRAW_MARKER => draws += 1,
                other => warn!(winner = %other, "Unknown winner value"),
            }
        }

        let tally = Tally::new(winners.len() as i64, x_wins, o_wins, draws);
        info!(
            games = %tally.games(),
            x_wins = %x_wins,
            o_wins = %o_wins,
            draws = %draws,
            "Tally computed"
        );
        Ok(tally)
    }
}

impl GameStore for GameRecorder {
    fn record_game(&self, outcome: GameOutcome, moves: &[Move]) -> Result<GameId, DbError> {
        GameRecorder::record_game(self, outcome, moves)
    }
}

/// A store that failed to open. Games still play; every save reports the
/// error from opening.
impl<S: GameStore> GameStore for Result<S, DbError> {
    fn record_game(&self, outcome: GameOutcome, moves: &[Move]) -> Result<GameId, DbError> {
        match self {
            Ok(store) => store.record_game(outcome, moves),
            Err(err) => {
                warn!(error = %err, "Store unavailable; game not recorded");
                Err(err.clone())
            }
        }
    }
}
