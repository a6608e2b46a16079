//! Errors raised by the game store.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which step of talking to the store failed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbErrorKind {
    /// The database file could not be opened.
    #[display("connect")]
    Connect,
    /// The schema could not be created or upgraded.
    #[display("migrate")]
    Migrate,
    /// A read or write statement failed.
    #[display("query")]
    Query,
    /// A stored value does not map back onto a game.
    #[display("decode")]
    Decode,
}

/// Store error tagged with its kind and the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Game store {} failure: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failed step.
    pub kind: DbErrorKind,
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error of `kind`, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`DbErrorKind::Decode`] error.
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Decode, message)
    }

    /// The failed step.
    pub fn kind(&self) -> DbErrorKind {
        self.kind
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connect, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_kind_and_location() {
        let err = DbError::decode("Invalid winner: 'Z'");
        let text = err.to_string();
        assert_eq!(err.kind(), DbErrorKind::Decode);
        assert!(text.starts_with("Game store decode failure: Invalid winner: 'Z' at "));
        assert!(text.contains("error.rs"));
    }

    #[test]
    fn test_diesel_errors_are_query_failures() {
        let err = DbError::from(diesel::result::Error::NotFound);
        assert_eq!(err.kind(), DbErrorKind::Query);
    }
}
