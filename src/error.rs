//! Error types for expense ledger operations.
//!
//! Two tiers exist: storage failures (connection, query, DDL, values the
//! `amount`/`created_on` columns refuse) are fatal and end the invocation
//! with a non-zero status, while command errors cover arguments that cannot
//! be interpreted at all. Missing arguments are not errors; the dispatcher
//! answers them with an instructional message.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not open a connection to the store.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Query or DDL error reported by the database engine.
    #[error("database error: {0}")]
    Database(String),

    /// The amount is not a decimal number.
    #[error("invalid input syntax for type numeric: \"{value}\"")]
    InvalidAmount {
        /// The rejected input.
        value: String,
    },

    /// The amount does not fit `numeric(6,2)`.
    #[error("numeric field overflow: {value} exceeds 4 integer digits")]
    NumericOverflow {
        /// The rejected input.
        value: String,
    },

    /// The date is not a recognised calendar date.
    #[error("invalid input syntax for type date: \"{value}\"")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The confirmation prompt could not be read.
    #[error("confirmation prompt failed: {0}")]
    Prompt(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<postgres::Error> for StorageError {
    fn from(err: postgres::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
