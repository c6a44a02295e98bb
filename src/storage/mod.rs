//! Storage layer for the expense ledger.
//!
//! Provides the `expenses` table schema, the [`Storage`] connection trait
//! with `SQLite` and PostgreSQL implementations, and the [`RecordStore`]
//! that runs each operation on its own connection.

pub mod schema;
pub mod sqlite;
pub mod store;
mod target;
pub mod traits;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use schema::TABLE_NAME;
pub use sqlite::{SqliteConnector, SqliteStorage};
pub use store::RecordStore;
pub use traits::{Connector, Selection, Storage};

#[cfg(feature = "postgres")]
pub use self::postgres::{PostgresConnector, PostgresStorage};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".expense/expenses.db";
