//! # expense-ledger
//!
//! A command-line ledger for personal expenses backed by a single
//! relational table.
//!
//! Each invocation runs one command (`add`, `list`, `search`, `delete`,
//! `clear`): it connects, makes sure the `expenses` table exists, performs
//! one operation, prints the formatted result and exits.
//!
//! ## Features
//!
//! - **Exact money**: amounts are `numeric(6,2)` decimals, summed without
//!   floating-point drift
//! - **`SQLite` Storage**: local database file by default
//! - **PostgreSQL Storage**: attach to an existing `expenses` table
//!   (`postgres` feature)

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use self::core::{DeleteOutcome, Expense, NewExpense};

// Re-export storage types
pub use storage::{Connector, DEFAULT_DB_PATH, RecordStore, Selection, SqliteStorage, Storage};

// Re-export configuration types
pub use config::{Backend, ConnectionTarget, PgParams};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
