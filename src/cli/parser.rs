//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. Positional arguments
//! are optional here; the dispatcher reports missing ones itself. A command
//! line clap rejects outright is answered with the help text, the same as an
//! unknown command.

use crate::config::{
    Backend, ConnectionTarget, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_DB_USER,
    PgParams,
};
use crate::error::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// expense: a command-line ledger for personal expenses.
#[derive(Parser, Debug)]
#[command(name = "expense")]
#[command(version, about, long_about = None)]
#[command(allow_external_subcommands = true)]
pub struct Cli {
    /// Storage backend.
    #[arg(long, value_enum, default_value_t = Backend::Sqlite, env = "EXPENSE_BACKEND", global = true)]
    pub backend: Backend,

    /// Path to the `SQLite` database file.
    ///
    /// Defaults to `.expense/expenses.db` in the current directory.
    #[arg(short, long, env = "EXPENSE_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// PostgreSQL database name.
    #[arg(long, env = "EXPENSE_DB_NAME", default_value = DEFAULT_DB_NAME, global = true)]
    pub dbname: String,

    /// PostgreSQL user.
    #[arg(long, env = "EXPENSE_DB_USER", default_value = DEFAULT_DB_USER, global = true)]
    pub user: String,

    /// PostgreSQL host.
    #[arg(long, env = "EXPENSE_DB_HOST", default_value = DEFAULT_DB_HOST, global = true)]
    pub host: String,

    /// PostgreSQL port.
    #[arg(long, env = "EXPENSE_DB_PORT", default_value_t = DEFAULT_DB_PORT, global = true)]
    pub port: u16,

    /// PostgreSQL password.
    #[arg(long, env = "EXPENSE_DB_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add an expense.
    Add {
        /// Amount with up to two decimals (max 9999.99).
        #[arg(allow_negative_numbers = true)]
        amount: Option<String>,

        /// Description of the expense.
        #[arg(allow_hyphen_values = true)]
        memo: Option<String>,

        /// Date (YYYY-MM-DD or M/D/YYYY); defaults to today.
        date: Option<String>,
    },

    /// List all expenses.
    List,

    /// Search expenses whose memo contains QUERY (case-insensitive).
    Search {
        /// Text to look for.
        #[arg(allow_hyphen_values = true)]
        query: Option<String>,
    },

    /// Delete the expense with the given id.
    Delete {
        /// Expense id.
        #[arg(allow_negative_numbers = true)]
        id: Option<String>,
    },

    /// Delete all expenses.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Anything else shows help.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Outcome of reading a command line.
#[derive(Debug)]
pub enum Invocation {
    /// Run the parsed command.
    Run(Box<Cli>),
    /// Print this text and exit successfully.
    Print(String),
}

impl Cli {
    /// Parses a command line without exiting the process.
    ///
    /// `--help` and `--version` yield their own text. Any other argument
    /// error (extra positionals, bad option values) yields the top-level
    /// help text.
    #[must_use]
    pub fn parse_invocation<I, T>(args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Invocation::Run(Box::new(cli)),
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Invocation::Print(e.render().to_string())
                }
                _ => Invocation::Print(crate::cli::commands::help_text()),
            },
        }
    }

    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }

    /// Returns the PostgreSQL connection parameters.
    #[must_use]
    pub fn pg_params(&self) -> PgParams {
        PgParams {
            dbname: self.dbname.clone(),
            user: self.user.clone(),
            host: self.host.clone(),
            port: self.port,
            password: self.password.clone(),
        }
    }

    /// Resolves where the record store connects.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unavailable backend.
    pub fn connection_target(&self) -> Result<ConnectionTarget> {
        ConnectionTarget::resolve(self.backend, self.get_db_path(), self.pg_params())
    }

    /// Builds a CLI value with default options for `command`.
    #[must_use]
    pub fn with_command(command: Option<Commands>) -> Self {
        Self {
            backend: Backend::Sqlite,
            db_path: None,
            dbname: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            password: None,
            verbose: false,
            format: "text".to_string(),
            command,
        }
    }
}
