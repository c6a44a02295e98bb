//! Connection target configuration.
//!
//! Resolved from global CLI options, each of which falls back to an
//! `EXPENSE_*` environment variable.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default PostgreSQL database name.
pub const DEFAULT_DB_NAME: &str = "expenses";

/// Default PostgreSQL user.
pub const DEFAULT_DB_USER: &str = "postgres";

/// Default PostgreSQL host.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Local `SQLite` database file.
    #[default]
    Sqlite,
    /// PostgreSQL server.
    Postgres,
}

/// PostgreSQL database identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgParams {
    /// Database name.
    pub dbname: String,
    /// Role to connect as.
    pub user: String,
    /// Server host name or socket directory.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Password, if the server requires one.
    pub password: Option<String>,
}

impl Default for PgParams {
    fn default() -> Self {
        Self {
            dbname: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            password: None,
        }
    }
}

/// Where the record store connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// A `SQLite` database file.
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// A PostgreSQL database.
    Postgres(PgParams),
}

impl ConnectionTarget {
    /// Builds a target for `backend` from the available parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when PostgreSQL is requested but this build
    /// has no PostgreSQL support.
    pub fn resolve(backend: Backend, path: PathBuf, params: PgParams) -> Result<Self> {
        match backend {
            Backend::Sqlite => Ok(Self::Sqlite { path }),
            Backend::Postgres if cfg!(feature = "postgres") => Ok(Self::Postgres(params)),
            Backend::Postgres => Err(Error::Config {
                message: "PostgreSQL support is not compiled in (enable the `postgres` feature)"
                    .to_string(),
            }),
        }
    }
}
