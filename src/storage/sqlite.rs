//! `SQLite` storage implementation.
//!
//! Amounts live in a `NUMERIC(6,2)` column, which `SQLite` stores as an
//! integer or real. They are read back through `printf('%.2f', ...)` so the
//! text always carries two fractional digits before it becomes a `Decimal`.
//!
//! Every connection registers a `casefold` scalar function. `SQLite`'s own
//! `LIKE` and `lower()` only fold ASCII, so memo search goes through it.

use crate::core::{Expense, NewExpense};
use crate::error::{Result, StorageError};
use crate::storage::schema::{SQLITE_CHECK_SCHEMA_SQL, SQLITE_SCHEMA_SQL};
use crate::storage::traits::{Connector, Storage};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SELECT_COLUMNS: &str = "SELECT id, printf('%.2f', amount), memo, created_on FROM expenses";

/// Name of the Unicode lower-casing SQL function.
const CASEFOLD_FN: &str = "casefold";

/// SQLite-based storage implementation.
///
/// # Examples
///
/// ```no_run
/// use expense_ledger::storage::{SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::open("expenses.db").unwrap();
/// storage.ensure_schema().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(StorageError::from)?;
        }

        let conn = Connection::open(&path)
            .map_err(|e| StorageError::Connection(format!("{}: {e}", path.display())))?;
        register_functions(&conn)?;

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Connection(e.to_string()))?;
        register_functions(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn query_expenses(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(sql).map_err(StorageError::from)?;
        let rows = stmt
            .query_map(params, row_to_expense)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(rows)
    }
}

fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        CASEFOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )
    .map_err(StorageError::from)?;
    Ok(())
}

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let amount: String = row.get(1)?;
    let amount = Decimal::from_str(&amount)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Expense {
        id: row.get(0)?,
        amount,
        memo: row.get(2)?,
        created_on: row.get(3)?,
    })
}

impl Storage for SqliteStorage {
    fn table_exists(&mut self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(SQLITE_CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    fn create_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(SQLITE_SCHEMA_SQL)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn insert(&mut self, expense: &NewExpense) -> Result<Expense> {
        let created_on = expense.effective_date();

        self.conn
            .execute(
                "INSERT INTO expenses (amount, memo, created_on) VALUES (?, ?, ?)",
                params![expense.amount.to_string(), expense.memo, created_on],
            )
            .map_err(StorageError::from)?;

        Ok(Expense {
            id: self.conn.last_insert_rowid(),
            amount: expense.amount,
            memo: expense.memo.clone(),
            created_on,
        })
    }

    fn select_all(&mut self) -> Result<Vec<Expense>> {
        self.query_expenses(&format!("{SELECT_COLUMNS} ORDER BY id"), params![])
    }

    fn search(&mut self, term: &str) -> Result<Vec<Expense>> {
        self.query_expenses(
            &format!(
                "{SELECT_COLUMNS} WHERE instr({CASEFOLD_FN}(memo), {CASEFOLD_FN}(?)) > 0 ORDER BY id"
            ),
            params![term],
        )
    }

    fn find_by_id(&mut self, id: i64) -> Result<Option<Expense>> {
        let expense = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                params![id],
                row_to_expense,
            )
            .optional()
            .map_err(StorageError::from)?;
        Ok(expense)
    }

    fn remove(&mut self, id: i64) -> Result<u64> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?", params![id])
            .map_err(StorageError::from)?;
        Ok(removed as u64)
    }

    fn delete_all(&mut self) -> Result<u64> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses", [])
            .map_err(StorageError::from)?;
        Ok(removed as u64)
    }
}

/// Opens [`SqliteStorage`] connections to one database file.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    /// Creates a connector for the database at `path`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the database path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Connector for SqliteConnector {
    type Connection = SqliteStorage;

    fn connect(&self) -> Result<SqliteStorage> {
        tracing::debug!(path = %self.path.display(), "opening sqlite database");
        SqliteStorage::open(&self.path)
    }
}
