//! The record store: the five ledger operations.
//!
//! Each operation connects, ensures the schema, runs its statements and
//! releases the connection when it goes out of scope, on success or error.

use crate::core::{DeleteOutcome, Expense, NewExpense};
use crate::error::Result;
use crate::storage::traits::{Connector, Selection, Storage};

/// Runs ledger operations against the store reached by a [`Connector`].
///
/// # Examples
///
/// ```no_run
/// use expense_ledger::core::NewExpense;
/// use expense_ledger::storage::{RecordStore, SqliteConnector};
///
/// let store = RecordStore::new(SqliteConnector::new("expenses.db"));
/// store.insert(&NewExpense::parse("4.50", "Coffee", None).unwrap()).unwrap();
/// assert_eq!(store.select_all().unwrap().count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore<C> {
    connector: C,
}

impl<C: Connector> RecordStore<C> {
    /// Creates a store over the given connector.
    pub const fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Returns the underlying connector.
    pub const fn connector(&self) -> &C {
        &self.connector
    }

    /// Opens a connection with the schema in place.
    fn session(&self) -> Result<C::Connection> {
        let mut conn = self.connector.connect()?;
        conn.ensure_schema()?;
        Ok(conn)
    }

    /// Ensures the `expenses` table exists.
    ///
    /// Returns `true` when this call created it.
    ///
    /// # Errors
    ///
    /// Returns an error on connection or DDL failure.
    pub fn ensure_schema(&self) -> Result<bool> {
        let mut conn = self.connector.connect()?;
        conn.ensure_schema()
    }

    /// Inserts one expense and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the row.
    pub fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        let inserted = self.session()?.insert(expense)?;
        tracing::debug!(id = inserted.id, amount = %inserted.amount, "inserted expense");
        Ok(inserted)
    }

    /// Returns every expense with the row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn select_all(&self) -> Result<Selection> {
        let selection = Selection::from(self.session()?.select_all()?);
        tracing::debug!(count = selection.count, "selected expenses");
        Ok(selection)
    }

    /// Returns expenses whose memo contains `term` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search(&self, term: &str) -> Result<Selection> {
        let selection = Selection::from(self.session()?.search(term)?);
        tracing::debug!(term, count = selection.count, "searched expenses");
        Ok(selection)
    }

    /// Deletes the expense with `id` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or delete fails.
    pub fn delete_by_id(&self, id: i64) -> Result<DeleteOutcome> {
        let outcome = self.session()?.delete_by_id(id)?;
        tracing::debug!(id, deleted = matches!(outcome, DeleteOutcome::Deleted(_)), "delete by id");
        Ok(outcome)
    }

    /// Deletes every expense, returning how many rows were removed.
    ///
    /// Callers obtain confirmation first.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all(&self) -> Result<u64> {
        let removed = self.session()?.delete_all()?;
        tracing::debug!(removed, "deleted all expenses");
        Ok(removed)
    }
}
