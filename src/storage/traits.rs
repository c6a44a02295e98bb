//! Storage trait definitions.
//!
//! [`Storage`] is one live connection to a backend; [`Connector`] opens
//! such connections from connection parameters. The record store combines
//! the two so every operation gets its own connection.

use crate::core::{DeleteOutcome, Expense, NewExpense};
use crate::error::Result;
use serde::Serialize;

/// A live connection to an expense store.
///
/// Dropping the value closes the connection.
pub trait Storage {
    /// Checks whether the `expenses` table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn table_exists(&mut self) -> Result<bool>;

    /// Creates the `expenses` table unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL fails, including when the table exists.
    fn create_schema(&mut self) -> Result<()>;

    /// Creates the `expenses` table if it is absent.
    ///
    /// Idempotent. Returns `true` when the table was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the check or the DDL fails.
    fn ensure_schema(&mut self) -> Result<bool> {
        if self.table_exists()? {
            return Ok(false);
        }
        self.create_schema()?;
        tracing::info!("created expenses table");
        Ok(true)
    }

    /// Inserts one expense and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert(&mut self, expense: &NewExpense) -> Result<Expense>;

    /// Returns every expense ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_all(&mut self) -> Result<Vec<Expense>>;

    /// Returns expenses whose memo contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn search(&mut self, term: &str) -> Result<Vec<Expense>>;

    /// Retrieves an expense by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_id(&mut self, id: i64) -> Result<Option<Expense>>;

    /// Removes the row with `id`, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn remove(&mut self, id: i64) -> Result<u64>;

    /// Looks up `id` and deletes it when present.
    ///
    /// The lookup and the delete are separate statements.
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails.
    fn delete_by_id(&mut self, id: i64) -> Result<DeleteOutcome> {
        let Some(expense) = self.find_by_id(id)? else {
            return Ok(DeleteOutcome::NotFound(id));
        };
        self.remove(id)?;
        Ok(DeleteOutcome::Deleted(expense))
    }

    /// Removes every expense, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_all(&mut self) -> Result<u64>;
}

/// Opens connections to an expense store.
pub trait Connector {
    /// Connection type produced by this connector.
    type Connection: Storage;

    /// Opens a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    fn connect(&self) -> Result<Self::Connection>;
}

/// A set of rows returned by a read operation, with its row count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Number of rows in the set.
    pub count: usize,
    /// The rows, ordered by id.
    pub expenses: Vec<Expense>,
}

impl From<Vec<Expense>> for Selection {
    fn from(expenses: Vec<Expense>) -> Self {
        Self {
            count: expenses.len(),
            expenses,
        }
    }
}
