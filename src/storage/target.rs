//! Runtime backend selection.
//!
//! A [`ConnectionTarget`] is itself a [`Connector`] whose connections are
//! boxed [`Storage`] objects, so the dispatcher needs no generic plumbing.

use crate::config::ConnectionTarget;
use crate::core::{DeleteOutcome, Expense, NewExpense};
use crate::error::Result;
use crate::storage::sqlite::SqliteConnector;
use crate::storage::traits::{Connector, Storage};

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn table_exists(&mut self) -> Result<bool> {
        (**self).table_exists()
    }

    fn create_schema(&mut self) -> Result<()> {
        (**self).create_schema()
    }

    fn ensure_schema(&mut self) -> Result<bool> {
        (**self).ensure_schema()
    }

    fn insert(&mut self, expense: &NewExpense) -> Result<Expense> {
        (**self).insert(expense)
    }

    fn select_all(&mut self) -> Result<Vec<Expense>> {
        (**self).select_all()
    }

    fn search(&mut self, term: &str) -> Result<Vec<Expense>> {
        (**self).search(term)
    }

    fn find_by_id(&mut self, id: i64) -> Result<Option<Expense>> {
        (**self).find_by_id(id)
    }

    fn remove(&mut self, id: i64) -> Result<u64> {
        (**self).remove(id)
    }

    fn delete_by_id(&mut self, id: i64) -> Result<DeleteOutcome> {
        (**self).delete_by_id(id)
    }

    fn delete_all(&mut self) -> Result<u64> {
        (**self).delete_all()
    }
}

impl Connector for ConnectionTarget {
    type Connection = Box<dyn Storage>;

    fn connect(&self) -> Result<Box<dyn Storage>> {
        match self {
            Self::Sqlite { path } => Ok(Box::new(SqliteConnector::new(path.clone()).connect()?)),
            #[cfg(feature = "postgres")]
            Self::Postgres(params) => {
                let connector = crate::storage::postgres::PostgresConnector::new(params.clone());
                Ok(Box::new(connector.connect()?))
            }
            #[cfg(not(feature = "postgres"))]
            Self::Postgres(_) => Err(crate::error::Error::Config {
                message: "PostgreSQL support is not compiled in".to_string(),
            }),
        }
    }
}
