//! PostgreSQL storage implementation.
//!
//! Attaches to an existing database (or creates the table in it) using the
//! canonical column types: `serial`, `numeric(6,2)`, `text`, `date`.

use crate::config::PgParams;
use crate::core::{Expense, NewExpense};
use crate::error::{Result, StorageError};
use crate::storage::schema::{POSTGRES_CHECK_SCHEMA_SQL, POSTGRES_SCHEMA_SQL, contains_pattern};
use crate::storage::traits::{Connector, Storage};
use postgres::{Client, NoTls, Row};

const SELECT_COLUMNS: &str = "SELECT id, amount, memo, created_on FROM expenses";

/// PostgreSQL-based storage implementation.
pub struct PostgresStorage {
    client: Client,
}

impl PostgresStorage {
    /// Connects using the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the server is unreachable or
    /// rejects the credentials.
    pub fn connect(params: &PgParams) -> Result<Self> {
        let mut config = postgres::Config::new();
        config
            .host(&params.host)
            .port(params.port)
            .user(&params.user)
            .dbname(&params.dbname);
        if let Some(password) = &params.password {
            config.password(password);
        }

        let client = config
            .connect(NoTls)
            .map_err(|e| StorageError::Connection(format!("PostgreSQL connection failed: {e}")))?;
        Ok(Self { client })
    }
}

/// Reads an id from either a `serial` or a `bigserial` column.
fn read_id(row: &Row) -> Result<i64> {
    row.try_get::<_, i32>(0)
        .map(i64::from)
        .or_else(|_| row.try_get::<_, i64>(0))
        .map_err(|e| StorageError::from(e).into())
}

fn row_to_expense(row: &Row) -> Result<Expense> {
    Ok(Expense {
        id: read_id(row)?,
        amount: row.try_get(1).map_err(StorageError::from)?,
        memo: row.try_get(2).map_err(StorageError::from)?,
        created_on: row.try_get(3).map_err(StorageError::from)?,
    })
}

fn rows_to_expenses(rows: &[Row]) -> Result<Vec<Expense>> {
    rows.iter().map(row_to_expense).collect()
}

impl Storage for PostgresStorage {
    fn table_exists(&mut self) -> Result<bool> {
        let row = self
            .client
            .query_one(POSTGRES_CHECK_SCHEMA_SQL, &[])
            .map_err(StorageError::from)?;
        Ok(row.try_get(0).map_err(StorageError::from)?)
    }

    fn create_schema(&mut self) -> Result<()> {
        self.client
            .batch_execute(POSTGRES_SCHEMA_SQL)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn insert(&mut self, expense: &NewExpense) -> Result<Expense> {
        let created_on = expense.effective_date();
        let row = self
            .client
            .query_one(
                "INSERT INTO expenses (amount, memo, created_on) VALUES ($1, $2, $3)
                 RETURNING id, amount, memo, created_on",
                &[&expense.amount, &expense.memo, &created_on],
            )
            .map_err(StorageError::from)?;
        row_to_expense(&row)
    }

    fn select_all(&mut self) -> Result<Vec<Expense>> {
        let rows = self
            .client
            .query(format!("{SELECT_COLUMNS} ORDER BY id").as_str(), &[])
            .map_err(StorageError::from)?;
        rows_to_expenses(&rows)
    }

    fn search(&mut self, term: &str) -> Result<Vec<Expense>> {
        let pattern = contains_pattern(term);
        let rows = self
            .client
            .query(
                format!(r"{SELECT_COLUMNS} WHERE memo ILIKE $1 ESCAPE '\' ORDER BY id").as_str(),
                &[&pattern],
            )
            .map_err(StorageError::from)?;
        rows_to_expenses(&rows)
    }

    fn find_by_id(&mut self, id: i64) -> Result<Option<Expense>> {
        // bigint parameter so ids past the serial range simply miss
        let row = self
            .client
            .query_opt(format!("{SELECT_COLUMNS} WHERE id = $1::bigint").as_str(), &[&id])
            .map_err(StorageError::from)?;
        row.as_ref().map(row_to_expense).transpose()
    }

    fn remove(&mut self, id: i64) -> Result<u64> {
        let removed = self
            .client
            .execute("DELETE FROM expenses WHERE id = $1::bigint", &[&id])
            .map_err(StorageError::from)?;
        Ok(removed)
    }

    fn delete_all(&mut self) -> Result<u64> {
        let removed = self
            .client
            .execute("DELETE FROM expenses", &[])
            .map_err(StorageError::from)?;
        Ok(removed)
    }
}

/// Opens [`PostgresStorage`] connections to a fixed database identity.
#[derive(Debug, Clone)]
pub struct PostgresConnector {
    params: PgParams,
}

impl PostgresConnector {
    /// Creates a connector for the given parameters.
    #[must_use]
    pub const fn new(params: PgParams) -> Self {
        Self { params }
    }
}

impl Connector for PostgresConnector {
    type Connection = PostgresStorage;

    fn connect(&self) -> Result<PostgresStorage> {
        tracing::debug!(
            host = %self.params.host,
            port = self.params.port,
            dbname = %self.params.dbname,
            user = %self.params.user,
            "connecting to postgres"
        );
        PostgresStorage::connect(&self.params)
    }
}
