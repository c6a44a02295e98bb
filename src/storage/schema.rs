//! Database schema definitions.
//!
//! The `expenses` table layout is shared with existing data stores and must
//! stay exactly as written: `id` auto-increment primary key, `amount`
//! `numeric(6,2)`, `memo` text, `created_on` date.

/// Name of the single table the ledger uses.
pub const TABLE_NAME: &str = "expenses";

/// `SQLite` DDL for the expense table.
///
/// `AUTOINCREMENT` keeps ids from being reused after deletion.
pub const SQLITE_SCHEMA_SQL: &str = r"
CREATE TABLE expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount NUMERIC(6,2) NOT NULL,
    memo TEXT NOT NULL,
    created_on DATE NOT NULL DEFAULT CURRENT_DATE
);
";

/// `SQLite` probe for the expense table.
pub const SQLITE_CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='expenses';
";

/// PostgreSQL DDL for the expense table.
pub const POSTGRES_SCHEMA_SQL: &str = r"
CREATE TABLE expenses (
    id serial PRIMARY KEY,
    amount numeric(6,2) NOT NULL,
    memo text NOT NULL,
    created_on date NOT NULL DEFAULT CURRENT_DATE
);
";

/// PostgreSQL probe for the expense table in the active schema.
pub const POSTGRES_CHECK_SCHEMA_SQL: &str = r"
SELECT EXISTS (
    SELECT 1 FROM information_schema.tables
    WHERE table_schema = current_schema() AND table_name = 'expenses'
);
";

/// Escape character used in LIKE patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a LIKE pattern matching `term` anywhere in a column.
///
/// Wildcards inside the term are escaped so it matches literally.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
