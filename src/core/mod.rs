//! Core domain model for the expense ledger.
//!
//! Pure types and value parsing with no I/O dependencies: the `Expense`
//! record, its insert payload, amount/date coercion rules matching the
//! persisted column types, and decimal aggregation.

pub mod expense;

pub use expense::{
    DeleteOutcome, Expense, NewExpense, display_date, parse_amount, parse_date, today, total,
};
