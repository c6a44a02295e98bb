//! Expense records and value coercion.
//!
//! Amounts follow `numeric(6,2)`: two fractional digits, at most four
//! integer digits. Dates are calendar dates without a time component.

use crate::error::StorageError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

/// Number of fractional digits stored for an amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive upper bound of an amount's magnitude (4 integer digits).
const AMOUNT_LIMIT: i64 = 10_000;

/// A persisted expense row.
///
/// # Examples
///
/// ```
/// use expense_ledger::core::{Expense, parse_amount};
/// use time::macros::date;
///
/// let expense = Expense {
///     id: 1,
///     amount: parse_amount("4.5").unwrap(),
///     memo: "Coffee".to_string(),
///     created_on: date!(2026 - 10 - 19),
/// };
/// assert_eq!(expense.amount.to_string(), "4.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// System-assigned identifier, never reused.
    pub id: i64,

    /// Amount with exactly two fractional digits.
    pub amount: Decimal,

    /// Free-text description.
    pub memo: String,

    /// Calendar date the expense applies to.
    pub created_on: Date,
}

/// Payload for inserting a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Amount, already coerced to two fractional digits.
    pub amount: Decimal,

    /// Free-text description.
    pub memo: String,

    /// Explicit date; `None` means the current local date.
    pub created_on: Option<Date>,
}

impl NewExpense {
    /// Builds an insert payload from raw command-line text.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the amount or date would be refused by
    /// the `expenses` column types.
    pub fn parse(amount: &str, memo: &str, created_on: Option<&str>) -> Result<Self, StorageError> {
        Ok(Self {
            amount: parse_amount(amount)?,
            memo: memo.to_string(),
            created_on: created_on.map(parse_date).transpose()?,
        })
    }

    /// Returns the date to store, defaulting to today.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.created_on.unwrap_or_else(today)
    }
}

/// Result of deleting by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row existed and has been removed.
    Deleted(Expense),
    /// No row carries this id; nothing was removed.
    NotFound(i64),
}

/// Coerces text to a `numeric(6,2)` amount.
///
/// Extra fractional digits are rounded half away from zero.
///
/// # Errors
///
/// Returns [`StorageError::InvalidAmount`] for non-numeric text and
/// [`StorageError::NumericOverflow`] when the rounded value needs more than
/// four integer digits.
pub fn parse_amount(input: &str) -> Result<Decimal, StorageError> {
    let trimmed = input.trim();
    let value = Decimal::from_str(trimmed).map_err(|_| StorageError::InvalidAmount {
        value: input.to_string(),
    })?;

    let mut rounded =
        value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::from(AMOUNT_LIMIT) {
        return Err(StorageError::NumericOverflow {
            value: input.to_string(),
        });
    }
    rounded.rescale(AMOUNT_SCALE);
    Ok(rounded)
}

/// Parses a calendar date.
///
/// Accepts ISO `YYYY-MM-DD` and the US short form `M/D/YYYY`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidDate`] when neither form matches or the
/// date does not exist.
pub fn parse_date(input: &str) -> Result<Date, StorageError> {
    let trimmed = input.trim();
    let invalid = || StorageError::InvalidDate {
        value: input.to_string(),
    };

    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }

    let mut parts = trimmed.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let day: u8 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

/// Returns the current local calendar date.
///
/// Falls back to UTC when the local offset cannot be determined.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Renders a date in weekday-month-day-year form, e.g. `Mon Oct 19 2026`.
#[must_use]
pub fn display_date(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short] [month repr:short] [day] [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

/// Sums the amounts of a result set exactly.
#[must_use]
pub fn total(expenses: &[Expense]) -> Decimal {
    let mut sum: Decimal = expenses.iter().map(|e| e.amount).sum();
    sum.rescale(AMOUNT_SCALE);
    sum
}
