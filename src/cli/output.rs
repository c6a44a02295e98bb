//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats. Text rows are aligned as
//! `id | date | amount | memo`; the total line right-aligns the sum so its
//! last digit sits under the amount column.

use crate::core::{DeleteOutcome, Expense, display_date, total};
use crate::error::Error;
use crate::storage::Selection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// Width of the separator above the total line.
const SEPARATOR_WIDTH: usize = 50;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// When a read result gets a total line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPolicy {
    /// Whenever at least one row exists (list).
    AnyRows,
    /// Only when more than one row matched (search).
    MultipleRows,
}

impl TotalPolicy {
    const fn applies(self, count: usize) -> bool {
        match self {
            Self::AnyRows => count >= 1,
            Self::MultipleRows => count > 1,
        }
    }
}

/// Renders an amount with exactly two decimals.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Renders the row-count line.
#[must_use]
pub fn format_count(count: usize) -> String {
    match count {
        0 => "there are no expenses".to_string(),
        1 => "There is 1 expense".to_string(),
        n => format!("There are {n} expenses"),
    }
}

/// Renders one expense as an aligned row.
#[must_use]
pub fn format_row(expense: &Expense) -> String {
    format!(
        "{:>3} | {:>10} | {:>12} | {}",
        expense.id,
        display_date(expense.created_on),
        format_amount(expense.amount),
        expense.memo
    )
}

/// Renders the separator and total lines.
#[must_use]
pub fn format_total(sum: Decimal) -> String {
    format!(
        "{}\nTotal {:>30}",
        "-".repeat(SEPARATOR_WIDTH),
        format_amount(sum)
    )
}

/// Formats a read result (list or search).
#[must_use]
pub fn format_selection(
    selection: &Selection,
    policy: TotalPolicy,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_selection_text(selection, policy),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct SelectionOutput<'a> {
                count: usize,
                expenses: &'a [Expense],
                total: String,
            }
            format_json(&SelectionOutput {
                count: selection.count,
                expenses: &selection.expenses,
                total: format_amount(total(&selection.expenses)),
            })
        }
    }
}

fn format_selection_text(selection: &Selection, policy: TotalPolicy) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", format_count(selection.count));

    for expense in &selection.expenses {
        let _ = writeln!(output, "{}", format_row(expense));
    }

    if policy.applies(selection.count) {
        let _ = writeln!(output, "{}", format_total(total(&selection.expenses)));
    }

    output
}

/// Formats the result of an add.
#[must_use]
pub fn format_added(expense: &Expense, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Expense added:\n{}\n", format_row(expense)),
        OutputFormat::Json => format_json(expense),
    }
}

/// Formats the result of a delete by id.
#[must_use]
pub fn format_deleted(outcome: &DeleteOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match outcome {
            DeleteOutcome::Deleted(expense) => format!(
                "The following expense has been deleted:\n{}\n",
                format_row(expense)
            ),
            DeleteOutcome::NotFound(id) => {
                format!("There is no expense with the id '{id}'.\n")
            }
        },
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct DeleteOutput<'a> {
                id: i64,
                deleted: Option<&'a Expense>,
            }
            let (id, deleted) = match outcome {
                DeleteOutcome::Deleted(expense) => (expense.id, Some(expense)),
                DeleteOutcome::NotFound(id) => (*id, None),
            };
            format_json(&DeleteOutput { id, deleted })
        }
    }
}

/// Formats the result of a clear; `None` means the user declined.
#[must_use]
pub fn format_cleared(removed: Option<u64>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match removed {
            Some(_) => "All expenses have been deleted.\n".to_string(),
            None => "Clear cancelled.\n".to_string(),
        },
        OutputFormat::Json => {
            let result = serde_json::json!({
                "cleared": removed.is_some(),
                "deleted": removed.unwrap_or(0),
            });
            format_json(&result)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({ "error": error.to_string() })),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}
