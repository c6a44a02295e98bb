//! CLI command implementations.
//!
//! Maps each command onto one record-store operation. Required arguments
//! are checked before any connection is made; a missing one produces an
//! instructional message rather than an error.

use crate::cli::output::{
    OutputFormat, TotalPolicy, format_added, format_cleared, format_deleted, format_selection,
};
use crate::cli::parser::{Cli, Commands};
use crate::cli::prompt::{CLEAR_PROMPT, confirm};
use crate::core::NewExpense;
use crate::error::{CommandError, Result};
use crate::storage::{Connector, RecordStore};
use clap::CommandFactory;
use std::io::{self, BufRead, Write};

/// Message for `add` without amount or memo.
pub const MISSING_AMOUNT_AND_MEMO: &str = "You must provide an amount and memo.";

/// Message for `search` without a term.
pub const MISSING_SEARCH_TERM: &str = "You must provide a search term.";

/// Message for `delete` without an id.
pub const MISSING_EXPENSE_ID: &str = "You must provide an expense ID.";

/// Executes the CLI command, prompting on the terminal when needed.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let stdin = io::stdin();
    execute_with_prompt(cli, &mut stdin.lock(), &mut io::stderr())
}

/// Executes the CLI command, reading confirmations from `input`.
///
/// # Errors
///
/// Returns an error on storage failure, an unparsable id, or a broken
/// prompt stream.
pub fn execute_with_prompt<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    prompt_output: &mut W,
) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    let command = match &cli.command {
        None | Some(Commands::External(_)) => return Ok(help_text()),
        Some(command) => command,
    };

    match command {
        Commands::List => cmd_list(&open_store(cli)?, format),
        Commands::Add { amount, memo, date } => {
            let (Some(amount), Some(memo)) = (non_empty(amount), non_empty(memo)) else {
                return Ok(message(MISSING_AMOUNT_AND_MEMO));
            };
            cmd_add(&open_store(cli)?, amount, memo, date.as_deref(), format)
        }
        Commands::Search { query } => {
            let Some(term) = non_empty(query) else {
                return Ok(message(MISSING_SEARCH_TERM));
            };
            cmd_search(&open_store(cli)?, term, format)
        }
        Commands::Delete { id } => {
            let Some(id) = non_empty(id) else {
                return Ok(message(MISSING_EXPENSE_ID));
            };
            let id = parse_id(id)?;
            cmd_delete(&open_store(cli)?, id, format)
        }
        Commands::Clear { yes } => {
            if !*yes && !confirm(input, prompt_output, CLEAR_PROMPT)? {
                return Ok(format_cleared(None, format));
            }
            cmd_clear(&open_store(cli)?, format)
        }
        Commands::External(_) => Ok(help_text()),
    }
}

/// Renders the top-level help text.
#[must_use]
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

fn open_store(cli: &Cli) -> Result<RecordStore<crate::config::ConnectionTarget>> {
    Ok(RecordStore::new(cli.connection_target()?))
}

fn non_empty(arg: &Option<String>) -> Option<&str> {
    arg.as_deref().filter(|s| !s.is_empty())
}

fn message(text: &str) -> String {
    format!("{text}\n")
}

fn parse_id(id: &str) -> Result<i64> {
    id.trim().parse().map_err(|_| {
        CommandError::InvalidArgument(format!("expense ID must be an integer, got '{id}'")).into()
    })
}

// ==================== Command Implementations ====================

fn cmd_list<C: Connector>(store: &RecordStore<C>, format: OutputFormat) -> Result<String> {
    let selection = store.select_all()?;
    Ok(format_selection(&selection, TotalPolicy::AnyRows, format))
}

fn cmd_add<C: Connector>(
    store: &RecordStore<C>,
    amount: &str,
    memo: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let expense = NewExpense::parse(amount, memo, date)?;
    let inserted = store.insert(&expense)?;
    Ok(format_added(&inserted, format))
}

fn cmd_search<C: Connector>(
    store: &RecordStore<C>,
    term: &str,
    format: OutputFormat,
) -> Result<String> {
    let selection = store.search(term)?;
    Ok(format_selection(&selection, TotalPolicy::MultipleRows, format))
}

fn cmd_delete<C: Connector>(store: &RecordStore<C>, id: i64, format: OutputFormat) -> Result<String> {
    let outcome = store.delete_by_id(id)?;
    Ok(format_deleted(&outcome, format))
}

fn cmd_clear<C: Connector>(store: &RecordStore<C>, format: OutputFormat) -> Result<String> {
    let removed = store.delete_all()?;
    Ok(format_cleared(Some(removed), format))
}
