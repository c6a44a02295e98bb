//! Interactive confirmation for destructive commands.

use crate::error::{CommandError, Result};
use std::io::{BufRead, Write};

/// Question asked before clearing the ledger.
pub const CLEAR_PROMPT: &str = "This will remove all expenses. Are you sure? (y/n) ";

/// Writes `question` to `output` and reads one answer line from `input`.
///
/// `y` or `yes` (any case) confirms; anything else, including end of input,
/// declines.
///
/// # Errors
///
/// Returns [`CommandError::Prompt`] if either stream fails.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{question}")
        .and_then(|()| output.flush())
        .map_err(|e| CommandError::Prompt(e.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| CommandError::Prompt(e.to_string()))?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
