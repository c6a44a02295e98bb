//! CLI layer for the expense ledger.
//!
//! Provides the command-line interface using clap, the dispatcher that maps
//! each command onto one record-store operation, and output formatting.

pub mod commands;
pub mod output;
pub mod parser;
pub mod prompt;

pub use commands::{execute, execute_with_prompt};
pub use output::OutputFormat;
pub use parser::{Cli, Commands, Invocation};
