//! Binary entry point for the expense ledger.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use expense_ledger::cli::output::{OutputFormat, format_error};
use expense_ledger::cli::{Cli, Invocation, execute};
use expense_ledger::logging;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::parse_invocation(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Print(text) => return print_output(&text),
    };
    logging::init(cli.verbose);
    let format = OutputFormat::parse(&cli.format);

    match execute(&cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            let error_output = format_error(&e, format);
            match format {
                // JSON errors go to stdout for programmatic parsing
                OutputFormat::Json => print!("{error_output}"),
                OutputFormat::Text => eprintln!("Error: {error_output}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn print_output(output: &str) -> ExitCode {
    if !output.is_empty() {
        // Handle broken pipe gracefully (e.g., when piped to `head`)
        if let Err(e) = write!(io::stdout(), "{output}")
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            eprintln!("Error writing to stdout: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
