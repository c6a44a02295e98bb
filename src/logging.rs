//! Diagnostic logging setup.
//!
//! Events go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "EXPENSE_LOG";

/// Picks the filter: `EXPENSE_LOG` wins, then `--verbose`, then warnings only.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "expense_ledger=debug" } else { "warn" })
    })
}

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
