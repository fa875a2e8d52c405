//! Structured logging setup for the command-line tool
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so embedding applications keep control of their output.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::io::error::{Result, computation_error};

/// Environment variable read for the log filter
pub const LOG_ENV: &str = "RUST_LOG";

/// Filter directive used when the environment does not provide one
pub const fn default_directive(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Install the global fmt subscriber writing to stderr
///
/// # Errors
///
/// Returns a computation error if a global subscriber is already installed
pub fn init_logging(quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| computation_error("logging initialisation", &err))
}
