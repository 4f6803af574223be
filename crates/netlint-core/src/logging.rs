//! Logging bootstrap for netlint hosts
//!
//! Thin wrapper over the `tracing` ecosystem: an `EnvFilter` seeded from
//! the environment when present, otherwise from the requested level.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber at the given level.
///
/// The `RUST_LOG` environment variable takes precedence over `level`.
///
/// # Errors
///
/// Returns [`Error::Config`] when the level is not a valid filter
/// directive or a subscriber is already installed.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::Config(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Config(e.to_string()))
}

/// Initialize tracing at `info`, ignoring an already-installed subscriber
pub fn init_default_tracing() {
    let _ = init_tracing("info");
}
