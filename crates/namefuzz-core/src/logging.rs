//! Logging setup for binaries and tests that embed the engine.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! subscriber is installed.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{MatchError, Result};

/// Initialize tracing with namefuzz defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG), `info` when unset
/// - Compact format suitable for terminal output
pub fn init() -> Result<()> {
    init_with_filter("info")
}

/// Initialize tracing with a custom default filter.
///
/// Fails if a global subscriber is already installed.
pub fn init_with_filter(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .map_err(|e| MatchError::Logging(e.to_string()))
}
