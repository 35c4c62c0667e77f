//! Telemetry initialisation: structured JSON logs via `tracing`.
//!
//! # Telemetry invariants
//!
//! - **No payload, ciphertext, or key material** must appear in any log
//!   field. Errors are logged through their `Display` output, which carries
//!   only the failure category.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridable
//!   with `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// Outputs structured JSON logs to stdout at the configured log level.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
