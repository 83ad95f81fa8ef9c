//! Logging initialization for the datasync binaries.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::LogLevel;

/// Initialize the global tracing subscriber.
///
/// `--log-level` sets the default; `RUST_LOG` overrides it with a full
/// filter directive. Output goes to stderr so stdout stays clean for
/// plan output.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
