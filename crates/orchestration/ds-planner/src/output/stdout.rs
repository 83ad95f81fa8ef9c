//! Stdout output implementation for transfer plans.

use async_trait::async_trait;
use ds_error::{PlanError, Result};
use ds_types::TransferUnit;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::Output;

/// Output format for stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON Lines format - one JSON object per line (default)
    #[default]
    Jsonl,

    /// Pretty-printed JSON
    Json,
}

/// Stdout output implementation.
///
/// JSONL (one object per line) is the default so plans can be piped
/// straight into `jq`, `wc -l` or a worker's stdin.
pub struct StdoutOutput {
    format: OutputFormat,
}

impl StdoutOutput {
    /// Create a new StdoutOutput with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Create a new StdoutOutput with JSONL format (default).
    pub fn jsonl() -> Self {
        Self::new(OutputFormat::Jsonl)
    }

    /// Create a new StdoutOutput with pretty-printed JSON format.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::jsonl()
    }
}

#[async_trait]
impl Output for StdoutOutput {
    async fn output(&self, unit: &TransferUnit) -> Result<()> {
        let output = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(unit)
                .map_err(|e| PlanError::Serialize(e.to_string()))?,
            OutputFormat::Jsonl => {
                serde_json::to_string(unit).map_err(|e| PlanError::Serialize(e.to_string()))?
            }
        };

        println!("{output}");
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| PlanError::Output(format!("Failed to flush stdout: {e}")))?;
        Ok(())
    }
}
