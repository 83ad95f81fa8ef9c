//! Output implementations for transfer plans.
//!
//! This module provides the [`Output`] trait and implementations for
//! delivering transfer units to their destination:
//! - [`StdoutOutput`] - Writes to stdout in JSON or JSONL format
//! - [`SqsOutput`] - Sends to an SQS queue for distributed workers

mod sqs;
mod stdout;

pub use sqs::{SqsConfig, SqsOutput};
pub use stdout::{OutputFormat, StdoutOutput};

use async_trait::async_trait;
use ds_error::Result;
use ds_types::TransferUnit;

/// Trait for delivering transfer units.
///
/// Implementations determine serialization format and delivery mechanism,
/// whether that's stdout for piping into other tools or an SQS queue
/// feeding a fleet of transfer workers.
#[async_trait]
pub trait Output: Send + Sync {
    /// Deliver a single transfer unit.
    async fn output(&self, unit: &TransferUnit) -> Result<()>;

    /// Flush any buffered output.
    ///
    /// Called once after all units have been emitted.
    async fn flush(&self) -> Result<()>;
}
