//! SQS output implementation for transfer plans.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::Client;
use ds_error::{PlanError, Result};
use ds_types::TransferUnit;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::Output;

/// Configuration for SQS output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqsConfig {
    /// SQS queue URL
    pub queue_url: String,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// AWS region
    pub region: Option<String>,

    /// Batch size for SQS messages (max 10 per SQS API limit)
    pub batch_size: usize,
}

impl SqsConfig {
    /// Create a new SqsConfig with the required queue URL.
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            endpoint: None,
            region: None,
            batch_size: 10, // SQS max
        }
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the batch size (max 10).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, 10);
        self
    }
}

/// SQS output implementation with batching support.
///
/// Sends transfer units as JSON messages, buffered into
/// `SendMessageBatch` requests of up to 10 entries.
pub struct SqsOutput {
    client: Client,
    queue_url: String,
    batch_size: usize,
    buffer: Mutex<Vec<TransferUnit>>,
}

impl SqsOutput {
    /// Create a new SqsOutput from configuration.
    pub async fn new(config: SqsConfig) -> Result<Self> {
        let client = build_sqs_client(&config).await;
        Ok(Self {
            client,
            queue_url: config.queue_url,
            batch_size: config.batch_size.clamp(1, 10),
            buffer: Mutex::new(Vec::new()),
        })
    }

    /// Create a new SqsOutput with an existing client (useful for testing).
    pub fn with_client(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
            batch_size: 10,
            buffer: Mutex::new(Vec::new()),
        }
    }

    async fn send_batch(&self, units: Vec<TransferUnit>) -> Result<()> {
        if units.is_empty() {
            return Ok(());
        }

        debug!(count = units.len(), "Sending SQS batch");

        let mut entries = Vec::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            let body =
                serde_json::to_string(unit).map_err(|e| PlanError::Serialize(e.to_string()))?;

            let entry = aws_sdk_sqs::types::SendMessageBatchRequestEntry::builder()
                .id(format!("unit-{i}"))
                .message_body(body)
                .build()
                .map_err(|e| PlanError::Output(format!("Failed to build SQS entry: {e}")))?;
            entries.push(entry);
        }

        let response = self
            .client
            .send_message_batch()
            .queue_url(&self.queue_url)
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|e| PlanError::Output(format!("SQS send failed: {e}")))?;

        if !response.failed().is_empty() {
            return Err(PlanError::Output(format!(
                "{} of {} SQS entries rejected",
                response.failed().len(),
                units.len()
            ))
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl Output for SqsOutput {
    async fn output(&self, unit: &TransferUnit) -> Result<()> {
        let full = {
            let mut buffer = self.buffer.lock().await;
            buffer.push(unit.clone());
            if buffer.len() >= self.batch_size {
                Some(std::mem::take(&mut *buffer))
            } else {
                None
            }
        };

        if let Some(batch) = full {
            self.send_batch(batch).await?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let remaining = std::mem::take(&mut *self.buffer.lock().await);
        self.send_batch(remaining).await
    }
}

async fn build_sqs_client(config: &SqsConfig) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    Client::new(&loader.load().await)
}
