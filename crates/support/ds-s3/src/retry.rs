//! Bounded retry for remote operations.
//!
//! Retry decisions come from the typed [`ErrorCategory`] classification
//! in `ds-error`: transient errors back off exponentially (with jitter),
//! permanent errors surface immediately.

use std::time::Duration;

use ds_error::{ErrorCategory, Result, classify_error};
use rand::Rng;
use tokio::time::sleep;
use tracing::warn;

/// Backoff policy for transient remote errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Backoff before the first retry, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Ceiling on any single backoff, in milliseconds.
    pub max_backoff_ms: u64,
    /// Spread retries of concurrent callers with up to 25% extra delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10_000,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Policy with the default backoff shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retries after the initial attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the backoff before the first retry.
    pub fn with_initial_backoff_ms(mut self, initial_backoff_ms: u64) -> Self {
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Backoff before retry number `attempt` (zero-based).
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let doubled = self
            .initial_backoff_ms
            .saturating_mul(1u64 << attempt.min(32));
        let capped = doubled.min(self.max_backoff_ms);

        let final_ms = if self.jitter {
            capped.saturating_add(rand::rng().random_range(0..=capped / 4))
        } else {
            capped
        };

        Duration::from_millis(final_ms)
    }
}

/// Run `operation`, retrying while it fails with a transient error.
///
/// Permanent errors (see [`ds_error::classify_error`]) are returned on
/// the spot; transient ones are retried up to the configured budget,
/// after which the last error is returned.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if classify_error(&error) == ErrorCategory::Permanent {
            warn!(
                operation = operation_name,
                attempt = attempt,
                error = %error,
                "Permanent error, not retrying"
            );
            return Err(error);
        }

        if attempt >= config.max_retries {
            warn!(
                operation = operation_name,
                attempts = attempt + 1,
                error = %error,
                "Retry budget exhausted"
            );
            return Err(error);
        }

        let backoff = config.backoff_duration(attempt);
        warn!(
            operation = operation_name,
            attempt = attempt,
            error = %error,
            backoff_ms = backoff.as_millis(),
            "Transient error, backing off"
        );
        sleep(backoff).await;
        attempt += 1;
    }
}
