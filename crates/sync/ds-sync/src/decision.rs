//! The sync decision: is a transfer from source to destination required?

use aws_sdk_s3::Client;
use ds_error::{DsError, Result, SyncError};
use ds_s3::{RetryConfig, head_object_meta, with_retry};
use tracing::debug;

use crate::artifact::{LocalFile, RemoteObject, SyncPath, TransferArtifact};

/// Decides whether a source/destination pair needs a transfer.
///
/// The S3 client is injected at construction; a checker built without
/// one can only compare local paths. Holds no mutable state, so a single
/// checker may be shared across concurrent comparisons.
pub struct SyncChecker {
    s3: Option<Client>,
    retry: RetryConfig,
}

impl SyncChecker {
    /// A checker for local-only comparisons.
    pub fn new() -> Self {
        Self {
            s3: None,
            retry: RetryConfig::default(),
        }
    }

    /// A checker that can also resolve S3 paths.
    pub fn with_client(client: Client) -> Self {
        Self {
            s3: Some(client),
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy for remote metadata lookups.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Check whether transfer from `source` to `destination` is required.
    ///
    /// Matches the decision logic of `aws s3 sync`: a transfer is
    /// necessary if any of the following hold
    /// - the destination does not exist,
    /// - the sizes differ,
    /// - the source was modified more recently (whole-second precision),
    /// - `size_only` is false and the content digests differ.
    ///
    /// Fails with [`SyncError::SourceNotFound`] if the source does not
    /// exist; probing sync status for a nonexistent source is caller
    /// misuse, not a skippable condition.
    ///
    /// Digests are only computed when size and mtime have not already
    /// decided the outcome.
    pub async fn should_sync(
        &self,
        source: &SyncPath,
        destination: &SyncPath,
        size_only: bool,
    ) -> Result<bool> {
        let Some(dest) = self.resolve(destination).await? else {
            debug!(destination = %destination, "Destination missing, transfer required");
            return Ok(true);
        };

        let src = self
            .resolve(source)
            .await?
            .ok_or_else(|| SyncError::SourceNotFound(source.to_string()))?;

        if src.size_bytes() != dest.size_bytes() {
            debug!(
                source_bytes = src.size_bytes(),
                dest_bytes = dest.size_bytes(),
                "Size mismatch, transfer required"
            );
            return Ok(true);
        }

        // Whole-second comparison: S3 stores second precision while
        // local filesystems report sub-second mtimes.
        let src_mtime = src.modified_at().map(|t| t.timestamp());
        let dest_mtime = dest.modified_at().map(|t| t.timestamp());
        match (src_mtime, dest_mtime) {
            (Some(src_secs), Some(dest_secs)) if src_secs > dest_secs => {
                debug!("Source modified after destination, transfer required");
                return Ok(true);
            }
            (Some(_), Some(_)) => {}
            // A side with unknown mtime cannot prove freshness.
            _ => return Ok(true),
        }

        if !size_only {
            let src_digest = src.content_digest().await?;
            let dest_digest = dest.content_digest().await?;
            if src_digest != dest_digest {
                debug!(%src_digest, %dest_digest, "Digest mismatch, transfer required");
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn resolve(&self, path: &SyncPath) -> Result<Option<TransferArtifact>> {
        match path {
            SyncPath::Local(local) => {
                Ok(LocalFile::probe(local)?.map(TransferArtifact::Local))
            }
            SyncPath::S3(uri) => {
                let client = self.s3.as_ref().ok_or_else(|| {
                    DsError::Config(format!("no S3 client configured, cannot resolve {uri}"))
                })?;

                let meta =
                    with_retry(&self.retry, "head_object", || head_object_meta(client, uri))
                        .await?;

                Ok(meta.map(|m| TransferArtifact::Remote(RemoteObject::from_meta(uri.clone(), m))))
            }
        }
    }
}

impl Default for SyncChecker {
    fn default() -> Self {
        Self::new()
    }
}
