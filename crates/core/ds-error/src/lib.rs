//! Error types and classification for datasync.
//!
//! This crate provides:
//! - [`DsError`] - Top-level error enum for all datasync errors
//! - Domain-specific errors ([`S3Error`], [`SyncError`], [`PlanError`])
//! - [`ErrorCategory`] for retry decision making
//! - Error classification logic based on error type

use thiserror::Error;

/// Top-level error type for datasync.
#[derive(Error, Debug)]
pub enum DsError {
    /// S3 access errors (listing, metadata lookup, client construction)
    #[error("S3 error: {0}")]
    S3(#[from] S3Error),

    /// Sync decision errors (missing source, digest computation)
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Planning errors (tree construction, output delivery)
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// S3 access errors.
#[derive(Error, Debug)]
pub enum S3Error {
    /// Invalid S3 URI
    #[error("Invalid S3 URI: {0}")]
    InvalidUri(String),

    /// Object or bucket does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Access denied by the service
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Prefix listing failed
    #[error("List failed: {0}")]
    List(String),

    /// Object metadata lookup failed
    #[error("Head failed: {0}")]
    Head(String),

    /// Throttled by the service
    #[error("Throttled: {0}")]
    Throttled(String),
}

/// Sync decision errors.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The source artifact of a sync comparison does not exist.
    ///
    /// This is caller misuse: sync status must not be probed for a
    /// nonexistent source. Never retried.
    #[error("Source does not exist: {0}")]
    SourceNotFound(String),

    /// Content digest computation failed
    #[error("Digest failed: {0}")]
    Digest(String),

    /// Local metadata lookup or read failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Planning errors.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Local tree walk failed
    #[error("Walk failed: {0}")]
    Walk(String),

    /// Emitting a transfer unit failed
    #[error("Output failed: {0}")]
    Output(String),

    /// Transfer unit serialization failed
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

/// Error classification for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - retry with exponential backoff
    ///
    /// Examples: S3 throttling, 5xx responses, stale file handles
    Transient,

    /// Permanent error - never retry
    ///
    /// Examples: missing source, access denied, invalid URI
    Permanent,
}

/// Classifies an error to determine retry behavior.
pub fn classify_error(error: &DsError) -> ErrorCategory {
    match error {
        DsError::S3(e) => classify_s3_error(e),
        DsError::Sync(e) => classify_sync_error(e),
        DsError::Plan(_) => ErrorCategory::Permanent,
        DsError::Config(_) => ErrorCategory::Permanent,
        DsError::Other(_) => ErrorCategory::Transient,
    }
}

fn classify_s3_error(error: &S3Error) -> ErrorCategory {
    match error {
        S3Error::InvalidUri(_) => ErrorCategory::Permanent,
        S3Error::NotFound(_) => ErrorCategory::Permanent,
        S3Error::AccessDenied(_) => ErrorCategory::Permanent,
        S3Error::List(_) => ErrorCategory::Transient,
        S3Error::Head(_) => ErrorCategory::Transient,
        S3Error::Throttled(_) => ErrorCategory::Transient,
    }
}

fn classify_sync_error(error: &SyncError) -> ErrorCategory {
    match error {
        SyncError::SourceNotFound(_) => ErrorCategory::Permanent,
        SyncError::Digest(_) => ErrorCategory::Permanent,
        SyncError::Io { source, .. } => classify_io_error(source),
    }
}

/// Classify a local I/O error for retry purposes.
///
/// Transient conditions are OS-level resource exhaustion or staleness
/// (interrupted reads, fd exhaustion, stale NFS handles). Everything
/// else, including missing files and permission problems, is permanent.
pub fn classify_io_error(error: &std::io::Error) -> ErrorCategory {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => {
            ErrorCategory::Transient
        }
        _ => match error.raw_os_error() {
            // EAGAIN, ENFILE, EMFILE, ESTALE
            Some(11) | Some(23) | Some(24) | Some(116) => ErrorCategory::Transient,
            _ => ErrorCategory::Permanent,
        },
    }
}

/// Result type alias using DsError.
pub type Result<T> = std::result::Result<T, DsError>;
