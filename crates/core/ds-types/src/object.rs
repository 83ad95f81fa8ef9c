//! Storage listing entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry from a storage enumeration.
///
/// Produced by the paginated S3 prefix listing and by the local directory
/// walk; consumed by the tree construction adapters. The `key` is relative
/// to the enumerated root (key prefix or directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Key relative to the enumerated root, `/`-separated
    pub key: String,

    /// Size of the object in bytes
    pub size_bytes: u64,

    /// Last modified timestamp (if the store reports one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectSummary {
    /// Create a summary without a last-modified timestamp.
    pub fn new(key: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            key: key.into(),
            size_bytes,
            last_modified: None,
        }
    }

    /// Attach a last-modified timestamp.
    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }
}
