//! Transfer plan output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One schedulable unit of a transfer plan.
///
/// Each unit covers a disjoint subtree of the planned file tree: either a
/// whole directory/prefix or a single object. Units are sized so that
/// independent workers can transfer them in parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferUnit {
    /// Address of the subtree (filesystem path or S3 URI).
    ///
    /// Prefix units carry a trailing `/` so consumers can distinguish a
    /// directory cut from an individual object cut.
    pub uri: String,

    /// Aggregate size of the unit in bytes
    pub size_bytes: u64,

    /// Number of objects covered by the unit
    pub object_count: u64,

    /// Whether this unit is a prefix or a single object
    pub kind: UnitKind,

    /// Most recent modification time within the unit (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Kind of subtree a [`TransferUnit`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// An aggregated directory or key prefix
    Prefix,

    /// A single file or object
    Object,
}
