//! Configuration types for the planner.

use serde::{Deserialize, Serialize};

use crate::tree::PartitionLimits;

/// Configuration for a planning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Maximum aggregate size per transfer unit in bytes (None = unlimited)
    pub size_bytes_limit: Option<u64>,

    /// Maximum object count per transfer unit (None = unlimited)
    pub object_count_limit: Option<u64>,
}

impl PlanConfig {
    /// Create a configuration with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit per unit.
    pub fn with_size_bytes_limit(mut self, limit: u64) -> Self {
        self.size_bytes_limit = Some(limit);
        self
    }

    /// Set the object count limit per unit.
    pub fn with_object_count_limit(mut self, limit: u64) -> Self {
        self.object_count_limit = Some(limit);
        self
    }

    /// The partition limits this configuration implies.
    pub fn limits(&self) -> PartitionLimits {
        PartitionLimits {
            size_bytes_limit: self.size_bytes_limit,
            object_count_limit: self.object_count_limit,
        }
    }
}
