//! Statistics for a planning run.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Counters collected while producing a transfer plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanStats {
    /// Objects found under the planned root
    pub objects_discovered: u64,

    /// Total bytes found under the planned root
    pub bytes_discovered: u64,

    /// Transfer units emitted
    pub units_emitted: u64,

    /// Emitted units that individually exceed a limit (unsplittable leaves)
    pub oversized_units: u64,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl PlanStats {
    /// Create zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of the run.
    pub fn start(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// Mark the end of the run.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, if both markers are set.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
