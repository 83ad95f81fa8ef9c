//! Plan orchestration: build a tree, partition it, emit transfer units.

use std::path::Path;

use aws_sdk_s3::Client;
use ds_error::Result;
use ds_s3::{RetryConfig, S3Uri, list_prefix, with_retry};
use ds_types::{TransferUnit, UnitKind};
use tracing::info;

use crate::config::PlanConfig;
use crate::local::build_local_tree;
use crate::output::Output;
use crate::remote::build_remote_tree;
use crate::stats::PlanStats;
use crate::tree::{TreeNode, partition_with_report};

/// Produces transfer plans from a local directory or an S3 prefix.
///
/// The S3 client (when planning a remote root) is injected by the
/// caller; the planner holds no client state of its own.
pub struct Planner<O: Output> {
    output: O,
    config: PlanConfig,
    retry: RetryConfig,
}

impl<O: Output> Planner<O> {
    /// Create a planner delivering units through `output`.
    pub fn new(output: O, config: PlanConfig) -> Self {
        Self {
            output,
            config,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy for remote listing.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Consume the planner, returning its output.
    ///
    /// Useful for outputs that accumulate state worth inspecting after
    /// the run.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Plan transfers for the files under a local directory.
    pub async fn plan_local(&self, root_dir: &Path) -> Result<PlanStats> {
        let mut stats = PlanStats::new();
        stats.start();

        let tree = build_local_tree(root_dir)?;
        self.emit(&tree, &mut stats).await?;

        stats.complete();
        Ok(stats)
    }

    /// Plan transfers for the objects under an S3 prefix.
    pub async fn plan_remote(&self, client: &Client, prefix: &S3Uri) -> Result<PlanStats> {
        let mut stats = PlanStats::new();
        stats.start();

        let objects = with_retry(&self.retry, "list_prefix", || {
            list_prefix(client, prefix)
        })
        .await?;

        let tree = build_remote_tree(prefix, &objects);
        self.emit(&tree, &mut stats).await?;

        stats.complete();
        Ok(stats)
    }

    async fn emit(&self, root: &TreeNode, stats: &mut PlanStats) -> Result<()> {
        stats.objects_discovered = root.object_count();
        stats.bytes_discovered = root.size_bytes();

        let report = partition_with_report(root, &self.config.limits());
        stats.oversized_units = report.oversized.len() as u64;

        for node in &report.nodes {
            // An empty root partitions to itself; nothing to transfer.
            if node.object_count() == 0 {
                continue;
            }

            let unit = TransferUnit {
                uri: node.path(),
                size_bytes: node.size_bytes(),
                object_count: node.object_count(),
                kind: if node.is_leaf() {
                    UnitKind::Object
                } else {
                    UnitKind::Prefix
                },
                last_modified: node.last_modified(),
            };

            self.output.output(&unit).await?;
            stats.units_emitted += 1;
        }

        self.output.flush().await?;

        info!(
            objects = stats.objects_discovered,
            bytes = stats.bytes_discovered,
            units = stats.units_emitted,
            oversized = stats.oversized_units,
            "Plan emitted"
        );
        Ok(())
    }
}
