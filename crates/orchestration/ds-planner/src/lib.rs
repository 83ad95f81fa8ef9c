//! ds-planner - hierarchical transfer planning for datasync.
//!
//! This crate splits a large file tree (a local directory or an S3 key
//! prefix) into size/count-bounded transfer units for parallel transfer
//! scheduling. It provides:
//!
//! - A file-tree abstraction with rolled-up size/count aggregates
//! - A partitioner that cuts the tree at the shallowest compliant depth
//! - Tree construction from a local walk or a paginated S3 listing
//! - Plan output to stdout (JSONL/JSON) or SQS with batching
//!
//! # Example
//!
//! ```ignore
//! use ds_planner::{PlanConfig, Planner, StdoutOutput};
//! use ds_s3::{S3ClientConfig, S3Uri, create_s3_client};
//!
//! let client = create_s3_client(&S3ClientConfig::new()).await?;
//! let prefix: S3Uri = "s3://my-bucket/data/".parse()?;
//!
//! let config = PlanConfig::new()
//!     .with_size_bytes_limit(50 * 1024 * 1024 * 1024)
//!     .with_object_count_limit(5000);
//!
//! let planner = Planner::new(StdoutOutput::jsonl(), config);
//! let stats = planner.plan_remote(&client, &prefix).await?;
//! eprintln!("Emitted {} transfer units", stats.units_emitted);
//! ```

pub mod config;
pub mod local;
pub mod output;
pub mod planner;
pub mod remote;
pub mod stats;
pub mod tree;

pub use config::PlanConfig;
pub use local::build_local_tree;
pub use output::{Output, OutputFormat, SqsConfig, SqsOutput, StdoutOutput};
pub use planner::Planner;
pub use remote::build_remote_tree;
pub use stats::PlanStats;
pub use tree::{PartitionLimits, PartitionReport, TreeNode, partition, partition_with_report};
