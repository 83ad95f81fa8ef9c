//! File-tree abstraction and partitioning.
//!
//! [`TreeNode`] is a rooted tree of files/objects with rolled-up size and
//! count aggregates. [`partition`] cuts it into the fewest, shallowest
//! subtrees that fit within [`PartitionLimits`]. Both are pure in-memory
//! computations; the adapters in [`crate::local`] and [`crate::remote`]
//! are the only code touching storage APIs.

mod node;
mod partition;

pub use node::TreeNode;
pub use partition::{PartitionLimits, PartitionReport, partition, partition_with_report};
