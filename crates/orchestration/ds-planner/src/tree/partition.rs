//! Size/count-bounded tree partitioning.
//!
//! Splits a rooted file tree into the fewest, shallowest subtrees such
//! that each emitted subtree stays within caller-supplied limits. A
//! compliant node is always preferred over descending into its children,
//! so the cut happens at the minimum depth required.

use tracing::warn;

use super::TreeNode;

/// Limits applied to each emitted partition member.
///
/// `None` means unlimited for that dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionLimits {
    /// Maximum aggregate size in bytes per emitted subtree
    pub size_bytes_limit: Option<u64>,

    /// Maximum object count per emitted subtree
    pub object_count_limit: Option<u64>,
}

impl PartitionLimits {
    /// No limits: partitioning degenerates to `[root]`.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Limit aggregate size per subtree.
    pub fn with_size_bytes_limit(mut self, limit: u64) -> Self {
        self.size_bytes_limit = Some(limit);
        self
    }

    /// Limit object count per subtree.
    pub fn with_object_count_limit(mut self, limit: u64) -> Self {
        self.object_count_limit = Some(limit);
        self
    }

    /// Whether `node` is within both limits.
    pub fn is_compliant(&self, node: &TreeNode) -> bool {
        let size_ok = self
            .size_bytes_limit
            .is_none_or(|limit| node.size_bytes() <= limit);
        let count_ok = self
            .object_count_limit
            .is_none_or(|limit| node.object_count() <= limit);
        size_ok && count_ok
    }
}

/// Result of [`partition_with_report`].
#[derive(Debug)]
pub struct PartitionReport<'a> {
    /// The selected partition members, in depth-first order.
    pub nodes: Vec<&'a TreeNode>,

    /// Emitted leaves that individually exceed a limit.
    ///
    /// These appear in `nodes` as well; the partition is best effort and
    /// accepts an unsplittable leaf as-is.
    pub oversized: Vec<&'a TreeNode>,
}

/// Partition `root` into the fewest, shallowest compliant subtrees.
///
/// Every leaf of `root` is covered by exactly one returned node. A node
/// is emitted whole as soon as it satisfies both limits; only
/// non-compliant internal nodes are split. A leaf that exceeds a limit
/// cannot be subdivided and is emitted as-is (logged, not an error).
pub fn partition<'a>(root: &'a TreeNode, limits: &PartitionLimits) -> Vec<&'a TreeNode> {
    partition_with_report(root, limits).nodes
}

/// Like [`partition`], additionally reporting over-limit leaves so a
/// caller can tell whether the limits were actually honored.
pub fn partition_with_report<'a>(
    root: &'a TreeNode,
    limits: &PartitionLimits,
) -> PartitionReport<'a> {
    let mut report = PartitionReport {
        nodes: Vec::new(),
        oversized: Vec::new(),
    };
    collect(root, limits, &mut report);
    report
}

fn collect<'a>(node: &'a TreeNode, limits: &PartitionLimits, report: &mut PartitionReport<'a>) {
    if limits.is_compliant(node) {
        report.nodes.push(node);
        return;
    }

    if node.is_leaf() {
        // Cannot split a single object; accept it over-limit.
        warn!(
            path = %node.path(),
            size_bytes = node.size_bytes(),
            object_count = node.object_count(),
            "Leaf exceeds partition limit, emitting as-is"
        );
        report.nodes.push(node);
        report.oversized.push(node);
        return;
    }

    for child in node.children().values() {
        collect(child, limits, report);
    }
}
