//! File-tree node with rolled-up aggregates.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A node in a rooted file tree.
///
/// Leaves represent individual files/objects; internal nodes represent
/// directories/key prefixes with size, count and last-modified rolled up
/// over their subtree. Children are keyed by path segment and owned
/// exclusively by their parent; traversal is strictly top-down.
///
/// A tree is built once from an enumeration of `(relative path, size)`
/// pairs under a root and never mutated afterwards. Aggregation
/// invariants are maintained by [`TreeNode::add_object`], not validated:
/// a caller that hands the partitioner an inconsistent tree gets an
/// inconsistent partition back.
#[derive(Debug, Clone)]
pub struct TreeNode {
    path: String,
    size_bytes: u64,
    object_count: u64,
    last_modified: Option<DateTime<Utc>>,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Create an empty root node addressed by `root_path`.
    pub fn new(root_path: impl Into<String>) -> Self {
        let mut path: String = root_path.into();
        while path.ends_with('/') {
            path.pop();
        }
        Self {
            path,
            size_bytes: 0,
            object_count: 0,
            last_modified: None,
            children: BTreeMap::new(),
        }
    }

    /// Insert a leaf at `relative_path` (segments separated by `/`),
    /// creating intermediate nodes and updating aggregates along the way.
    pub fn add_object(
        &mut self,
        relative_path: &str,
        size_bytes: u64,
        last_modified: Option<DateTime<Utc>>,
    ) {
        self.size_bytes += size_bytes;
        self.object_count += 1;
        self.last_modified = max_mtime(self.last_modified, last_modified);

        let mut node = self;
        for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
            let child_path = format!("{}/{}", node.path, segment);
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| TreeNode::new(child_path));
            node.size_bytes += size_bytes;
            node.object_count += 1;
            node.last_modified = max_mtime(node.last_modified, last_modified);
        }
    }

    /// Look up a descendant by relative path.
    pub fn get(&self, relative_path: &str) -> Option<&TreeNode> {
        let mut node = self;
        for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// The node's address.
    ///
    /// Internal nodes render with a trailing `/` so that a directory cut
    /// is distinguishable from an individual object cut in plan output.
    pub fn path(&self) -> String {
        if self.children.is_empty() {
            self.path.clone()
        } else {
            format!("{}/", self.path)
        }
    }

    /// Aggregate size of the subtree in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Number of leaves in the subtree.
    pub fn object_count(&self) -> u64 {
        self.object_count
    }

    /// Most recent modification time in the subtree, if known.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child nodes keyed by path segment.
    pub fn children(&self) -> &BTreeMap<String, TreeNode> {
        &self.children
    }

    /// All leaf paths in the subtree, depth-first.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaves(&mut paths);
        paths
    }

    fn collect_leaves(&self, out: &mut Vec<String>) {
        if self.is_leaf() {
            out.push(self.path());
        } else {
            for child in self.children.values() {
                child.collect_leaves(out);
            }
        }
    }
}

fn max_mtime(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_tree() -> TreeNode {
        let mut root = TreeNode::new("/path/to/my/root");
        root.add_object("d1/x", 1, Some(Utc::now()));
        root.add_object("d1/d2/x", 2, Some(Utc::now()));
        root.add_object("d1/d2/y", 4, Some(Utc::now()));
        root
    }

    #[test]
    fn test_aggregates_roll_up() {
        let root = sample_tree();
        assert_eq!(root.size_bytes(), 7);
        assert_eq!(root.object_count(), 3);

        let d1 = root.get("d1").unwrap();
        assert_eq!(d1.size_bytes(), 7);
        assert_eq!(d1.object_count(), 3);

        let d2 = root.get("d1/d2").unwrap();
        assert_eq!(d2.size_bytes(), 6);
        assert_eq!(d2.object_count(), 2);
    }

    #[test]
    fn test_internal_paths_carry_trailing_slash() {
        let root = sample_tree();
        assert_eq!(root.path(), "/path/to/my/root/");
        assert_eq!(root.get("d1").unwrap().path(), "/path/to/my/root/d1/");
        assert_eq!(root.get("d1/x").unwrap().path(), "/path/to/my/root/d1/x");
        assert_eq!(
            root.get("d1/d2").unwrap().path(),
            "/path/to/my/root/d1/d2/"
        );
    }

    #[test]
    fn test_get_missing_returns_none() {
        let root = sample_tree();
        assert!(root.get("doesnotexist").is_none());
        assert!(root.get("d1/doesnotexist").is_none());
    }

    #[test]
    fn test_leaf_object_count_is_one() {
        let root = sample_tree();
        let leaf = root.get("d1/d2/y").unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.object_count(), 1);
        assert_eq!(leaf.size_bytes(), 4);
    }

    #[test]
    fn test_leaf_paths_cover_all_objects() {
        let root = sample_tree();
        assert_eq!(
            root.leaf_paths(),
            vec![
                "/path/to/my/root/d1/d2/x".to_string(),
                "/path/to/my/root/d1/d2/y".to_string(),
                "/path/to/my/root/d1/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_root_trailing_slash_normalized() {
        let mut root = TreeNode::new("s3://bucket/prefix/");
        root.add_object("a", 1, None);
        assert_eq!(root.get("a").unwrap().path(), "s3://bucket/prefix/a");
    }

    #[test]
    fn test_children_last_modified_rolls_up_max() {
        let older = Utc::now() - chrono::Duration::hours(1);
        let newer = Utc::now();

        let mut root = TreeNode::new("/r");
        root.add_object("a/x", 1, Some(newer));
        root.add_object("a/y", 1, Some(older));

        assert_eq!(root.get("a").unwrap().last_modified(), Some(newer));
        assert_eq!(root.last_modified(), Some(newer));
    }
}
