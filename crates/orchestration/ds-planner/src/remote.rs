//! Remote (S3) tree construction.

use ds_s3::S3Uri;
use ds_types::ObjectSummary;

use crate::tree::TreeNode;

/// Build a [`TreeNode`] from a flat prefix listing.
///
/// `objects` carry keys relative to `prefix`, as returned by
/// [`ds_s3::list_prefix`]; each key is split on `/` to synthesize the
/// same tree shape a local walk would produce.
pub fn build_remote_tree(prefix: &S3Uri, objects: &[ObjectSummary]) -> TreeNode {
    let root_path = format!(
        "s3://{}/{}",
        prefix.bucket(),
        prefix.key_as_prefix().trim_end_matches('/')
    );
    let mut tree = TreeNode::new(root_path);

    for object in objects {
        tree.add_object(&object.key, object.size_bytes, object.last_modified);
    }

    tree
}
