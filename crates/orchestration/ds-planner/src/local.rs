//! Local filesystem tree construction.

use std::path::Path;

use ds_error::{PlanError, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::tree::TreeNode;

const ESTALE: i32 = 116;

/// Build a [`TreeNode`] from the regular files under `root_dir`.
///
/// Directories become internal nodes; every regular file becomes a leaf
/// with its byte size and mtime. Files that vanish between enumeration
/// and stat, and stale NFS handles for since-deleted paths, are skipped;
/// any other I/O error aborts the walk.
pub fn build_local_tree(root_dir: &Path) -> Result<TreeNode> {
    let mut tree = TreeNode::new(root_dir.display().to_string());

    for entry in WalkDir::new(root_dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if is_vanished(&e) => {
                debug!(error = %e, "Skipping path that vanished during walk");
                continue;
            }
            Err(e) => return Err(PlanError::Walk(e.to_string()).into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) if is_vanished(&e) => {
                debug!(path = %entry.path().display(), "Skipping file that vanished before stat");
                continue;
            }
            Err(e) => return Err(PlanError::Walk(e.to_string()).into()),
        };

        let relative = entry
            .path()
            .strip_prefix(root_dir)
            .map_err(|e| PlanError::Walk(e.to_string()))?
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/");

        let modified = metadata.modified().ok().map(Into::into);
        tree.add_object(&relative, metadata.len(), modified);
    }

    Ok(tree)
}

/// A walk error counts as "vanished" when the path is simply gone, or a
/// stale handle points at a path that no longer exists.
fn is_vanished(error: &walkdir::Error) -> bool {
    let Some(io) = error.io_error() else {
        return false;
    };
    if io.kind() == std::io::ErrorKind::NotFound {
        return true;
    }
    if io.raw_os_error() == Some(ESTALE) {
        return error.path().is_some_and(|p| !p.exists());
    }
    false
}
