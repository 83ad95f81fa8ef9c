//! Transfer artifact descriptors.
//!
//! A sync comparison operates on two artifacts, each either a local file
//! or a remote object, carrying size, modification time and a lazily
//! computed content digest.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use ds_error::{DsError, Result, SyncError};
use ds_s3::{ObjectMeta, S3Uri};

use crate::etag::local_etag;

/// An address that can take part in a sync comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPath {
    /// A local filesystem path
    Local(PathBuf),

    /// A remote S3 object
    S3(S3Uri),
}

impl FromStr for SyncPath {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("s3://") {
            Ok(Self::S3(s.parse()?))
        } else {
            Ok(Self::Local(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for SyncPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::S3(uri) => write!(f, "{uri}"),
        }
    }
}

/// A resolved artifact: the metadata of an existing file or object.
///
/// Constructed per comparison, discarded right after the decision.
#[derive(Debug, Clone)]
pub enum TransferArtifact {
    /// An existing local file
    Local(LocalFile),

    /// An existing remote object
    Remote(RemoteObject),
}

/// Metadata of an existing local file.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    size_bytes: u64,
    modified: Option<DateTime<Utc>>,
}

/// Metadata of an existing remote object.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    uri: S3Uri,
    size_bytes: u64,
    last_modified: Option<DateTime<Utc>>,
    e_tag: Option<String>,
}

impl LocalFile {
    /// Stat `path`, returning `None` if nothing exists there.
    pub fn probe(path: &Path) -> Result<Option<Self>> {
        match std::fs::metadata(path) {
            Ok(metadata) => Ok(Some(Self {
                path: path.to_path_buf(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(Into::into),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::Io {
                path: path.display().to_string(),
                source: e,
            }
            .into()),
        }
    }

    /// The file's path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RemoteObject {
    /// Wrap a HEAD response for `uri`.
    pub fn from_meta(uri: S3Uri, meta: ObjectMeta) -> Self {
        Self {
            uri,
            size_bytes: meta.size_bytes,
            last_modified: meta.last_modified,
            e_tag: meta.e_tag,
        }
    }

    /// The object's URI.
    pub fn uri(&self) -> &S3Uri {
        &self.uri
    }
}

impl TransferArtifact {
    /// Size in bytes.
    pub fn size_bytes(&self) -> u64 {
        match self {
            Self::Local(f) => f.size_bytes,
            Self::Remote(o) => o.size_bytes,
        }
    }

    /// Modification time, if the store reports one.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Local(f) => f.modified,
            Self::Remote(o) => o.last_modified,
        }
    }

    /// Content digest in the provider's ETag format.
    ///
    /// Remote objects carry a provider-assigned digest; local files have
    /// one computed to match the provider's multipart convention. The
    /// local computation is blocking I/O and runs off the async runtime.
    pub async fn content_digest(&self) -> Result<String> {
        match self {
            Self::Remote(object) => object.e_tag.clone().ok_or_else(|| {
                SyncError::Digest(format!("{} carries no ETag", object.uri)).into()
            }),
            Self::Local(file) => {
                let path = file.path.clone();
                tokio::task::spawn_blocking(move || local_etag(&path, None))
                    .await
                    .map_err(|e| SyncError::Digest(format!("digest task failed: {e}")))?
            }
        }
    }
}
