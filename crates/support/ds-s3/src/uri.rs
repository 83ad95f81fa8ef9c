//! S3 URI parsing and formatting.

use std::fmt;
use std::str::FromStr;

use ds_error::{DsError, S3Error};
use serde::{Deserialize, Serialize};

/// A parsed `s3://bucket/key` URI.
///
/// The key may be empty (bucket root) and may carry a trailing `/` to
/// denote a prefix rather than an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct S3Uri {
    bucket: String,
    key: String,
}

impl S3Uri {
    /// Build a URI from bucket and key parts.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The key (or key prefix), without a leading `/`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the key names a prefix (empty or trailing `/`).
    pub fn is_prefix(&self) -> bool {
        self.key.is_empty() || self.key.ends_with('/')
    }

    /// The key with a trailing `/` appended if not already present.
    pub fn key_as_prefix(&self) -> String {
        if self.is_prefix() {
            self.key.clone()
        } else {
            format!("{}/", self.key)
        }
    }

    /// A new URI addressing `child` under this URI treated as a prefix.
    pub fn join(&self, child: &str) -> Self {
        Self::new(
            &self.bucket,
            format!("{}{}", self.key_as_prefix(), child.trim_start_matches('/')),
        )
    }
}

impl FromStr for S3Uri {
    type Err = DsError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let url = url::Url::parse(uri)
            .map_err(|e| S3Error::InvalidUri(format!("'{uri}': {e}")))?;

        if url.scheme() != "s3" {
            return Err(S3Error::InvalidUri(format!(
                "Expected s3:// URI, got: {uri}"
            ))
            .into());
        }

        let bucket = url
            .host_str()
            .ok_or_else(|| S3Error::InvalidUri(format!("Missing bucket in: {uri}")))?;

        let key = url.path().trim_start_matches('/');

        Ok(Self::new(bucket, key))
    }
}

impl fmt::Display for S3Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
