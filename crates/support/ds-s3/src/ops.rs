//! Thin wrappers over the S3 operations datasync needs: paginated prefix
//! listing and single-object metadata lookup.

use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use ds_error::{Result, S3Error};
use ds_types::ObjectSummary;
use tracing::debug;

use crate::S3Uri;

/// Metadata for a single remote object, as returned by HEAD.
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    /// Size of the object in bytes
    pub size_bytes: u64,

    /// Last modified timestamp
    pub last_modified: Option<DateTime<Utc>>,

    /// Provider-assigned content digest (quoted, multipart-suffixed for
    /// multipart uploads)
    pub e_tag: Option<String>,
}

/// List all objects under a key prefix.
///
/// Returns one [`ObjectSummary`] per object, with keys relative to the
/// prefix. Pagination is handled internally; the full listing is
/// materialized because the tree builder needs all of it anyway.
pub async fn list_prefix(client: &Client, prefix: &S3Uri) -> Result<Vec<ObjectSummary>> {
    let key_prefix = prefix.key_as_prefix();
    let mut summaries = Vec::new();

    let mut pages = client
        .list_objects_v2()
        .bucket(prefix.bucket())
        .prefix(&key_prefix)
        .into_paginator()
        .send();

    while let Some(page) = pages.next().await {
        // A missing bucket is permanent; anything else about the listing
        // is worth retrying.
        let page = page.map_err(|e| {
            if e.as_service_error().is_some_and(|se| se.is_no_such_bucket()) {
                S3Error::NotFound(format!("{prefix}: {e}"))
            } else {
                S3Error::List(format!("{prefix}: {e}"))
            }
        })?;

        for object in page.contents() {
            let Some(key) = object.key() else { continue };

            // Zero-byte "directory marker" objects ending in '/' carry no
            // content and would show up as phantom leaves in the tree.
            if key.ends_with('/') {
                continue;
            }

            let relative = key.strip_prefix(&key_prefix).unwrap_or(key);
            let mut summary =
                ObjectSummary::new(relative, object.size().unwrap_or_default().max(0) as u64);
            if let Some(modified) = object.last_modified().and_then(to_chrono) {
                summary = summary.with_last_modified(modified);
            }
            summaries.push(summary);
        }
    }

    debug!(prefix = %prefix, count = summaries.len(), "Listed prefix");
    Ok(summaries)
}

/// Fetch metadata for a single object.
///
/// Returns `Ok(None)` when the object does not exist; any other failure
/// is an error.
pub async fn head_object_meta(client: &Client, uri: &S3Uri) -> Result<Option<ObjectMeta>> {
    let response = client
        .head_object()
        .bucket(uri.bucket())
        .key(uri.key())
        .send()
        .await;

    match response {
        Ok(head) => Ok(Some(ObjectMeta {
            size_bytes: head.content_length().unwrap_or_default().max(0) as u64,
            last_modified: head.last_modified().and_then(to_chrono),
            e_tag: head.e_tag().map(str::to_string),
        })),
        Err(e) => {
            let service_error = e.into_service_error();
            if service_error.is_not_found() {
                Ok(None)
            } else {
                Err(S3Error::Head(format!("{uri}: {service_error}")).into())
            }
        }
    }
}

fn to_chrono(t: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(t.secs(), t.subsec_nanos())
}
