//! S3 plumbing shared by the planner and the sync decision engine:
//!
//! - Client configuration and creation with LocalStack support
//! - `s3://` URI parsing
//! - Retry with exponential backoff and jitter, driven by the
//!   transient/permanent classification in `ds-error`
//! - Thin wrappers over paginated listing and object metadata lookup

mod client;
mod ops;
mod retry;
mod uri;

pub use client::{S3ClientConfig, create_s3_client};
pub use ops::{ObjectMeta, head_object_meta, list_prefix};
pub use retry::{RetryConfig, with_retry};
pub use uri::S3Uri;
