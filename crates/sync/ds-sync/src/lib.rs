//! ds-sync - sync decision engine for datasync.
//!
//! Decides whether transferring a source artifact (local file or S3
//! object) to a destination is necessary, mirroring `aws s3 sync`:
//! missing destination, size mismatch, newer source mtime, or content
//! digest mismatch all force a transfer. Local digests are reconstructed
//! with S3's multipart ETag convention so they compare directly against
//! remote ETags.
//!
//! # Example
//!
//! ```ignore
//! use ds_sync::{SyncChecker, SyncPath};
//! use ds_s3::{S3ClientConfig, create_s3_client};
//!
//! let client = create_s3_client(&S3ClientConfig::new()).await?;
//! let checker = SyncChecker::with_client(client);
//!
//! let source: SyncPath = "/data/archive.tar".parse()?;
//! let destination: SyncPath = "s3://backups/archive.tar".parse()?;
//!
//! if checker.should_sync(&source, &destination, false).await? {
//!     // transfer needed
//! }
//! ```

pub mod artifact;
pub mod decision;
pub mod etag;

pub use artifact::{LocalFile, RemoteObject, SyncPath, TransferArtifact};
pub use decision::SyncChecker;
pub use etag::{DEFAULT_CHUNK_SIZE_BYTES, MULTIPART_PART_LIMIT, determine_chunk_size, local_etag};
