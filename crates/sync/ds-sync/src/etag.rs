//! Multipart ETag reconstruction for local files.
//!
//! Reproduces the content digest S3 assigns to multipart uploads, so a
//! local file can be compared against a remote object's ETag without a
//! network round trip. The chunking must match what `aws s3 cp` would
//! use: start at 8 MiB and double until the part count fits under the
//! 10,000-part limit.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use ds_error::{ErrorCategory, Result, SyncError, classify_io_error};
use md5::{Digest, Md5};
use tracing::warn;

/// Default multipart chunk size used by the AWS CLI (8 MiB).
pub const DEFAULT_CHUNK_SIZE_BYTES: u64 = 8 * 1024 * 1024;

/// Maximum number of parts S3 accepts per multipart upload.
pub const MULTIPART_PART_LIMIT: u64 = 10_000;

/// Retries for transient I/O while digesting (fd exhaustion, EINTR).
const MAX_ATTEMPTS: u32 = 3;

/// Chunk size `aws s3 cp` would pick for a file of `file_size` bytes.
///
/// Starts from the default chunk size and doubles until the implied part
/// count no longer exceeds [`MULTIPART_PART_LIMIT`].
pub fn determine_chunk_size(file_size: u64) -> u64 {
    let mut chunk_size = DEFAULT_CHUNK_SIZE_BYTES;
    while file_size.div_ceil(chunk_size) > MULTIPART_PART_LIMIT {
        chunk_size *= 2;
    }
    chunk_size
}

/// Compute the expected S3 upload ETag for a local file.
///
/// With `chunk_size_bytes` unset, the chunk size is derived from the
/// file size via [`determine_chunk_size`]. Multi-chunk files digest to
/// `"<md5-of-concatenated-chunk-digests>-<count>"`; single-chunk files
/// to the plain chunk MD5; empty files to the MD5 of empty input. All
/// results are quoted, matching the ETag S3 reports.
///
/// Does not account for server-side encryption (e.g. KMS), which
/// changes the remote ETag.
pub fn local_etag(path: &Path, chunk_size_bytes: Option<u64>) -> Result<String> {
    let mut last_error: Option<std::io::Error> = None;

    for attempt in 0..MAX_ATTEMPTS {
        match compute_etag(path, chunk_size_bytes) {
            Ok(etag) => return Ok(etag),
            Err(e) if classify_io_error(&e) == ErrorCategory::Transient => {
                warn!(
                    path = %path.display(),
                    attempt = attempt,
                    error = %e,
                    "Transient I/O error while digesting, retrying"
                );
                std::thread::sleep(Duration::from_millis(50 << attempt));
                last_error = Some(e);
            }
            Err(e) => {
                return Err(SyncError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
                .into());
            }
        }
    }

    Err(SyncError::Io {
        path: path.display().to_string(),
        source: last_error.expect("should have last error after all retries"),
    }
    .into())
}

fn compute_etag(path: &Path, chunk_size_bytes: Option<u64>) -> std::io::Result<String> {
    let chunk_size = match chunk_size_bytes {
        Some(size) => size,
        None => determine_chunk_size(std::fs::metadata(path)?.len()),
    };

    let mut file = File::open(path)?;
    let mut buffer = vec![0u8; chunk_size as usize];
    let mut chunk_digests: Vec<[u8; 16]> = Vec::new();

    loop {
        let filled = read_chunk(&mut file, &mut buffer)?;
        if filled == 0 {
            break;
        }
        chunk_digests.push(Md5::digest(&buffer[..filled]).into());
        if filled < buffer.len() {
            break;
        }
    }

    let etag = match chunk_digests.len() {
        0 => format!("\"{}\"", hex(&Md5::digest(b""))),
        1 => format!("\"{}\"", hex(&chunk_digests[0])),
        count => {
            let mut combined = Md5::new();
            for digest in &chunk_digests {
                combined.update(digest);
            }
            format!("\"{}-{}\"", hex(&combined.finalize()), count)
        }
    };

    Ok(etag)
}

/// Fill `buffer` as far as the file allows; short reads are retried
/// until EOF so each digest covers exactly one chunk.
fn read_chunk(file: &mut File, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = file.read(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
