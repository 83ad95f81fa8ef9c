//! Sync decision integration tests using LocalStack.
//!
//! These tests exercise [`SyncChecker`] against real S3 objects and
//! verify that locally reconstructed ETags agree with what S3 reports.

use std::io::Write;

use ds_sync::{DEFAULT_CHUNK_SIZE_BYTES, SyncChecker, SyncPath, local_etag};
use tempfile::NamedTempFile;

use crate::common::LocalStackTestContext;

fn local_path(file: &NamedTempFile) -> SyncPath {
    file.path().to_string_lossy().parse().unwrap()
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_should_sync_missing_destination() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-sync-missing-test";
    ctx.create_bucket(bucket).await.unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello world").unwrap();
    file.flush().unwrap();

    let checker = SyncChecker::with_client(ctx.s3.clone());
    let source = local_path(&file);
    let destination: SyncPath = format!("s3://{}/never-uploaded", bucket).parse().unwrap();

    assert!(checker.should_sync(&source, &destination, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_should_sync_false_after_upload() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-sync-uploaded-test";
    ctx.create_bucket(bucket).await.unwrap();

    // Write locally first so the object's mtime is not older than the file's
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello world").unwrap();
    file.flush().unwrap();

    ctx.upload_object(bucket, "archive/data.bin", b"hello world")
        .await
        .unwrap();

    let checker = SyncChecker::with_client(ctx.s3.clone());
    let source = local_path(&file);
    let destination: SyncPath = format!("s3://{}/archive/data.bin", bucket).parse().unwrap();

    assert!(!checker.should_sync(&source, &destination, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_should_sync_detects_size_mismatch() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-sync-size-test";
    ctx.create_bucket(bucket).await.unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello world, plus more").unwrap();
    file.flush().unwrap();

    ctx.upload_object(bucket, "archive/data.bin", b"hello world")
        .await
        .unwrap();

    let checker = SyncChecker::with_client(ctx.s3.clone());
    let source = local_path(&file);
    let destination: SyncPath = format!("s3://{}/archive/data.bin", bucket).parse().unwrap();

    assert!(checker.should_sync(&source, &destination, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_should_sync_size_only_skips_digest() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-sync-sizeonly-test";
    ctx.create_bucket(bucket).await.unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello world").unwrap();
    file.flush().unwrap();

    // Same size, different content
    ctx.upload_object(bucket, "archive/data.bin", b"dlrow olleh")
        .await
        .unwrap();

    let checker = SyncChecker::with_client(ctx.s3.clone());
    let source = local_path(&file);
    let destination: SyncPath = format!("s3://{}/archive/data.bin", bucket).parse().unwrap();

    assert!(!checker.should_sync(&source, &destination, true).await.unwrap());
    assert!(checker.should_sync(&source, &destination, false).await.unwrap());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_local_etag_matches_s3_single_part() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-etag-test";
    ctx.create_bucket(bucket).await.unwrap();

    let content = b"the quick brown fox jumps over the lazy dog";
    ctx.upload_object(bucket, "etag/single.bin", content)
        .await
        .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();

    let head = ctx
        .s3
        .head_object()
        .bucket(bucket)
        .key("etag/single.bin")
        .send()
        .await
        .unwrap();

    let computed = local_etag(file.path(), Some(DEFAULT_CHUNK_SIZE_BYTES)).unwrap();
    assert_eq!(head.e_tag().unwrap(), computed);
}
