//! Planning integration tests using LocalStack.
//!
//! These tests verify that remote planning lists real S3 objects,
//! partitions them into bounded units, and delivers those units to
//! both in-process and SQS outputs.

use std::sync::Mutex;

use async_trait::async_trait;
use ds_error::Result;
use ds_planner::{Output, PlanConfig, Planner, SqsOutput};
use ds_s3::S3Uri;
use ds_types::{TransferUnit, UnitKind};

use crate::common::LocalStackTestContext;

/// Output that records every unit for assertions.
#[derive(Default)]
struct CollectingOutput {
    units: Mutex<Vec<TransferUnit>>,
}

impl CollectingOutput {
    fn take(&self) -> Vec<TransferUnit> {
        std::mem::take(&mut self.units.lock().unwrap())
    }
}

#[async_trait]
impl Output for CollectingOutput {
    async fn output(&self, unit: &TransferUnit) -> Result<()> {
        self.units.lock().unwrap().push(unit.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plan_remote_partitions_prefix() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-plan-test";
    ctx.create_bucket(bucket).await.unwrap();

    // 20 bytes total: A/ holds 15, B/ holds 5
    for (key, size) in [
        ("data/A/A/f1", 5usize),
        ("data/A/A/f2", 5),
        ("data/A/B/f1", 5),
        ("data/B/f1", 5),
    ] {
        ctx.upload_object(bucket, key, &vec![b'x'; size])
            .await
            .unwrap();
    }

    let planner = Planner::new(
        CollectingOutput::default(),
        PlanConfig::new().with_size_bytes_limit(10),
    );
    let prefix: S3Uri = format!("s3://{}/data/", bucket).parse().unwrap();

    let stats = planner.plan_remote(&ctx.s3, &prefix).await.unwrap();

    assert_eq!(stats.objects_discovered, 4);
    assert_eq!(stats.bytes_discovered, 20);
    assert_eq!(stats.units_emitted, 3);
    assert_eq!(stats.oversized_units, 0);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plan_remote_whole_prefix_when_compliant() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-plan-compliant-test";
    ctx.create_bucket(bucket).await.unwrap();

    ctx.upload_object(bucket, "logs/2024/a.log", b"12345")
        .await
        .unwrap();
    ctx.upload_object(bucket, "logs/2024/b.log", b"12345")
        .await
        .unwrap();

    let planner = Planner::new(
        CollectingOutput::default(),
        PlanConfig::new().with_size_bytes_limit(1000),
    );
    let prefix: S3Uri = format!("s3://{}/logs/", bucket).parse().unwrap();

    planner.plan_remote(&ctx.s3, &prefix).await.unwrap();

    // Everything fits in one unit, so the whole prefix is emitted
    let units = planner.into_output().take();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].uri, format!("s3://{}/logs/", bucket));
    assert_eq!(units[0].object_count, 2);
    assert_eq!(units[0].size_bytes, 10);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plan_remote_unit_contents() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-plan-units-test";
    ctx.create_bucket(bucket).await.unwrap();

    ctx.upload_object(bucket, "batch/X/f1", b"aaaa").await.unwrap();
    ctx.upload_object(bucket, "batch/X/f2", b"bbbb").await.unwrap();
    ctx.upload_object(bucket, "batch/Y/f1", b"cccc").await.unwrap();

    // A count limit of 2 forces X and Y apart
    let planner = Planner::new(
        CollectingOutput::default(),
        PlanConfig::new().with_object_count_limit(2),
    );
    let prefix: S3Uri = format!("s3://{}/batch/", bucket).parse().unwrap();

    planner.plan_remote(&ctx.s3, &prefix).await.unwrap();

    let units = planner.into_output().take();
    let mut uris: Vec<String> = units.iter().map(|u| u.uri.clone()).collect();
    uris.sort();

    assert_eq!(
        uris,
        vec![
            format!("s3://{}/batch/X/", bucket),
            format!("s3://{}/batch/Y/", bucket),
        ]
    );
    assert!(units.iter().all(|u| u.kind == UnitKind::Prefix));
    assert!(units.iter().all(|u| u.last_modified.is_some()));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_plan_remote_delivers_to_sqs() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "datasync-sqs-test";
    ctx.create_bucket(bucket).await.unwrap();
    let queue_url = ctx.create_queue("datasync-plan-units").await.unwrap();
    ctx.purge_queue(&queue_url).await.ok();

    ctx.upload_object(bucket, "in/A/f1", b"123").await.unwrap();
    ctx.upload_object(bucket, "in/B/f1", b"456").await.unwrap();

    let output = SqsOutput::with_client(ctx.sqs.clone(), &queue_url);
    let planner = Planner::new(output, PlanConfig::new().with_size_bytes_limit(4));
    let prefix: S3Uri = format!("s3://{}/in/", bucket).parse().unwrap();

    let stats = planner.plan_remote(&ctx.s3, &prefix).await.unwrap();
    assert_eq!(stats.units_emitted, 2);

    let bodies = ctx.receive_messages(&queue_url, 10).await.unwrap();
    assert_eq!(bodies.len(), 2);

    let mut uris: Vec<String> = bodies
        .iter()
        .map(|b| serde_json::from_str::<TransferUnit>(b).unwrap().uri)
        .collect();
    uris.sort();

    assert_eq!(
        uris,
        vec![
            format!("s3://{}/in/A/", bucket),
            format!("s3://{}/in/B/", bucket),
        ]
    );

    ctx.delete_queue(&queue_url).await.ok();
}
