//! Main execution logic for the datasync CLI.

use std::path::Path;

use anyhow::Result;
use ds_planner::{Output, PlanConfig, PlanStats, Planner, SqsConfig, SqsOutput, StdoutOutput};
use ds_s3::{S3ClientConfig, S3Uri, create_s3_client};
use ds_sync::{SyncChecker, SyncPath};

use crate::args::{CheckArgs, Cli, DestinationType, PlanArgs};

/// Execute the `plan` subcommand.
pub async fn execute_plan(cli: &Cli, args: &PlanArgs) -> Result<PlanStats> {
    let mut config = PlanConfig::new();
    if let Some(limit) = args.size_limit {
        config = config.with_size_bytes_limit(limit);
    }
    if let Some(limit) = args.count_limit {
        config = config.with_object_count_limit(limit);
    }

    match args.destination {
        DestinationType::Stdout => {
            let output = StdoutOutput::new(args.output_format.into());
            run_plan(cli, args, config, output).await
        }
        DestinationType::Sqs => {
            let queue_url = args
                .sqs_queue_url
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--sqs-queue-url is required when destination=sqs"))?;

            let mut sqs_config = SqsConfig::new(queue_url).with_batch_size(args.sqs_batch_size);
            if let Some(region) = &cli.region {
                sqs_config = sqs_config.with_region(region);
            }
            if let Some(endpoint) = &args.sqs_endpoint {
                sqs_config = sqs_config.with_endpoint(endpoint);
            }

            let output = SqsOutput::new(sqs_config).await?;
            run_plan(cli, args, config, output).await
        }
    }
}

async fn run_plan<O: Output>(
    cli: &Cli,
    args: &PlanArgs,
    config: PlanConfig,
    output: O,
) -> Result<PlanStats> {
    let planner = Planner::new(output, config);

    let stats = if args.source.starts_with("s3://") {
        let prefix: S3Uri = args.source.parse()?;
        let client = create_s3_client(&s3_client_config(cli)).await?;
        planner.plan_remote(&client, &prefix).await?
    } else {
        planner.plan_local(Path::new(&args.source)).await?
    };

    Ok(stats)
}

/// Execute the `check` subcommand. Returns whether a transfer is required.
pub async fn execute_check(cli: &Cli, args: &CheckArgs) -> Result<bool> {
    let source: SyncPath = args.source.parse()?;
    let destination: SyncPath = args.destination.parse()?;

    let needs_client = matches!(source, SyncPath::S3(_)) || matches!(destination, SyncPath::S3(_));
    let checker = if needs_client {
        let client = create_s3_client(&s3_client_config(cli)).await?;
        SyncChecker::with_client(client)
    } else {
        SyncChecker::new()
    };

    let required = checker
        .should_sync(&source, &destination, args.size_only)
        .await?;
    Ok(required)
}

fn s3_client_config(cli: &Cli) -> S3ClientConfig {
    let mut config = S3ClientConfig::new();
    if let Some(region) = &cli.region {
        config = config.with_region(region);
    }
    if let Some(endpoint) = &cli.s3_endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(profile) = &cli.profile {
        config = config.with_profile(profile);
    }
    config
}
