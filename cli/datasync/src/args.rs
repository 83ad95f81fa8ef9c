//! CLI argument definitions for datasync.

use clap::{Parser, Subcommand, ValueEnum};
use ds_cli_common::LogLevel;

/// Transfer planning and sync checks for S3 and local file trees.
///
/// ## Examples
///
/// Partition an S3 prefix into ~50 GB transfer units:
///   datasync plan s3://my-bucket/data/ --size-limit 53687091200
///
/// Partition a local directory by object count, feeding an SQS queue:
///   datasync plan /data/archive --count-limit 5000 \
///       --destination sqs --sqs-queue-url https://sqs.../transfer-units
///
/// Check whether an upload is still needed:
///   datasync check /data/archive.tar s3://backups/archive.tar
#[derive(Parser, Debug)]
#[command(name = "datasync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    // === AWS Configuration ===
    /// AWS region
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "DS_S3_ENDPOINT", global = true)]
    pub s3_endpoint: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Partition a file tree into bounded transfer units
    Plan(PlanArgs),

    /// Decide whether a source needs transferring to a destination
    Check(CheckArgs),
}

/// Arguments for `datasync plan`.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Root to plan: an s3:// prefix or a local directory
    pub source: String,

    /// Maximum aggregate size per transfer unit in bytes
    #[arg(long)]
    pub size_limit: Option<u64>,

    /// Maximum object count per transfer unit
    #[arg(long)]
    pub count_limit: Option<u64>,

    /// Output destination type
    #[arg(long, value_enum, default_value = "stdout")]
    pub destination: DestinationType,

    /// Output format for stdout destination
    #[arg(long, value_enum, default_value = "jsonl")]
    pub output_format: OutputFormatArg,

    /// SQS queue URL (required when destination=sqs)
    #[arg(long, env = "DS_SQS_QUEUE_URL")]
    pub sqs_queue_url: Option<String>,

    /// Custom SQS endpoint URL (for LocalStack)
    #[arg(long, env = "DS_SQS_ENDPOINT")]
    pub sqs_endpoint: Option<String>,

    /// SQS batch size (1-10)
    #[arg(long, default_value = "10", value_parser = parse_sqs_batch_size)]
    pub sqs_batch_size: usize,
}

/// Arguments for `datasync check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Source artifact: an s3:// object or a local file
    pub source: String,

    /// Destination artifact: an s3:// object or a local file
    pub destination: String,

    /// Limit the comparison to size and mtime (skip content digests)
    #[arg(long)]
    pub size_only: bool,
}

/// Destination type for plan output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DestinationType {
    /// Output to stdout
    Stdout,
    /// Output to SQS queue
    Sqs,
}

/// Output format argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// JSON Lines (one JSON object per line)
    Jsonl,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormatArg> for ds_planner::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Jsonl => ds_planner::OutputFormat::Jsonl,
            OutputFormatArg::Json => ds_planner::OutputFormat::Json,
        }
    }
}

/// Parse SQS batch size (1-10).
fn parse_sqs_batch_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1..=10).contains(&value) {
        return Err(format!("{} is not in 1..=10", value));
    }
    Ok(value)
}
