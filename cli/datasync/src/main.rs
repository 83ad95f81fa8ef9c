//! datasync CLI
//!
//! Transfer planning and sync checks for S3 and local file trees.

use clap::Parser;

mod args;
mod run;

use args::{Cli, Command};
use ds_cli_common::{format_bytes, format_number, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for plan output)
    init_logging(cli.log_level)?;

    match &cli.command {
        Command::Plan(args) => {
            let stats = run::execute_plan(&cli, args).await?;

            // Report results to stderr
            eprintln!();
            eprintln!("Planning completed:");
            eprintln!(
                "  Objects discovered: {}",
                format_number(stats.objects_discovered)
            );
            eprintln!(
                "  Bytes discovered:   {}",
                format_bytes(stats.bytes_discovered)
            );
            eprintln!("  Units emitted:      {}", format_number(stats.units_emitted));
            eprintln!("  Oversized units:    {}", stats.oversized_units);

            if let Some(duration) = stats.duration() {
                eprintln!(
                    "  Duration:           {:.2}s",
                    duration.num_milliseconds() as f64 / 1000.0
                );
            }
        }
        Command::Check(args) => {
            let required = run::execute_check(&cli, args).await?;

            if required {
                println!("sync required");
            } else {
                println!("up to date");
            }

            // Exit code mirrors the decision so scripts can branch on it
            if required {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
