//! CLI entry point for the SDS downloader.

use anyhow::Result;
use clap::Parser;
use sds_downloader_core::{RunConfig, run};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("SDS downloader starting");

    let mut config = RunConfig::new(args.index_url, args.output_dir);
    config.max_concurrency = usize::from(args.concurrency);
    config.max_tasks = args.max_tasks as usize;

    match run(&config).await {
        Ok(summary) => {
            info!(
                succeeded = summary.succeeded,
                discovered = summary.total_discovered,
                attempted = summary.attempted,
                "completed download run"
            );
        }
        Err(e) => {
            // Fatal setup errors surface in the log; the exit code stays 0.
            error!(error = %e, "run aborted");
        }
    }

    Ok(())
}
