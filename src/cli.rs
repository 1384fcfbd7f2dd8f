//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use sds_downloader_core::{DEFAULT_CONCURRENCY, DEFAULT_MAX_TASKS};

/// Batch download safety data sheet documents from a remote manifest.
///
/// Fetches the manifest index, plans the documents that are not already in
/// the output directory, and downloads them concurrently. Re-running skips
/// files that already exist.
#[derive(Parser, Debug)]
#[command(name = "sds-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// URL of the manifest index JSON
    pub index_url: String,

    /// Directory downloaded files are written to (created if missing)
    #[arg(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Maximum downloads attempted per run
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_TASKS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tasks: u32,
}
