//! End-to-end run orchestration.
//!
//! [`run`] wires the four stages together: fetch the manifest, create the
//! output directory, plan the missing downloads, then execute (fan-out) and
//! collect (fan-in) concurrently. Manifest failures yield an empty run;
//! only an uncreatable output directory is fatal.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::download::{DEFAULT_CONCURRENCY, DownloadEngine, EngineError, HttpClient};
use crate::manifest::ManifestClient;
use crate::planner::{self, DEFAULT_MAX_TASKS};
use crate::summary::{self, RunSummary};

/// Configuration for one download run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// URL of the manifest index JSON.
    pub index_url: String,
    /// Directory downloaded files are written to (created if missing).
    pub output_dir: PathBuf,
    /// Maximum transfers in flight at once.
    pub max_concurrency: usize,
    /// Maximum tasks submitted per run.
    pub max_tasks: usize,
}

impl RunConfig {
    /// Creates a config with the default concurrency and task caps.
    #[must_use]
    pub fn new(index_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            index_url: index_url.into(),
            output_dir: output_dir.into(),
            max_concurrency: DEFAULT_CONCURRENCY,
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }
}

/// Errors fatal to a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The output directory could not be created.
    #[error("could not create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Download engine construction or dispatch failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Runs the full fetch-plan-execute-aggregate pipeline.
///
/// Manifest fetch and shape failures are logged and produce an empty
/// summary; per-task failures only reduce `succeeded`. Re-running against
/// the same output directory is idempotent: existing files are skipped at
/// planning time.
///
/// # Errors
///
/// Returns [`PipelineError::OutputDir`] when the output directory cannot be
/// created, and [`PipelineError::Engine`] for an invalid concurrency value.
#[instrument(skip(config), fields(index_url = %config.index_url))]
pub async fn run(config: &RunConfig) -> Result<RunSummary, PipelineError> {
    info!("fetching manifest index");
    let manifest = ManifestClient::new();
    let items = match manifest.fetch(&config.index_url).await {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, "failed to fetch manifest index");
            return Ok(RunSummary::empty(0));
        }
    };

    if items.is_empty() {
        info!("no manifest entries found");
        return Ok(RunSummary::empty(0));
    }

    info!(discovered = items.len(), "manifest entries discovered");

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| PipelineError::OutputDir {
            path: config.output_dir.clone(),
            source: e,
        })?;

    let tasks = planner::plan(&items, &config.output_dir, config.max_tasks);
    let attempted = tasks.len();
    info!(planned = attempted, "planned downloads");

    if tasks.is_empty() {
        return Ok(RunSummary::empty(items.len()));
    }

    let engine = DownloadEngine::new(config.max_concurrency)?;
    let client = HttpClient::new();

    // Sized to the batch so no task ever blocks on reporting.
    let (outcome_tx, outcome_rx) = mpsc::channel(attempted);

    let (dispatch, tally) = tokio::join!(
        engine.execute(tasks, &client, outcome_tx),
        summary::collect(items.len(), attempted, outcome_rx),
    );
    dispatch?;

    Ok(tally)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new("https://example.com/index.json", "PDFs");
        assert_eq!(config.index_url, "https://example.com/index.json");
        assert_eq!(config.output_dir, PathBuf::from("PDFs"));
        assert_eq!(config.max_concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.max_tasks, DEFAULT_MAX_TASKS);
    }

    #[test]
    fn test_pipeline_error_output_dir_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = PipelineError::OutputDir {
            path: PathBuf::from("/nope/PDFs"),
            source: io_error,
        };
        let msg = error.to_string();
        assert!(msg.contains("/nope/PDFs"), "Expected path in: {msg}");
    }
}
