//! Download engine for concurrent file transfers.
//!
//! This module provides the `DownloadEngine` which coordinates concurrent
//! downloads using a semaphore-based concurrency control pattern: a permit
//! is acquired before each task is spawned, so at most `concurrency`
//! transfers are in flight and no unbounded task backlog accumulates.
//!
//! Each task reports exactly one [`TaskOutcome`] on the outcome channel.
//! Outcomes arrive in completion order, which is unrelated to submission
//! order; queued tasks become eligible in submission order as permits free
//! up. A failing task never cancels or affects its siblings.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::error::DownloadError;
use crate::planner::DownloadTask;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Result of executing one download task.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The transfer completed and the file is fully written.
    Success {
        /// The task that completed.
        task: DownloadTask,
        /// Bytes written to the destination.
        bytes: u64,
    },
    /// The transfer failed; the error is recorded and the task is finished.
    Failure {
        /// The task that failed.
        task: DownloadTask,
        /// The error that ended the task.
        error: DownloadError,
    },
}

impl TaskOutcome {
    /// Returns `true` for a successful transfer.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the task this outcome belongs to.
    #[must_use]
    pub fn task(&self) -> &DownloadTask {
        match self {
            Self::Success { task, .. } | Self::Failure { task, .. } => task,
        }
    }
}

/// Download engine for concurrent file transfers.
///
/// # Concurrency Model
///
/// - Each download runs in its own Tokio task
/// - A semaphore permit is acquired **before** the task is spawned
/// - Permits are released automatically when downloads complete (RAII)
/// - Outcomes flow to a single consumer over an mpsc channel
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use sds_downloader_core::download::DownloadEngine;
    ///
    /// let engine = DownloadEngine::new(10).unwrap();
    /// assert_eq!(engine.concurrency(), 10);
    /// ```
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Executes all tasks concurrently, sending one outcome per task.
    ///
    /// The permit for each task is acquired before it is spawned, so the
    /// dispatch loop itself applies backpressure when the pool is full.
    /// Returns once every task has finished and reported; the passed sender
    /// (and its per-task clones) are dropped by then, closing the channel
    /// for the consumer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    ///
    /// Note: Individual download failures do NOT cause this method to error.
    /// They are reported as [`TaskOutcome::Failure`] on the channel.
    #[instrument(skip(self, tasks, client, outcomes), fields(task_count = tasks.len()))]
    pub async fn execute(
        &self,
        tasks: Vec<DownloadTask>,
        client: &HttpClient,
        outcomes: mpsc::Sender<TaskOutcome>,
    ) -> Result<(), EngineError> {
        info!(task_count = tasks.len(), "starting downloads");

        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            // Acquire semaphore permit (blocks if at concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let client = client.clone();
            let outcomes = outcomes.clone();

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;

                let outcome = match client
                    .download_to_path(&task.source_url, &task.destination)
                    .await
                {
                    Ok(bytes) => TaskOutcome::Success { task, bytes },
                    Err(error) => {
                        warn!(
                            url = %task.source_url,
                            error = %error,
                            "download failed"
                        );
                        TaskOutcome::Failure { task, error }
                    }
                };

                if outcomes.send(outcome).await.is_err() {
                    warn!("outcome receiver dropped before task reported");
                }
            }));
        }

        // The dispatch-loop sender must close along with the task clones.
        drop(outcomes);

        debug!(
            task_count = handles.len(),
            "waiting for downloads to complete"
        );

        // Wait for all tasks to complete
        for handle in handles {
            // Task panics are logged but don't fail the batch
            if let Err(e) = handle.await {
                warn!(error = %e, "download task panicked");
            }
        }

        Ok(())
    }
}
