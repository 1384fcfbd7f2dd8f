//! Run summary aggregation.
//!
//! Outcomes are consumed from a single-receiver channel in completion
//! order. The aggregator is the only writer of the success tally, so the
//! channel is the sole synchronization point.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::download::TaskOutcome;

/// Aggregate counts for one download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Work items found in the manifest.
    pub total_discovered: usize,
    /// Tasks submitted to the executor.
    pub attempted: usize,
    /// Tasks that completed successfully.
    pub succeeded: usize,
}

impl RunSummary {
    /// Summary of a run that performed no transfers.
    #[must_use]
    pub fn empty(total_discovered: usize) -> Self {
        Self {
            total_discovered,
            attempted: 0,
            succeeded: 0,
        }
    }

    /// Tasks that were attempted but did not succeed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.succeeded)
    }
}

/// Drains the outcome channel and tallies successes.
///
/// Consumes outcomes as they arrive and returns once the channel closes,
/// i.e. once every submitted task has reported exactly once. `attempted` is
/// fixed at submission time and carried through unchanged.
pub async fn collect(
    total_discovered: usize,
    attempted: usize,
    mut outcomes: mpsc::Receiver<TaskOutcome>,
) -> RunSummary {
    let mut succeeded = 0usize;
    let mut received = 0usize;

    while let Some(outcome) = outcomes.recv().await {
        received += 1;
        if outcome.is_success() {
            succeeded += 1;
        }
    }

    if received == attempted {
        info!(succeeded, attempted, "all tasks reported");
    } else {
        warn!(
            received,
            attempted, "outcome count does not match submitted tasks"
        );
    }

    RunSummary {
        total_discovered,
        attempted,
        succeeded,
    }
}
