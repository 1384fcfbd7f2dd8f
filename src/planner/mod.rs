//! Work planning: turning manifest entries into deduplicated download tasks.
//!
//! The planner walks items in manifest order, derives a stable destination
//! filename for each, drops entries without a source URL, skips destinations
//! that already exist on disk, and stops scanning the instant the task cap
//! is reached.

mod filename;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::manifest::WorkItem;

pub use filename::{destination_filename, sanitize_filename};

/// Default cap on tasks emitted per run.
pub const DEFAULT_MAX_TASKS: usize = 2500;

/// A planned transfer: one source URL and the file it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// URL the document is fetched from.
    pub source_url: String,
    /// Destination path inside the output directory.
    pub destination: PathBuf,
}

/// Plans download tasks for `items`, bounded by `max_tasks`.
///
/// Dropped entries (no URL), already-downloaded destinations, and within-run
/// filename collisions are skipped and do not count toward `max_tasks`.
/// Manifest order is preserved among emitted tasks; items beyond the cap are
/// never inspected.
///
/// The only side effect is the existence probe against the filesystem.
#[must_use]
pub fn plan(items: &[WorkItem], output_dir: &Path, max_tasks: usize) -> Vec<DownloadTask> {
    let mut tasks = Vec::new();
    let mut planned: HashSet<PathBuf> = HashSet::new();

    for item in items {
        if tasks.len() >= max_tasks {
            break;
        }

        let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) else {
            debug!(spec_id = %item.spec_id, "dropping manifest entry without URL");
            continue;
        };

        let filename = destination_filename(item);
        let destination = output_dir.join(&filename);

        if destination.exists() {
            info!(filename = %filename, "already exists, skipping");
            continue;
        }

        // Sanitization is lossy, so distinct items can collide on a name.
        if !planned.insert(destination.clone()) {
            warn!(filename = %filename, url = %url, "destination already planned this run, skipping");
            continue;
        }

        tasks.push(DownloadTask {
            source_url: url.to_string(),
            destination,
        });
    }

    tasks
}
