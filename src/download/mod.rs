//! HTTP download engine for streaming files to disk.
//!
//! This module provides functionality for downloading files from HTTP/HTTPS
//! URLs with streaming support to handle large files efficiently.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Semaphore-gated concurrency with an explicit cap
//! - Per-task outcomes reported in completion order
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use sds_downloader_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let bytes = client
//!     .download_to_path("https://example.com/sheet.pdf", Path::new("./PDFs/sheet.pdf"))
//!     .await?;
//! println!("wrote {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use engine::{DEFAULT_CONCURRENCY, DownloadEngine, EngineError, TaskOutcome};
pub use error::DownloadError;
