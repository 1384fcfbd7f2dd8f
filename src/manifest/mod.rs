//! Remote manifest retrieval and parsing.
//!
//! The manifest is a JSON document whose `Items` array describes every
//! candidate file. This module fetches it with a bounded timeout and turns
//! the array into [`WorkItem`]s for the planner; everything that can go
//! wrong on the way is a [`ManifestError`].

mod error;
mod fetcher;

pub use error::ManifestError;
pub use fetcher::{ManifestClient, WorkItem};
