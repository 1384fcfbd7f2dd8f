//! Manifest index client.
//!
//! The [`ManifestClient`] issues a single GET against the configured index
//! URL and extracts the `Items` array into [`WorkItem`]s. The caller decides
//! whether an empty work set ends the run.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::ManifestError;

/// Default total timeout for the index request (10 seconds).
const MANIFEST_TIMEOUT_SECS: u64 = 10;

/// One manifest entry describing a candidate document.
///
/// Field names follow the manifest wire format (`URL`, `SpecIdFull`, ...).
/// Entries routinely omit metadata, so every field except `url` falls back
/// to a placeholder default; an entry without a `url` is never planned.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItem {
    /// Source URL of the document.
    #[serde(rename = "URL", default)]
    pub url: Option<String>,

    /// Full specification identifier.
    #[serde(rename = "SpecIdFull", default = "default_spec_id")]
    pub spec_id: String,

    /// Country code.
    #[serde(rename = "CountryCode", default = "default_code")]
    pub country_code: String,

    /// Language code.
    #[serde(rename = "LanguageCode", default = "default_code")]
    pub language_code: String,

    /// Human-readable product name.
    #[serde(rename = "ProductName", default = "default_product")]
    pub product_name: String,
}

fn default_spec_id() -> String {
    "unknown".to_string()
}

fn default_code() -> String {
    "XX".to_string()
}

fn default_product() -> String {
    "product".to_string()
}

/// HTTP client for fetching the manifest index.
///
/// # Example
///
/// ```no_run
/// use sds_downloader_core::ManifestClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ManifestClient::new();
/// let items = client.fetch("https://example.com/index.json").await?;
/// println!("discovered {} entries", items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ManifestClient {
    client: Client,
}

impl Default for ManifestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestClient {
    /// Creates a new manifest client with the default 10 second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(MANIFEST_TIMEOUT_SECS))
    }

    /// Creates a manifest client with an explicit total request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches the index and returns its work items in manifest order.
    ///
    /// Entries that fail to deserialize (e.g. non-object array elements) are
    /// dropped with a warning rather than failing the whole manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Timeout`] when the request times out,
    /// [`ManifestError::Network`] for transport or body-decode failures,
    /// [`ManifestError::HttpStatus`] for non-2xx responses, and
    /// [`ManifestError::Shape`] when the body has no list-shaped `Items`
    /// field. No retries are attempted.
    #[instrument(skip(self), fields(url = %index_url))]
    pub async fn fetch(&self, index_url: &str) -> Result<Vec<WorkItem>, ManifestError> {
        debug!("fetching manifest index");

        let response = self.client.get(index_url).send().await.map_err(|e| {
            if e.is_timeout() {
                ManifestError::timeout(index_url)
            } else {
                ManifestError::network(index_url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManifestError::http_status(index_url, status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ManifestError::timeout(index_url)
            } else {
                ManifestError::network(index_url, e)
            }
        })?;

        let Some(raw_items) = body.get("Items").and_then(Value::as_array) else {
            return Err(ManifestError::shape(index_url));
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            match serde_json::from_value::<WorkItem>(raw.clone()) {
                Ok(item) => items.push(item),
                Err(error) => warn!(%error, "dropping malformed manifest entry"),
            }
        }

        debug!(discovered = items.len(), "manifest parsed");
        Ok(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_work_item_deserializes_wire_names() {
        let item: WorkItem = serde_json::from_value(json!({
            "URL": "http://x/a.pdf",
            "SpecIdFull": "S1",
            "CountryCode": "US",
            "LanguageCode": "EN",
            "ProductName": "Acme Glue"
        }))
        .unwrap();

        assert_eq!(item.url.as_deref(), Some("http://x/a.pdf"));
        assert_eq!(item.spec_id, "S1");
        assert_eq!(item.country_code, "US");
        assert_eq!(item.language_code, "EN");
        assert_eq!(item.product_name, "Acme Glue");
    }

    #[test]
    fn test_work_item_applies_defaults_for_missing_fields() {
        let item: WorkItem = serde_json::from_value(json!({
            "URL": "http://x/a.pdf"
        }))
        .unwrap();

        assert_eq!(item.spec_id, "unknown");
        assert_eq!(item.country_code, "XX");
        assert_eq!(item.language_code, "XX");
        assert_eq!(item.product_name, "product");
    }

    #[test]
    fn test_work_item_without_url_deserializes_to_none() {
        let item: WorkItem = serde_json::from_value(json!({
            "SpecIdFull": "S1"
        }))
        .unwrap();

        assert!(item.url.is_none());
    }

    #[test]
    fn test_work_item_ignores_unknown_fields() {
        let item: WorkItem = serde_json::from_value(json!({
            "URL": "http://x/a.pdf",
            "Revision": 7,
            "IssueDate": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(item.url.as_deref(), Some("http://x/a.pdf"));
    }
}
