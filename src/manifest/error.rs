//! Error types for manifest retrieval.

use thiserror::Error;

/// Errors that can occur while fetching or parsing the manifest index.
///
/// All variants are non-fatal to a run: the pipeline logs them and proceeds
/// with an empty work set.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Network-level error (DNS resolution, connection refused, TLS errors,
    /// body decode failures).
    #[error("network error fetching manifest {url}: {source}")]
    Network {
        /// The index URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The index request timed out.
    #[error("timeout fetching manifest {url}")]
    Timeout {
        /// The index URL that timed out.
        url: String,
    },

    /// The index endpoint returned a non-success status.
    #[error("HTTP {status} fetching manifest {url}")]
    HttpStatus {
        /// The index URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body parsed as JSON but carried no list-shaped `Items` field.
    #[error("manifest {url} has no list-shaped `Items` field")]
    Shape {
        /// The index URL whose body had an unexpected shape.
        url: String,
    },
}

impl ManifestError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a shape error.
    pub fn shape(url: impl Into<String>) -> Self {
        Self::Shape { url: url.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_timeout_display() {
        let error = ManifestError::timeout("https://example.com/index.json");
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "Expected 'timeout' in: {msg}");
        assert!(
            msg.contains("https://example.com/index.json"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_manifest_error_http_status_display() {
        let error = ManifestError::http_status("https://example.com/index.json", 503);
        let msg = error.to_string();
        assert!(msg.contains("503"), "Expected '503' in: {msg}");
        assert!(
            msg.contains("https://example.com/index.json"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_manifest_error_shape_display() {
        let error = ManifestError::shape("https://example.com/index.json");
        let msg = error.to_string();
        assert!(msg.contains("Items"), "Expected 'Items' in: {msg}");
        assert!(
            msg.contains("https://example.com/index.json"),
            "Expected URL in: {msg}"
        );
    }
}
