//! Error types for canopy.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CanopyError>;

/// Errors that can occur while loading, validating or rendering a dataset.
#[derive(Debug, Error)]
pub enum CanopyError {
    /// The dataset could not be retrieved at all.
    #[error("failed to fetch {location}: {message}")]
    Fetch {
        /// Location that was requested
        location: String,
        /// Transport-level failure
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("fetching {location} returned HTTP {status}")]
    HttpStatus {
        /// Location that was requested
        location: String,
        /// HTTP status code
        status: u16,
    },

    /// IO error reading a local dataset or configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON or does not match the node shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not describe a usable hierarchy.
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Output could not be produced.
    #[error("render failed: {0}")]
    Render(String),
}

impl CanopyError {
    /// Whether the failure happened while retrieving data (as opposed to
    /// data that was retrieved but is unusable).
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: CanopyError = io_err.into();
        assert!(matches!(err, CanopyError::Io(_)));
        assert!(err.to_string().contains("IO error"));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CanopyError = json_err.into();
        assert!(matches!(err, CanopyError::Json(_)));
        assert!(!err.is_fetch_error());
    }

    #[test]
    fn test_http_status_display() {
        let err = CanopyError::HttpStatus {
            location: "https://example.test/data.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "fetching https://example.test/data.json returned HTTP 404"
        );
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_invalid_hierarchy_display() {
        let err = CanopyError::InvalidHierarchy("leaf 'x' has no value".to_string());
        assert_eq!(err.to_string(), "invalid hierarchy: leaf 'x' has no value");
    }
}
