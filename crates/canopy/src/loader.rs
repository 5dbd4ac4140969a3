//! Dataset retrieval.
//!
//! A [`DataSource`] turns a location into document text. [`load_hierarchy`]
//! performs exactly one fetch, then parses and validates the result.

use crate::dataset::DatasetDescriptor;
use crate::error::{CanopyError, Result};
use crate::hierarchy::HierarchyNode;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can read a document by location.
pub trait DataSource {
    /// Read the whole document at `location`.
    fn fetch(&self, location: &str) -> Result<String>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch(&self, location: &str) -> Result<String> {
        (**self).fetch(location)
    }
}

/// Blocking HTTP(S) GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a source with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a source with a request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("canopy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CanopyError::Fetch {
                location: String::new(),
                message: format!("HTTP client setup failed: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl DataSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String> {
        let fetch_error = |e: reqwest::Error| CanopyError::Fetch {
            location: location.to_string(),
            message: e.to_string(),
        };
        let response = self.client.get(location).send().map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CanopyError::HttpStatus {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(fetch_error)
    }
}

/// Local files, addressed by path or `file://` URL.
///
/// Relative paths resolve against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    /// Resolve relative paths against the working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative paths against `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Filesystem path a location refers to.
    #[must_use]
    pub fn path_for(&self, location: &str) -> PathBuf {
        let path = PathBuf::from(location.strip_prefix("file://").unwrap_or(location));
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

impl DataSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path_for(location))?)
    }
}

/// Dispatches on the location scheme: `http(s)://` over HTTP, anything
/// else from the filesystem.
#[derive(Debug, Clone)]
pub struct AutoSource {
    http: HttpSource,
    file: FileSource,
}

impl AutoSource {
    /// HTTP with default timeout, files relative to the working directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_parts(HttpSource::new()?, FileSource::new()))
    }

    /// Combine explicit sources.
    #[must_use]
    pub const fn from_parts(http: HttpSource, file: FileSource) -> Self {
        Self { http, file }
    }

    /// Whether a location is fetched over the network.
    #[must_use]
    pub fn is_remote(location: &str) -> bool {
        let lower = location.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

impl DataSource for AutoSource {
    fn fetch(&self, location: &str) -> Result<String> {
        if Self::is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

/// Fetch, parse and validate the dataset behind a descriptor.
pub fn load_hierarchy(
    source: &dyn DataSource,
    descriptor: &DatasetDescriptor,
) -> Result<HierarchyNode> {
    let location = descriptor.source_location.as_str();
    tracing::info!(location, "fetching dataset");
    let text = source.fetch(location).map_err(|e| {
        tracing::warn!(location, error = %e, "dataset fetch failed");
        e
    })?;
    let root = HierarchyNode::from_json(&text)?;
    root.validate()?;
    tracing::info!(
        location,
        bytes = text.len(),
        categories = root.children.len(),
        leaves = root.leaf_count(),
        "dataset loaded"
    );
    Ok(root)
}
