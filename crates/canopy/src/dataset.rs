//! Dataset registry.
//!
//! A registry always holds its default entry, so resolution never fails:
//! absent, empty and unknown keys all map to the default.

use crate::error::{CanopyError, Result};
use serde::{Deserialize, Serialize};

/// Key of the dataset shown when nothing else is requested.
pub const DEFAULT_DATASET: &str = "videogames";

const FCC_DATA_ROOT: &str =
    "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map";

/// Display metadata and location of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Page heading
    pub title: String,
    /// Page subheading
    pub description: String,
    /// URL or file path of the JSON document
    pub source_location: String,
}

impl DatasetDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source_location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source_location: source_location.into(),
        }
    }
}

/// Ordered key to descriptor mapping with a default entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRegistry {
    entries: Vec<(String, DatasetDescriptor)>,
    default: usize,
}

impl DatasetRegistry {
    /// A registry holding a single entry, which is also the default.
    #[must_use]
    pub fn new(default_key: impl Into<String>, descriptor: DatasetDescriptor) -> Self {
        Self {
            entries: vec![(default_key.into(), descriptor)],
            default: 0,
        }
    }

    /// The three published datasets, defaulting to `videogames`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new(
            DEFAULT_DATASET,
            DatasetDescriptor::new(
                "Video Game Sales",
                "Top 100 Most Sold Video Games Grouped by Platform",
                format!("{FCC_DATA_ROOT}/video-game-sales-data.json"),
            ),
        );
        registry.insert(
            "movies",
            DatasetDescriptor::new(
                "Movie Sales",
                "Top 100 Highest Grossing Movies Grouped By Genre",
                format!("{FCC_DATA_ROOT}/movie-data.json"),
            ),
        );
        registry.insert(
            "kickstarter",
            DatasetDescriptor::new(
                "Kickstarter Pledges",
                "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
                format!("{FCC_DATA_ROOT}/kickstarter-funding-data.json"),
            ),
        );
        registry
    }

    /// Add an entry, replacing any entry with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: DatasetDescriptor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = descriptor,
            None => self.entries.push((key, descriptor)),
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with_dataset(mut self, key: impl Into<String>, descriptor: DatasetDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    /// Make an existing entry the default.
    pub fn set_default(&mut self, key: &str) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| {
                CanopyError::Config(format!(
                    "default dataset '{key}' is not registered (known: {})",
                    self.keys().collect::<Vec<_>>().join(", ")
                ))
            })?;
        self.default = index;
        Ok(())
    }

    /// Key of the default entry.
    #[must_use]
    pub fn default_key(&self) -> &str {
        &self.entries[self.default].0
    }

    /// Descriptor of the default entry.
    #[must_use]
    pub fn default_descriptor(&self) -> &DatasetDescriptor {
        &self.entries[self.default].1
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DatasetDescriptor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    /// Whether a key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolve a requested key, falling back to the default.
    #[must_use]
    pub fn resolve(&self, key: Option<&str>) -> (&str, &DatasetDescriptor) {
        key.filter(|k| !k.is_empty())
            .and_then(|k| self.entries.iter().find(|(name, _)| name == k))
            .map_or_else(
                || (self.default_key(), self.default_descriptor()),
                |(name, descriptor)| (name.as_str(), descriptor),
            )
    }

    /// Registered keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Number of entries (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a registry holds at least its default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
