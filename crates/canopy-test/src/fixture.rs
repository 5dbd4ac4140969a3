//! Fixture datasets and an in-memory data source.
//!
//! The documents mirror the shape of the published files, including
//! string-encoded values and the repeated `category` field on leaves.

use canopy::{CanopyError, DataSource, DatasetRegistry, HierarchyNode, Result};
use std::cell::Cell;
use std::collections::HashMap;

/// Small movie dataset: two genres, the first holding a leaf named
/// `Action` with value 500.
pub const MOVIES_JSON: &str = r#"{
  "name": "Movies",
  "children": [
    {
      "name": "Action Movies",
      "children": [
        {"name": "Action", "category": "Action Movies", "value": 500},
        {"name": "Heat", "category": "Action Movies", "value": "187.4"},
        {"name": "Speed", "category": "Action Movies", "value": "121.2"}
      ]
    },
    {
      "name": "Drama",
      "children": [
        {"name": "Titanic", "category": "Drama", "value": "658.7"},
        {"name": "Up", "category": "Drama", "value": "293"}
      ]
    }
  ]
}"#;

/// Video game sales by platform.
pub const VIDEOGAMES_JSON: &str = r#"{
  "name": "Video Game Sales Data Top 100",
  "children": [
    {
      "name": "Wii",
      "children": [
        {"name": "Wii Sports", "category": "Wii", "value": "82.53"},
        {"name": "Mario Kart Wii", "category": "Wii", "value": "35.52"},
        {"name": "Wii Sports Resort", "category": "Wii", "value": "32.77"}
      ]
    },
    {
      "name": "NES",
      "children": [
        {"name": "Super Mario Bros.", "category": "NES", "value": "40.24"},
        {"name": "Duck Hunt", "category": "NES", "value": "28.31"}
      ]
    },
    {
      "name": "GB",
      "children": [
        {"name": "Pokemon Red/Pokemon Blue", "category": "GB", "value": "31.37"},
        {"name": "Tetris", "category": "GB", "value": "30.26"}
      ]
    },
    {
      "name": "DS",
      "children": [
        {"name": "New Super Mario Bros.", "category": "DS", "value": "29.8"}
      ]
    },
    {
      "name": "X360",
      "children": [
        {"name": "Kinect Adventures!", "category": "X360", "value": "21.82"}
      ]
    }
  ]
}"#;

/// Kickstarter pledges by category.
pub const KICKSTARTER_JSON: &str = r#"{
  "name": "Kickstarter",
  "children": [
    {
      "name": "Product Design",
      "children": [
        {"name": "Pebble Time - Awesome Smartwatch", "category": "Product Design", "value": "20338986"},
        {"name": "COOLEST COOLER", "category": "Product Design", "value": "13285226"}
      ]
    },
    {
      "name": "Tabletop Games",
      "children": [
        {"name": "Exploding Kittens", "category": "Tabletop Games", "value": "8782571"}
      ]
    },
    {
      "name": "Video Games",
      "children": [
        {"name": "Shenmue 3", "category": "Video Games", "value": "6333295"}
      ]
    }
  ]
}"#;

/// Parsed [`MOVIES_JSON`].
///
/// # Panics
///
/// Never for the bundled document.
#[must_use]
pub fn movies_fixture() -> HierarchyNode {
    serde_json::from_str(MOVIES_JSON).expect("bundled movies fixture is valid JSON")
}

/// Parsed [`VIDEOGAMES_JSON`].
///
/// # Panics
///
/// Never for the bundled document.
#[must_use]
pub fn videogames_fixture() -> HierarchyNode {
    serde_json::from_str(VIDEOGAMES_JSON).expect("bundled videogames fixture is valid JSON")
}

/// In-memory [`DataSource`] keyed by location, counting fetches.
#[derive(Debug, Default)]
pub struct FixtureSource {
    documents: HashMap<String, String>,
    fetches: Cell<usize>,
}

impl FixtureSource {
    /// Empty source; every fetch fails with HTTP 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the bundled documents at the built-in registry's locations.
    #[must_use]
    pub fn builtin() -> Self {
        let registry = DatasetRegistry::builtin();
        let mut source = Self::new();
        for (key, descriptor) in registry.iter() {
            let body = match key {
                "movies" => MOVIES_JSON,
                "kickstarter" => KICKSTARTER_JSON,
                _ => VIDEOGAMES_JSON,
            };
            source.insert(descriptor.source_location.clone(), body);
        }
        source
    }

    /// Serve `body` at `location`.
    pub fn insert(&mut self, location: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(location.into(), body.into());
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with_document(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(location, body);
        self
    }

    /// Number of fetches served or refused so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl DataSource for FixtureSource {
    fn fetch(&self, location: &str) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| CanopyError::HttpStatus {
                location: location.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid() {
        for root in [movies_fixture(), videogames_fixture()] {
            assert!(root.validate().is_ok(), "{}", root.name);
        }
        let kickstarter: HierarchyNode = serde_json::from_str(KICKSTARTER_JSON).unwrap();
        assert!(kickstarter.validate().is_ok());
    }

    #[test]
    fn test_movies_fixture_shape() {
        let root = movies_fixture();
        assert_eq!(root.children[0].name, "Action Movies");
        assert_eq!(root.children[0].children[0].name, "Action");
        assert_eq!(root.leaf_count(), 5);
    }

    #[test]
    fn test_builtin_source_serves_registry() {
        let source = FixtureSource::builtin();
        let registry = DatasetRegistry::builtin();
        let movies = registry.get("movies").unwrap();
        assert_eq!(source.fetch(&movies.source_location).unwrap(), MOVIES_JSON);
        assert!(matches!(
            source.fetch("https://nowhere.test/x.json"),
            Err(CanopyError::HttpStatus { status: 404, .. })
        ));
        assert_eq!(source.fetch_count(), 2);
    }
}
