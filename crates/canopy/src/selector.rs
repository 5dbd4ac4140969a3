//! Dataset selection from a request query string.

use crate::dataset::{DatasetDescriptor, DatasetRegistry};
use serde::Serialize;

/// Name of the query parameter that picks the dataset.
pub const DATA_PARAM: &str = "data";

/// Text shown above the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Written into `#title`
    pub title: String,
    /// Written into `#description`
    pub description: String,
}

/// The dataset a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    key: &'a str,
    descriptor: &'a DatasetDescriptor,
    requested: Option<String>,
}

impl<'a> Selection<'a> {
    /// Resolve the `data` parameter of a raw query string.
    ///
    /// Accepts the string with or without its leading `?`.
    #[must_use]
    pub fn from_query(query: &str, registry: &'a DatasetRegistry) -> Self {
        Self::from_key(query_param(query, DATA_PARAM).as_deref(), registry)
    }

    /// Resolve an already extracted key.
    #[must_use]
    pub fn from_key(requested: Option<&str>, registry: &'a DatasetRegistry) -> Self {
        let (key, descriptor) = registry.resolve(requested);
        if let Some(name) = requested.filter(|r| !r.is_empty() && *r != key) {
            tracing::warn!(
                requested = name,
                fallback = key,
                "unknown dataset, using default"
            );
        }
        tracing::debug!(dataset = key, "selected dataset");
        Self {
            key,
            descriptor,
            requested: requested.map(str::to_string),
        }
    }

    /// Resolved registry key.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.key
    }

    /// Resolved descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &'a DatasetDescriptor {
        self.descriptor
    }

    /// The raw requested key, if any.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Whether a non-empty request was replaced by the default.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.requested
            .as_deref()
            .is_some_and(|r| !r.is_empty() && r != self.key)
    }

    /// Heading text for the page.
    #[must_use]
    pub fn header(&self) -> Header {
        Header {
            title: self.descriptor.title.clone(),
            description: self.descriptor.description.clone(),
        }
    }
}

/// First value of `name` in a form-encoded query string.
///
/// `+` decodes to a space and `%XX` escapes are decoded; malformed escapes
/// are kept literally.
#[must_use]
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

fn decode_component(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let Some(decoded) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                    out.push(decoded);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let digit = |c: u8| char::from(c).to_digit(16);
    Some((digit(hi)? * 16 + digit(lo)?) as u8)
}
