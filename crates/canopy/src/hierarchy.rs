//! Dataset tree as published: categories holding valued leaves.

use crate::error::{CanopyError, Result};
use canopy_layout::HierarchyData;
use serde::{Deserialize, Serialize};

/// Leaf value as it appears in the document.
///
/// The published files mix JSON numbers and numeric strings (`"82.53"`).
/// Both are accepted; the source text is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafValue {
    /// A JSON number
    Number(serde_json::Number),
    /// A numeric string
    Text(String),
}

impl LeafValue {
    /// Text shown in labels, tooltips and `data-value`.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => display_number(f),
                _ => n.to_string(),
            },
            Self::Text(s) => s.clone(),
        }
    }

    /// Numeric value used for layout; NaN when the text is not a number.
    #[must_use]
    pub fn amount(&self) -> f64 {
        match self {
            Self::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Self::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

/// Browser-style number text: plain decimals for `1e-6 <= |f| < 1e21`,
/// shortest exponent form (`1e+21`, `1.5e-7`) outside it, and `0` for `-0`.
fn display_number(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<u64> for LeafValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A node of the dataset tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Display name
    pub name: String,
    /// Child nodes (categories under the root, items under a category)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
    /// Leaf value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LeafValue>,
    /// Category repeated on leaves by the published files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl HierarchyNode {
    /// A leaf with a value.
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: impl Into<LeafValue>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            value: Some(value.into()),
            category: None,
        }
    }

    /// An internal node.
    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            children,
            value: None,
            category: None,
        }
    }

    /// Set the leaf's category field.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of leaves below (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                count += 1;
            }
            stack.extend(node.children.iter());
        }
        count
    }

    /// Check that the tree can be laid out.
    ///
    /// The root must have children, and every leaf needs a finite,
    /// non-negative value.
    pub fn validate(&self) -> Result<()> {
        if self.children.is_empty() {
            return Err(CanopyError::InvalidHierarchy(format!(
                "root '{}' has no children",
                self.name
            )));
        }
        let mut stack: Vec<(&Self, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            if node.is_leaf() {
                let value = node.value.as_ref().ok_or_else(|| {
                    CanopyError::InvalidHierarchy(format!(
                        "leaf '{}' at depth {depth} has neither children nor a value",
                        node.name
                    ))
                })?;
                let amount = value.amount();
                if !amount.is_finite() || amount < 0.0 {
                    return Err(CanopyError::InvalidHierarchy(format!(
                        "leaf '{}' has invalid value '{}'",
                        node.name,
                        value.raw()
                    )));
                }
            }
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        Ok(())
    }
}

impl HierarchyData for HierarchyNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn own_value(&self) -> f64 {
        self.value.as_ref().map_or(0.0, LeafValue::amount)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
