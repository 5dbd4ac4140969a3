//! Ordinal color scale for categorical data.
//!
//! Categories receive palette slots in the order they are first seen; the
//! palette wraps around once every slot is taken.

use crate::Color;
use std::collections::HashMap;

/// The ten-color categorical scheme, as hex strings.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Maps category names to palette colors, stable for the scale's lifetime.
#[derive(Debug, Clone)]
pub struct ColorScale {
    palette: Vec<Color>,
    domain: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorScale {
    /// Create a scale over a palette.
    ///
    /// An empty palette falls back to black for every category.
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            domain: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Scale over [`CATEGORY10`].
    #[must_use]
    pub fn category10() -> Self {
        let palette = CATEGORY10
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        Self::new(palette)
    }

    /// Domain position of a category, assigning the next slot on first use.
    pub fn index_of(&mut self, category: &str) -> usize {
        if let Some(&i) = self.index.get(category) {
            return i;
        }
        let i = self.domain.len();
        self.domain.push(category.to_string());
        self.index.insert(category.to_string(), i);
        i
    }

    /// Color for a category, assigning the next slot on first use.
    pub fn color(&mut self, category: &str) -> Color {
        let i = self.index_of(category);
        self.color_at(i)
    }

    /// Color for a domain position.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    /// Categories seen so far, in first-seen order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Palette backing the scale.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::category10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category10_has_ten_colors() {
        let scale = ColorScale::category10();
        assert_eq!(scale.palette().len(), 10);
        assert_eq!(scale.color_at(0).to_hex(), "#1f77b4");
        assert_eq!(scale.color_at(9).to_hex(), "#17becf");
    }

    #[test]
    fn test_first_seen_order() {
        let mut scale = ColorScale::category10();
        assert_eq!(scale.index_of("Wii"), 0);
        assert_eq!(scale.index_of("DS"), 1);
        assert_eq!(scale.index_of("Wii"), 0);
        assert_eq!(
            scale.domain().to_vec(),
            vec!["Wii".to_string(), "DS".to_string()]
        );
    }

    #[test]
    fn test_same_category_same_color() {
        let mut scale = ColorScale::category10();
        let a = scale.color("Action");
        let _ = scale.color("Drama");
        assert_eq!(scale.color("Action"), a);
    }

    #[test]
    fn test_palette_wraps() {
        let mut scale = ColorScale::new(vec![Color::WHITE, Color::BLACK]);
        assert_eq!(scale.color("a"), Color::WHITE);
        assert_eq!(scale.color("b"), Color::BLACK);
        assert_eq!(scale.color("c"), Color::WHITE);
    }

    #[test]
    fn test_empty_palette_is_black() {
        let mut scale = ColorScale::new(Vec::new());
        assert_eq!(scale.color("anything"), Color::BLACK);
    }
}
