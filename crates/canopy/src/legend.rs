//! Category legend.

use crate::config::LegendConfig;
use crate::render::PositionedLeaf;
use canopy_core::{Attributes, Canvas, ColorScale, Point, Rect, Size, TextStyle, Transform2D};
use canopy_layout::WrapGrid;
use serde::Serialize;
use std::collections::HashSet;

/// One legend row entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Category name
    pub category: String,
    /// Slot in the color scale
    pub color_index: usize,
}

/// Distinct parent categories of `leaves`, in first-seen order.
///
/// Each entry takes its slot from `scale`, the same lookup the tiles use,
/// so a swatch always matches its tiles' fill.
pub fn legend_entries(leaves: &[PositionedLeaf], scale: &mut ColorScale) -> Vec<LegendEntry> {
    let mut seen = HashSet::new();
    leaves
        .iter()
        .filter(|leaf| seen.insert(leaf.category.as_str()))
        .map(|leaf| LegendEntry {
            category: leaf.category.clone(),
            color_index: scale.index_of(&leaf.category),
        })
        .collect()
}

/// Placement of legend swatches in a wrapped grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    offset: Point,
    swatch: f32,
    text_offset: Point,
    grid: WrapGrid,
}

impl LegendLayout {
    /// Layout for the configured legend width.
    #[must_use]
    pub fn from_config(config: &LegendConfig) -> Self {
        Self {
            offset: config.offset,
            swatch: config.swatch_size,
            text_offset: config.text_offset,
            grid: WrapGrid::fit(
                config.width,
                config.h_spacing,
                config.swatch_size,
                config.v_spacing,
            ),
        }
    }

    /// Entries per row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.grid.columns
    }

    /// Origin of the `index`-th entry, relative to the legend group.
    #[must_use]
    pub fn entry_origin(&self, index: usize) -> Point {
        self.grid.cell_origin(index)
    }

    /// Label anchor relative to the entry origin.
    #[must_use]
    pub fn label_position(&self) -> Point {
        Point::new(self.swatch, self.swatch) + self.text_offset
    }

    /// Space needed to show `count` entries, including the group offset.
    #[must_use]
    pub fn size(&self, count: usize) -> Size {
        let extent = self.grid.extent(count);
        Size::new(self.offset.x + extent.width, self.offset.y + extent.height)
    }

    /// Paint swatches and labels.
    pub fn paint(&self, entries: &[LegendEntry], scale: &ColorScale, canvas: &mut dyn Canvas) {
        canvas.push_group(
            Transform2D::translate(self.offset.x, self.offset.y),
            1.0,
            &Attributes::new(),
        );
        let label_position = self.label_position();
        for (index, entry) in entries.iter().enumerate() {
            let origin = self.entry_origin(index);
            canvas.push_group(
                Transform2D::translate(origin.x, origin.y),
                1.0,
                &Attributes::new(),
            );
            canvas.fill_rect(
                Rect::new(0.0, 0.0, self.swatch, self.swatch),
                scale.color_at(entry.color_index),
                &Attributes::new()
                    .with_class("legend-item")
                    .with("data-category", entry.category.as_str()),
            );
            canvas.draw_text(
                &entry.category,
                label_position,
                &TextStyle::default(),
                &Attributes::new(),
            );
            canvas.pop_group();
        }
        canvas.pop_group();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::{DrawCommand, RecordingCanvas};
    use proptest::prelude::*;

    fn leaf(name: &str, category: &str) -> PositionedLeaf {
        PositionedLeaf {
            name: name.to_string(),
            category: category.to_string(),
            value: "1".to_string(),
            amount: 1.0,
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
        }
    }

    #[test]
    fn test_entries_first_seen_order() {
        let leaves = [
            leaf("a", "Wii"),
            leaf("b", "DS"),
            leaf("c", "Wii"),
            leaf("d", "X360"),
            leaf("e", "DS"),
        ];
        let entries = legend_entries(&leaves, &mut ColorScale::category10());
        let names: Vec<_> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["Wii", "DS", "X360"]);
        assert_eq!(entries[2].color_index, 2);
    }

    #[test]
    fn test_entries_use_scale_slots() {
        let mut scale = ColorScale::category10();
        scale.index_of("X360");
        scale.index_of("DS");
        let entries = legend_entries(&[leaf("a", "Wii"), leaf("b", "DS")], &mut scale);
        let slots: Vec<_> = entries
            .iter()
            .map(|e| (e.category.as_str(), e.color_index))
            .collect();
        assert_eq!(slots, vec![("Wii", 2), ("DS", 1)]);
        assert_eq!(scale.domain().to_vec(), vec!["X360", "DS", "Wii"]);
    }

    #[test]
    fn test_entries_empty() {
        assert!(legend_entries(&[], &mut ColorScale::category10()).is_empty());
    }

    #[test]
    fn test_default_layout_positions() {
        let layout = LegendLayout::from_config(&LegendConfig::default());
        assert_eq!(layout.columns(), 3);
        assert_eq!(layout.entry_origin(0), Point::new(0.0, 0.0));
        assert_eq!(layout.entry_origin(1), Point::new(150.0, 0.0));
        assert_eq!(layout.entry_origin(3), Point::new(0.0, 25.0));
        assert_eq!(layout.entry_origin(8), Point::new(300.0, 50.0));
        assert_eq!(layout.label_position(), Point::new(18.0, 13.0));
    }

    #[test]
    fn test_narrow_legend_has_one_column() {
        let config = LegendConfig {
            width: 100.0,
            ..LegendConfig::default()
        };
        let layout = LegendLayout::from_config(&config);
        assert_eq!(layout.columns(), 1);
        assert_eq!(layout.entry_origin(2), Point::new(0.0, 50.0));
    }

    #[test]
    fn test_size_includes_offset() {
        let layout = LegendLayout::from_config(&LegendConfig::default());
        assert_eq!(layout.size(0), Size::new(60.0, 10.0));
        assert_eq!(layout.size(4), Size::new(510.0, 50.0));
    }

    #[test]
    fn test_paint_swatches() {
        let layout = LegendLayout::from_config(&LegendConfig::default());
        let mut scale = ColorScale::category10();
        let entries = legend_entries(&[leaf("a", "Wii"), leaf("b", "DS")], &mut scale);
        let mut canvas = RecordingCanvas::new();
        layout.paint(&entries, &scale, &mut canvas);

        let swatches: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, fill, attrs } if attrs.has_class("legend-item") => {
                    Some((*bounds, fill.to_hex()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            swatches,
            vec![
                (Rect::new(0.0, 0.0, 15.0, 15.0), "#1f77b4".to_string()),
                (Rect::new(0.0, 0.0, 15.0, 15.0), "#ff7f0e".to_string()),
            ]
        );
        let labels: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, position, .. } => Some((content.clone(), *position)),
                _ => None,
            })
            .collect();
        assert_eq!(labels[1], ("DS".to_string(), Point::new(18.0, 13.0)));
        assert_eq!(canvas.group_depth(), 0);
    }

    proptest! {
        #[test]
        fn prop_each_category_listed_once(categories in proptest::collection::vec("[A-E]", 0..40)) {
            let leaves: Vec<_> = categories.iter().map(|c| leaf("x", c)).collect();
            let entries = legend_entries(&leaves, &mut ColorScale::category10());
            let distinct: HashSet<&str> = categories.iter().map(String::as_str).collect();
            prop_assert_eq!(entries.len(), distinct.len());
            for (i, entry) in entries.iter().enumerate() {
                prop_assert_eq!(entry.color_index, i);
                prop_assert!(distinct.contains(entry.category.as_str()));
            }
        }

        #[test]
        fn prop_columns_never_zero(width in -100.0f32..2000.0) {
            let config = LegendConfig { width, ..LegendConfig::default() };
            let layout = LegendLayout::from_config(&config);
            prop_assert!(layout.columns() >= 1);
        }
    }
}
