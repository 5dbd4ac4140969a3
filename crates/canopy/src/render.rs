//! Tile layout and painting.
//!
//! Leaves are laid out inside the chart's inner area, colored by their
//! parent category, and painted as one translated group per tile.

use crate::config::ChartConfig;
use crate::error::Result;
use crate::hierarchy::HierarchyNode;
use canopy_core::{Attributes, Canvas, Color, ColorScale, Point, Rect, TextStyle, Transform2D};
use canopy_layout::{Hierarchy, Treemap};
use serde::Serialize;

/// Marker appended to shortened labels.
pub const ELLIPSIS: &str = "...";

/// A leaf with its tile bounds, relative to the chart's inner area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedLeaf {
    /// Leaf name
    pub name: String,
    /// Name of the immediate parent node
    pub category: String,
    /// Value as written in the document
    pub value: String,
    /// Value used for layout
    pub amount: f64,
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl PositionedLeaf {
    /// Tile width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Tile height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Tile bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(
            self.x0 as f32,
            self.y0 as f32,
            self.x1 as f32,
            self.y1 as f32,
        )
    }
}

/// Lay out every leaf of `root` with the chart's treemap settings.
///
/// Leaves come back in pre-order, the order they appear in the document.
#[must_use]
pub fn layout_leaves(root: &HierarchyNode, config: &ChartConfig) -> Vec<PositionedLeaf> {
    let mut hierarchy = Hierarchy::new(root);
    Treemap::new(config.inner_size())
        .with_padding(f64::from(config.padding))
        .with_round(config.round)
        .layout(&mut hierarchy);

    let leaves: Vec<PositionedLeaf> = hierarchy
        .leaves()
        .map(|id| {
            let node = hierarchy.node(id);
            let data = node.data();
            let (x0, y0, x1, y1) = node.corners();
            PositionedLeaf {
                name: data.name.clone(),
                category: hierarchy
                    .parent(id)
                    .map(|p| p.data().name.clone())
                    .unwrap_or_default(),
                value: data.value.as_ref().map(|v| v.raw()).unwrap_or_default(),
                amount: node.value(),
                x0,
                y0,
                x1,
                y1,
            }
        })
        .collect();
    tracing::debug!(
        leaves = leaves.len(),
        total = hierarchy.node(hierarchy.root()).value(),
        "laid out treemap"
    );
    leaves
}

/// Shorten `name` to `max` characters followed by `...`.
///
/// Names of at most `max` characters are returned unchanged. Counts Unicode
/// scalar values, so multi-byte names are never split inside a character.
#[must_use]
pub fn truncate_label(name: &str, max: usize) -> String {
    match name.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &name[..cut]),
        None => name.to_string(),
    }
}

/// A leaf ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    /// Positioned leaf
    #[serde(flatten)]
    pub leaf: PositionedLeaf,
    /// Category color
    #[serde(serialize_with = "serialize_hex")]
    pub fill: Color,
    /// Position of the category in the color scale's domain
    pub color_index: usize,
    /// Text painted inside the tile
    pub label: String,
}

fn serialize_hex<S>(color: &Color, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&color.to_hex())
}

impl Tile {
    /// Attributes of the tile's `rect` element.
    #[must_use]
    pub fn rect_attributes(&self) -> Attributes {
        Attributes::new()
            .with_class("tile")
            .with("data-name", self.leaf.name.as_str())
            .with("data-category", self.leaf.category.as_str())
            .with("data-value", self.leaf.value.as_str())
    }
}

/// Colors leaves by category and paints them.
#[derive(Debug, Clone)]
pub struct TileRenderer {
    scale: ColorScale,
    truncate_length: usize,
    opacity: f32,
    label_offset: Point,
    label_style: TextStyle,
    origin: Point,
}

impl TileRenderer {
    /// Renderer with the chart's palette, margins and label settings.
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            scale: config.color_scale()?,
            truncate_length: config.text_truncate_length,
            opacity: config.tile_opacity,
            label_offset: config.label_offset,
            label_style: TextStyle {
                size: config.label_size,
                ..TextStyle::default()
            },
            origin: Point::new(config.margin.left, config.margin.top),
        })
    }

    /// Assign colors and labels.
    ///
    /// Categories get palette slots in the order they are first seen.
    pub fn tiles(&mut self, leaves: &[PositionedLeaf]) -> Vec<Tile> {
        leaves
            .iter()
            .map(|leaf| {
                let color_index = self.scale.index_of(&leaf.category);
                Tile {
                    fill: self.scale.color_at(color_index),
                    color_index,
                    label: truncate_label(&leaf.name, self.truncate_length),
                    leaf: leaf.clone(),
                }
            })
            .collect()
    }

    /// The scale, including every category seen so far.
    #[must_use]
    pub const fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Mutable scale, for callers that look up categories of their own.
    pub fn scale_mut(&mut self) -> &mut ColorScale {
        &mut self.scale
    }

    /// Offset of the tile area inside the canvas.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Paint tiles inside a group translated by the chart margin.
    pub fn paint(&self, tiles: &[Tile], canvas: &mut dyn Canvas) {
        canvas.push_group(
            Transform2D::translate(self.origin.x, self.origin.y),
            1.0,
            &Attributes::new(),
        );
        for (index, tile) in tiles.iter().enumerate() {
            let leaf = &tile.leaf;
            canvas.push_group(
                Transform2D::translate(leaf.x0 as f32, leaf.y0 as f32),
                self.opacity,
                &Attributes::new()
                    .with_class("g")
                    .with("data-index", index.to_string()),
            );
            canvas.fill_rect(
                Rect::new(0.0, 0.0, leaf.width() as f32, leaf.height() as f32),
                tile.fill,
                &tile.rect_attributes(),
            );
            canvas.draw_text(
                &tile.label,
                self.label_offset,
                &self.label_style,
                &Attributes::new(),
            );
            canvas.pop_group();
        }
        canvas.pop_group();
    }
}
