//! Draw commands.
//!
//! All rendering reduces to these primitives. Backends (recording, SVG)
//! consume them; element attributes travel with each command so rendered
//! output stays inspectable.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// 2D transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0] * point.x + m[2] * point.y + m[4],
            m[1] * point.x + m[3] * point.y + m[5],
        )
    }

    /// Translation component, if this is a pure translation.
    #[must_use]
    pub fn as_translation(&self) -> Option<(f32, f32)> {
        let m = self.matrix;
        (m[0] == 1.0 && m[1] == 0.0 && m[2] == 0.0 && m[3] == 1.0).then_some((m[4], m[5]))
    }
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::BLACK,
        }
    }
}

/// Ordered element attributes (`id`, `class`, `data-*`).
///
/// Insertion order is preserved so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set an attribute, replacing an earlier value of the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with("id", id)
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with("class", class)
    }

    /// Set an attribute in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute lists the given class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    Rect {
        /// Bounds in the current group's coordinates
        bounds: Rect,
        /// Fill color
        fill: Color,
        /// Element attributes
        attrs: Attributes,
    },
    /// Text run anchored at its baseline start
    Text {
        /// Text content
        content: String,
        /// Baseline start position
        position: Point,
        /// Text style
        style: TextStyle,
        /// Element attributes
        attrs: Attributes,
    },
    /// Open a group; following commands until the matching [`Self::EndGroup`]
    /// are drawn inside it.
    BeginGroup {
        /// Group transform
        transform: Transform2D,
        /// Group opacity [0.0, 1.0]
        opacity: f32,
        /// Element attributes
        attrs: Attributes,
    },
    /// Close the innermost open group
    EndGroup,
}

impl DrawCommand {
    /// Create a filled rectangle command.
    #[must_use]
    pub fn filled_rect(bounds: Rect, fill: Color) -> Self {
        Self::Rect {
            bounds,
            fill,
            attrs: Attributes::new(),
        }
    }

    /// Create a text command.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
            attrs: Attributes::new(),
        }
    }

    /// Attributes carried by the command, if any.
    #[must_use]
    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            Self::Rect { attrs, .. }
            | Self::Text { attrs, .. }
            | Self::BeginGroup { attrs, .. } => Some(attrs),
            Self::EndGroup => None,
        }
    }

    /// Element name used by selectors and SVG output.
    #[must_use]
    pub fn element(&self) -> Option<&'static str> {
        match self {
            Self::Rect { .. } => Some("rect"),
            Self::Text { .. } => Some("text"),
            Self::BeginGroup { .. } => Some("g"),
            Self::EndGroup => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_translate_apply() {
        let t = Transform2D::translate(25.0, 25.0);
        assert_eq!(t.apply(Point::new(10.0, 5.0)), Point::new(35.0, 30.0));
        assert_eq!(t.as_translation(), Some((25.0, 25.0)));
    }

    #[test]
    fn test_transform_then_accumulates() {
        let margin = Transform2D::translate(25.0, 25.0);
        let tile = Transform2D::translate(100.0, 40.0);
        let combined = tile.then(&margin);
        assert_eq!(combined.apply(Point::ORIGIN), Point::new(125.0, 65.0));
    }

    #[test]
    fn test_attributes_replace_keeps_order() {
        let attrs = Attributes::new()
            .with_class("tile")
            .with("data-name", "A")
            .with("data-name", "B");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("data-name"), Some("B"));
        let names: Vec<_> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["class", "data-name"]);
    }

    #[test]
    fn test_attributes_has_class() {
        let attrs = Attributes::new().with_class("legend-item swatch");
        assert!(attrs.has_class("legend-item"));
        assert!(attrs.has_class("swatch"));
        assert!(!attrs.has_class("legend"));
        assert!(!Attributes::new().has_class("tile"));
    }

    #[test]
    fn test_command_element_names() {
        assert_eq!(
            DrawCommand::filled_rect(Rect::default(), Color::BLACK).element(),
            Some("rect")
        );
        assert_eq!(
            DrawCommand::text("x", Point::ORIGIN, TextStyle::default()).element(),
            Some("text")
        );
        assert_eq!(DrawCommand::EndGroup.element(), None);
        assert!(DrawCommand::EndGroup.attrs().is_none());
    }

    #[test]
    fn test_command_serializes() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 4.0, 2.0), Color::WHITE);
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"Rect\""));
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
