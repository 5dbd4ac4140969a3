//! Hover tooltip state machine.
//!
//! Pointer events drive two states. Entering a tile fills the tooltip and
//! fades it in; leaving fades it out while keeping the last content, so the
//! most recent `data-value` stays inspectable. Time is supplied by the
//! caller, which keeps the controller deterministic.

use crate::config::TooltipConfig;
use crate::render::Tile;
use canopy_core::{Attributes, Canvas, Fade, Point, PointerEvent, TextStyle, Transform2D};
use serde::Serialize;
use std::time::Duration;

/// Visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TooltipState {
    /// Fading out or fully transparent
    Hidden,
    /// Fading in or fully opaque
    Visible,
}

/// Text shown for the hovered leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
    /// Leaf name
    pub name: String,
    /// Parent category
    pub category: String,
    /// Raw value text
    pub value: String,
}

impl TooltipContent {
    /// Content for a tile.
    #[must_use]
    pub fn for_tile(tile: &Tile) -> Self {
        Self {
            name: tile.leaf.name.clone(),
            category: tile.leaf.category.clone(),
            value: tile.leaf.value.clone(),
        }
    }

    /// Display lines, in order.
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category),
            format!("Value: {}", self.value),
        ]
    }
}

/// Tooltip driven by pointer events.
#[derive(Debug, Clone)]
pub struct TooltipController {
    fade_in: Duration,
    fade_out: Duration,
    offset: Point,
    origin: Point,
    state: TooltipState,
    fade: Fade,
    content: Option<TooltipContent>,
    position: Point,
    hovered: Option<usize>,
}

impl TooltipController {
    /// Hidden tooltip with the configured timings.
    #[must_use]
    pub fn new(config: &TooltipConfig) -> Self {
        Self {
            fade_in: config.fade_in(),
            fade_out: config.fade_out(),
            offset: config.offset,
            origin: Point::ORIGIN,
            state: TooltipState::Hidden,
            fade: Fade::settled(0.0),
            content: None,
            position: Point::ORIGIN,
            hovered: None,
        }
    }

    /// Where tile coordinates start in pointer coordinates (the chart margin).
    #[must_use]
    pub const fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent, tiles: &[Tile], now: Duration) {
        match event {
            PointerEvent::Enter { target, position } => {
                if let Some(tile) = tiles.get(target) {
                    self.show(target, tile, position, now);
                }
            }
            PointerEvent::Leave { .. } => self.hide(now),
            PointerEvent::Move { position } => self.handle_move(tiles, position, now),
        }
    }

    /// Turn a raw pointer move into enter and leave transitions.
    pub fn handle_move(&mut self, tiles: &[Tile], position: Point, now: Duration) {
        let local = position - self.origin;
        let hit = hit_test(tiles, local);
        if hit == self.hovered {
            return;
        }
        if self.hovered.is_some() {
            self.hide(now);
        }
        if let Some(index) = hit {
            self.show(index, &tiles[index], position, now);
        }
    }

    fn show(&mut self, index: usize, tile: &Tile, pointer: Point, now: Duration) {
        let current = self.fade.value_at(now);
        self.fade = Fade::new(current, 1.0, now, self.fade_in);
        self.state = TooltipState::Visible;
        self.content = Some(TooltipContent::for_tile(tile));
        self.position = pointer + self.offset;
        self.hovered = Some(index);
        tracing::trace!(tile = index, name = %tile.leaf.name, "tooltip shown");
    }

    fn hide(&mut self, now: Duration) {
        let current = self.fade.value_at(now);
        self.fade = Fade::new(current, 0.0, now, self.fade_out);
        self.state = TooltipState::Hidden;
        self.hovered = None;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TooltipState {
        self.state
    }

    /// Whether the tooltip is showing or fading in.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state == TooltipState::Visible
    }

    /// Opacity at `now`.
    #[must_use]
    pub fn opacity_at(&self, now: Duration) -> f32 {
        self.fade.value_at(now)
    }

    /// Last shown content; kept after the pointer leaves.
    #[must_use]
    pub const fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// The `data-value` attribute: raw value of the last shown leaf.
    #[must_use]
    pub fn data_value(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.value.as_str())
    }

    /// Tooltip position (pointer plus offset).
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Index of the tile under the pointer, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Attributes of the `#tooltip` element.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let attrs = Attributes::new().with_id("tooltip").with_class("tooltip");
        match self.data_value() {
            Some(value) => attrs.with("data-value", value),
            None => attrs,
        }
    }

    /// Paint the tooltip as a group of text lines at its position.
    pub fn paint(&self, canvas: &mut dyn Canvas, now: Duration) {
        canvas.push_group(
            Transform2D::translate(self.position.x, self.position.y),
            self.opacity_at(now),
            &self.attributes(),
        );
        if let Some(content) = &self.content {
            let style = TextStyle::default();
            let mut y = style.size;
            for line in content.lines() {
                canvas.draw_text(&line, Point::new(0.0, y), &style, &Attributes::new());
                y += style.size * 1.5;
            }
        }
        canvas.pop_group();
    }
}

/// Topmost tile containing `point` (tile coordinates).
#[must_use]
pub fn hit_test(tiles: &[Tile], point: Point) -> Option<usize> {
    tiles
        .iter()
        .rposition(|tile| tile.leaf.bounds().contains_point(&point))
}
