//! Canvas trait and the recording implementation.

use crate::draw::{Attributes, DrawCommand, TextStyle, Transform2D};
use crate::{Color, Point, Rect};

/// Paint target for charts.
///
/// Rect and text positions are local to the innermost open group.
pub trait Canvas {
    /// Fill `rect` and tag it with `attrs`.
    fn fill_rect(&mut self, rect: Rect, color: Color, attrs: &Attributes);

    /// Draw text with its baseline starting at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle, attrs: &Attributes);

    /// Open a group with a transform and opacity.
    fn push_group(&mut self, transform: Transform2D, opacity: f32, attrs: &Attributes);

    /// Close the innermost group.
    fn pop_group(&mut self);
}

/// Canvas that keeps every call as a [`DrawCommand`].
///
/// The recorded list can be inspected by tests or passed to [`replay`] to
/// paint the same chart onto an SVG canvas.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform2D>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands; open groups are forgotten.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.transform_stack.clear();
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Accumulated transform of all open groups (identity if none).
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or_else(Transform2D::identity)
    }

    /// Number of open groups.
    #[must_use]
    pub fn group_depth(&self) -> usize {
        self.transform_stack.len()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color, attrs: &Attributes) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            fill: color,
            attrs: attrs.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle, attrs: &Attributes) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
            attrs: attrs.clone(),
        });
    }

    fn push_group(&mut self, transform: Transform2D, opacity: f32, attrs: &Attributes) {
        let accumulated = transform.then(&self.current_transform());
        self.transform_stack.push(accumulated);
        self.commands.push(DrawCommand::BeginGroup {
            transform,
            opacity: opacity.clamp(0.0, 1.0),
            attrs: attrs.clone(),
        });
    }

    fn pop_group(&mut self) {
        if self.transform_stack.pop().is_some() {
            self.commands.push(DrawCommand::EndGroup);
        }
    }
}

/// Replay recorded commands onto another canvas.
pub fn replay(commands: &[DrawCommand], canvas: &mut dyn Canvas) {
    for command in commands {
        match command {
            DrawCommand::Rect {
                bounds,
                fill,
                attrs,
            } => canvas.fill_rect(*bounds, *fill, attrs),
            DrawCommand::Text {
                content,
                position,
                style,
                attrs,
            } => canvas.draw_text(content, *position, style, attrs),
            DrawCommand::BeginGroup {
                transform,
                opacity,
                attrs,
            } => canvas.push_group(*transform, *opacity, attrs),
            DrawCommand::EndGroup => canvas.pop_group(),
        }
    }
}
