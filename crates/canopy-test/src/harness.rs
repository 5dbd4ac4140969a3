//! Test harness over recorded draw commands.
//!
//! Commands are viewed as a tree: each `BeginGroup` opens an element that
//! contains everything up to its matching `EndGroup`.

use canopy_core::{DrawCommand, RecordingCanvas};

use crate::selector::Selector;

/// Queries and assertions over a rendered command list.
#[derive(Debug, Clone)]
pub struct Harness {
    commands: Vec<DrawCommand>,
    /// Index of the enclosing group of each command
    parents: Vec<Option<usize>>,
}

impl Harness {
    /// Wrap a command list.
    pub fn new(commands: impl Into<Vec<DrawCommand>>) -> Self {
        let commands = commands.into();
        let mut parents = Vec::with_capacity(commands.len());
        let mut open: Vec<usize> = Vec::new();
        for (index, command) in commands.iter().enumerate() {
            parents.push(open.last().copied());
            match command {
                DrawCommand::BeginGroup { .. } => open.push(index),
                DrawCommand::EndGroup => {
                    open.pop();
                }
                _ => {}
            }
        }
        Self { commands, parents }
    }

    /// Harness over everything a recording canvas captured.
    #[must_use]
    pub fn from_canvas(canvas: &RecordingCanvas) -> Self {
        Self::new(canvas.commands().to_vec())
    }

    /// All commands, in paint order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn ancestors(&self, index: usize) -> Vec<&DrawCommand> {
        let mut chain = Vec::new();
        let mut current = self.parents[index];
        while let Some(parent) = current {
            chain.push(&self.commands[parent]);
            current = self.parents[parent];
        }
        chain.reverse();
        chain
    }

    fn matching_indices(&self, selector: &str) -> Vec<usize> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        (0..self.commands.len())
            .filter(|&i| sel.matches(&self.commands[i], &self.ancestors(i)))
            .collect()
    }

    // === Queries ===

    /// First command matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&DrawCommand> {
        self.query_all(selector).into_iter().next()
    }

    /// All commands matching the selector, in paint order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&DrawCommand> {
        self.matching_indices(selector)
            .into_iter()
            .map(|i| &self.commands[i])
            .collect()
    }

    /// Attribute of the first match.
    #[must_use]
    pub fn attr(&self, selector: &str, name: &str) -> Option<&str> {
        self.query(selector)?.attrs()?.get(name)
    }

    /// Attribute of every match that carries it.
    #[must_use]
    pub fn attr_all(&self, selector: &str, name: &str) -> Vec<&str> {
        self.query_all(selector)
            .into_iter()
            .filter_map(|c| c.attrs()?.get(name))
            .collect()
    }

    /// Text of the first match.
    ///
    /// For a text command this is its content; for a group, the content of
    /// every text command inside it joined by newlines.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        let Some(&index) = self.matching_indices(selector).first() else {
            return String::new();
        };
        match &self.commands[index] {
            DrawCommand::Text { content, .. } => content.clone(),
            DrawCommand::BeginGroup { .. } => self
                .group_members(index)
                .filter_map(|c| match c {
                    DrawCommand::Text { content, .. } => Some(content.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }
    }

    fn group_members(&self, group: usize) -> impl Iterator<Item = &DrawCommand> {
        let mut depth = 0usize;
        self.commands[group + 1..].iter().take_while(move |c| {
            match c {
                DrawCommand::BeginGroup { .. } => depth += 1,
                DrawCommand::EndGroup if depth == 0 => return false,
                DrawCommand::EndGroup => depth -= 1,
                _ => {}
            }
            true
        })
    }

    /// Check if any command matches.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        !self.matching_indices(selector).is_empty()
    }

    // === Assertions ===

    /// Assert that a match exists.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected element matching '{selector}' to exist"
        );
        self
    }

    /// Assert that nothing matches.
    ///
    /// # Panics
    ///
    /// Panics if something matches.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected element matching '{selector}' to not exist"
        );
        self
    }

    /// Assert the number of matches.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.matching_indices(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} elements matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert an attribute of the first match.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches or the attribute differs.
    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> &Self {
        let actual = self.attr(selector, name);
        assert_eq!(
            actual,
            Some(expected),
            "Expected {name}='{expected}' on '{selector}' but got {actual:?}"
        );
        self
    }

    /// Assert the text of the first match.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::{Attributes, Canvas, Color, Point, Rect, TextStyle, Transform2D};

    fn scene() -> Harness {
        let mut canvas = RecordingCanvas::new();
        let plain = Attributes::new();
        let style = TextStyle::default();
        canvas.push_group(Transform2D::translate(25.0, 25.0), 1.0, &plain);
        for (name, category, value) in [
            ("Action", "Action Movies", "500"),
            ("Titanic", "Drama", "300"),
        ] {
            let group = Attributes::new().with_class("g");
            canvas.push_group(Transform2D::identity(), 0.8, &group);
            canvas.fill_rect(
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Color::BLACK,
                &Attributes::new()
                    .with_class("tile")
                    .with("data-name", name)
                    .with("data-category", category)
                    .with("data-value", value),
            );
            canvas.draw_text(name, Point::new(5.0, 10.0), &style, &plain);
            canvas.pop_group();
        }
        canvas.pop_group();
        canvas.push_group(
            Transform2D::identity(),
            0.0,
            &Attributes::new().with_id("tooltip").with("data-value", "300"),
        );
        canvas.draw_text("Name: Titanic", Point::ORIGIN, &style, &plain);
        canvas.draw_text("Value: 300", Point::ORIGIN, &style, &plain);
        canvas.pop_group();
        Harness::from_canvas(&canvas)
    }

    #[test]
    fn test_query_all_and_count() {
        let h = scene();
        assert_eq!(h.query_all("rect.tile").len(), 2);
        h.assert_count("g.g", 2)
            .assert_count("text", 4)
            .assert_count("g.g text", 2)
            .assert_count("[data-category='Drama']", 1)
            .assert_count("nonsense[", 0);
    }

    #[test]
    fn test_attr_lookup() {
        let h = scene();
        assert_eq!(h.attr("rect.tile", "data-name"), Some("Action"));
        assert_eq!(h.attr_all(".tile", "data-value"), vec!["500", "300"]);
        assert_eq!(h.attr("#missing", "data-value"), None);
        h.assert_attr("#tooltip", "data-value", "300");
    }

    #[test]
    fn test_text() {
        let h = scene();
        h.assert_text("g.g > text", "Action");
        h.assert_text("#tooltip", "Name: Titanic\nValue: 300");
        assert_eq!(h.text("rect"), "");
        assert_eq!(h.text("#missing"), "");
    }

    #[test]
    fn test_exists() {
        let h = scene();
        h.assert_exists("#tooltip").assert_not_exists("#legend");
        assert!(h.query("rect.tile[data-name='Titanic']").is_some());
    }

    #[test]
    #[should_panic(expected = "Expected 3 elements matching 'rect'")]
    fn test_assert_count_failure() {
        scene().assert_count("rect", 3);
    }

    #[test]
    fn test_unbalanced_commands() {
        let h = Harness::new(vec![DrawCommand::EndGroup, DrawCommand::EndGroup]);
        h.assert_count("g", 0);
        assert_eq!(h.commands().len(), 2);
    }
}
