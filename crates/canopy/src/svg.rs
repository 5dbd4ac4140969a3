//! SVG output.
//!
//! [`SvgCanvas`] is a [`Canvas`] that writes markup directly. Groups become
//! `<g>` elements with `transform` and `opacity`; attributes on each command
//! are copied onto the element.

use canopy_core::{Attributes, Canvas, Color, Point, Rect, TextStyle, Transform2D};
use std::fmt::Write as _;

/// Escape text for use in XML content and attribute values.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn write_attrs(out: &mut String, attrs: &Attributes) {
    for (name, value) in attrs.iter() {
        let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
    }
}

fn write_fill(out: &mut String, color: Color) {
    let _ = write!(out, " fill=\"{}\"", color.to_hex());
    if color.a < 1.0 {
        let _ = write!(out, " fill-opacity=\"{}\"", color.a);
    }
}

fn transform_value(transform: &Transform2D) -> String {
    match transform.as_translation() {
        Some((x, y)) => format!("translate({x},{y})"),
        None => {
            let [a, b, c, d, e, f] = transform.matrix;
            format!("matrix({a},{b},{c},{d},{e},{f})")
        }
    }
}

/// Canvas producing one `<svg>` document.
#[derive(Debug)]
pub struct SvgCanvas {
    out: String,
    depth: usize,
}

impl SvgCanvas {
    /// Open an `<svg>` element of the given size with extra root attributes.
    #[must_use]
    pub fn new(width: f32, height: f32, attrs: &Attributes) -> Self {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\""
        );
        write_attrs(&mut out, attrs);
        out.push_str(">\n");
        Self { out, depth: 0 }
    }

    fn indent(&mut self) {
        for _ in 0..=self.depth {
            self.out.push_str("  ");
        }
    }

    /// Close any open groups and the root element.
    #[must_use]
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.pop_group();
        }
        self.out.push_str("</svg>\n");
        self.out
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color, attrs: &Attributes) {
        self.indent();
        let _ = write!(
            self.out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            rect.x, rect.y, rect.width, rect.height
        );
        write_fill(&mut self.out, color);
        write_attrs(&mut self.out, attrs);
        self.out.push_str("/>\n");
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle, attrs: &Attributes) {
        self.indent();
        let _ = write!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\"",
            position.x, position.y, style.size
        );
        if style.color != Color::BLACK {
            write_fill(&mut self.out, style.color);
        }
        write_attrs(&mut self.out, attrs);
        let _ = writeln!(self.out, ">{}</text>", escape_xml(text));
    }

    fn push_group(&mut self, transform: Transform2D, opacity: f32, attrs: &Attributes) {
        self.indent();
        self.out.push_str("<g");
        if transform != Transform2D::identity() {
            let _ = write!(self.out, " transform=\"{}\"", transform_value(&transform));
        }
        if opacity < 1.0 {
            let _ = write!(self.out, " style=\"opacity: {opacity}\"");
        }
        write_attrs(&mut self.out, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn pop_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.indent();
        self.out.push_str("</g>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Tom & Jerry's <"Game">"#),
            "Tom &amp; Jerry&#39;s &lt;&quot;Game&quot;&gt;"
        );
    }

    #[test]
    fn test_empty_document() {
        let attrs = Attributes::new().with_id("treemap-diagram");
        let svg = SvgCanvas::new(1200.0, 800.0, &attrs).finish();
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1200\" height=\"800\" viewBox=\"0 0 1200 800\" id=\"treemap-diagram\">\n</svg>\n"
        );
    }

    #[test]
    fn test_group_rect_and_text() {
        let mut canvas = SvgCanvas::new(100.0, 100.0, &Attributes::new());
        let group = Attributes::new().with_class("g");
        canvas.push_group(Transform2D::translate(25.0, 25.5), 0.8, &group);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, 40.0, 20.0),
            Color::from_rgb8(31, 119, 180),
            &Attributes::new().with_class("tile").with("data-name", "A&B"),
        );
        let style = TextStyle::default();
        canvas.draw_text("A&B", Point::new(5.0, 10.0), &style, &Attributes::new());
        let svg = canvas.finish();
        assert!(svg.contains(
            "<g transform=\"translate(25,25.5)\" style=\"opacity: 0.8\" class=\"g\">"
        ));
        assert!(svg.contains(
            "<rect x=\"0\" y=\"0\" width=\"40\" height=\"20\" fill=\"#1f77b4\" class=\"tile\" data-name=\"A&amp;B\"/>"
        ));
        assert!(svg.contains("<text x=\"5\" y=\"10\" font-size=\"10\">A&amp;B</text>"));
        assert!(svg.contains("</g>\n</svg>"));
    }

    #[test]
    fn test_unbalanced_pop_is_ignored() {
        let mut canvas = SvgCanvas::new(10.0, 10.0, &Attributes::new());
        canvas.pop_group();
        assert!(!canvas.finish().contains("</g>"));
    }

    #[test]
    fn test_translucent_fill() {
        let mut canvas = SvgCanvas::new(10.0, 10.0, &Attributes::new());
        let fill = Color::WHITE.with_alpha(0.5);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), fill, &Attributes::new());
        assert!(canvas.finish().contains("fill=\"#ffffff\" fill-opacity=\"0.5\""));
    }
}
