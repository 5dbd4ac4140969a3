//! Colors as used by fills and palettes.

use serde::{Deserialize, Serialize};

/// RGBA color, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha; below 1 it is written as `fill-opacity`
    pub a: f32,
}

impl Color {
    /// Opaque black, the default text fill.
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);

    const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color; out-of-range channels are clamped.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        let unit = |v: f32| v.clamp(0.0, 1.0);
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let unit = |v: u8| f32::from(v) / 255.0;
        Self::opaque(unit(r), unit(g), unit(b))
    }

    /// Parse `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
    ///
    /// # Errors
    ///
    /// [`ColorParseError`] when the text is not six or eight hex digits.
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let count = digits.chars().count();
        if count != 6 && count != 8 {
            return Err(ColorParseError::Length(count));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(text.trim().to_string()));
        }

        let mut channels = digits
            .as_bytes()
            .chunks(2)
            .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1]));
        let mut next = || channels.next().unwrap_or(u8::MAX);
        let color = Self::from_rgb8(next(), next(), next());
        Ok(if digits.len() == 8 {
            color.with_alpha(f32::from(next()) / 255.0)
        } else {
            color
        })
    }

    /// Lowercase `#rrggbb`; alpha is not included.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b)
        )
    }

    /// Same color with alpha replaced.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// A palette entry that is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Digit count other than 6 or 8
    Length(usize),
    /// Non-hex character in the given text
    Digit(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length(n) => write!(f, "expected 6 or 8 hex digits, found {n}"),
            Self::Digit(text) => write!(f, "'{text}' contains a non-hex digit"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_category_hex() {
        let c = Color::from_hex("#1f77b4").unwrap();
        assert_eq!(c, Color::from_rgb8(0x1f, 0x77, 0xb4));
        assert_eq!(c.to_hex(), "#1f77b4");
        assert_eq!(Color::from_hex(" FF7F0E ").unwrap().to_hex(), "#ff7f0e");
    }

    #[test]
    fn test_hex_with_alpha() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert_eq!(c.to_hex(), "#ffffff");
        assert!((c.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_bad_hex() {
        assert_eq!(Color::from_hex("#fff"), Err(ColorParseError::Length(3)));
        assert_eq!(Color::from_hex("#ffé00"), Err(ColorParseError::Length(5)));
        assert_eq!(
            Color::from_hex("#gg0000"),
            Err(ColorParseError::Digit("#gg0000".to_string()))
        );
        assert_eq!(
            ColorParseError::Length(3).to_string(),
            "expected 6 or 8 hex digits, found 3"
        );
    }

    #[test]
    fn test_alpha_and_default() {
        assert_eq!(Color::WHITE.with_alpha(0.8).a, 0.8);
        assert_eq!(Color::default(), Color::BLACK);
    }
}
