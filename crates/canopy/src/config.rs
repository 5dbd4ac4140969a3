//! Chart and application configuration.
//!
//! Every field is optional in YAML; missing fields take the values of the
//! published chart (1200x800 canvas, 25px margin, category10 palette).
//!
//! ```yaml
//! default_dataset: movies
//! chart:
//!   text_truncate_length: 8
//!   legend:
//!     width: 900
//! datasets:
//!   local:
//!     title: Local Sales
//!     description: Offline copy
//!     source_location: ./data/sales.json
//! ```

use crate::dataset::{DatasetDescriptor, DatasetRegistry};
use crate::error::{CanopyError, Result};
use canopy_core::{Color, ColorScale, Insets, Point, Size, CATEGORY10};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Geometry and styling of the treemap and its legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: f32,
    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: f32,
    /// Space between the canvas edge and the tiles
    #[serde(default = "default_margin")]
    pub margin: Insets,
    /// Category colors as hex strings, assigned in first-seen order
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Labels longer than this many characters are shortened
    #[serde(default = "default_truncate_length")]
    pub text_truncate_length: usize,
    /// Gap between sibling tiles and around each category
    #[serde(default = "default_padding")]
    pub padding: f32,
    /// Snap tile edges to whole pixels
    #[serde(default = "default_true")]
    pub round: bool,
    /// Opacity of each tile group
    #[serde(default = "default_tile_opacity")]
    pub tile_opacity: f32,
    /// Label position inside a tile
    #[serde(default = "default_label_offset")]
    pub label_offset: Point,
    /// Label font size
    #[serde(default = "default_label_size")]
    pub label_size: f32,
    /// Legend placement
    #[serde(default)]
    pub legend: LegendConfig,
    /// Tooltip timings and offset
    #[serde(default)]
    pub tooltip: TooltipConfig,
}

fn default_width() -> f32 {
    1200.0
}

fn default_height() -> f32 {
    800.0
}

fn default_margin() -> Insets {
    Insets::uniform(25.0)
}

fn default_palette() -> Vec<String> {
    CATEGORY10.iter().map(|hex| (*hex).to_string()).collect()
}

fn default_truncate_length() -> usize {
    5
}

fn default_padding() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_tile_opacity() -> f32 {
    0.8
}

fn default_label_offset() -> Point {
    Point::new(5.0, 10.0)
}

fn default_label_size() -> f32 {
    10.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            palette: default_palette(),
            text_truncate_length: default_truncate_length(),
            padding: default_padding(),
            round: true,
            tile_opacity: default_tile_opacity(),
            label_offset: default_label_offset(),
            label_size: default_label_size(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Full canvas size.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area available to the tiles once margins are removed.
    #[must_use]
    pub fn inner_size(&self) -> Size {
        self.margin.inner(self.canvas_size())
    }

    /// Parsed palette colors.
    pub fn palette_colors(&self) -> Result<Vec<Color>> {
        self.palette
            .iter()
            .map(|hex| {
                Color::from_hex(hex)
                    .map_err(|e| CanopyError::Config(format!("palette entry '{hex}': {e}")))
            })
            .collect()
    }

    /// A fresh ordinal scale over the configured palette.
    pub fn color_scale(&self) -> Result<ColorScale> {
        Ok(ColorScale::new(self.palette_colors()?))
    }

    /// Check that the chart can be drawn with these values.
    pub fn validate(&self) -> Result<()> {
        if !self.inner_size().is_positive() {
            return Err(CanopyError::Config(format!(
                "canvas {}x{} leaves no room inside the margin",
                self.width, self.height
            )));
        }
        if self.palette.is_empty() {
            return Err(CanopyError::Config("palette is empty".to_string()));
        }
        self.palette_colors()?;
        if self.text_truncate_length == 0 {
            return Err(CanopyError::Config(
                "text_truncate_length must be at least 1".to_string(),
            ));
        }
        if !(self.padding >= 0.0 && self.padding.is_finite()) {
            return Err(CanopyError::Config(format!(
                "padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        if !(0.0..=1.0).contains(&self.tile_opacity) {
            return Err(CanopyError::Config(format!(
                "tile_opacity must be within [0, 1], got {}",
                self.tile_opacity
            )));
        }
        self.legend.validate()
    }
}

/// Legend grid constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Width available to the legend (drives the column count)
    #[serde(default = "default_legend_width")]
    pub width: f32,
    /// Translation of the whole legend group
    #[serde(default = "default_legend_offset")]
    pub offset: Point,
    /// Side length of a color swatch
    #[serde(default = "default_swatch_size")]
    pub swatch_size: f32,
    /// Horizontal pitch between entries
    #[serde(default = "default_h_spacing")]
    pub h_spacing: f32,
    /// Extra gap between rows
    #[serde(default = "default_v_spacing")]
    pub v_spacing: f32,
    /// Label position relative to the swatch's bottom-right corner
    #[serde(default = "default_text_offset")]
    pub text_offset: Point,
}

fn default_legend_width() -> f32 {
    500.0
}

fn default_legend_offset() -> Point {
    Point::new(60.0, 10.0)
}

fn default_swatch_size() -> f32 {
    15.0
}

fn default_h_spacing() -> f32 {
    150.0
}

fn default_v_spacing() -> f32 {
    10.0
}

fn default_text_offset() -> Point {
    Point::new(3.0, -2.0)
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: default_legend_width(),
            offset: default_legend_offset(),
            swatch_size: default_swatch_size(),
            h_spacing: default_h_spacing(),
            v_spacing: default_v_spacing(),
            text_offset: default_text_offset(),
        }
    }
}

impl LegendConfig {
    fn validate(&self) -> Result<()> {
        if self.h_spacing <= 0.0 || self.h_spacing.is_nan() {
            return Err(CanopyError::Config(format!(
                "legend h_spacing must be positive, got {}",
                self.h_spacing
            )));
        }
        if self.swatch_size <= 0.0 || self.swatch_size.is_nan() {
            return Err(CanopyError::Config(format!(
                "legend swatch_size must be positive, got {}",
                self.swatch_size
            )));
        }
        if self.v_spacing < 0.0 || self.v_spacing.is_nan() {
            return Err(CanopyError::Config(format!(
                "legend v_spacing must not be negative, got {}",
                self.v_spacing
            )));
        }
        Ok(())
    }
}

/// Tooltip timings and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Fade-in length on hover
    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,
    /// Fade-out length when the pointer leaves
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    /// Tooltip position relative to the pointer
    #[serde(default = "default_tooltip_offset")]
    pub offset: Point,
}

fn default_fade_in_ms() -> u64 {
    250
}

fn default_fade_out_ms() -> u64 {
    500
}

fn default_tooltip_offset() -> Point {
    Point::new(0.0, -30.0)
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: default_fade_in_ms(),
            fade_out_ms: default_fade_out_ms(),
            offset: default_tooltip_offset(),
        }
    }
}

impl TooltipConfig {
    /// Fade-in length.
    #[must_use]
    pub const fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    /// Fade-out length.
    #[must_use]
    pub const fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chart geometry and styling
    #[serde(default)]
    pub chart: ChartConfig,
    /// Dataset used when the query names none or an unknown one
    #[serde(default)]
    pub default_dataset: Option<String>,
    /// Extra datasets, or overrides of the built-in ones by key
    #[serde(default)]
    pub datasets: BTreeMap<String, DatasetDescriptor>,
}

impl AppConfig {
    /// Parse from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Built-in datasets merged with the configured ones.
    pub fn registry(&self) -> Result<DatasetRegistry> {
        let mut registry = DatasetRegistry::builtin();
        for (key, descriptor) in &self.datasets {
            registry.insert(key.clone(), descriptor.clone());
        }
        if let Some(key) = &self.default_dataset {
            registry.set_default(key)?;
        }
        Ok(registry)
    }

    /// Check chart values and that the default dataset is registered.
    pub fn validate(&self) -> Result<()> {
        self.chart.validate()?;
        self.registry().map(|_| ())
    }
}
