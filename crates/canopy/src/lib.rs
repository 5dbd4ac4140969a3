#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
//! Canopy: treemap diagrams of categorized datasets.
//!
//! One call turns a request query string into a finished chart:
//!
//! 1. [`Selection`] resolves `?data=<key>` against a [`DatasetRegistry`]
//! 2. [`load_hierarchy`] fetches and validates the JSON tree once
//! 3. [`layout_leaves`] tiles the leaves with squarified layout
//! 4. [`TileRenderer`] and [`LegendLayout`] paint onto any [`Canvas`]
//!
//! The [`Rendering`] returned by [`render_treemap`] keeps the recorded draw
//! commands, so it can be inspected directly or written as SVG, HTML or JSON.
//! [`TooltipController`] adds the hover behaviour on top of the tiles.
//!
//! # Example
//!
//! ```
//! use canopy::{render_treemap, AppConfig, DataSource, DatasetRegistry, Result};
//!
//! struct Inline;
//!
//! impl DataSource for Inline {
//!     fn fetch(&self, _location: &str) -> Result<String> {
//!         Ok(r#"{"name":"Movies","children":[
//!             {"name":"Action Movies","children":[{"name":"Action","value":500}]}
//!         ]}"#.to_string())
//!     }
//! }
//!
//! let config = AppConfig::default();
//! let registry = DatasetRegistry::builtin();
//! let rendering = render_treemap(&config, &registry, "?data=movies", &Inline)?;
//! assert_eq!(rendering.header.title, "Movie Sales");
//! assert_eq!(rendering.tiles[0].label, "Actio...");
//! # Ok::<(), canopy::CanopyError>(())
//! ```

mod config;
mod dataset;
mod error;
mod hierarchy;
mod html;
mod legend;
mod loader;
mod render;
mod selector;
mod svg;
mod tooltip;

pub use canopy_core::{Canvas, DrawCommand, PointerEvent, RecordingCanvas};
pub use config::{AppConfig, ChartConfig, LegendConfig, TooltipConfig};
pub use dataset::{DatasetDescriptor, DatasetRegistry, DEFAULT_DATASET};
pub use error::{CanopyError, Result};
pub use hierarchy::{HierarchyNode, LeafValue};
pub use html::{render_page, tooltip_script};
pub use legend::{legend_entries, LegendEntry, LegendLayout};
pub use loader::{load_hierarchy, AutoSource, DataSource, FileSource, HttpSource};
pub use render::{layout_leaves, truncate_label, PositionedLeaf, Tile, TileRenderer, ELLIPSIS};
pub use selector::{query_param, Header, Selection, DATA_PARAM};
pub use svg::{escape_xml, SvgCanvas};
pub use tooltip::{hit_test, TooltipContent, TooltipController, TooltipState};

use canopy_core::{replay, Attributes, Point};
use serde::Serialize;

/// A finished chart for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Rendering {
    /// Registry key the request resolved to
    pub dataset: String,
    /// Page heading
    pub header: Header,
    /// Painted tiles, in document order
    pub tiles: Vec<Tile>,
    /// Legend entries, one per category
    pub legend: Vec<LegendEntry>,
    /// Draw commands of the treemap
    #[serde(skip)]
    pub treemap_commands: Vec<DrawCommand>,
    /// Draw commands of the legend
    #[serde(skip)]
    pub legend_commands: Vec<DrawCommand>,
    #[serde(skip)]
    chart: ChartConfig,
    #[serde(skip)]
    legend_size: (f32, f32),
}

impl Rendering {
    /// Positioned leaves behind the tiles.
    pub fn leaves(&self) -> impl Iterator<Item = &PositionedLeaf> {
        self.tiles.iter().map(|tile| &tile.leaf)
    }

    /// Treemap followed by legend commands.
    #[must_use]
    pub fn all_commands(&self) -> Vec<DrawCommand> {
        self.treemap_commands
            .iter()
            .chain(&self.legend_commands)
            .cloned()
            .collect()
    }

    /// A hidden tooltip wired to this chart's margin and timings.
    #[must_use]
    pub fn tooltip(&self) -> TooltipController {
        TooltipController::new(&self.chart.tooltip)
            .with_origin(Point::new(self.chart.margin.left, self.chart.margin.top))
    }

    /// The `#treemap-diagram` SVG document.
    #[must_use]
    pub fn treemap_svg(&self) -> String {
        let mut canvas = SvgCanvas::new(
            self.chart.width,
            self.chart.height,
            &Attributes::new().with_id("treemap-diagram"),
        );
        replay(&self.treemap_commands, &mut canvas);
        canvas.finish()
    }

    /// The `#legend` SVG document.
    #[must_use]
    pub fn legend_svg(&self) -> String {
        let (width, height) = self.legend_size;
        let mut canvas = SvgCanvas::new(width, height, &Attributes::new().with_id("legend"));
        replay(&self.legend_commands, &mut canvas);
        canvas.finish()
    }

    /// Both SVG documents, treemap first.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.treemap_svg() + &self.legend_svg()
    }

    /// Standalone HTML page.
    #[must_use]
    pub fn to_html(&self) -> String {
        render_page(
            &self.header,
            &self.treemap_svg(),
            &self.legend_svg(),
            &self.chart.tooltip,
        )
    }

    /// Tiles and legend as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanopyError::Render(e.to_string()))
    }
}

/// Render the dataset a query string selects.
///
/// Performs one fetch through `source`. Unknown or missing dataset keys fall
/// back to the registry default; fetch and data problems are returned as
/// errors.
pub fn render_treemap(
    config: &AppConfig,
    registry: &DatasetRegistry,
    query: &str,
    source: &dyn DataSource,
) -> Result<Rendering> {
    render_selection(config, &Selection::from_query(query, registry), source)
}

/// Render an already resolved selection.
pub fn render_selection(
    config: &AppConfig,
    selection: &Selection<'_>,
    source: &dyn DataSource,
) -> Result<Rendering> {
    config.chart.validate()?;
    let root = load_hierarchy(source, selection.descriptor())?;
    let chart = &config.chart;

    let leaves = layout_leaves(&root, chart);
    let mut renderer = TileRenderer::from_config(chart)?;
    let tiles = renderer.tiles(&leaves);
    let mut canvas = RecordingCanvas::new();
    renderer.paint(&tiles, &mut canvas);
    let treemap_commands = canvas.take_commands();

    let legend = legend_entries(&leaves, renderer.scale_mut());
    let legend_layout = LegendLayout::from_config(&chart.legend);
    legend_layout.paint(&legend, renderer.scale(), &mut canvas);
    let legend_commands = canvas.take_commands();
    let legend_extent = legend_layout.size(legend.len());
    let legend_size = (
        chart.legend.width.max(legend_extent.width),
        legend_extent.height + chart.legend.swatch_size,
    );

    tracing::debug!(
        dataset = selection.key(),
        tiles = tiles.len(),
        categories = legend.len(),
        "rendered treemap"
    );

    Ok(Rendering {
        dataset: selection.key().to_string(),
        header: selection.header(),
        tiles,
        legend,
        treemap_commands,
        legend_commands,
        chart: chart.clone(),
        legend_size,
    })
}
