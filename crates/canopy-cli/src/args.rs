//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Treemap diagrams of categorized datasets")]
#[command(version)]
pub(crate) struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub(crate) debug: u8,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Render one dataset
    Render {
        /// Dataset key (videogames, movies, kickstarter, or a configured one)
        #[arg(long)]
        data: Option<String>,

        /// Raw query string, e.g. "?data=movies"; ignored when --data is given
        #[arg(long)]
        query: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve rendered pages over HTTP
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// List registered datasets
    Datasets,
}

/// Output format of `render`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    /// Full page with title, chart, legend and tooltip
    Html,
    /// Treemap and legend SVG documents
    Svg,
    /// Tiles and legend entries
    Json,
}
