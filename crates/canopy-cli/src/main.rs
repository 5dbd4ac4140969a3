//! Canopy CLI - render treemaps to files or serve them over HTTP.

#![allow(
    clippy::unwrap_used,
    clippy::needless_pass_by_value,
    clippy::module_name_repetitions
)]

mod args;
mod serve;

use args::{Cli, Commands, Format};
use canopy::{
    render_selection, AppConfig, AutoSource, DataSource, DatasetRegistry, Rendering, Result,
    Selection,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over -d when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(?level, "logging initialized");
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

fn execute(cli: &Cli) -> std::result::Result<(), String> {
    let config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let registry = config.registry().map_err(|e| e.to_string())?;

    match &cli.command {
        Commands::Render {
            data,
            query,
            format,
            output,
        } => {
            let source = AutoSource::new().map_err(|e| e.to_string())?;
            let rendering = render(
                &config,
                &registry,
                data.as_deref(),
                query.as_deref(),
                &source,
            )
            .map_err(|e| e.to_string())?;
            let text = format_rendering(&rendering, *format).map_err(|e| e.to_string())?;
            write_output(output.as_ref(), &text)
        }
        Commands::Serve { port, host } => {
            let source = AutoSource::new().map_err(|e| e.to_string())?;
            serve::run(&format!("{host}:{port}"), &config, &registry, &source)
        }
        Commands::Datasets => {
            print!("{}", list_datasets(&registry));
            Ok(())
        }
    }
}

fn render(
    config: &AppConfig,
    registry: &DatasetRegistry,
    data: Option<&str>,
    query: Option<&str>,
    source: &dyn DataSource,
) -> Result<Rendering> {
    let selection = match data {
        Some(key) => Selection::from_key(Some(key), registry),
        None => Selection::from_query(query.unwrap_or(""), registry),
    };
    render_selection(config, &selection, source)
}

fn format_rendering(rendering: &Rendering, format: Format) -> Result<String> {
    Ok(match format {
        Format::Html => rendering.to_html(),
        Format::Svg => rendering.to_svg(),
        Format::Json => rendering.to_json()? + "\n",
    })
}

fn write_output(output: Option<&PathBuf>, text: &str) -> std::result::Result<(), String> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
            Ok(())
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn list_datasets(registry: &DatasetRegistry) -> String {
    let default = registry.default_key();
    registry
        .iter()
        .map(|(key, descriptor)| {
            let marker = if key == default { " (default)" } else { "" };
            format!(
                "{key}{marker}\n  {}: {}\n  {}\n",
                descriptor.title, descriptor.description, descriptor.source_location
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_test::FixtureSource;

    #[test]
    fn test_render_prefers_data_over_query() {
        let registry = DatasetRegistry::builtin();
        let source = FixtureSource::builtin();
        let rendering = render(
            &AppConfig::default(),
            &registry,
            Some("movies"),
            Some("data=kickstarter"),
            &source,
        )
        .unwrap();
        assert_eq!(rendering.dataset, "movies");

        let rendering = render(
            &AppConfig::default(),
            &registry,
            None,
            Some("?data=kickstarter"),
            &source,
        )
        .unwrap();
        assert_eq!(rendering.dataset, "kickstarter");

        let rendering = render(&AppConfig::default(), &registry, None, None, &source).unwrap();
        assert_eq!(rendering.dataset, "videogames");
    }

    #[test]
    fn test_formats() {
        let registry = DatasetRegistry::builtin();
        let rendering = render(
            &AppConfig::default(),
            &registry,
            Some("movies"),
            None,
            &FixtureSource::builtin(),
        )
        .unwrap();
        assert!(format_rendering(&rendering, Format::Html)
            .unwrap()
            .starts_with("<!DOCTYPE html>"));
        assert!(format_rendering(&rendering, Format::Svg)
            .unwrap()
            .starts_with("<svg"));
        let json = format_rendering(&rendering, Format::Json).unwrap();
        assert!(json.contains("\"dataset\": \"movies\""));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_output(Some(&path), "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");

        let err = write_output(Some(&dir.path().join("missing/chart.svg")), "x").unwrap_err();
        assert!(err.starts_with("failed to write"));
    }

    #[test]
    fn test_list_datasets_marks_default() {
        let listing = list_datasets(&DatasetRegistry::builtin());
        assert!(listing.starts_with("videogames (default)\n  Video Game Sales:"));
        assert!(listing.contains("movies\n  Movie Sales: Top 100 Highest Grossing Movies"));
        assert_eq!(listing.matches("(default)").count(), 1);
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), AppConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canopy.yaml");
        std::fs::write(&path, "default_dataset: movies\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.registry().unwrap().default_key(), "movies");
    }
}
