//! End-to-end rendering against fixture data.

use canopy::{
    render_treemap, AppConfig, CanopyError, DatasetRegistry, FileSource, PointerEvent,
    TooltipState,
};
use canopy_core::{DrawCommand, Point, TextStyle};
use canopy_test::fixture::{videogames_fixture, MOVIES_JSON, VIDEOGAMES_JSON};
use canopy_test::{FixtureSource, Harness};
use std::time::Duration;

fn render(query: &str) -> canopy::Rendering {
    render_treemap(
        &AppConfig::default(),
        &DatasetRegistry::builtin(),
        query,
        &FixtureSource::builtin(),
    )
    .unwrap()
}

#[test]
fn test_movies_action_leaf() {
    let rendering = render("?data=movies");
    assert_eq!(rendering.header.title, "Movie Sales");
    assert_eq!(
        rendering.header.description,
        "Top 100 Highest Grossing Movies Grouped By Genre"
    );

    let h = Harness::new(rendering.treemap_commands.clone());
    h.assert_count("rect.tile[data-name='Action']", 1)
        .assert_attr(
            "rect.tile[data-name='Action']",
            "data-category",
            "Action Movies",
        )
        .assert_attr("rect.tile[data-name='Action']", "data-value", "500");

    let action = rendering
        .tiles
        .iter()
        .find(|t| t.leaf.name == "Action")
        .unwrap();
    assert_eq!(action.label, "Actio...");
    h.assert_count("g.g > text", 5);
    assert_eq!(h.text("g.g > text"), "Actio...");
}

#[test]
fn test_unknown_and_missing_keys_use_default() {
    for query in ["", "?data=", "?data=nonexistent", "?foo=bar"] {
        let rendering = render(query);
        assert_eq!(rendering.dataset, "videogames", "{query}");
        assert_eq!(rendering.header.title, "Video Game Sales");
    }
}

#[test]
fn test_every_leaf_has_a_tile() {
    let rendering = render("data=videogames");
    let h = Harness::new(rendering.treemap_commands.clone());
    let leaves = videogames_fixture().leaf_count();
    assert_eq!(leaves, 9);
    assert_eq!(rendering.tiles.len(), leaves);
    h.assert_count("rect.tile", leaves)
        .assert_count("g.g", leaves);
    for name in ["Wii Sports", "Tetris", "Kinect Adventures!"] {
        h.assert_exists(&format!("rect.tile[data-name='{name}']"));
    }
    h.assert_attr("rect.tile[data-name='Wii Sports']", "data-value", "82.53");
}

#[test]
fn test_areas_proportional_to_values() {
    let rendering = render("data=kickstarter");
    let total: f64 = rendering.leaves().map(|l| l.amount).sum();
    let area = 1150.0 * 750.0;
    for leaf in rendering.leaves() {
        let expected = area * leaf.amount / total;
        let actual = leaf.width() * leaf.height();
        // one pixel of padding around each tile and its category, plus rounding
        let slack = 2.0 * (leaf.width() + leaf.height()) * 2.0 + 16.0;
        assert!(
            (actual - expected).abs() <= slack + expected * 0.02,
            "{}: {actual} vs {expected}",
            leaf.name
        );
    }
}

#[test]
fn test_legend_lists_each_category_once() {
    let rendering = render("data=videogames");
    let categories: Vec<_> = rendering
        .legend
        .iter()
        .map(|e| e.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Wii", "NES", "GB", "DS", "X360"]);

    let h = Harness::new(rendering.legend_commands.clone());
    h.assert_count("rect.legend-item", 5)
        .assert_count("text", 5)
        .assert_exists(".legend-item[data-category='GB']");
    let label = DrawCommand::text("GB", Point::new(18.0, 13.0), TextStyle::default());
    assert_eq!(h.query_all("text")[2], &label);
}

#[test]
fn test_tooltip_round_trip() {
    let rendering = render("data=movies");
    let mut tooltip = rendering.tooltip();
    let index = rendering
        .tiles
        .iter()
        .position(|t| t.leaf.name == "Action")
        .unwrap();

    tooltip.handle(
        PointerEvent::Enter {
            target: index,
            position: Point::new(300.0, 200.0),
        },
        &rendering.tiles,
        Duration::ZERO,
    );
    assert_eq!(tooltip.state(), TooltipState::Visible);
    assert_eq!(tooltip.position(), Point::new(300.0, 170.0));
    let content = tooltip.content().unwrap();
    assert_eq!(
        (
            content.name.as_str(),
            content.category.as_str(),
            content.value.as_str(),
        ),
        ("Action", "Action Movies", "500")
    );
    assert_eq!(tooltip.opacity_at(Duration::from_millis(250)), 1.0);

    tooltip.handle(
        PointerEvent::Leave { target: index },
        &rendering.tiles,
        Duration::from_millis(1000),
    );
    assert_eq!(tooltip.opacity_at(Duration::from_millis(1500)), 0.0);
    assert_eq!(tooltip.data_value(), Some("500"));
}

#[test]
fn test_fetch_happens_once_per_render() {
    let source = FixtureSource::builtin();
    render_treemap(
        &AppConfig::default(),
        &DatasetRegistry::builtin(),
        "data=movies",
        &source,
    )
    .unwrap();
    assert_eq!(source.fetch_count(), 1);
}

#[test]
fn test_malformed_documents_are_errors() {
    let registry = DatasetRegistry::builtin();
    let location = registry.get("movies").unwrap().source_location.clone();
    let cases = [
        ("not json at all", "json"),
        (r#"{"name":"Movies","children":[]}"#, "hierarchy"),
        (
            r#"{"name":"Movies","children":[{"name":"A","children":[{"name":"x","value":"n/a"}]}]}"#,
            "hierarchy",
        ),
    ];
    for (body, kind) in cases {
        let source = FixtureSource::new().with_document(location.clone(), body);
        let err = render_treemap(&AppConfig::default(), &registry, "data=movies", &source)
            .unwrap_err();
        match kind {
            "json" => assert!(matches!(err, CanopyError::Json(_)), "{err}"),
            _ => assert!(matches!(err, CanopyError::InvalidHierarchy(_)), "{err}"),
        }
    }
}

#[test]
fn test_missing_document_is_fetch_error() {
    let err = render_treemap(
        &AppConfig::default(),
        &DatasetRegistry::builtin(),
        "data=movies",
        &FixtureSource::new(),
    )
    .unwrap_err();
    assert!(err.is_fetch_error());
}

#[test]
fn test_configured_local_datasets() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("movies.json"), MOVIES_JSON).unwrap();
    std::fs::write(dir.path().join("games.json"), VIDEOGAMES_JSON).unwrap();

    let yaml = r"
default_dataset: local
chart:
  text_truncate_length: 3
datasets:
  local:
    title: Local Games
    description: Offline copy
    source_location: games.json
  movies:
    title: Movie Sales
    description: Offline movies
    source_location: file://movies.json
";
    let config = AppConfig::from_yaml_str(yaml).unwrap();
    config.validate().unwrap();
    let registry = config.registry().unwrap();
    let source = FileSource::with_root(dir.path());

    let rendering = render_treemap(&config, &registry, "", &source).unwrap();
    assert_eq!(rendering.dataset, "local");
    assert_eq!(rendering.header.title, "Local Games");
    assert_eq!(rendering.tiles[0].label, "Wii...");

    let rendering = render_treemap(&config, &registry, "data=movies", &source).unwrap();
    assert_eq!(rendering.header.description, "Offline movies");
    assert_eq!(rendering.tiles.len(), 5);
}
