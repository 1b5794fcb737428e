use linkmap::handlers::*;
use linkmap::command_argument_builder;
use linkmap_core::report::StatsFormat;
use linkmap_core::{Category, LabelStyle, LayoutStrategy, LinkRecord, LinkStore, MapError};
use linkmap_render::ColorBy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_site_db(dir: &Path) -> PathBuf {
    let db_path = dir.join("links.db");
    let store = LinkStore::create(&db_path).unwrap();
    store.insert_category(&Category::new(1, "about")).unwrap();
    store.insert_category(&Category::new(2, "products")).unwrap();
    for link in [
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/about", 1, 1),
        LinkRecord::new(3, "https://example.com/products", 1, 1),
        LinkRecord::new(4, "https://example.com/products/software", 3, 2),
        LinkRecord::new(5, "https://example.com/products/hardware", 3, 2),
        LinkRecord::new(6, "https://example.com/about/team", 2, 2),
    ] {
        store.insert_link(&link).unwrap();
    }
    db_path
}

fn quiet_options(db_path: PathBuf, dir: &Path) -> ViewOptions {
    ViewOptions {
        db_path,
        output_prefix: dir.join("map").to_string_lossy().into_owned(),
        quiet: true,
        ..ViewOptions::default()
    }
}

fn parse(args: &[&str]) -> anyhow::Result<ViewOptions> {
    let matches = command_argument_builder().try_get_matches_from(args.iter().copied())?;
    ViewOptions::from_matches(&matches)
}

// ============================================================================
// Option Parsing Tests
// ============================================================================

#[test]
fn test_options_defaults() {
    let options = parse(&["linkmap"]).unwrap();

    assert_eq!(options.db_path, PathBuf::from("data/links.db"));
    assert_eq!(options.max_depth, None);
    assert_eq!(options.strategies, LayoutStrategy::ALL.to_vec());
    assert_eq!(options.label_style, LabelStyle::Short);
    assert_eq!(options.output_prefix, "link_hierarchy");
    assert!(!options.interactive);
    assert_eq!(options.color_by, ColorBy::Depth);
    assert_eq!(options.stats_format, StatsFormat::Text);
    assert!(options.stats_file.is_none());
    assert!(!options.quiet);
}

#[test]
fn test_options_all_flags() {
    let options = parse(&[
        "linkmap",
        "--db",
        "crawl.db",
        "--max-depth",
        "2",
        "--layout",
        "shell",
        "--full-urls",
        "--output-prefix",
        "out/site",
        "-i",
        "--color-by",
        "category",
        "--stats-format",
        "json",
        "--stats-file",
        "stats.json",
        "-q",
    ])
    .unwrap();

    assert_eq!(options.db_path, PathBuf::from("crawl.db"));
    assert_eq!(options.max_depth, Some(2));
    assert_eq!(options.strategies, vec![LayoutStrategy::Shell]);
    assert_eq!(options.label_style, LabelStyle::Full);
    assert_eq!(options.output_prefix, "out/site");
    assert!(options.interactive);
    assert_eq!(options.color_by, ColorBy::Category);
    assert_eq!(options.stats_format, StatsFormat::Json);
    assert_eq!(options.stats_file, Some(PathBuf::from("stats.json")));
    assert!(options.quiet);
}

#[test]
fn test_options_reject_unknown_layout() {
    assert!(parse(&["linkmap", "--layout", "radial"]).is_err());
}

#[test]
fn test_options_reject_negative_depth() {
    assert!(parse(&["linkmap", "--max-depth", "-1"]).is_err());
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    assert!(
        command_argument_builder()
            .try_get_matches_from(["linkmap", "-q", "-v"])
            .is_err()
    );
}

// ============================================================================
// Input Loading Tests
// ============================================================================

#[test]
fn test_load_input_skips_categories_when_not_needed() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());

    let (links, categories) = load_input(&db_path, false).unwrap();
    assert_eq!(links.len(), 6);
    assert!(categories.is_empty());

    let (_, categories) = load_input(&db_path, true).unwrap();
    assert_eq!(categories.len(), 2);
}

#[test]
fn test_load_input_missing_database() {
    let result = load_input(Path::new("/nonexistent/dir/links.db"), false);
    assert!(matches!(result, Err(MapError::InputUnavailable { .. })));
}

// ============================================================================
// View Tests
// ============================================================================

#[test]
fn test_run_view_writes_every_layout() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let options = quiet_options(db_path, temp_dir.path());

    let summary = run_view(&options).unwrap();

    assert_eq!(summary.stats.node_count, 6);
    assert_eq!(summary.stats.edge_count, 5);
    assert_eq!(summary.stats.max_depth, 2);
    assert_eq!(summary.stats.max_out_degree, 2);
    assert_eq!(summary.failed_artifacts(), 0);
    assert_eq!(summary.artifacts.len(), 3);

    for name in ["map_tree.svg", "map_circular.svg", "map_shell.svg"] {
        let path = temp_dir.path().join(name);
        assert!(path.exists(), "{} missing", name);
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}

#[test]
fn test_run_view_respects_max_depth() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let options = ViewOptions {
        max_depth: Some(1),
        strategies: vec![LayoutStrategy::Circular],
        ..quiet_options(db_path, temp_dir.path())
    };

    let summary = run_view(&options).unwrap();
    assert_eq!(summary.stats.node_count, 3);
    assert_eq!(summary.stats.edge_count, 2);
    assert_eq!(summary.artifacts.len(), 1);
}

#[test]
fn test_run_view_missing_database() {
    let temp_dir = TempDir::new().unwrap();
    let options = quiet_options(temp_dir.path().join("missing.db"), temp_dir.path());

    let err = run_view(&options).unwrap_err();
    assert!(
        err.downcast_ref::<MapError>()
            .is_some_and(MapError::is_input_unavailable)
    );
    assert!(!temp_dir.path().join("map_tree.svg").exists());
}

#[test]
fn test_run_view_empty_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("empty.db");
    LinkStore::create(&db_path).unwrap();
    let options = quiet_options(db_path, temp_dir.path());

    let summary = run_view(&options).unwrap();
    assert_eq!(summary.stats.node_count, 0);
    assert_eq!(summary.stats.edge_count, 0);
    assert_eq!(summary.stats.max_depth, 0);
    assert!(summary.stats.depth_histogram.is_empty());
    assert_eq!(summary.failed_artifacts(), 0);

    let content = fs::read_to_string(temp_dir.path().join("map_shell.svg")).unwrap();
    assert!(content.contains("No nodes to visualize"));
}

#[test]
fn test_run_view_interactive_category_colors() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let options = ViewOptions {
        interactive: true,
        color_by: ColorBy::Category,
        strategies: vec![LayoutStrategy::ForceDirected],
        ..quiet_options(db_path, temp_dir.path())
    };

    let summary = run_view(&options).unwrap();
    assert_eq!(summary.failed_artifacts(), 0);

    let html = fs::read_to_string(temp_dir.path().join("map_tree.html")).unwrap();
    assert!(html.contains("\"category_id\":1"));
    assert!(html.contains("\"category_id\":2"));
    assert!(html.contains("\"category_id\":null"));
}

#[test]
fn test_run_view_saves_stats_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let stats_path = temp_dir.path().join("reports/stats.json");
    let options = ViewOptions {
        strategies: vec![LayoutStrategy::Shell],
        stats_format: StatsFormat::Json,
        stats_file: Some(stats_path.clone()),
        ..quiet_options(db_path, temp_dir.path())
    };

    run_view(&options).unwrap();
    let report = fs::read_to_string(&stats_path).unwrap();
    assert!(report.contains("\"statistics\""));
    assert!(report.contains("\"node_count\": 6"));
}

#[test]
fn test_run_view_reports_failed_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let options = ViewOptions {
        output_prefix: blocker.join("map").to_string_lossy().into_owned(),
        ..quiet_options(db_path, temp_dir.path())
    };

    let summary = run_view(&options).unwrap();
    assert_eq!(summary.failed_artifacts(), 3);
}

#[test]
fn test_run_view_continues_after_stats_file_failure() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let options = ViewOptions {
        stats_file: Some(blocker.join("stats.txt")),
        ..quiet_options(db_path, temp_dir.path())
    };

    let summary = run_view(&options).unwrap();

    assert!(summary.report_error.is_some());
    assert_eq!(summary.failed_artifacts(), 0);
    assert_eq!(summary.failures(), 1);
    assert_eq!(summary.stats.node_count, 6);
    assert!(temp_dir.path().join("map_tree.svg").exists());
    assert!(temp_dir.path().join("map_shell.svg").exists());
}

#[test]
fn test_run_view_without_failures() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = create_site_db(temp_dir.path());
    let options = ViewOptions {
        stats_file: Some(temp_dir.path().join("stats.txt")),
        strategies: vec![LayoutStrategy::Circular],
        ..quiet_options(db_path, temp_dir.path())
    };

    let summary = run_view(&options).unwrap();
    assert!(summary.report_error.is_none());
    assert_eq!(summary.failures(), 0);
}
