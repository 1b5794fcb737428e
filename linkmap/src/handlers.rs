use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkmap_core::report::{StatsFormat, format_stats, save_report};
use linkmap_core::{
    Category, GraphBuilder, LabelStyle, LayoutStrategy, LinkRecord, LinkStore, Stats,
    assign_categories, layout, summarize,
};
use linkmap_render::{ArtifactOutcome, ColorBy, RenderOptions, Renderer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Everything the viewer needs, parsed from the command line.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub db_path: PathBuf,
    pub max_depth: Option<u32>,
    pub strategies: Vec<LayoutStrategy>,
    pub label_style: LabelStyle,
    pub output_prefix: String,
    pub interactive: bool,
    pub color_by: ColorBy,
    pub stats_format: StatsFormat,
    pub stats_file: Option<PathBuf>,
    pub quiet: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/links.db"),
            max_depth: None,
            strategies: LayoutStrategy::ALL.to_vec(),
            label_style: LabelStyle::Short,
            output_prefix: "link_hierarchy".to_string(),
            interactive: false,
            color_by: ColorBy::Depth,
            stats_format: StatsFormat::Text,
            stats_file: None,
            quiet: false,
        }
    }
}

impl ViewOptions {
    pub fn from_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        let db = args
            .get_one::<String>("db")
            .ok_or_else(|| anyhow!("--db is required"))?;
        let db_path = PathBuf::from(shellexpand::tilde(db).as_ref());

        let layout = args.get_one::<String>("layout").map(String::as_str).unwrap_or("all");
        let strategies = LayoutStrategy::parse_selection(layout)
            .ok_or_else(|| anyhow!("Unknown layout '{}'", layout))?;

        let color_by = args.get_one::<String>("color-by").map(String::as_str).unwrap_or("depth");
        let color_by =
            ColorBy::from_str(color_by).ok_or_else(|| anyhow!("Unknown color mode '{}'", color_by))?;

        let stats_format = args
            .get_one::<String>("stats-format")
            .map(String::as_str)
            .unwrap_or("text");
        let stats_format = StatsFormat::from_str(stats_format)
            .ok_or_else(|| anyhow!("Unknown statistics format '{}'", stats_format))?;

        Ok(Self {
            db_path,
            max_depth: args.get_one::<u32>("max-depth").copied(),
            strategies,
            label_style: if args.get_flag("full-urls") {
                LabelStyle::Full
            } else {
                LabelStyle::Short
            },
            output_prefix: args
                .get_one::<String>("output-prefix")
                .cloned()
                .unwrap_or_else(|| "link_hierarchy".to_string()),
            interactive: args.get_flag("interactive"),
            color_by,
            stats_format,
            stats_file: args.get_one::<PathBuf>("stats-file").cloned(),
            quiet: args.get_flag("quiet"),
        })
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct ViewSummary {
    pub stats: Stats,
    /// Set when the statistics report could not be formatted or saved
    pub report_error: Option<String>,
    pub artifacts: Vec<ArtifactOutcome>,
}

impl ViewSummary {
    pub fn failed_artifacts(&self) -> usize {
        self.artifacts.iter().filter(|a| !a.is_written()).count()
    }

    /// Failed artifacts plus a failed statistics report.
    pub fn failures(&self) -> usize {
        self.failed_artifacts() + usize::from(self.report_error.is_some())
    }
}

/// Reads link rows, plus categories when `with_categories` is set.
pub fn load_input(
    db_path: &Path,
    with_categories: bool,
) -> linkmap_core::Result<(Vec<LinkRecord>, Vec<Category>)> {
    let store = LinkStore::open(db_path)?;
    let links = store.load_links()?;
    let categories = if with_categories {
        store.load_categories()?
    } else {
        Vec::new()
    };
    Ok((links, categories))
}

/// Loads the database, builds the graph, prints statistics and writes one
/// artifact per requested layout. Only an unreadable database is an error;
/// report and artifact failures are reported in the summary.
pub fn run_view(options: &ViewOptions) -> anyhow::Result<ViewSummary> {
    let with_categories = options.color_by == ColorBy::Category;

    say(options, format!("Loading links from {}...", options.db_path.display()));
    let (links, categories) = load_input(&options.db_path, with_categories)
        .with_context(|| format!("Error loading database {}", options.db_path.display()))?;
    say(options, format!("Loaded {} links from database", links.len()));

    let mut graph = GraphBuilder::new()
        .with_max_depth(options.max_depth)
        .with_label_style(options.label_style)
        .build(&links);

    if with_categories {
        let assigned = assign_categories(&mut graph, &categories);
        say(
            options,
            format!("Categorized {} of {} links", assigned, graph.node_count()),
        );
    }

    let stats = summarize(&graph);
    let report_error = emit_report(options, &stats).err().map(|e| {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        format!("{:#}", e)
    });

    let renderer = Renderer::new(
        &graph,
        &categories,
        RenderOptions {
            interactive: options.interactive,
            color_by: options.color_by,
        },
    );
    let depths = graph.depths();

    let mut artifacts = Vec::new();
    for &strategy in &options.strategies {
        let spinner = spinner(options, format!("Generating {} layout...", strategy.as_str()));
        let positions = layout(&graph, &depths, strategy);
        let outcome = renderer.render_to(&positions, &options.output_prefix);
        spinner.finish_and_clear();

        report_outcome(options, &outcome);
        artifacts.push(outcome);
    }

    info!(
        "View complete: {} artifacts, {} failed",
        artifacts.len(),
        artifacts.iter().filter(|a| !a.is_written()).count()
    );
    say(options, "\nVisualization complete!".to_string());

    Ok(ViewSummary {
        stats,
        report_error,
        artifacts,
    })
}

/// Prints the statistics report and saves it when a stats file is set.
fn emit_report(options: &ViewOptions, stats: &Stats) -> anyhow::Result<()> {
    let report = format_stats(stats, options.stats_format)
        .context("Failed to format statistics")?;
    if !options.quiet {
        print!("{}", report);
    }
    if let Some(path) = &options.stats_file {
        save_report(&report, path)
            .with_context(|| format!("Failed to save statistics to {}", path.display()))?;
    }
    Ok(())
}

fn say(options: &ViewOptions, message: String) {
    if !options.quiet {
        println!("{}", message);
    }
}

fn spinner(options: &ViewOptions, message: String) -> ProgressBar {
    if options.quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

fn report_outcome(options: &ViewOptions, outcome: &ArtifactOutcome) {
    match outcome {
        ArtifactOutcome::Written {
            path,
            strategy,
            fallback_layout,
        } => {
            if options.quiet {
                return;
            }
            println!(
                "{} {} layout saved to: {}",
                "✓".green().bold(),
                strategy.as_str(),
                path.display().to_string().bright_white()
            );
            if *fallback_layout {
                println!(
                    "  {} force-directed layout unavailable, nodes placed on a ring",
                    "⚠".yellow()
                );
            }
        }
        ArtifactOutcome::Failed {
            path,
            strategy,
            error,
        } => {
            eprintln!(
                "{} {} layout could not be written to {}: {}",
                "✗".red().bold(),
                strategy.as_str(),
                path.display(),
                error
            );
        }
    }
}
