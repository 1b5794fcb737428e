// Statistics report formatting

use crate::stats::Stats;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsFormat {
    Text,
    Json,
}

impl StatsFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(StatsFormat::Text),
            "json" => Some(StatsFormat::Json),
            _ => None,
        }
    }
}

pub fn format_stats(stats: &Stats, format: StatsFormat) -> Result<String, serde_json::Error> {
    match format {
        StatsFormat::Text => Ok(format_text(stats)),
        StatsFormat::Json => format_json(stats),
    }
}

pub fn format_text(stats: &Stats) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut report = String::new();

    report.push_str(&format!("\n{}\n", rule));
    report.push_str("Graph Statistics\n");
    report.push_str(&format!("{}\n", rule));
    report.push_str(&format!("Total nodes: {}\n", stats.node_count));
    report.push_str(&format!("Total edges: {}\n", stats.edge_count));
    report.push_str(&format!("Maximum depth: {}\n", stats.max_depth));

    report.push_str("\nNodes per depth level:\n");
    if stats.depth_histogram.is_empty() {
        report.push_str("  (none)\n");
    }
    for (depth, count) in &stats.depth_histogram {
        report.push_str(&format!("  Depth {}: {} nodes\n", depth, count));
    }

    report.push_str(&format!("\nMaximum children per node: {}\n", stats.max_out_degree));
    if stats.orphan_count > 0 {
        report.push_str(&format!("Orphaned links: {}\n", stats.orphan_count));
    }
    if stats.depth_mismatches > 0 {
        report.push_str(&format!(
            "Links with inconsistent depth: {}\n",
            stats.depth_mismatches
        ));
    }
    report.push_str(&format!("{}\n", rule));

    report
}

pub fn format_json(stats: &Stats) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "linkmap",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "statistics": stats
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
