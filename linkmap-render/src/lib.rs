pub mod artifact;
pub mod error;
pub mod html;
pub mod palette;
pub mod svg;

pub use artifact::{ArtifactOutcome, artifact_path, write_artifact};
pub use error::RenderError;
pub use palette::{CategoryPalette, ColorBy, Colormap, Rgb};

use linkmap_core::layout::{category_scalars, depth_scalars};
use linkmap_core::{Category, Layout, LinkGraph};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub interactive: bool,
    pub color_by: ColorBy,
}

/// Draws layouts of one graph. The graph and categories are borrowed
/// read-only, so one renderer serves every requested strategy.
pub struct Renderer<'a> {
    graph: &'a LinkGraph,
    categories: &'a [Category],
    palette: CategoryPalette,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(graph: &'a LinkGraph, categories: &'a [Category], options: RenderOptions) -> Self {
        Self {
            graph,
            categories,
            palette: CategoryPalette::from_categories(categories),
            options,
        }
    }

    pub fn with_palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn render(&self, layout: &Layout) -> error::Result<String> {
        let colors =
            palette::node_colors(self.graph, layout.strategy, self.options.color_by, &self.palette);

        if !self.options.interactive {
            return Ok(svg::render_svg(self.graph, layout, &colors));
        }

        let scalars: BTreeMap<i64, Option<f64>> = match self.options.color_by {
            ColorBy::Depth => depth_scalars(self.graph)
                .into_iter()
                .map(|(id, t)| (id, Some(t)))
                .collect(),
            ColorBy::Category => category_scalars(self.graph, self.categories),
        };
        html::render_html(self.graph, layout, &colors, &scalars)
    }

    /// Renders and writes `<prefix>_<strategy>.<ext>`. Failures are returned
    /// as an outcome so the remaining layouts can still be written.
    pub fn render_to(&self, layout: &Layout, prefix: &str) -> ArtifactOutcome {
        let path = artifact_path(prefix, layout.strategy, self.options.interactive);

        if self.graph.is_empty() {
            warn!("No nodes to visualize, writing an empty {}", path.display());
        }

        match self
            .render(layout)
            .and_then(|content| write_artifact(&path, &content))
        {
            Ok(()) => {
                info!("Wrote {} layout to {}", layout.strategy.as_str(), path.display());
                ArtifactOutcome::Written {
                    path,
                    strategy: layout.strategy,
                    fallback_layout: layout.used_fallback(),
                }
            }
            Err(e) => {
                warn!("Failed to write {}: {}", path.display(), e);
                ArtifactOutcome::Failed {
                    path,
                    strategy: layout.strategy,
                    error: e.to_string(),
                }
            }
        }
    }
}
