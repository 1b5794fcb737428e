// Static SVG rendering

use crate::palette::{NodeColors, UNCATEGORIZED};
use linkmap_core::{Layout, LayoutStrategy, LinkGraph, Point};

const PADDING: f64 = 60.0;
const TITLE_HEIGHT: f64 = 50.0;
const EDGE_COLOR: &str = "#808080";

/// Per-strategy figure parameters.
#[derive(Debug, Clone, Copy)]
pub struct FigureStyle {
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
    pub edge_opacity: f64,
    pub edge_width: f64,
    pub font_size: f64,
    /// Labels are drawn only for graphs with fewer nodes than this
    pub label_limit: usize,
    pub title: &'static str,
}

impl FigureStyle {
    pub fn for_strategy(strategy: LayoutStrategy) -> Self {
        match strategy {
            LayoutStrategy::ForceDirected => FigureStyle {
                width: 1600.0,
                height: 960.0,
                node_radius: 11.0,
                edge_opacity: 0.6,
                edge_width: 1.5,
                font_size: 8.0,
                label_limit: 50,
                title: "Link Hierarchy Visualization",
            },
            LayoutStrategy::Circular => FigureStyle {
                width: 1280.0,
                height: 1280.0,
                node_radius: 8.5,
                edge_opacity: 0.4,
                edge_width: 1.0,
                font_size: 6.0,
                label_limit: 30,
                title: "Link Hierarchy - Circular Layout (Depth-based)",
            },
            LayoutStrategy::Shell => FigureStyle {
                width: 1120.0,
                height: 1120.0,
                node_radius: 10.0,
                edge_opacity: 0.5,
                edge_width: 1.5,
                font_size: 7.0,
                label_limit: 40,
                title: "Link Hierarchy - Shell Layout",
            },
        }
    }
}

/// Maps layout coordinates onto the canvas, y axis pointing up.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    scale: f64,
    center: Point,
    canvas_center: Point,
}

impl Viewport {
    fn fit(layout: &Layout, style: &FigureStyle) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in layout.positions.values() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let drawable_w = style.width - 2.0 * PADDING;
        let drawable_h = style.height - 2.0 * PADDING - TITLE_HEIGHT;
        let canvas_center = Point::new(style.width / 2.0, TITLE_HEIGHT + PADDING + drawable_h / 2.0);

        if layout.is_empty() {
            return Viewport {
                scale: 1.0,
                center: Point::ORIGIN,
                canvas_center,
            };
        }

        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (drawable_w / span_x).min(drawable_h / span_y),
            (true, false) => drawable_w / span_x,
            (false, true) => drawable_h / span_y,
            (false, false) => 1.0,
        };

        Viewport {
            scale,
            center: Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
            canvas_center,
        }
    }

    fn project(&self, p: Point) -> Point {
        Point::new(
            self.canvas_center.x + (p.x - self.center.x) * self.scale,
            self.canvas_center.y - (p.y - self.center.y) * self.scale,
        )
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders `graph` at the positions of `layout`. Nodes without a position
/// are not drawn, nor are edges touching them.
pub fn render_svg(graph: &LinkGraph, layout: &Layout, colors: &NodeColors) -> String {
    let style = FigureStyle::for_strategy(layout.strategy);
    let viewport = Viewport::fit(layout, &style);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = style.width,
        h = style.height
    ));
    svg.push_str(&format!(
        "  <defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker></defs>\n",
        EDGE_COLOR
    ));
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\" font-weight=\"bold\">{}</text>\n",
        style.width / 2.0,
        TITLE_HEIGHT * 0.7,
        escape_xml(style.title)
    ));

    if graph.is_empty() {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\" fill=\"#666666\">No nodes to visualize</text>\n",
            style.width / 2.0,
            style.height / 2.0
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    svg.push_str(&format!(
        "  <g class=\"edges\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\">\n",
        EDGE_COLOR, style.edge_width, style.edge_opacity
    ));
    for (parent, child) in graph.edges() {
        let (Some(from), Some(to)) = (layout.position(parent), layout.position(child)) else {
            continue;
        };
        let from = viewport.project(from);
        let to = viewport.project(to);
        let to = pull_back(from, to, style.node_radius);
        svg.push_str(&format!(
            "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" marker-end=\"url(#arrow)\"/>\n",
            from.x, from.y, to.x, to.y
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("  <g class=\"nodes\" fill-opacity=\"0.9\">\n");
    for node in graph.nodes() {
        let Some(p) = layout.position(node.id) else {
            continue;
        };
        let p = viewport.project(p);
        let fill = colors.get(&node.id).copied().unwrap_or(UNCATEGORIZED);
        svg.push_str(&format!(
            "    <circle data-id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"><title>{}</title></circle>\n",
            node.id,
            p.x,
            p.y,
            style.node_radius,
            fill.hex(),
            escape_xml(&node.url)
        ));
    }
    svg.push_str("  </g>\n");

    if graph.node_count() < style.label_limit {
        svg.push_str(&format!(
            "  <g class=\"labels\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"middle\">\n",
            style.font_size
        ));
        for node in graph.nodes() {
            let Some(p) = layout.position(node.id) else {
                continue;
            };
            let p = viewport.project(p);
            svg.push_str(&format!(
                "    <text x=\"{:.2}\" y=\"{:.2}\">{}</text>\n",
                p.x,
                p.y + style.node_radius + style.font_size,
                escape_xml(&node.label)
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Moves `to` back towards `from` so an arrowhead ends at the node rim.
fn pull_back(from: Point, to: Point, radius: f64) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    if length <= 2.0 * radius {
        return to;
    }
    Point::new(to.x - dx / length * radius, to.y - dy / length * radius)
}
