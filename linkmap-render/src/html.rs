// Interactive HTML page: the SVG figure plus the graph as JSON for hover details

use crate::error::Result;
use crate::palette::{NodeColors, Rgb, UNCATEGORIZED};
use crate::svg::{FigureStyle, escape_xml, render_svg};
use linkmap_core::{Layout, LinkGraph};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct NodeData<'a> {
    id: i64,
    url: &'a str,
    label: &'a str,
    depth: u32,
    category_id: Option<i64>,
    x: Option<f64>,
    y: Option<f64>,
    color: Rgb,
    color_value: Option<f64>,
    children: usize,
}

#[derive(Debug, Serialize)]
struct GraphData<'a> {
    strategy: &'static str,
    fallback_layout: bool,
    generated_at: String,
    nodes: Vec<NodeData<'a>>,
    edges: Vec<(i64, i64)>,
}

const DETAILS_SCRIPT: &str = r#"
(function () {
  const data = JSON.parse(document.getElementById('graph-data').textContent);
  const byId = new Map(data.nodes.map(n => [String(n.id), n]));
  const panel = document.getElementById('details');
  document.querySelectorAll('circle[data-id]').forEach(circle => {
    circle.addEventListener('mouseenter', () => {
      const node = byId.get(circle.dataset.id);
      if (!node) return;
      panel.textContent = `${node.url}  |  depth ${node.depth}  |  children ${node.children}` +
        (node.category_id === null ? '' : `  |  category ${node.category_id}`);
    });
    circle.addEventListener('mouseleave', () => { panel.textContent = ''; });
  });
})();
"#;

/// Standalone page for one layout. `scalars` are the colormap inputs shown
/// alongside each node.
pub fn render_html(
    graph: &LinkGraph,
    layout: &Layout,
    colors: &NodeColors,
    scalars: &BTreeMap<i64, Option<f64>>,
) -> Result<String> {
    let style = FigureStyle::for_strategy(layout.strategy);

    let data = GraphData {
        strategy: layout.strategy.as_str(),
        fallback_layout: layout.used_fallback(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        nodes: graph
            .nodes()
            .map(|n| {
                let position = layout.position(n.id);
                NodeData {
                    id: n.id,
                    url: &n.url,
                    label: &n.label,
                    depth: n.depth,
                    category_id: n.category_id,
                    x: position.map(|p| p.x),
                    y: position.map(|p| p.y),
                    color: colors.get(&n.id).copied().unwrap_or(UNCATEGORIZED),
                    color_value: scalars.get(&n.id).copied().flatten(),
                    children: graph.out_degree(n.id),
                }
            })
            .collect(),
        edges: graph.edges().collect(),
    };

    // `</` inside the JSON would otherwise close the script element early
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_xml(style.title)));
    html.push_str(
        "<style>\n  body { margin: 0; font-family: sans-serif; background: #fafafa; }\n  #details { position: fixed; bottom: 0; left: 0; right: 0; padding: 8px 12px; background: #222; color: #eee; font-size: 13px; min-height: 1.2em; }\n  circle:hover { stroke: #000; stroke-width: 2; }\n</style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&render_svg(graph, layout, colors));
    html.push_str("<div id=\"details\"></div>\n");
    html.push_str(&format!(
        "<script type=\"application/json\" id=\"graph-data\">{}</script>\n",
        json
    ));
    html.push_str(&format!("<script>{}</script>\n", DETAILS_SCRIPT));
    html.push_str("</body>\n</html>\n");

    Ok(html)
}
