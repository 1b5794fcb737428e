// Link graph construction from parent-pointer rows

use crate::model::{DepthMap, GraphNode, LinkRecord};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use url::Url;

/// Paths longer than this are cut when labels are shortened.
const MAX_LABEL_PATH: usize = 40;
const LABEL_PATH_KEEP: usize = 37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// `[user@]host[:port]` plus a truncated path
    #[default]
    Short,
    /// The raw URL
    Full,
}

/// Directed parent -> child graph of links.
///
/// Nodes keep row order. Nothing is ever removed, so a node's
/// `NodeIndex` doubles as its insertion position.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<i64, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: i64) -> Option<&GraphNode> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion (row) order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_weights()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GraphNode> + '_ {
        self.graph.node_weights_mut()
    }

    /// `(parent_id, child_id)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()].id, self.graph[e.target()].id))
    }

    pub fn has_edge(&self, parent_id: i64, child_id: i64) -> bool {
        match (self.index.get(&parent_id), self.index.get(&child_id)) {
            (Some(&parent), Some(&child)) => self.graph.contains_edge(parent, child),
            _ => false,
        }
    }

    /// Edges as pairs of insertion positions.
    pub(crate) fn edge_positions(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    pub fn out_degree(&self, id: i64) -> usize {
        self.index
            .get(&id)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    pub fn in_degree(&self, id: i64) -> usize {
        self.index
            .get(&id)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    /// Non-root nodes whose parent was not present when they were inserted.
    pub fn orphans(&self) -> Vec<i64> {
        self.nodes()
            .filter(|n| !n.is_root() && self.in_degree(n.id) == 0)
            .map(|n| n.id)
            .collect()
    }

    pub fn depths(&self) -> DepthMap {
        self.nodes().map(|n| (n.id, n.depth)).collect()
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes().map(|n| n.depth).max().unwrap_or(0)
    }
}

/// Builds a [`LinkGraph`] from link rows.
///
/// Rows must arrive ordered by depth (ties by id). An edge is only created
/// when the parent row was inserted before the child, so a child whose
/// parent comes later, or was cut by the depth ceiling, stays an orphan.
/// A row naming itself as parent is kept as a node but gets no self-loop,
/// even though its parent is present by then, so the graph stays a DAG.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    max_depth: Option<u32>,
    label_style: LabelStyle,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    pub fn build(&self, rows: &[LinkRecord]) -> LinkGraph {
        let mut graph = LinkGraph::new();
        let mut filtered = 0usize;

        // Phase 1: nodes
        for row in rows {
            if let Some(max_depth) = self.max_depth
                && row.depth > max_depth
            {
                filtered += 1;
                continue;
            }

            if graph.contains(row.id) {
                warn!(
                    "Duplicate link id {} ({}), keeping the first occurrence",
                    row.id, row.url
                );
                continue;
            }

            let node = GraphNode {
                id: row.id,
                url: row.url.clone(),
                depth: row.depth,
                label: make_label(&row.url, self.label_style),
                parent_id: row.parent_id,
                category_id: row.category_id,
            };
            let idx = graph.graph.add_node(node);
            graph.index.insert(row.id, idx);
        }

        // Phase 2: edges against the now fixed node set
        let links: Vec<(NodeIndex, i64)> = graph
            .graph
            .node_indices()
            .map(|idx| (idx, graph.graph[idx].parent_id))
            .filter(|&(_, parent_id)| parent_id > 0)
            .collect();

        for (child, parent_id) in links {
            match graph.index.get(&parent_id) {
                Some(&parent) if parent < child => {
                    graph.graph.add_edge(parent, child, ());
                }
                _ => debug!(
                    "Link {} has no preceding parent {}, keeping it as an orphan",
                    graph.graph[child].id, parent_id
                ),
            }
        }

        info!(
            "Built link graph: {} nodes, {} edges ({} rows above max depth)",
            graph.node_count(),
            graph.edge_count(),
            filtered
        );
        graph
    }
}

/// Builds a graph with shortened labels.
pub fn build(rows: &[LinkRecord], max_depth: Option<u32>) -> LinkGraph {
    GraphBuilder::new().with_max_depth(max_depth).build(rows)
}

pub fn make_label(url: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Full => url.to_string(),
        LabelStyle::Short => shorten_label(url),
    }
}

/// The URL's authority (`[user@]host[:port]`, as written) followed by its
/// path, the path cut to 37 characters plus `...` when longer than 40.
/// Unparseable URLs are returned as-is.
pub fn shorten_label(url: &str) -> String {
    if Url::parse(url).is_err() {
        return url.to_string();
    }

    let (authority, path) = authority_and_path(url);
    let path = if path.is_empty() { "/" } else { path };

    if path.chars().count() > MAX_LABEL_PATH {
        let kept: String = path.chars().take(LABEL_PATH_KEEP).collect();
        format!("{}{}...", authority, kept)
    } else {
        format!("{}{}", authority, path)
    }
}

/// Splits a URL that already parsed into its raw authority and path. Neither
/// part is normalized or percent-encoded, so counting uses the text as stored.
fn authority_and_path(url: &str) -> (&str, &str) {
    let rest = url.split_once(':').map_or(url, |(_, rest)| rest);
    let (authority, rest) = match rest.strip_prefix("//") {
        Some(after) => after.split_at(after.find(['/', '?', '#']).unwrap_or(after.len())),
        None => ("", rest),
    };
    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    (authority, &rest[..path_end])
}
