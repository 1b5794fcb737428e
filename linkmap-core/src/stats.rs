use crate::graph::LinkGraph;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub node_count: usize,
    pub edge_count: usize,
    pub max_depth: u32,
    pub depth_histogram: BTreeMap<u32, usize>,
    pub max_out_degree: usize,
    /// Non-root nodes without an inbound edge
    pub orphan_count: usize,
    /// Edges whose child depth is not the parent depth plus one
    pub depth_mismatches: usize,
}

pub fn summarize(graph: &LinkGraph) -> Stats {
    let mut depth_histogram = BTreeMap::new();
    for node in graph.nodes() {
        *depth_histogram.entry(node.depth).or_insert(0) += 1;
    }

    let max_out_degree = graph
        .nodes()
        .map(|n| graph.out_degree(n.id))
        .max()
        .unwrap_or(0);

    let depth_mismatches = graph
        .edges()
        .filter(|&(parent, child)| match (graph.node(parent), graph.node(child)) {
            (Some(p), Some(c)) => c.depth != p.depth + 1,
            _ => false,
        })
        .count();
    if depth_mismatches > 0 {
        debug!("{} edges with inconsistent recorded depth", depth_mismatches);
    }

    Stats {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        max_depth: graph.max_depth(),
        depth_histogram,
        max_out_degree,
        orphan_count: graph.orphans().len(),
        depth_mismatches,
    }
}
