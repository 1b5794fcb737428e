// Node placement strategies

use crate::category::category_rank;
use crate::graph::LinkGraph;
use crate::model::{Category, DepthMap, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Seed for the force-directed initial placement. Reseeded on every call.
pub const LAYOUT_SEED: u64 = 42;

/// Optimal edge length of the force-directed layout.
const SPRING_K: f64 = 2.0;
const SPRING_ITERATIONS: usize = 50;
/// Mean per-node movement below which relaxation stops early.
const SPRING_THRESHOLD: f64 = 1e-4;
const MIN_DISTANCE: f64 = 0.01;

/// Circular layout: ring radius grows by this much per depth level.
const CIRCLE_RADIUS_STEP: f64 = 2.0;

/// Scalar handed to the colormap when every node has the same depth.
pub const UNIFORM_SCALAR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutStrategy {
    ForceDirected,
    Circular,
    Shell,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 3] = [
        LayoutStrategy::ForceDirected,
        LayoutStrategy::Circular,
        LayoutStrategy::Shell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStrategy::ForceDirected => "tree",
            LayoutStrategy::Circular => "circular",
            LayoutStrategy::Shell => "shell",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tree" | "force" | "spring" => Some(LayoutStrategy::ForceDirected),
            "circular" => Some(LayoutStrategy::Circular),
            "shell" => Some(LayoutStrategy::Shell),
            _ => None,
        }
    }

    /// Expands a `--layout` choice, `all` meaning every strategy.
    pub fn parse_selection(s: &str) -> Option<Vec<Self>> {
        if s.eq_ignore_ascii_case("all") {
            return Some(Self::ALL.to_vec());
        }
        Self::from_str(s).map(|strategy| vec![strategy])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutOutcome {
    Computed,
    /// The strategy could not produce coordinates and the ring fallback was used
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub strategy: LayoutStrategy,
    pub positions: BTreeMap<i64, Point>,
    pub outcome: LayoutOutcome,
}

impl Layout {
    fn computed(strategy: LayoutStrategy, positions: BTreeMap<i64, Point>) -> Self {
        Self {
            strategy,
            positions,
            outcome: LayoutOutcome::Computed,
        }
    }

    pub fn position(&self, id: i64) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn used_fallback(&self) -> bool {
        self.outcome == LayoutOutcome::Fallback
    }
}

/// Computes positions for every node of `graph`. Depths missing from
/// `depths` default to the node's own depth.
pub fn layout(graph: &LinkGraph, depths: &DepthMap, strategy: LayoutStrategy) -> Layout {
    let layout = match strategy {
        LayoutStrategy::ForceDirected => force_directed(graph),
        LayoutStrategy::Circular => Layout::computed(strategy, circular_by_depth(graph, depths)),
        LayoutStrategy::Shell => Layout::computed(strategy, shell_by_depth(graph, depths)),
    };
    debug!(
        "{} layout placed {} nodes ({:?})",
        strategy.as_str(),
        layout.len(),
        layout.outcome
    );
    layout
}

pub fn force_directed(graph: &LinkGraph) -> Layout {
    let ids: Vec<i64> = graph.nodes().map(|n| n.id).collect();
    let points = fruchterman_reingold(ids.len(), &graph.edge_positions());
    place_relaxed(ids, points)
}

/// Pairs ids with relaxed points, or falls back to [`ring_layout`] when any
/// point is not finite.
fn place_relaxed(ids: Vec<i64>, points: Vec<Point>) -> Layout {
    if points.len() == ids.len() && points.iter().all(Point::is_finite) {
        return Layout::computed(
            LayoutStrategy::ForceDirected,
            ids.into_iter().zip(points).collect(),
        );
    }

    warn!("Force-directed relaxation diverged, falling back to a ring layout");
    Layout {
        strategy: LayoutStrategy::ForceDirected,
        positions: ring_layout(&ids),
        outcome: LayoutOutcome::Fallback,
    }
}

/// Fruchterman-Reingold relaxation with linear cooling. Edges attract in
/// both directions. Output is not checked for finiteness.
fn fruchterman_reingold(n: usize, edges: &[(usize, usize)]) -> Vec<Point> {
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::ORIGIN],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(LAYOUT_SEED);
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let linked: HashSet<(usize, usize)> = edges
        .iter()
        .filter(|(a, b)| a != b)
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();

    let mut temperature = extent(&pos) * 0.1;
    let cooling = temperature / (SPRING_ITERATIONS as f64 + 1.0);

    for _ in 0..SPRING_ITERATIONS {
        let mut displacement = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let distance = dx.hypot(dy).max(MIN_DISTANCE);

                let attraction = if linked.contains(&(i, j)) {
                    distance / SPRING_K
                } else {
                    0.0
                };
                let force = SPRING_K * SPRING_K / (distance * distance) - attraction;

                displacement[i].0 += dx * force;
                displacement[i].1 += dy * force;
                displacement[j].0 -= dx * force;
                displacement[j].1 -= dy * force;
            }
        }

        let mut moved = 0.0;
        for (p, (dx, dy)) in pos.iter_mut().zip(&displacement) {
            let length = dx.hypot(*dy);
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            let step_x = dx * temperature / length;
            let step_y = dy * temperature / length;
            p.0 += step_x;
            p.1 += step_y;
            moved += step_x.hypot(step_y);
        }

        temperature -= cooling;
        if moved / (n as f64) < SPRING_THRESHOLD {
            break;
        }
    }

    rescale(&pos)
}

fn extent(pos: &[(f64, f64)]) -> f64 {
    span(pos.iter().map(|p| p.0)).max(span(pos.iter().map(|p| p.1)))
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    hi - lo
}

/// Centers on the origin and scales so the largest coordinate magnitude is 1.
fn rescale(pos: &[(f64, f64)]) -> Vec<Point> {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.1).sum::<f64>() / n;

    let centered: Vec<Point> = pos
        .iter()
        .map(|p| Point::new(p.0 - mean_x, p.1 - mean_y))
        .collect();

    let limit = centered
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);

    if limit > 0.0 {
        centered
            .into_iter()
            .map(|p| Point::new(p.x / limit, p.y / limit))
            .collect()
    } else {
        centered
    }
}

/// All nodes on the unit circle, evenly spaced in insertion order.
pub fn ring_layout(ids: &[i64]) -> BTreeMap<i64, Point> {
    let n = ids.len() as f64;
    ids.iter()
        .enumerate()
        .map(|(i, &id)| (id, Point::polar(1.0, 2.0 * PI * i as f64 / n)))
        .collect()
}

/// Depth levels in order of first appearance, members in insertion order.
fn depth_groups(graph: &LinkGraph, depths: &DepthMap) -> Vec<(u32, Vec<i64>)> {
    let mut groups: Vec<(u32, Vec<i64>)> = Vec::new();
    for node in graph.nodes() {
        let depth = depths.get(&node.id).copied().unwrap_or(node.depth);
        match groups.iter_mut().find(|(d, _)| *d == depth) {
            Some((_, members)) => members.push(node.id),
            None => groups.push((depth, vec![node.id])),
        }
    }
    groups
}

/// Places each depth level `d` on a circle of radius `(d + 1) * 2`, its `k`
/// members at angles `2πi/k`.
pub fn circular_by_depth(graph: &LinkGraph, depths: &DepthMap) -> BTreeMap<i64, Point> {
    let mut positions = BTreeMap::new();
    for (depth, members) in depth_groups(graph, depths) {
        let radius = (depth as f64 + 1.0) * CIRCLE_RADIUS_STEP;
        let angle_step = 2.0 * PI / members.len() as f64;
        for (i, id) in members.into_iter().enumerate() {
            positions.insert(id, Point::polar(radius, i as f64 * angle_step));
        }
    }
    positions
}

/// Concentric shells sorted by depth, unit outer radius.
///
/// With `n` shells the radius grows by `1/n` per shell. A single-node
/// innermost shell sits at the origin. Shell `s` starts at angle
/// `(s + 1) * π / n`.
pub fn shell_by_depth(graph: &LinkGraph, depths: &DepthMap) -> BTreeMap<i64, Point> {
    let mut shells = depth_groups(graph, depths);
    shells.sort_by_key(|(depth, _)| *depth);

    let mut positions = BTreeMap::new();
    let Some((_, innermost)) = shells.first() else {
        return positions;
    };

    let radius_step = 1.0 / shells.len() as f64;
    let rotation = PI / shells.len() as f64;
    let mut radius = if innermost.len() == 1 { 0.0 } else { radius_step };
    let mut first_theta = rotation;

    for (_, members) in shells {
        let count = members.len() as f64;
        for (i, id) in members.into_iter().enumerate() {
            let theta = 2.0 * PI * i as f64 / count + first_theta;
            positions.insert(id, Point::polar(radius, theta));
        }
        radius += radius_step;
        first_theta += rotation;
    }
    positions
}

/// `depth / max_depth` per node, or [`UNIFORM_SCALAR`] when the graph is flat.
pub fn depth_scalars(graph: &LinkGraph) -> BTreeMap<i64, f64> {
    let max_depth = graph.max_depth();
    graph
        .nodes()
        .map(|n| {
            let scalar = if max_depth == 0 {
                UNIFORM_SCALAR
            } else {
                n.depth as f64 / max_depth as f64
            };
            (n.id, scalar)
        })
        .collect()
}

/// Category rank scaled to `[0,1]` by table position. Uncategorized nodes
/// (or ids missing from the table) map to `None`.
pub fn category_scalars(graph: &LinkGraph, categories: &[Category]) -> BTreeMap<i64, Option<f64>> {
    let last = categories.len().saturating_sub(1);
    graph
        .nodes()
        .map(|n| {
            let scalar = n
                .category_id
                .and_then(|id| category_rank(id, categories))
                .map(|rank| {
                    if last == 0 {
                        UNIFORM_SCALAR
                    } else {
                        rank as f64 / last as f64
                    }
                });
            (n.id, scalar)
        })
        .collect()
}
