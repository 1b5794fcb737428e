use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the crawler's `link` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: i64,
    pub url: String,
    /// 0 marks a root link
    pub parent_id: i64,
    /// As recorded by the crawler, never recomputed from the tree
    pub depth: u32,
    pub category_id: Option<i64>,
}

impl LinkRecord {
    pub fn new(id: i64, url: impl Into<String>, parent_id: i64, depth: u32) -> Self {
        Self {
            id,
            url: url.into(),
            parent_id,
            depth,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id <= 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Case-sensitive substring matched against link URLs
    pub keyword: String,
}

impl Category {
    pub fn new(id: i64, keyword: impl Into<String>) -> Self {
        Self {
            id,
            keyword: keyword.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: i64,
    pub url: String,
    pub depth: u32,
    pub label: String,
    pub parent_id: i64,
    pub category_id: Option<i64>,
}

impl GraphNode {
    pub fn is_root(&self) -> bool {
        self.parent_id <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node id -> depth, as handed to the layout engine.
pub type DepthMap = BTreeMap<i64, u32>;
