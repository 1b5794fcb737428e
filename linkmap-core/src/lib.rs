pub mod category;
pub mod data;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod report;
pub mod stats;

pub use category::{CategoryMatcher, assign_categories};
pub use data::LinkStore;
pub use error::{MapError, Result};
pub use graph::{GraphBuilder, LabelStyle, LinkGraph, build};
pub use layout::{Layout, LayoutOutcome, LayoutStrategy, layout};
pub use model::{Category, DepthMap, GraphNode, LinkRecord, Point};
pub use stats::{Stats, summarize};
