// Keyword based link categorization

use crate::graph::LinkGraph;
use crate::model::Category;
use tracing::{debug, info};

/// Resolves a category for a URL by case-sensitive substring match.
///
/// The first category in table order whose keyword occurs in the URL wins,
/// even when later keywords also match. It is not a "best match". An empty
/// keyword is a substring of every URL and so matches everything.
pub struct CategoryMatcher<'a> {
    categories: &'a [Category],
}

impl<'a> CategoryMatcher<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self { categories }
    }

    pub fn resolve(&self, url: &str) -> Option<&'a Category> {
        self.categories
            .iter()
            .find(|c| url.contains(c.keyword.as_str()))
    }

    /// Overwrites every node's `category_id` with its first match (or
    /// `None`). Returns how many nodes ended up categorized.
    pub fn assign(&self, graph: &mut LinkGraph) -> usize {
        let mut assigned = 0;
        for node in graph.nodes_mut() {
            let matched = self.resolve(&node.url);
            if let Some(category) = matched {
                debug!("Link {} -> category {} ({})", node.id, category.id, category.keyword);
                assigned += 1;
            }
            node.category_id = matched.map(|c| c.id);
        }

        info!(
            "Categorized {} of {} links against {} keywords",
            assigned,
            graph.node_count(),
            self.categories.len()
        );
        assigned
    }
}

pub fn assign_categories(graph: &mut LinkGraph, categories: &[Category]) -> usize {
    CategoryMatcher::new(categories).assign(graph)
}

/// Position of a category in table order.
pub fn category_rank(category_id: i64, categories: &[Category]) -> Option<usize> {
    categories.iter().position(|c| c.id == category_id)
}
