// Tests for keyword categorization

use linkmap_core::category::category_rank;
use linkmap_core::{Category, CategoryMatcher, LinkRecord, assign_categories, build};

fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "about"),
        Category::new(2, "example"),
        Category::new(3, "blog"),
    ]
}

// ============================================================================
// Matching Tests
// ============================================================================

#[test]
fn test_first_match_wins_by_table_order() {
    let table = vec![Category::new(1, "about"), Category::new(2, "example")];
    let matcher = CategoryMatcher::new(&table);

    let matched = matcher.resolve("https://example.com/about").unwrap();
    assert_eq!(matched.id, 1);
}

#[test]
fn test_table_order_not_match_quality_decides() {
    // Reversed table: the longer, more specific keyword now loses
    let table = vec![Category::new(2, "example"), Category::new(1, "about")];
    let matcher = CategoryMatcher::new(&table);

    assert_eq!(matcher.resolve("https://example.com/about").unwrap().id, 2);
}

#[test]
fn test_matching_is_case_sensitive() {
    let table = vec![Category::new(2, "About")];
    let matcher = CategoryMatcher::new(&table);

    assert!(matcher.resolve("https://example.com/about").is_none());
    assert!(matcher.resolve("https://example.com/About").is_some());
}

#[test]
fn test_no_match_returns_none() {
    let table = categories();
    let matcher = CategoryMatcher::new(&table);
    assert!(matcher.resolve("https://rust-lang.org/learn").is_none());
}

#[test]
fn test_empty_keyword_matches_every_url() {
    let table = vec![Category::new(1, ""), Category::new(2, "about")];
    let matcher = CategoryMatcher::new(&table);
    assert_eq!(matcher.resolve("https://example.com/about").unwrap().id, 1);
    assert_eq!(matcher.resolve("https://rust-lang.org/").unwrap().id, 1);
}

#[test]
fn test_empty_keyword_after_real_match_loses() {
    let table = vec![Category::new(2, "about"), Category::new(1, "")];
    let matcher = CategoryMatcher::new(&table);
    assert_eq!(matcher.resolve("https://example.com/about").unwrap().id, 2);
    assert_eq!(matcher.resolve("https://example.com/blog").unwrap().id, 1);
}

// ============================================================================
// Graph Assignment Tests
// ============================================================================

#[test]
fn test_assign_categories_sets_node_fields() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/about", 1, 1),
        LinkRecord::new(3, "https://other.org/blog", 1, 1),
        LinkRecord::new(4, "https://other.org/shop", 1, 1),
    ];
    let mut graph = build(&rows, None);

    let assigned = assign_categories(&mut graph, &categories());

    assert_eq!(assigned, 3);
    assert_eq!(graph.node(1).unwrap().category_id, Some(2));
    assert_eq!(graph.node(2).unwrap().category_id, Some(1));
    assert_eq!(graph.node(3).unwrap().category_id, Some(3));
    assert_eq!(graph.node(4).unwrap().category_id, None);
}

#[test]
fn test_assign_overwrites_stored_category() {
    let rows = vec![LinkRecord::new(1, "https://other.org/shop", 0, 0).with_category(3)];
    let mut graph = build(&rows, None);

    assign_categories(&mut graph, &categories());
    assert_eq!(graph.node(1).unwrap().category_id, None);
}

#[test]
fn test_assign_keeps_structure() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/about", 1, 1),
    ];
    let mut graph = build(&rows, None);
    assign_categories(&mut graph, &categories());

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2)]);
}

#[test]
fn test_assign_with_empty_table() {
    let rows = vec![LinkRecord::new(1, "https://example.com/", 0, 0)];
    let mut graph = build(&rows, None);
    assert_eq!(assign_categories(&mut graph, &[]), 0);
    assert_eq!(graph.node(1).unwrap().category_id, None);
}

#[test]
fn test_category_rank() {
    let table = categories();
    assert_eq!(category_rank(1, &table), Some(0));
    assert_eq!(category_rank(3, &table), Some(2));
    assert_eq!(category_rank(42, &table), None);
}
