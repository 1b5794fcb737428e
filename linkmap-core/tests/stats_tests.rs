// Tests for graph statistics

use linkmap_core::{LinkRecord, build, summarize};
use std::collections::BTreeMap;

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summarize_three_level_chain() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/about", 1, 1),
        LinkRecord::new(3, "https://example.com/about/team", 2, 2),
    ];
    let stats = summarize(&build(&rows, None));

    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 2);
    assert_eq!(stats.max_depth, 2);
    assert_eq!(
        stats.depth_histogram,
        BTreeMap::from([(0, 1), (1, 1), (2, 1)])
    );
    assert_eq!(stats.max_out_degree, 1);
    assert_eq!(stats.orphan_count, 0);
    assert_eq!(stats.depth_mismatches, 0);
}

#[test]
fn test_summarize_empty_graph() {
    let stats = summarize(&build(&[], None));

    assert_eq!(stats.node_count, 0);
    assert_eq!(stats.edge_count, 0);
    assert_eq!(stats.max_depth, 0);
    assert!(stats.depth_histogram.is_empty());
    assert_eq!(stats.max_out_degree, 0);
}

#[test]
fn test_summarize_respects_max_depth() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/about", 1, 1),
        LinkRecord::new(3, "https://example.com/about/team", 2, 2),
    ];
    let stats = summarize(&build(&rows, Some(1)));

    assert_eq!(stats.node_count, 2);
    assert_eq!(stats.edge_count, 1);
    assert_eq!(stats.max_depth, 1);
}

#[test]
fn test_max_out_degree_counts_children() {
    let mut rows = vec![LinkRecord::new(1, "https://example.com/blog", 0, 0)];
    for i in 2..=6 {
        rows.push(LinkRecord::new(
            i,
            format!("https://example.com/blog/post{}", i),
            1,
            1,
        ));
    }
    let stats = summarize(&build(&rows, None));

    assert_eq!(stats.max_out_degree, 5);
    assert_eq!(stats.depth_histogram.get(&1), Some(&5));
}

#[test]
fn test_orphans_counted() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/lost", 40, 1),
        LinkRecord::new(3, "https://example.com/gone", 41, 1),
    ];
    let stats = summarize(&build(&rows, None));
    assert_eq!(stats.orphan_count, 2);
    assert_eq!(stats.edge_count, 0);
}

#[test]
fn test_depth_mismatches_reported_not_corrected() {
    let rows = vec![
        LinkRecord::new(1, "https://example.com/", 0, 0),
        LinkRecord::new(2, "https://example.com/skip", 1, 3),
    ];
    let stats = summarize(&build(&rows, None));

    assert_eq!(stats.edge_count, 1);
    assert_eq!(stats.depth_mismatches, 1);
    assert_eq!(stats.max_depth, 3);
}
