#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for path matching against the route table.

mod common;

use common::route_tree;
use shopatlas::router::match_segments;
use shopatlas::routes::{scan_routes, RouteDescriptor, RouteTable};
use std::path::PathBuf;
use tempfile::tempdir;

fn descriptor(pattern: &str) -> RouteDescriptor {
    let handler_key = pattern.trim_start_matches('/').to_string();
    RouteDescriptor {
        pattern: pattern.to_string(),
        file_path: PathBuf::from(format!("routes{pattern}.json")),
        handler_key,
        segments: pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    }
}

fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_discovered_routes_round_trip_to_their_own_file() {
    let dir = tempdir().unwrap();
    route_tree::write(
        dir.path(),
        &[
            "index.json",
            "search.json",
            "shops/index.json",
            "shops/[id].json",
            "shops/featured.json",
            "categories/[slug].json",
        ],
    );
    let table = scan_routes(dir.path());

    for route in table.iter() {
        // Substitute a concrete value for each parameter segment.
        let path: Vec<String> = route
            .segments
            .iter()
            .map(|seg| {
                if seg.starts_with(':') {
                    "42".to_string()
                } else {
                    seg.clone()
                }
            })
            .collect();

        let matched = match_segments(&table, &path)
            .unwrap_or_else(|| panic!("no match for own path of {}", route.pattern));
        assert_eq!(matched.route.file_path, route.file_path);
    }
}

#[test]
fn test_scenario_literal_beats_param_and_param_still_matches() {
    let dir = tempdir().unwrap();
    route_tree::write(
        dir.path(),
        &["shops/index.json", "shops/[id].json", "shops/featured.json"],
    );
    let table = scan_routes(dir.path());

    let featured = match_segments(&table, &segments(&["shops", "featured"])).unwrap();
    assert_eq!(featured.route.pattern, "/shops/featured");
    assert!(featured.params.is_empty());

    let by_id = match_segments(&table, &segments(&["shops", "42"])).unwrap();
    assert_eq!(by_id.route.pattern, "/shops/:id");
    assert_eq!(by_id.get_param("id"), Some("42"));
}

#[test]
fn test_param_capture_adds_no_other_keys() {
    let table = RouteTable::new(vec![descriptor("/shops/:id")]);
    let matched = match_segments(&table, &segments(&["shops", "42"])).unwrap();

    assert_eq!(matched.params.len(), 1);
    assert_eq!(matched.params[0].0.as_ref(), "id");
    assert_eq!(matched.params[0].1, "42");
}

#[test]
fn test_length_mismatch_is_a_hard_filter() {
    let table = RouteTable::new(vec![
        descriptor("/shops/:id"),
        descriptor("/shops"),
        descriptor("/shops/:id/extra"),
    ]);

    let one = match_segments(&table, &segments(&["shops"])).unwrap();
    assert_eq!(one.route.pattern, "/shops");

    assert!(match_segments(&table, &segments(&["shops", "1", "2", "3"])).is_none());
}

#[test]
fn test_literal_segments_are_case_sensitive() {
    let table = RouteTable::new(vec![descriptor("/shops/featured")]);
    assert!(match_segments(&table, &segments(&["Shops", "featured"])).is_none());
    assert!(match_segments(&table, &segments(&["shops", "Featured"])).is_none());
}

#[test]
fn test_unmatched_path_returns_none() {
    let table = RouteTable::new(vec![descriptor("/shops"), descriptor("/shops/:id")]);
    assert!(match_segments(&table, &segments(&["categories"])).is_none());
    assert!(match_segments(&table, &segments(&["shops", "1", "reviews"])).is_none());
}

#[test]
fn test_equal_length_ambiguity_resolved_by_table_order_alone() {
    // Both routes carry two literals; ':' sorts before 'c', so /a/:x/b is
    // first in the table and wins. There is no deeper per-segment
    // comparison.
    let table = RouteTable::new(vec![descriptor("/a/c/:y"), descriptor("/a/:x/b")]);
    let patterns: Vec<&str> = table.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["/a/:x/b", "/a/c/:y"]);

    let matched = match_segments(&table, &segments(&["a", "c", "b"])).unwrap();
    assert_eq!(matched.route.pattern, "/a/:x/b");
    assert_eq!(matched.get_param("x"), Some("c"));
}

#[test]
fn test_scan_continues_past_failed_candidate() {
    // /x/:a/z fails on its third segment; the scan moves on to /x/y/:b
    // instead of giving up.
    let table = RouteTable::new(vec![descriptor("/x/:a/z"), descriptor("/x/y/:b")]);
    let matched = match_segments(&table, &segments(&["x", "y", "q"])).unwrap();
    assert_eq!(matched.route.pattern, "/x/y/:b");
    assert_eq!(matched.get_param("b"), Some("q"));
}

#[test]
fn test_root_pattern_matches_empty_segments() {
    let dir = tempdir().unwrap();
    route_tree::write(dir.path(), &["index.json", "search.json"]);
    let table = scan_routes(dir.path());

    let matched = match_segments(&table, &[]).unwrap();
    assert_eq!(matched.route.pattern, "/");
    assert!(matched.params.is_empty());
}
