use super::{apply_highlights, highlight_count, literal_pattern, normalize, remove_highlights};
use crate::section::Inline;
use proptest::prelude::*;

fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

fn mark(s: &str) -> Inline {
    Inline::Highlight(s.to_string())
}

#[test]
fn test_blank_query_has_no_pattern() {
    assert!(literal_pattern("").is_none());
    assert!(literal_pattern("   ").is_none());
}

#[test]
fn test_apply_is_case_insensitive() {
    let pattern = literal_pattern("xim").unwrap();
    let mut run = vec![text("欢迎来到 XIM 工作室, xim!")];
    assert_eq!(apply_highlights(&mut run, &pattern), 2);
    assert_eq!(
        run,
        vec![text("欢迎来到 "), mark("XIM"), text(" 工作室, "), mark("xim"), text("!")]
    );
}

#[test]
fn test_pattern_characters_are_literal() {
    let pattern = literal_pattern("a.b*(c)").unwrap();
    let mut run = vec![text("aXbbb(c) a.b*(c)")];
    assert_eq!(apply_highlights(&mut run, &pattern), 1);
    assert_eq!(run, vec![text("aXbbb(c) "), mark("a.b*(c)")]);

    let pattern = literal_pattern(r"[^$]\").unwrap();
    let mut run = vec![text(r"x[^$]\y")];
    assert_eq!(apply_highlights(&mut run, &pattern), 1);
}

#[test]
fn test_remove_restores_original_run() {
    let pattern = literal_pattern("na").unwrap();
    let original = vec![text("banana bandana")];
    let mut run = original.clone();
    apply_highlights(&mut run, &pattern);
    assert_eq!(highlight_count(&run), 3);

    assert_eq!(remove_highlights(&mut run), 3);
    assert_eq!(run, original);
}

#[test]
fn test_whole_node_match() {
    let pattern = literal_pattern("Intro").unwrap();
    let mut run = vec![text("intro")];
    apply_highlights(&mut run, &pattern);
    assert_eq!(run, vec![mark("intro")]);
    remove_highlights(&mut run);
    assert_eq!(run, vec![text("intro")]);
}

#[test]
fn test_normalize_merges_and_drops_empty() {
    let mut run = vec![text("a"), text(""), text("b"), mark("c"), text("d"), text("e")];
    normalize(&mut run);
    assert_eq!(run, vec![text("ab"), mark("c"), text("de")]);
}

proptest! {
    #[test]
    fn prop_highlight_round_trip(body in "[a-zA-Z .*+?()欢迎]{1,40}", query in "[a-zA-Z .*?(]{1,4}") {
        let Some(pattern) = literal_pattern(&query) else { return Ok(()); };
        let original = vec![Inline::Text(body.clone())];
        let mut run = original.clone();
        apply_highlights(&mut run, &pattern);

        let joined: String = run.iter().map(Inline::text).collect();
        prop_assert_eq!(&joined, &body);

        remove_highlights(&mut run);
        prop_assert_eq!(run, original);
    }
}
