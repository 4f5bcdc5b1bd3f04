use super::{clear_highlights, window, SearchIndex, SearchOutcome};
use crate::highlight::highlight_count;
use crate::section::{Block, BlockKind, Section};

fn page() -> Vec<Section> {
    vec![
        Section::new("welcome", "Welcome", 2).with_block(Block::new(
            BlockKind::Paragraph,
            "在这个充满想象力的时代，我们是一家专注于创意设计与数字体验的团队，欢迎来到 XIM 工作室，这里汇集了来自不同领域的设计师与开发者们，一起创造令人惊叹的作品与体验。",
        )),
        Section::new("install", "Install", 2)
            .with_block(Block::new(BlockKind::Code, "cargo install docspy"))
            .with_block(Block::new(BlockKind::Paragraph, "Install with cargo.")),
        Section::new("xim-api", "XIM API", 2)
            .with_block(Block::new(BlockKind::ListItem, "Nothing about it here")),
    ]
}

fn total_highlights(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|s| {
            highlight_count(&s.heading)
                + s.blocks.iter().map(|b| highlight_count(&b.inlines)).sum::<usize>()
        })
        .sum()
}

#[test]
fn test_snippet_has_ellipses_on_both_sides() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("XIM", &mut sections) else {
        panic!("expected matches");
    };
    assert_eq!(results[0].id, "welcome");
    let snippet = &results[0].snippet;
    assert!(snippet.starts_with("..."), "{snippet}");
    assert!(snippet.ends_with("..."), "{snippet}");
    assert!(snippet.contains("XIM"), "{snippet}");
}

#[test]
fn test_results_follow_document_order() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("xim", &mut sections) else {
        panic!("expected matches");
    };
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["welcome", "xim-api"]);
}

#[test]
fn test_heading_only_match_falls_back_to_title() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("api", &mut sections) else {
        panic!("expected matches");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "XIM API");
}

#[test]
fn test_code_match_uses_paragraph_snippet() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("cargo", &mut sections) else {
        panic!("expected matches");
    };
    assert_eq!(results[0].snippet, "Install with cargo.");
}

#[test]
fn test_no_results_is_explicit() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);
    assert_eq!(
        index.search("  zebra ", &mut sections),
        SearchOutcome::NoResults {
            query: "zebra".to_string()
        }
    );
}

#[test]
fn test_blank_query_clears_highlights() {
    let mut sections = page();
    let original = sections.clone();
    let index = SearchIndex::build(&sections);

    index.search("install", &mut sections);
    assert!(total_highlights(&sections) > 0);

    assert_eq!(index.search("   ", &mut sections), SearchOutcome::Cleared);
    assert_eq!(total_highlights(&sections), 0);
    assert_eq!(sections, original);
}

#[test]
fn test_search_is_idempotent() {
    let mut once = page();
    let index = SearchIndex::build(&once);
    let first = index.search("in", &mut once);

    let mut twice = page();
    index.search("in", &mut twice);
    let second = index.search("in", &mut twice);

    assert_eq!(first, second);
    assert_eq!(once, twice);
}

#[test]
fn test_new_search_replaces_previous_highlights() {
    let mut sections = page();
    let index = SearchIndex::build(&sections);
    index.search("cargo", &mut sections);
    index.search("welcome", &mut sections);

    assert_eq!(total_highlights(&sections), 1);
    assert_eq!(clear_highlights(&mut sections), 1);
}

#[test]
fn test_special_characters_match_literally() {
    let mut sections = vec![Section::new("regex", "Regex", 2)
        .with_block(Block::new(BlockKind::Paragraph, "Use a.b or (x|y) literally"))];
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("(x|y)", &mut sections) else {
        panic!("expected a literal match");
    };
    assert_eq!(results[0].snippet, "Use a.b or (x|y) literally");
    assert!(matches!(
        index.search("a.c", &mut sections),
        SearchOutcome::NoResults { .. }
    ));
}

#[test]
fn test_window_at_text_boundaries() {
    assert_eq!(window("short XIM text", 6, 9), "short XIM text");
    let long = format!("{}XIM", "a".repeat(40));
    assert_eq!(window(&long, 40, 43), format!("...{}XIM", "a".repeat(30)));
}

#[test]
fn test_matching_agrees_with_highlighting() {
    // Final capital sigma lowercases to the final form, which the query lacks.
    let mut sections = vec![Section::new("greek", "Greek", 2)
        .with_block(Block::new(BlockKind::Paragraph, "ΟΔΟΣ"))];
    let index = SearchIndex::build(&sections);

    let SearchOutcome::Found { results, .. } = index.search("οδοσ", &mut sections) else {
        panic!("expected the highlighted section to be reported");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].snippet, "ΟΔΟΣ");
    assert_eq!(total_highlights(&sections), 1);
}
