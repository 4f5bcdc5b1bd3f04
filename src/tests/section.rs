use super::{dedupe_ids, link_hierarchy, slugify, Block, BlockKind, Inline, Section};

#[test]
fn test_slugify_collapses_separators() {
    assert_eq!(slugify("Getting Started"), "getting-started");
    assert_eq!(slugify("  API -- Reference! "), "api-reference");
    assert_eq!(slugify("欢迎来到 XIM 工作室"), "欢迎来到-xim-工作室");
    assert_eq!(slugify("???"), "section");
}

#[test]
fn test_dedupe_ids_suffixes_repeats() {
    let mut sections = vec![
        Section::new("usage", "Usage", 2),
        Section::new("usage", "Usage", 2),
        Section::new("usage", "Usage", 2),
    ];
    dedupe_ids(&mut sections);
    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["usage", "usage-1", "usage-2"]);
}

#[test]
fn test_link_hierarchy_follows_levels() {
    let mut sections = vec![
        Section::new("a", "A", 1),
        Section::new("b", "B", 2),
        Section::new("c", "C", 3),
        Section::new("d", "D", 2),
        Section::new("e", "E", 1),
    ];
    link_hierarchy(&mut sections);

    assert_eq!(sections[0].children_indices, vec![1, 3]);
    assert_eq!(sections[1].children_indices, vec![2]);
    assert_eq!(sections[2].parent_index, Some(1));
    assert_eq!(sections[3].parent_index, Some(0));
    assert_eq!(sections[4].parent_index, None);
}

#[test]
fn test_text_content_joins_heading_and_blocks() {
    let section = Section::new("intro", "Intro", 2)
        .with_block(Block::new(BlockKind::Paragraph, "First."))
        .with_block(Block::new(BlockKind::Code, "let x = 1;"));
    assert_eq!(section.text_content(), "Intro\nFirst.\nlet x = 1;");
}

#[test]
fn test_inline_runs_include_heading() {
    let mut section =
        Section::new("intro", "Intro", 2).with_block(Block::new(BlockKind::Paragraph, "Body"));
    let runs: Vec<Vec<Inline>> = section.inline_runs_mut().map(|r| r.clone()).collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], vec![Inline::Text("Intro".to_string())]);
}
