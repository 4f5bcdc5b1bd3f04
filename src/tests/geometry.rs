use super::{wrap_inlines, CellMetrics, LineKind, PageLayout, Run, Viewport};
use crate::input::Document;
use crate::section::{Block, BlockKind, Inline, Section};

fn plain(rows: &[Vec<Run>]) -> Vec<String> {
    rows.iter()
        .map(|r| r.iter().map(|run| run.text.as_str()).collect())
        .collect()
}

#[test]
fn test_viewport_pixels_follow_font_size() {
    let viewport = Viewport::new(120, 40, CellMetrics::default());
    assert_eq!(viewport.width_px(), 1200);
    assert_eq!(viewport.height_px(), 800);
    assert!(!viewport.is_mobile());

    let zoomed = viewport.with_font(150);
    assert_eq!(zoomed.width_px(), 800);
    assert!(zoomed.is_mobile());
    assert_eq!(zoomed.px_to_cols(400), 60);
}

#[test]
fn test_breakpoint_is_inclusive_for_mobile() {
    let metrics = CellMetrics {
        width_px: 8,
        height_px: 16,
    };
    assert!(Viewport::new(128, 40, metrics).is_mobile());
    assert!(!Viewport::new(129, 40, metrics).is_mobile());
}

#[test]
fn test_wrap_breaks_at_spaces() {
    let rows = wrap_inlines(&[Inline::Text("the quick brown fox".to_string())], 10);
    assert_eq!(plain(&rows), ["the quick", "brown fox"]);
}

#[test]
fn test_wrap_splits_long_words_and_wide_chars() {
    let rows = wrap_inlines(&[Inline::Text("abcdefghij".to_string())], 4);
    assert_eq!(plain(&rows), ["abcd", "efgh", "ij"]);

    let rows = wrap_inlines(&[Inline::Text("欢迎来到工作室".to_string())], 6);
    assert_eq!(plain(&rows), ["欢迎来", "到工作", "室"]);
}

#[test]
fn test_wrap_keeps_highlights() {
    let rows = wrap_inlines(
        &[
            Inline::Text("find ".to_string()),
            Inline::Highlight("needle".to_string()),
            Inline::Text(" here".to_string()),
        ],
        8,
    );
    assert_eq!(plain(&rows), ["find", "needle", "here"]);
    assert!(rows[1][0].highlighted);
    assert!(!rows[0][0].highlighted);
}

#[test]
fn test_wrap_honours_newlines() {
    let rows = wrap_inlines(&[Inline::Text("a\nb".to_string())], 20);
    assert_eq!(plain(&rows), ["a", "b"]);
}

#[test]
fn test_layout_places_sections_after_preamble() {
    let doc = Document {
        preamble: vec![Block::new(BlockKind::Paragraph, "Intro")],
        sections: vec![
            Section::new("one", "One", 2).with_block(Block::new(BlockKind::Paragraph, "Body")),
            Section::new("two", "Two", 2),
        ],
    };
    let viewport = Viewport::new(100, 30, CellMetrics::default());
    let layout = PageLayout::build(&doc, 60, &viewport);

    // preamble: text + blank; section one: heading, blank, body, blank
    assert_eq!(layout.sections[0].top, 40);
    assert_eq!(layout.sections[0].height, 80);
    assert_eq!(layout.sections[1].top, 120);
    assert_eq!(layout.height, 160);
    assert_eq!(layout.lines[2].kind, LineKind::Heading(2));
    assert_eq!(layout.section("two").map(|s| s.first_line), Some(6));
}
