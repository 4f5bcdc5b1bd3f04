//! Markdown format implementation using tree-sitter-md.
//!
//! Only ATX-style headings (`#` syntax) open sections; setext headings are
//! treated as ordinary paragraphs.

use crate::formats::Format;

/// Tree-sitter queries for markdown block structure.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "(atx_heading) @heading
         (paragraph) @paragraph
         (fenced_code_block) @code
         (indented_code_block) @code"
    }

    fn heading_level(&self, node: &tree_sitter::Node) -> Option<usize> {
        let marker = node.child(0)?;
        marker
            .kind()
            .strip_prefix("atx_h")?
            .strip_suffix("_marker")?
            .parse()
            .ok()
    }
}
