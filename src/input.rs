//! Locating documents on disk and turning them into page sections.
//!
//! Parsing is query driven: the format's block query yields headings, prose
//! and code in document order, and every heading opens a new section that
//! collects the blocks after it. Content before the first heading is kept as
//! the page preamble, outside any section.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{dedupe_ids, link_hierarchy, slugify, Block, BlockKind, Inline, Section};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

static IMAGE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^!\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)$"#).expect("valid image pattern")
});
static INLINE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid image pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid link pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*|`").expect("valid emphasis pattern"));

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A parsed page: blocks before the first heading, then the sections.
pub struct Document {
    /// Content preceding the first heading.
    pub preamble: Vec<Block>,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Document {
    /// Iterates over every block on the page, preamble first.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.preamble
            .iter()
            .chain(self.sections.iter().flat_map(|s| s.blocks.iter()))
    }
}

enum Captured {
    Heading { level: usize, title: String, line: usize },
    Block(Block),
}

/// Collects documents with a matching extension from files and directories.
///
/// Explicit file arguments are always included; directories are walked
/// recursively in sorted order.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(&path, extensions, &mut found)?;
        } else if path.is_file() {
            found.push(path);
        }
    }
    Ok(found)
}

fn walk_dir(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();
    for entry in entries {
        if entry.is_dir() {
            walk_dir(&entry, extensions, out)?;
        } else if entry
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want == ext))
        {
            out.push(entry);
        }
    }
    Ok(())
}

/// Reads and parses every document, merging them into one page.
///
/// The preamble of the first document becomes the page preamble; later
/// documents with a preamble get a section named after their file.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed.
pub fn load_page(paths: &[PathBuf], format: &dyn Format) -> Result<Document> {
    let mut page = Document::default();
    for (i, path) in paths.iter().enumerate() {
        let source = fs::read_to_string(path)?;
        let file_path = path.to_string_lossy().to_string();
        let doc = parse_document(&source, &file_path, format)?;
        tracing::debug!(file = %file_path, sections = doc.sections.len(), "parsed document");

        if i == 0 {
            page.preamble = doc.preamble;
        } else if !doc.preamble.is_empty() {
            let name = path
                .file_stem()
                .map_or_else(|| file_path.clone(), |s| s.to_string_lossy().to_string());
            let mut section = Section::new(slugify(&name), name, 1);
            section.file_path.clone_from(&file_path);
            section.blocks = doc.preamble;
            page.sections.push(section);
        }
        page.sections.extend(doc.sections);
    }
    dedupe_ids(&mut page.sections);
    link_hierarchy(&mut page.sections);
    Ok(page)
}

/// Parses one document into its preamble and sections.
///
/// # Errors
///
/// Returns an error if the grammar or query cannot be loaded, or the parser
/// yields no tree.
pub fn parse_document(source: &str, file_path: &str, format: &dyn Format) -> Result<Document> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
        path: PathBuf::from(file_path),
    })?;

    let query = Query::new(&language, format.block_query())?;
    let names = query.capture_names();
    let bytes = source.as_bytes();

    let mut captured: Vec<(usize, Captured)> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let text = node.utf8_text(bytes).unwrap_or_default();
            let item = match names[capture.index as usize] {
                "heading" => {
                    let Some(level) = format.heading_level(&node) else {
                        continue;
                    };
                    Captured::Heading {
                        level,
                        title: heading_title(&node, bytes, text),
                        line: node.start_position().row,
                    }
                }
                "paragraph" => Captured::Block(prose_block(&node, text)),
                "code" => Captured::Block(code_block(&node, bytes, text)),
                _ => continue,
            };
            captured.push((node.start_byte(), item));
        }
    }
    captured.sort_by_key(|(start, _)| *start);
    captured.dedup_by_key(|(start, _)| *start);

    let mut doc = Document::default();
    for (_, item) in captured {
        match item {
            Captured::Heading { level, title, line } => {
                let mut section = Section::new(slugify(&title), title, level);
                section.line_start = line;
                section.file_path = file_path.to_string();
                doc.sections.push(section);
            }
            Captured::Block(block) => match doc.sections.last_mut() {
                Some(section) => section.blocks.push(block),
                None => doc.preamble.push(block),
            },
        }
    }
    dedupe_ids(&mut doc.sections);
    link_hierarchy(&mut doc.sections);
    Ok(doc)
}

fn heading_title(node: &Node, bytes: &[u8], raw: &str) -> String {
    let title = node
        .child_by_field_name("heading_content")
        .and_then(|n| n.utf8_text(bytes).ok())
        .unwrap_or_else(|| raw.trim_start_matches('#'));
    clean_inline(title.trim().trim_end_matches('#').trim_end())
}

fn prose_block(node: &Node, text: &str) -> Block {
    let joined = join_lines(text);
    if let Some(caps) = IMAGE_ONLY.captures(&joined) {
        return Block::image(&caps[1], &caps[2]);
    }

    let mut kind = BlockKind::Paragraph;
    let mut ancestor = node.parent();
    while let Some(parent) = ancestor {
        match parent.kind() {
            "list_item" => {
                kind = BlockKind::ListItem;
                break;
            }
            "block_quote" => {
                kind = BlockKind::Quote;
                break;
            }
            _ => ancestor = parent.parent(),
        }
    }
    Block {
        kind,
        inlines: vec![Inline::Text(clean_inline(&joined))],
        image: None,
    }
}

fn code_block(node: &Node, bytes: &[u8], raw: &str) -> Block {
    let mut walker = node.walk();
    let fenced = node
        .children(&mut walker)
        .find(|c| c.kind() == "code_fence_content")
        .and_then(|c| c.utf8_text(bytes).ok());
    let code = match fenced {
        Some(content) => content.trim_end_matches('\n').to_string(),
        None if node.kind() == "fenced_code_block" => String::new(),
        None => raw
            .lines()
            .map(|l| l.strip_prefix("    ").unwrap_or(l))
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end()
            .to_string(),
    };
    Block::new(BlockKind::Code, code)
}

fn join_lines(text: &str) -> String {
    text.lines()
        .map(|l| l.trim().trim_start_matches('>').trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips inline markup that has no terminal rendering: link targets, image
/// sources, bold markers and code ticks.
#[must_use]
pub fn clean_inline(text: &str) -> String {
    let text = INLINE_IMAGE.replace_all(text, "$1");
    let text = LINK.replace_all(&text, "$1");
    EMPHASIS.replace_all(&text, "").into_owned()
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
