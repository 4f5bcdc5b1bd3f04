//! Section representation for a rendered documentation page.
//!
//! A section corresponds to a heading in the source document together with the
//! blocks that follow it up to the next heading. Sections keep their place in
//! the heading hierarchy through parent/child indices, which the sidebar uses
//! to build its navigation tree. The text of a section never changes once
//! parsed; only highlight markup is inserted and removed by search.

#[derive(Clone, Debug, PartialEq, Eq)]
/// Smallest unit of rendered text.
pub enum Inline {
    /// Plain text node.
    Text(String),
    /// Text wrapped by a search highlight.
    Highlight(String),
}

impl Inline {
    #[must_use]
    /// Text carried by this node, regardless of markup.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(t) | Self::Highlight(t) => t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Kind of content block, mirroring the markup it was parsed from.
pub enum BlockKind {
    /// Ordinary paragraph; the only kind searched for snippets.
    Paragraph,
    /// Paragraph nested in a list item.
    ListItem,
    /// Paragraph nested in a block quote.
    Quote,
    /// Fenced or indented code.
    Code,
    /// Standalone image reference.
    Image,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Image reference carried by an image block.
pub struct ImageRef {
    /// Source currently displayed; the fallback asset after a failure.
    pub src: String,
    /// Source as written in the document, kept for retries.
    pub original_src: String,
    /// Set when loading failed and the fallback was substituted.
    pub error: bool,
    /// Alt text as written, held while a placeholder replaces it.
    pub replaced_alt: Option<Vec<Inline>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A block of content belonging to a section.
pub struct Block {
    /// Markup the block came from.
    pub kind: BlockKind,
    /// Inline nodes in document order; the alt text for images.
    pub inlines: Vec<Inline>,
    /// Image reference for `BlockKind::Image` blocks.
    pub image: Option<ImageRef>,
}

impl Block {
    #[must_use]
    /// Builds a block holding a single text node.
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            inlines: vec![Inline::Text(text.into())],
            image: None,
        }
    }

    #[must_use]
    /// Builds an image block whose text is the alt text.
    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        let src = src.into();
        Self {
            kind: BlockKind::Image,
            inlines: vec![Inline::Text(alt.into())],
            image: Some(ImageRef {
                original_src: src.clone(),
                src,
                error: false,
                replaced_alt: None,
            }),
        }
    }

    #[must_use]
    /// Concatenated text of all inline nodes.
    pub fn text(&self) -> String {
        self.inlines.iter().map(Inline::text).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Hierarchical page division with an anchor id and its content.
pub struct Section {
    /// Anchor id, unique within the page.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Heading rendered as inline nodes so search can highlight it.
    pub heading: Vec<Inline>,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Content blocks following the heading.
    pub blocks: Vec<Block>,
    /// Source line of the heading (0-based).
    pub line_start: usize,
    /// Source file containing this section.
    pub file_path: String,
    /// Index of the containing section in the hierarchy.
    pub parent_index: Option<usize>,
    /// Indices of directly nested subsections.
    pub children_indices: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Creates a section with no content and no hierarchy links.
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: usize) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            heading: vec![Inline::Text(title.clone())],
            title,
            level,
            blocks: Vec::new(),
            line_start: 0,
            file_path: String::new(),
            parent_index: None,
            children_indices: Vec::new(),
        }
    }

    #[must_use]
    /// Appends a block, builder style.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    /// Full text of the section: heading then each block, newline separated.
    pub fn text_content(&self) -> String {
        let mut out: String = self.heading.iter().map(Inline::text).collect();
        for block in &self.blocks {
            out.push('\n');
            out.push_str(&block.text());
        }
        out
    }

    /// Iterates mutably over every inline sequence of the section, heading first.
    pub fn inline_runs_mut(&mut self) -> impl Iterator<Item = &mut Vec<Inline>> {
        std::iter::once(&mut self.heading).chain(self.blocks.iter_mut().map(|b| &mut b.inlines))
    }
}

/// Turns heading text into an anchor id: lowercase, word characters kept,
/// whitespace and dashes collapsed into single `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Rewrites section ids so each is unique, suffixing repeats with `-1`, `-2`...
pub fn dedupe_ids(sections: &mut [Section]) {
    let mut taken = std::collections::HashSet::new();
    for section in sections {
        if taken.insert(section.id.clone()) {
            continue;
        }
        let mut n = 1;
        while !taken.insert(format!("{}-{n}", section.id)) {
            n += 1;
        }
        section.id = format!("{}-{n}", section.id);
    }
}

/// Recomputes parent/child indices from heading levels.
pub fn link_hierarchy(sections: &mut [Section]) {
    let mut stack: Vec<usize> = Vec::new();
    for i in 0..sections.len() {
        sections[i].children_indices.clear();
        while let Some(&top) = stack.last() {
            if sections[top].level < sections[i].level {
                break;
            }
            stack.pop();
        }
        sections[i].parent_index = stack.last().copied();
        if let Some(parent) = sections[i].parent_index {
            sections[parent].children_indices.push(i);
        }
        stack.push(i);
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
