//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar for its documents and a query
//! whose captures name the page's building blocks. Captures are matched in
//! document order and interpreted by the input layer:
//!
//! - `@heading` starts a new section,
//! - `@paragraph` is prose (its ancestors decide list item or quote),
//! - `@code` is verbatim code.

pub mod markdown;

/// Grammar and block query for one document format.
pub trait Format {
    /// File suffixes this format claims when scanning directories.
    fn file_extension(&self) -> &'static str;
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing headings, paragraphs and code blocks.
    fn block_query(&self) -> &str;
    /// Heading level for a captured heading node, if it is one.
    fn heading_level(&self, node: &tree_sitter::Node) -> Option<usize>;
}
