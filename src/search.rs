//! In-page search over rendered section text.
//!
//! The index is built once from the page and never mutated. A search matches
//! sections with the same case-insensitive literal pattern that highlights
//! them, reports matches in document order with a short snippet, and
//! highlights every occurrence in the rendered sections after first removing
//! the highlights of the previous search.

use crate::highlight::{apply_highlights, literal_pattern, remove_highlights};
use crate::section::{BlockKind, Section};
use regex::Regex;
use serde::Serialize;

/// Characters of context kept on either side of a snippet match.
pub const SNIPPET_CONTEXT: usize = 30;

const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Searchable view of one section.
pub struct IndexEntry {
    /// Anchor id of the section.
    pub id: String,
    /// Heading text.
    pub title: String,
    /// Lowercased full text of the section.
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One matching section.
pub struct SearchResult {
    /// Anchor id to jump to.
    pub id: String,
    /// Section heading.
    pub title: String,
    /// Context around the first paragraph match, or the title.
    pub snippet: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a search run produced.
pub enum SearchOutcome {
    /// The query was blank; results and highlights are gone.
    Cleared,
    /// Nothing matched; the query is kept for the "no results" message.
    NoResults {
        /// Trimmed query that found nothing.
        query: String,
    },
    /// At least one section matched.
    Found {
        /// Trimmed query.
        query: String,
        /// Matches in document order.
        results: Vec<SearchResult>,
    },
}

#[derive(Clone, Debug, Default)]
/// Read-only search index over a page's sections.
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    #[must_use]
    /// Builds the index from the sections' current text.
    pub fn build(sections: &[Section]) -> Self {
        let entries = sections
            .iter()
            .map(|s| IndexEntry {
                id: s.id.clone(),
                title: s.title.clone(),
                body: s.text_content().to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    /// Indexed entries in document order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Runs a search, replacing any highlights left by a previous run.
    ///
    /// `sections` must be the sections the index was built from, in the same
    /// order. A blank query clears every highlight and returns
    /// [`SearchOutcome::Cleared`].
    pub fn search(&self, query: &str, sections: &mut [Section]) -> SearchOutcome {
        clear_highlights(sections);

        let query = query.trim();
        let Some(pattern) = literal_pattern(query) else {
            return SearchOutcome::Cleared;
        };

        let mut results = Vec::new();
        for (entry, section) in self.entries.iter().zip(sections.iter_mut()) {
            if !pattern.is_match(&section.text_content()) {
                continue;
            }
            results.push(SearchResult {
                id: entry.id.clone(),
                title: entry.title.clone(),
                snippet: snippet(section, &pattern).unwrap_or_else(|| entry.title.clone()),
            });
            for run in section.inline_runs_mut() {
                apply_highlights(run, &pattern);
            }
        }
        tracing::debug!(query, matches = results.len(), "search finished");

        if results.is_empty() {
            SearchOutcome::NoResults {
                query: query.to_string(),
            }
        } else {
            SearchOutcome::Found {
                query: query.to_string(),
                results,
            }
        }
    }
}

/// Removes every highlight from the sections.
///
/// Returns the number of highlight nodes removed.
pub fn clear_highlights(sections: &mut [Section]) -> usize {
    sections
        .iter_mut()
        .flat_map(Section::inline_runs_mut)
        .map(remove_highlights)
        .sum()
}

/// Context around the first match in the section's first matching paragraph.
fn snippet(section: &Section, pattern: &Regex) -> Option<String> {
    section
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Paragraph)
        .find_map(|b| {
            let text = b.text();
            let m = pattern.find(&text)?;
            Some(window(&text, m.start(), m.end()))
        })
}

/// Cuts `text` to [`SNIPPET_CONTEXT`] characters around the byte range
/// `start..end`, marking truncated edges with an ellipsis.
#[must_use]
pub fn window(text: &str, start: usize, end: usize) -> String {
    let total = text.chars().count();
    let match_start = text[..start].chars().count();
    let match_len = text[start..end].chars().count();

    let from = match_start.saturating_sub(SNIPPET_CONTEXT);
    let to = (match_start + match_len + SNIPPET_CONTEXT).min(total);

    let mut out = String::new();
    if from > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(text.chars().skip(from).take(to - from));
    if to < total {
        out.push_str(ELLIPSIS);
    }
    out
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
