//! Insertion and removal of search highlight markup in inline runs.
//!
//! Highlighting splits every text node containing the query into plain and
//! highlighted parts. Removal is a full revert: highlight nodes turn back into
//! text nodes and the run is normalised, merging adjacent text nodes, so a
//! run built from a single text node comes back byte for byte.

use crate::section::Inline;
use regex::{Regex, RegexBuilder};

/// Compiles a case-insensitive pattern matching `query` literally.
///
/// Characters meaningful to pattern syntax are escaped first, so `a.b` only
/// matches the three characters `a.b`. Returns `None` for a blank query.
#[must_use]
pub fn literal_pattern(query: &str) -> Option<Regex> {
    if query.trim().is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Wraps every match of `pattern` in the run's text nodes.
///
/// Returns the number of highlight nodes inserted.
pub fn apply_highlights(run: &mut Vec<Inline>, pattern: &Regex) -> usize {
    let mut inserted = 0;
    let mut out = Vec::with_capacity(run.len());
    for node in run.drain(..) {
        let Inline::Text(text) = node else {
            out.push(node);
            continue;
        };
        let mut last = 0;
        for m in pattern.find_iter(&text) {
            if m.start() > last {
                out.push(Inline::Text(text[last..m.start()].to_string()));
            }
            out.push(Inline::Highlight(m.as_str().to_string()));
            inserted += 1;
            last = m.end();
        }
        if last == 0 {
            out.push(Inline::Text(text));
        } else if last < text.len() {
            out.push(Inline::Text(text[last..].to_string()));
        }
    }
    *run = out;
    inserted
}

/// Unwraps every highlight node and normalises the run.
///
/// Returns the number of highlight nodes removed.
pub fn remove_highlights(run: &mut Vec<Inline>) -> usize {
    let mut removed = 0;
    for node in run.iter_mut() {
        if let Inline::Highlight(text) = node {
            *node = Inline::Text(std::mem::take(text));
            removed += 1;
        }
    }
    if removed > 0 {
        normalize(run);
    }
    removed
}

/// Merges adjacent text nodes and drops empty ones.
pub fn normalize(run: &mut Vec<Inline>) {
    let mut out: Vec<Inline> = Vec::with_capacity(run.len());
    for node in run.drain(..) {
        if let Inline::Text(t) = &node {
            if t.is_empty() {
                continue;
            }
            if let Some(Inline::Text(prev)) = out.last_mut() {
                prev.push_str(t);
                continue;
            }
        }
        out.push(node);
    }
    *run = out;
}

/// Counts highlight nodes in a run.
#[must_use]
pub fn highlight_count(run: &[Inline]) -> usize {
    run.iter()
        .filter(|n| matches!(n, Inline::Highlight(_)))
        .count()
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
