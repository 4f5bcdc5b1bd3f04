//! Mapping the scroll position to the section being read.
//!
//! A section is current when the scroll offset plus the header offset falls
//! inside its vertical extent. Sections are checked in document order and the
//! last one containing the probe wins. When the probe is above every section
//! the previous pointer is retained, so the sidebar, outline and breadcrumb
//! keep showing the last section read.

use crate::geometry::SectionBox;

/// Distance below the top edge at which the spy probes for the current section.
pub const HEADER_OFFSET_PX: u32 = 100;
/// Gap left above a section when jumping to its anchor.
pub const ANCHOR_OFFSET_PX: u32 = 80;
/// Scroll offset past which the back-to-top control shows.
pub const BACK_TO_TOP_PX: u32 = 300;
/// Trailing debounce applied to scroll events before the spy runs.
pub const SCROLL_SPY_DELAY_MS: u64 = 100;

#[derive(Clone, Debug)]
/// Tracks the single active section.
pub struct ScrollSpy {
    header_offset: u32,
    active: Option<usize>,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(HEADER_OFFSET_PX)
    }
}

impl ScrollSpy {
    #[must_use]
    /// Creates a spy probing `header_offset` pixels below the scroll offset.
    pub fn new(header_offset: u32) -> Self {
        Self {
            header_offset,
            active: None,
        }
    }

    #[must_use]
    /// Index of the section containing the probe at `offset`, if any.
    pub fn locate(&self, sections: &[SectionBox], offset: u32) -> Option<usize> {
        let probe = offset.saturating_add(self.header_offset);
        sections
            .iter()
            .enumerate()
            .filter(|(_, s)| probe >= s.top && probe < s.top + s.height)
            .map(|(i, _)| i)
            .last()
    }

    /// Recomputes the active section for `offset`.
    ///
    /// Returns `Some(index)` when the active section changed; the pointer is
    /// left untouched when no section contains the probe.
    pub fn refresh(&mut self, sections: &[SectionBox], offset: u32) -> Option<usize> {
        let found = self.locate(sections, offset)?;
        if self.active == Some(found) {
            return None;
        }
        tracing::debug!(offset, section = %sections[found].id, "active section changed");
        self.active = Some(found);
        Some(found)
    }

    #[must_use]
    /// Index of the active section.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Forgets the active section, e.g. after the page is rebuilt.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

/// Reading progress through the page, in percent.
#[must_use]
pub fn reading_progress(offset: u32, page_height: u32, viewport_height: u32) -> u16 {
    let scrollable = page_height.saturating_sub(viewport_height);
    if scrollable == 0 {
        return 0;
    }
    u16::try_from((u64::from(offset.min(scrollable)) * 100) / u64::from(scrollable)).unwrap_or(100)
}

/// Whether the back-to-top control is shown at `offset`.
#[must_use]
pub fn back_to_top_visible(offset: u32) -> bool {
    offset > BACK_TO_TOP_PX
}

/// Scroll offset that brings a section to just below the header.
#[must_use]
pub fn anchor_target(section_top: u32, max_offset: u32) -> u32 {
    section_top.saturating_sub(ANCHOR_OFFSET_PX).min(max_offset)
}

#[cfg(test)]
#[path = "tests/scroll_spy.rs"]
mod tests;
