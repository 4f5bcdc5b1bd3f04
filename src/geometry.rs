//! Page geometry: the pixel viewport derived from the terminal grid, text
//! wrapping, and the vertical extent of every section.
//!
//! The page works in CSS-like pixels so its thresholds read the same as on a
//! web page. A terminal cell is `cell_width_px` by `cell_height_px` at 100%
//! font size; raising the font size shrinks the pixel viewport just as
//! browser zoom does.

use crate::input::Document;
use crate::section::{Block, BlockKind, Inline};
use unicode_width::UnicodeWidthChar;

/// Viewport width at or below which the page uses its mobile layout.
pub const BREAKPOINT_PX: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pixel size of one terminal cell at 100% font size.
pub struct CellMetrics {
    /// Cell width in pixels.
    pub width_px: u32,
    /// Cell height in pixels.
    pub height_px: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 10,
            height_px: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Visible area of the page.
pub struct Viewport {
    /// Terminal columns.
    pub cols: u16,
    /// Terminal rows.
    pub rows: u16,
    /// Font size percentage (100 = default).
    pub font_percent: u32,
    /// Cell metrics used for pixel conversion.
    pub metrics: CellMetrics,
}

impl Viewport {
    #[must_use]
    /// Creates a viewport at 100% font size.
    pub fn new(cols: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self {
            cols,
            rows,
            font_percent: 100,
            metrics,
        }
    }

    #[must_use]
    /// Returns a copy with a different font size.
    pub fn with_font(mut self, font_percent: u32) -> Self {
        self.font_percent = font_percent.max(1);
        self
    }

    fn scale(&self, cells: u32, cell_px: u32) -> u32 {
        cells * cell_px * 100 / self.font_percent.max(1)
    }

    #[must_use]
    /// Converts a column count to pixels.
    pub fn cols_to_px(&self, cols: u16) -> u32 {
        self.scale(u32::from(cols), self.metrics.width_px)
    }

    #[must_use]
    /// Converts a pixel width to whole columns, rounding down.
    pub fn px_to_cols(&self, px: u32) -> u16 {
        let per_col = self.metrics.width_px.max(1) * 100;
        u16::try_from(px * self.font_percent / per_col).unwrap_or(u16::MAX)
    }

    #[must_use]
    /// Converts a row count to pixels.
    pub fn rows_to_px(&self, rows: usize) -> u32 {
        self.scale(u32::try_from(rows).unwrap_or(u32::MAX), self.metrics.height_px)
    }

    #[must_use]
    /// Converts a pixel offset to the row containing it.
    pub fn px_to_row(&self, px: u32) -> usize {
        let per_row = self.metrics.height_px.max(1) * 100;
        (px * self.font_percent / per_row) as usize
    }

    #[must_use]
    /// Viewport width in pixels.
    pub fn width_px(&self) -> u32 {
        self.cols_to_px(self.cols)
    }

    #[must_use]
    /// Viewport height in pixels.
    pub fn height_px(&self) -> u32 {
        self.rows_to_px(usize::from(self.rows))
    }

    #[must_use]
    /// Whether the viewport is at or below the mobile breakpoint.
    pub fn is_mobile(&self) -> bool {
        self.width_px() <= BREAKPOINT_PX
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Contiguous text with a single highlight state.
pub struct Run {
    /// Text of the run.
    pub text: String,
    /// Whether the run is inside a search highlight.
    pub highlighted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a rendered line belongs to, used for styling.
pub enum LineKind {
    /// Section heading of the given level.
    Heading(usize),
    /// Paragraph text.
    Paragraph,
    /// List item; `true` on its first line.
    ListItem(bool),
    /// Quoted text.
    Quote,
    /// Code.
    Code,
    /// Image placeholder; `true` when the fallback is shown.
    Image(bool),
    /// Spacing.
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One rendered row of the content pane.
pub struct Line {
    /// Styling class of the line.
    pub kind: LineKind,
    /// Text runs, left to right.
    pub runs: Vec<Run>,
}

impl Line {
    fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            runs: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Vertical extent of a section on the page.
pub struct SectionBox {
    /// Anchor id of the section.
    pub id: String,
    /// Offset of the section's first row, in pixels.
    pub top: u32,
    /// Height of the section, in pixels.
    pub height: u32,
    /// Index of the section's first rendered line.
    pub first_line: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Rendered lines of the page and where each section sits.
pub struct PageLayout {
    /// Every rendered row, top to bottom.
    pub lines: Vec<Line>,
    /// Section extents in document order.
    pub sections: Vec<SectionBox>,
    /// Total page height in pixels.
    pub height: u32,
}

impl PageLayout {
    #[must_use]
    /// Lays the document out for a content column of `width` cells.
    pub fn build(doc: &Document, width: u16, viewport: &Viewport) -> Self {
        let width = usize::from(width.max(8));
        let mut lines = Vec::new();
        for block in &doc.preamble {
            push_block(&mut lines, block, width);
        }

        let mut sections = Vec::with_capacity(doc.sections.len());
        for section in &doc.sections {
            let first_line = lines.len();
            for row in wrap_inlines(&section.heading, width) {
                lines.push(Line {
                    kind: LineKind::Heading(section.level),
                    runs: row,
                });
            }
            lines.push(Line::blank());
            for block in &section.blocks {
                push_block(&mut lines, block, width);
            }
            sections.push(SectionBox {
                id: section.id.clone(),
                top: viewport.rows_to_px(first_line),
                height: viewport.rows_to_px(lines.len() - first_line),
                first_line,
            });
        }

        let height = viewport.rows_to_px(lines.len());
        Self {
            lines,
            sections,
            height,
        }
    }

    #[must_use]
    /// Extent of the section with `id`.
    pub fn section(&self, id: &str) -> Option<&SectionBox> {
        self.sections.iter().find(|s| s.id == id)
    }
}

fn push_block(lines: &mut Vec<Line>, block: &Block, width: usize) {
    match block.kind {
        BlockKind::Paragraph => {
            for runs in wrap_inlines(&block.inlines, width) {
                lines.push(Line {
                    kind: LineKind::Paragraph,
                    runs,
                });
            }
        }
        BlockKind::ListItem => {
            for (i, runs) in wrap_inlines(&block.inlines, width.saturating_sub(2).max(1))
                .into_iter()
                .enumerate()
            {
                lines.push(Line {
                    kind: LineKind::ListItem(i == 0),
                    runs,
                });
            }
        }
        BlockKind::Quote => {
            for runs in wrap_inlines(&block.inlines, width.saturating_sub(2).max(1)) {
                lines.push(Line {
                    kind: LineKind::Quote,
                    runs,
                });
            }
        }
        BlockKind::Code => {
            for runs in wrap_inlines(&block.inlines, width.saturating_sub(2).max(1)) {
                lines.push(Line {
                    kind: LineKind::Code,
                    runs,
                });
            }
        }
        BlockKind::Image => {
            let failed = block.image.as_ref().is_some_and(|i| i.error);
            for runs in wrap_inlines(&block.inlines, width.saturating_sub(4).max(1)) {
                lines.push(Line {
                    kind: LineKind::Image(failed),
                    runs,
                });
            }
        }
    }
    lines.push(Line::blank());
}

/// Wraps inline nodes to `width` display cells.
///
/// Lines break at the last space that fits, or mid-word when a word is wider
/// than the line. Newlines force a break. Highlight state is carried per
/// character, so highlights survive wrapping. Always yields at least one
/// line.
#[must_use]
pub fn wrap_inlines(inlines: &[Inline], width: usize) -> Vec<Vec<Run>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<(char, bool)>> = Vec::new();
    let mut row: Vec<(char, bool)> = Vec::new();
    let mut row_width = 0;

    for node in inlines {
        let highlighted = matches!(node, Inline::Highlight(_));
        for c in node.text().chars() {
            if c == '\n' {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
                continue;
            }
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                if c == ' ' {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                    continue;
                }
                match row.iter().rposition(|(ch, _)| *ch == ' ') {
                    Some(space) if space > 0 => {
                        let carried = row.split_off(space + 1);
                        row.pop();
                        rows.push(std::mem::replace(&mut row, carried));
                        row_width = row.iter().map(|(ch, _)| ch.width().unwrap_or(0)).sum();
                    }
                    _ => {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                }
            }
            row.push((c, highlighted));
            row_width += w;
        }
    }
    rows.push(row);
    rows.into_iter().map(|r| into_runs(&r)).collect()
}

fn into_runs(cells: &[(char, bool)]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &(c, highlighted) in cells {
        match runs.last_mut() {
            Some(run) if run.highlighted == highlighted => run.text.push(c),
            _ => runs.push(Run {
                text: c.to_string(),
                highlighted,
            }),
        }
    }
    runs
}

#[cfg(test)]
#[path = "tests/geometry.rs"]
mod tests;
