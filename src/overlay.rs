//! Mobile sidebar overlay.
//!
//! On narrow viewports the sidebar slides over the content instead of sitting
//! beside it. The overlay couples three things that must never disagree: the
//! open flag, the backdrop behind the sidebar, and the menu button glyph.

use crate::debounce::Debouncer;

/// Trailing debounce applied to viewport resizes before the overlay reacts.
pub const OVERLAY_RESIZE_DELAY_MS: u64 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Glyph on the menu button.
pub enum MenuIcon {
    /// Overlay closed; click to open.
    Bars,
    /// Overlay open; click to close.
    Times,
}

impl MenuIcon {
    #[must_use]
    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Bars => "☰",
            Self::Times => "✕",
        }
    }
}

#[derive(Clone, Debug)]
/// Open state of the mobile sidebar together with its backdrop and icon.
pub struct MobileOverlay {
    open: bool,
    backdrop_visible: bool,
    icon: MenuIcon,
    resize: Debouncer<bool>,
}

impl Default for MobileOverlay {
    fn default() -> Self {
        Self::new(OVERLAY_RESIZE_DELAY_MS)
    }
}

impl MobileOverlay {
    #[must_use]
    /// Creates a closed overlay reacting to resizes after `resize_delay_ms`.
    pub fn new(resize_delay_ms: u64) -> Self {
        Self {
            open: false,
            backdrop_visible: false,
            icon: MenuIcon::Bars,
            resize: Debouncer::new(resize_delay_ms),
        }
    }

    fn apply(&mut self, open: bool) {
        if self.open != open {
            tracing::debug!(open, "mobile overlay");
        }
        self.open = open;
        self.backdrop_visible = open;
        self.icon = if open { MenuIcon::Times } else { MenuIcon::Bars };
    }

    #[must_use]
    /// Whether the sidebar overlay is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    /// Whether the backdrop covers the content.
    pub fn backdrop_visible(&self) -> bool {
        self.backdrop_visible
    }

    #[must_use]
    /// Current menu button glyph.
    pub fn icon(&self) -> MenuIcon {
        self.icon
    }

    /// Shows the overlay.
    pub fn open(&mut self) {
        self.apply(true);
    }

    /// Hides the overlay.
    pub fn close(&mut self) {
        self.apply(false);
    }

    /// Flips the overlay; returns whether it is now open.
    pub fn toggle(&mut self) -> bool {
        self.apply(!self.open);
        self.open
    }

    /// Handles a click on the backdrop; returns whether the overlay closed.
    pub fn backdrop_click(&mut self) -> bool {
        let was_open = self.open;
        self.close();
        was_open
    }

    /// Handles navigation through a sidebar link.
    pub fn navigate(&mut self) -> bool {
        self.backdrop_click()
    }

    /// Handles `Esc`; only closes on mobile viewports.
    pub fn escape(&mut self, is_mobile: bool) -> bool {
        is_mobile && self.backdrop_click()
    }

    /// Records a viewport resize; the overlay reacts once resizing settles.
    pub fn schedule_resize(&mut self, is_mobile: bool, now_ms: u64) {
        self.resize.schedule(is_mobile, now_ms);
    }

    /// Applies a settled resize. Returns whether the overlay was force
    /// closed because the viewport left the mobile range.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.resize.take_ready(now_ms) {
            Some(is_mobile) => self.apply_resize(is_mobile),
            None => false,
        }
    }

    /// Reacts to the viewport size immediately.
    pub fn apply_resize(&mut self, is_mobile: bool) -> bool {
        if !is_mobile && self.open {
            self.close();
            return true;
        }
        false
    }

    #[must_use]
    /// When the pending resize settles.
    pub fn deadline(&self) -> Option<u64> {
        self.resize.deadline()
    }
}
