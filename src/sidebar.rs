//! Sidebar: navigation tree, open/collapsed state and drag resizing.
//!
//! The sidebar behaves differently on either side of the mobile breakpoint.
//! On mobile it is an overlay (see [`MobileOverlay`]) that always starts
//! closed. On desktop it sits beside the content and can be collapsed to a
//! rail; that choice and the dragged width are persisted.

use crate::overlay::MobileOverlay;
use crate::pointer::{ListenerId, PointerListeners, PointerPhase, PointerTarget};
use crate::section::Section;
use crate::settings::Settings;

/// Narrowest sidebar width in pixels.
pub const MIN_WIDTH_PX: u32 = 200;
/// Widest sidebar width in pixels.
pub const MAX_WIDTH_PX: u32 = 400;
/// Width used before any width is measured or restored.
pub const DEFAULT_WIDTH_PX: u32 = 300;

/// Clamps a width to the allowed sidebar range.
#[must_use]
pub fn clamp_width(width_px: i64) -> u32 {
    let clamped = width_px.clamp(i64::from(MIN_WIDTH_PX), i64::from(MAX_WIDTH_PX));
    u32::try_from(clamped).unwrap_or(DEFAULT_WIDTH_PX)
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Link in the navigation tree.
pub struct NavItem {
    /// Target section id.
    pub id: String,
    /// Link text.
    pub title: String,
    /// Heading level of the target.
    pub level: usize,
    /// Parent item.
    pub parent: Option<usize>,
    /// Whether the item has nested items.
    pub has_children: bool,
    /// Whether nested items are shown.
    pub expanded: bool,
    /// Whether the link points at the active section.
    pub active: bool,
}

#[derive(Clone, Debug, Default)]
/// Navigation tree mirroring the section hierarchy.
pub struct NavTree {
    items: Vec<NavItem>,
    all_collapsed: bool,
    cursor: usize,
}

impl NavTree {
    #[must_use]
    /// Builds a fully expanded tree from linked sections.
    pub fn build(sections: &[Section]) -> Self {
        let items = sections
            .iter()
            .map(|s| NavItem {
                id: s.id.clone(),
                title: s.title.clone(),
                level: s.level,
                parent: s.parent_index,
                has_children: !s.children_indices.is_empty(),
                expanded: true,
                active: false,
            })
            .collect();
        Self {
            items,
            all_collapsed: false,
            cursor: 0,
        }
    }

    #[must_use]
    /// All items in document order.
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    /// Index of the item for `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn is_visible(&self, mut index: usize) -> bool {
        while let Some(parent) = self.items[index].parent {
            if !self.items[parent].expanded {
                return false;
            }
            index = parent;
        }
        true
    }

    #[must_use]
    /// Indices of items whose ancestors are all expanded.
    pub fn visible_items(&self) -> Vec<usize> {
        (0..self.items.len()).filter(|&i| self.is_visible(i)).collect()
    }

    /// Expands or collapses one item; returns the new state, or `None` when
    /// the item has nothing to collapse.
    pub fn toggle_item(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        if !item.has_children {
            return None;
        }
        item.expanded = !item.expanded;
        Some(item.expanded)
    }

    /// Collapses every item, or expands every item when already collapsed.
    /// Returns whether the tree is now collapsed.
    pub fn collapse_all(&mut self) -> bool {
        self.all_collapsed = !self.all_collapsed;
        let expanded = !self.all_collapsed;
        for item in self.items.iter_mut().filter(|i| i.has_children) {
            item.expanded = expanded;
        }
        self.clamp_cursor();
        self.all_collapsed
    }

    #[must_use]
    /// Glyph of the collapse-all control: what clicking it will do.
    pub fn collapse_all_glyph(&self) -> &'static str {
        if self.all_collapsed {
            "⊞"
        } else {
            "⊟"
        }
    }

    /// Makes the link for `id` the only active one, expanding its ancestors
    /// so it is visible. Unknown ids leave the tree unchanged.
    pub fn mark_active(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        for (i, item) in self.items.iter_mut().enumerate() {
            item.active = i == index;
        }
        let mut parent = self.items[index].parent;
        while let Some(p) = parent {
            self.items[p].expanded = true;
            parent = self.items[p].parent;
        }
        true
    }

    #[must_use]
    /// The active item.
    pub fn active(&self) -> Option<&NavItem> {
        self.items.iter().find(|i| i.active)
    }

    #[must_use]
    /// Item under the keyboard cursor.
    pub fn cursor(&self) -> Option<usize> {
        self.items.get(self.cursor).map(|_| self.cursor)
    }

    /// Moves the cursor by `delta` visible items.
    pub fn move_cursor(&mut self, delta: isize) {
        let visible = self.visible_items();
        if visible.is_empty() {
            return;
        }
        let at = visible.iter().position(|&i| i == self.cursor).unwrap_or(0);
        let target = at.saturating_add_signed(delta).min(visible.len() - 1);
        self.cursor = visible[target];
    }

    /// Moves the cursor to its parent item.
    pub fn cursor_to_parent(&mut self) {
        if let Some(parent) = self.items.get(self.cursor).and_then(|i| i.parent) {
            self.cursor = parent;
        }
    }

    /// Puts the cursor on `index`.
    pub fn set_cursor(&mut self, index: usize) {
        if index < self.items.len() {
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        while !self.items.is_empty() && !self.is_visible(self.cursor) {
            match self.items[self.cursor].parent {
                Some(parent) => self.cursor = parent,
                None => break,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Persisted shape of the sidebar.
pub struct SidebarState {
    /// Mobile overlay open.
    pub is_open: bool,
    /// Width in pixels, within [`MIN_WIDTH_PX`, `MAX_WIDTH_PX`].
    pub width_px: u32,
    /// Desktop sidebar collapsed to a rail.
    pub collapsed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// An in-progress drag of the sidebar edge.
pub struct ResizeSession {
    start_x: u32,
    start_width: u32,
    move_listener: ListenerId,
    release_listener: ListenerId,
}

#[derive(Clone, Debug)]
/// Owns the sidebar state, its navigation tree and resize drags.
pub struct SidebarManager {
    state: SidebarState,
    tree: NavTree,
    resize: Option<ResizeSession>,
}

impl SidebarManager {
    #[must_use]
    /// Creates an open sidebar of `measured_width_px` over `sections`.
    pub fn new(sections: &[Section], measured_width_px: u32) -> Self {
        Self {
            state: SidebarState {
                is_open: false,
                width_px: clamp_width(i64::from(measured_width_px)),
                collapsed: false,
            },
            tree: NavTree::build(sections),
            resize: None,
        }
    }

    #[must_use]
    /// Current state.
    pub fn state(&self) -> SidebarState {
        self.state
    }

    #[must_use]
    /// Navigation tree.
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Navigation tree, mutably.
    pub fn tree_mut(&mut self) -> &mut NavTree {
        &mut self.tree
    }

    /// Replaces the tree after the document changed.
    pub fn rebuild(&mut self, sections: &[Section]) {
        self.tree = NavTree::build(sections);
    }

    /// Applies saved preferences. Only desktop viewports restore; mobile
    /// starts closed and expanded.
    pub fn restore(&mut self, is_mobile: bool, settings: &Settings) {
        self.state.is_open = false;
        if is_mobile {
            return;
        }
        self.state.collapsed = settings.sidebar_collapsed();
        if let Some(width) = settings.sidebar_width() {
            self.state.width_px = width;
        }
        tracing::debug!(state = ?self.state, "sidebar restored");
    }

    /// Toggles the sidebar for the current viewport. On mobile this opens or
    /// closes the overlay; on desktop it collapses or expands the sidebar and
    /// persists the choice. Returns whether the sidebar is now shown.
    pub fn toggle(
        &mut self,
        is_mobile: bool,
        overlay: &mut MobileOverlay,
        settings: &mut Settings,
    ) -> bool {
        if is_mobile {
            self.state.is_open = overlay.toggle();
            self.state.is_open
        } else {
            self.state.collapsed = !self.state.collapsed;
            settings.set_sidebar_collapsed(self.state.collapsed);
            !self.state.collapsed
        }
    }

    /// Copies the overlay's open flag after it changed on its own.
    pub fn sync_overlay(&mut self, overlay: &MobileOverlay) {
        self.state.is_open = overlay.is_open();
    }

    #[must_use]
    /// Whether the sidebar is drawn on a viewport of the given kind.
    pub fn visible(&self, is_mobile: bool) -> bool {
        if is_mobile {
            self.state.is_open
        } else {
            !self.state.collapsed
        }
    }

    #[must_use]
    /// Whether a drag is in progress.
    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Starts a drag at `x_px`, registering move and release listeners.
    /// A drag already in progress is finished first.
    pub fn start_resize(&mut self, x_px: u32, listeners: &mut PointerListeners) {
        if let Some(session) = self.resize.take() {
            detach(session, listeners);
        }
        self.resize = Some(ResizeSession {
            start_x: x_px,
            start_width: self.state.width_px,
            move_listener: listeners.add(PointerPhase::Move, PointerTarget::SidebarResize),
            release_listener: listeners.add(PointerPhase::Release, PointerTarget::SidebarResize),
        });
    }

    /// Applies the drag at `x_px` live; returns the new width.
    pub fn resize_to(&mut self, x_px: u32) -> Option<u32> {
        let session = self.resize?;
        let delta = i64::from(x_px) - i64::from(session.start_x);
        self.state.width_px = clamp_width(i64::from(session.start_width) + delta);
        Some(self.state.width_px)
    }

    /// Ends the drag, persisting the width and removing both listeners.
    pub fn finish_resize(
        &mut self,
        listeners: &mut PointerListeners,
        settings: &mut Settings,
    ) -> Option<u32> {
        let session = self.resize.take()?;
        detach(session, listeners);
        settings.set_sidebar_width(self.state.width_px);
        tracing::debug!(width = self.state.width_px, "sidebar resized");
        Some(self.state.width_px)
    }
}

fn detach(session: ResizeSession, listeners: &mut PointerListeners) {
    listeners.remove(session.move_listener);
    listeners.remove(session.release_listener);
}

#[cfg(test)]
#[path = "tests/sidebar.rs"]
mod tests;
