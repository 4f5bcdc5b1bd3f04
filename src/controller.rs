//! The page controller: owns every feature and routes input to them.
//!
//! Input arrives as [`PageInput`] values together with a millisecond clock.
//! Handlers update state immediately where the page would, and schedule
//! debounced work (scroll spy, search, overlay resize) that runs from
//! [`DocsController::tick`]. The event loop draws after every handled input
//! or tick that reports a change.

use crate::assets::{ImageHandler, ImageSource, PreloadProgress, Preloader};
use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use crate::events::EventBus;
use crate::geometry::{CellMetrics, PageLayout, Viewport};
use crate::input::Document;
use crate::outline::{Breadcrumb, Outline};
use crate::overlay::{MobileOverlay, OVERLAY_RESIZE_DELAY_MS};
use crate::page_layout::{Layout, LayoutSwitcher};
use crate::pointer::{PointerListeners, PointerPhase, PointerTarget};
use crate::scroll_spy::{self, ScrollSpy, SCROLL_SPY_DELAY_MS};
use crate::search::{SearchIndex, SearchOutcome, SearchResult};
use crate::section::Section;
use crate::settings::{Settings, FONT_SIZE_STEP, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::sidebar::{SidebarManager, DEFAULT_WIDTH_PX};
use crate::theme::{Theme, ThemeManager};

/// Trailing debounce applied to typed queries.
pub const SEARCH_DELAY_MS: u64 = 300;
/// Width of the outline panel in pixels.
pub const OUTLINE_WIDTH_PX: u32 = 240;
/// Rows taken by the top bar and the status bar.
pub const CHROME_ROWS: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which optional panels exist on the page.
pub struct PageElements {
    /// Navigation sidebar.
    pub sidebar: bool,
    /// Mobile overlay and its menu button.
    pub overlay: bool,
    /// On-page outline.
    pub outline: bool,
    /// Breadcrumb in the top bar.
    pub breadcrumb: bool,
    /// Search box and results.
    pub search: bool,
}

impl PageElements {
    /// Names accepted by [`PageElements::from_names`].
    pub const NAMES: [&'static str; 5] = ["sidebar", "overlay", "outline", "breadcrumb", "search"];

    #[must_use]
    /// Every panel present.
    pub fn all() -> Self {
        Self {
            sidebar: true,
            overlay: true,
            outline: true,
            breadcrumb: true,
            search: true,
        }
    }

    #[must_use]
    /// Panels named in `names`; unknown names are ignored with a warning.
    pub fn from_names(names: &[String]) -> Self {
        let mut elements = Self {
            sidebar: false,
            overlay: false,
            outline: false,
            breadcrumb: false,
            search: false,
        };
        for name in names {
            match name.trim() {
                "sidebar" => elements.sidebar = true,
                "overlay" => elements.overlay = true,
                "outline" => elements.outline = true,
                "breadcrumb" => elements.breadcrumb = true,
                "search" => elements.search = true,
                other => tracing::warn!(panel = other, "unknown panel"),
            }
        }
        elements
    }
}

#[derive(Clone, Copy, Debug)]
/// Debounce delays, in milliseconds.
pub struct Delays {
    /// Scroll spy recomputation.
    pub scroll_spy_ms: u64,
    /// Search after typing.
    pub search_ms: u64,
    /// Overlay reaction to resizes.
    pub resize_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            scroll_spy_ms: SCROLL_SPY_DELAY_MS,
            search_ms: SEARCH_DELAY_MS,
            resize_ms: OVERLAY_RESIZE_DELAY_MS,
        }
    }
}

/// Everything the controller needs besides the document.
pub struct PageOptions {
    /// Panels present on the page.
    pub elements: PageElements,
    /// Persisted preferences.
    pub settings: Settings,
    /// Terminal size in cells.
    pub size: (u16, u16),
    /// Pixel size of a cell.
    pub metrics: CellMetrics,
    /// Fallback asset for failed images.
    pub fallback_image: String,
    /// Resolves image references.
    pub image_source: Box<dyn ImageSource>,
    /// Theme used when none is saved.
    pub system_theme: Theme,
    /// Debounce delays.
    pub delays: Delays,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Input understood by the page.
pub enum PageInput {
    /// Scroll by a number of rows; negative scrolls up.
    Scroll(i32),
    /// Scroll by a number of viewport heights.
    ScrollPages(i32),
    /// Jump back to the top of the page.
    BackToTop,
    /// Jump to the end of the page.
    ScrollToEnd,
    /// Focus the search box.
    FocusSearch,
    /// The search box now holds this text.
    SearchInput(String),
    /// Jump to the search result at this position.
    SelectResult(usize),
    /// Move the search result cursor by this many results.
    ResultCursor(isize),
    /// Menu button or sidebar shortcut.
    ToggleSidebar,
    /// Pointer pressed on the sidebar edge, at this x position in pixels.
    PointerDown(u32),
    /// Pointer moved while pressed.
    PointerMove(u32),
    /// Pointer released.
    PointerUp,
    /// Click on the overlay backdrop.
    BackdropClick,
    /// Follow a link to the section with this id.
    Navigate(String),
    /// Move the sidebar cursor by this many visible items.
    NavCursor(isize),
    /// Move the sidebar cursor to its parent.
    NavParent,
    /// Follow the link under the sidebar cursor.
    NavActivate,
    /// Expand or collapse the navigation item at this index.
    ToggleNavItem(usize),
    /// Collapse-all control.
    CollapseAll,
    /// The terminal now has this many columns and rows.
    ViewportResized(u16, u16),
    /// Theme toggle.
    ToggleTheme,
    /// Layout switcher: next layout.
    CycleLayout,
    /// Layout switcher: a specific layout.
    SetLayout(Layout),
    /// Larger text.
    FontIncrease,
    /// Smaller text.
    FontDecrease,
    /// Retry images that failed to load.
    ReloadImages,
    /// Escape key.
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Column widths of the panels drawn beside each other.
pub struct PanelWidths {
    /// Docked sidebar; 0 when hidden or on mobile.
    pub sidebar: u16,
    /// Content column.
    pub content: u16,
    /// Outline panel; 0 when hidden.
    pub outline: u16,
}

/// Runs one feature initializer, logging its failure instead of
/// propagating it.
fn isolate<T>(feature: &'static str, init: impl FnOnce() -> Result<Option<T>>) -> Option<T> {
    match init() {
        Ok(Some(value)) => {
            tracing::debug!(feature, "initialised");
            Some(value)
        }
        Ok(None) => {
            tracing::debug!(feature, "panel not on page, skipped");
            None
        }
        Err(e) => {
            tracing::error!(feature, error = %e, "initializer failed");
            None
        }
    }
}

/// Controller for one documentation page.
pub struct DocsController {
    doc: Document,
    title: String,
    elements: PageElements,
    settings: Settings,
    bus: EventBus,
    viewport: Viewport,
    page: PageLayout,
    offset: u32,
    spy: ScrollSpy,
    spy_debounce: Debouncer<u32>,
    index: Option<SearchIndex>,
    search_debounce: Debouncer<String>,
    query: String,
    outcome: SearchOutcome,
    result_cursor: usize,
    results_open: bool,
    search_focused: bool,
    sidebar: Option<SidebarManager>,
    overlay: Option<MobileOverlay>,
    outline: Option<Outline>,
    breadcrumb: Option<Breadcrumb>,
    theme: ThemeManager,
    layouts: LayoutSwitcher,
    listeners: PointerListeners,
    images: Option<ImageHandler>,
    image_source: Box<dyn ImageSource>,
    preloader: Preloader,
}

impl DocsController {
    #[must_use]
    /// Builds the page and runs every feature initializer.
    ///
    /// Initializers are independent: a missing panel skips its feature, and a
    /// failing initializer is logged while the others still run.
    pub fn new(mut doc: Document, title: impl Into<String>, options: PageOptions) -> Self {
        let PageOptions {
            elements,
            settings,
            size: (cols, rows),
            metrics,
            fallback_image,
            image_source,
            system_theme,
            delays,
        } = options;

        let font = settings.font_size();
        let viewport = Viewport::new(cols, rows, metrics).with_font(font);
        let is_mobile = viewport.is_mobile();

        let mut bus = EventBus::new();
        let theme = ThemeManager::init(&settings, system_theme);
        let layouts = LayoutSwitcher::init(&settings, &mut bus);

        let images = isolate("images", || {
            if fallback_image.trim().is_empty() {
                return Err(Error::Init {
                    feature: "images",
                    reason: "no fallback image configured".to_string(),
                });
            }
            let mut handler = ImageHandler::new(fallback_image);
            handler.apply(&mut doc.sections, image_source.as_ref());
            handler.watch_insertions();
            Ok(Some(handler))
        });
        let sidebar = isolate("sidebar", || {
            if !elements.sidebar {
                return Ok(None);
            }
            let mut sidebar = SidebarManager::new(&doc.sections, DEFAULT_WIDTH_PX);
            sidebar.restore(is_mobile, &settings);
            Ok(Some(sidebar))
        });
        let overlay = isolate("overlay", || {
            Ok(elements.overlay.then(|| MobileOverlay::new(delays.resize_ms)))
        });
        let outline = isolate("outline", || {
            Ok(elements.outline.then(|| Outline::build(&doc.sections)))
        });
        let title: String = title.into();
        let breadcrumb = isolate("breadcrumb", || {
            Ok(elements.breadcrumb.then(|| Breadcrumb::new(title.clone())))
        });
        let index = isolate("search", || {
            Ok(elements.search.then(|| SearchIndex::build(&doc.sections)))
        });
        let preloader = Preloader::new(&doc.sections);

        let mut controller = Self {
            page: PageLayout::default(),
            doc,
            title,
            elements,
            settings,
            bus,
            viewport,
            offset: 0,
            spy: ScrollSpy::default(),
            spy_debounce: Debouncer::new(delays.scroll_spy_ms),
            index,
            search_debounce: Debouncer::new(delays.search_ms),
            query: String::new(),
            outcome: SearchOutcome::Cleared,
            result_cursor: 0,
            results_open: false,
            search_focused: false,
            sidebar,
            overlay,
            outline,
            breadcrumb,
            theme,
            layouts,
            listeners: PointerListeners::new(),
            images,
            image_source,
            preloader,
        };
        controller.relayout();
        controller.run_spy();
        controller
    }

    /// Handles one input at clock time `now_ms`. Returns whether anything
    /// visible may have changed.
    pub fn handle(&mut self, input: PageInput, now_ms: u64) -> bool {
        match input {
            PageInput::Scroll(rows) => {
                let step = i64::from(self.viewport.rows_to_px(1));
                self.scroll_by(step * i64::from(rows), now_ms);
            }
            PageInput::ScrollPages(pages) => {
                let page = i64::from(self.content_height_px()) * 9 / 10;
                self.scroll_by(page * i64::from(pages), now_ms);
            }
            PageInput::BackToTop => self.scroll_to(0, now_ms),
            PageInput::ScrollToEnd => self.scroll_to(self.max_offset(), now_ms),
            PageInput::FocusSearch => {
                if self.index.is_none() {
                    return false;
                }
                self.search_focused = true;
                self.results_open = true;
            }
            PageInput::SearchInput(text) => return self.search_input(text, now_ms),
            PageInput::SelectResult(position) => return self.select_result(position, now_ms),
            PageInput::ResultCursor(delta) => return self.move_result_cursor(delta),
            PageInput::ToggleSidebar => return self.toggle_sidebar(),
            PageInput::PointerDown(x_px) => return self.pointer_down(x_px),
            PageInput::PointerMove(x_px) => return self.pointer_move(x_px),
            PageInput::PointerUp => return self.pointer_up(),
            PageInput::BackdropClick => {
                let Some(overlay) = self.overlay.as_mut() else {
                    return false;
                };
                let closed = overlay.backdrop_click();
                self.sync_sidebar();
                return closed;
            }
            PageInput::Navigate(id) => return self.navigate(&id, now_ms),
            PageInput::NavCursor(delta) => {
                let Some(sidebar) = self.sidebar.as_mut() else {
                    return false;
                };
                sidebar.tree_mut().move_cursor(delta);
            }
            PageInput::NavParent => {
                let Some(sidebar) = self.sidebar.as_mut() else {
                    return false;
                };
                sidebar.tree_mut().cursor_to_parent();
            }
            PageInput::NavActivate => {
                let target = self.sidebar.as_ref().and_then(|s| {
                    let tree = s.tree();
                    tree.cursor().map(|i| tree.items()[i].id.clone())
                });
                return target.is_some_and(|id| self.navigate(&id, now_ms));
            }
            PageInput::ToggleNavItem(index) => {
                let Some(sidebar) = self.sidebar.as_mut() else {
                    return false;
                };
                return sidebar.tree_mut().toggle_item(index).is_some();
            }
            PageInput::CollapseAll => {
                let Some(sidebar) = self.sidebar.as_mut() else {
                    return false;
                };
                sidebar.tree_mut().collapse_all();
            }
            PageInput::ViewportResized(cols, rows) => self.resize_viewport(cols, rows, now_ms),
            PageInput::ToggleTheme => {
                self.theme.toggle(&mut self.settings);
            }
            PageInput::CycleLayout => {
                self.layouts.cycle(&mut self.settings, &mut self.bus);
                self.relayout();
            }
            PageInput::SetLayout(layout) => {
                self.layouts.set(layout, &mut self.settings, &mut self.bus);
                self.relayout();
            }
            PageInput::FontIncrease => return self.step_font(true),
            PageInput::FontDecrease => return self.step_font(false),
            PageInput::ReloadImages => {
                return self.reload_failed_images() > 0;
            }
            PageInput::Escape => return self.escape(),
        }
        true
    }

    /// Runs debounced work that is due and advances the preloader. Returns
    /// whether anything visible may have changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        if self.spy_debounce.take_ready(now_ms).is_some() {
            changed |= self.run_spy();
        }
        if let Some(query) = self.search_debounce.take_ready(now_ms) {
            self.run_search(&query);
            changed = true;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.tick(now_ms) {
                self.sync_sidebar();
                changed = true;
            }
        }
        if !self.preloader.is_finished() {
            self.preloader.step(self.image_source.as_ref(), &mut self.bus);
            changed = true;
        }
        changed
    }

    #[must_use]
    /// Earliest clock time at which [`DocsController::tick`] has work.
    pub fn next_deadline(&self, now_ms: u64) -> Option<u64> {
        if !self.preloader.is_finished() {
            return Some(now_ms);
        }
        [
            self.spy_debounce.deadline(),
            self.search_debounce.deadline(),
            self.overlay.as_ref().and_then(MobileOverlay::deadline),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Replaces the document, e.g. after the files changed on disk.
    ///
    /// Image checks apply to the inserted sections through the image
    /// handler's insertion subscription.
    pub fn reload_document(&mut self, mut doc: Document) {
        if let Some(images) = &self.images {
            images.sections_inserted(&mut doc.sections, self.image_source.as_ref());
        }
        self.doc = doc;
        if let Some(sidebar) = self.sidebar.as_mut() {
            sidebar.rebuild(&self.doc.sections);
        }
        if let Some(outline) = self.outline.as_mut() {
            *outline = Outline::build(&self.doc.sections);
        }
        if let Some(breadcrumb) = self.breadcrumb.as_mut() {
            breadcrumb.current = None;
        }
        if let Some(index) = self.index.as_mut() {
            *index = SearchIndex::build(&self.doc.sections);
        }
        self.query.clear();
        self.outcome = SearchOutcome::Cleared;
        self.result_cursor = 0;
        self.search_debounce.cancel();
        self.preloader = Preloader::new(&self.doc.sections);
        self.spy.reset();
        self.relayout();
        self.run_spy();
        tracing::debug!(sections = self.doc.sections.len(), "document reloaded");
    }

    /// Retries every failed image. Returns how many were retried.
    pub fn reload_failed_images(&mut self) -> usize {
        let Some(images) = &self.images else {
            return 0;
        };
        let retried = images.reload_failed_images(&mut self.doc.sections, self.image_source.as_ref());
        if retried > 0 {
            self.relayout();
        }
        retried
    }

    fn scroll_by(&mut self, delta_px: i64, now_ms: u64) {
        let target = (i64::from(self.offset) + delta_px).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX), now_ms);
    }

    fn scroll_to(&mut self, offset: u32, now_ms: u64) {
        self.offset = offset.min(self.max_offset());
        self.spy_debounce.schedule(self.offset, now_ms);
    }

    fn navigate(&mut self, id: &str, now_ms: u64) -> bool {
        let Some(top) = self.page.section(id).map(|s| s.top) else {
            tracing::warn!(id, "link to unknown section");
            return false;
        };
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.navigate();
        }
        self.sync_sidebar();
        self.scroll_to(scroll_spy::anchor_target(top, self.max_offset()), now_ms);
        true
    }

    fn search_input(&mut self, text: String, now_ms: u64) -> bool {
        let Some(index) = &self.index else {
            return false;
        };
        self.query = text;
        if self.query.trim().is_empty() {
            self.search_debounce.cancel();
            self.outcome = index.search("", &mut self.doc.sections);
            self.result_cursor = 0;
            self.relayout();
        } else {
            self.search_debounce.schedule(self.query.clone(), now_ms);
        }
        true
    }

    fn run_search(&mut self, query: &str) {
        let Some(index) = &self.index else {
            return;
        };
        self.outcome = index.search(query, &mut self.doc.sections);
        self.result_cursor = 0;
        self.results_open = true;
        self.relayout();
    }

    fn select_result(&mut self, position: usize, now_ms: u64) -> bool {
        let SearchOutcome::Found { results, .. } = &self.outcome else {
            return false;
        };
        let Some(id) = results.get(position).map(|r| r.id.clone()) else {
            return false;
        };
        self.result_cursor = position;
        self.results_open = false;
        self.search_focused = false;
        self.navigate(&id, now_ms)
    }

    fn move_result_cursor(&mut self, delta: isize) -> bool {
        let count = self.results().len();
        if count == 0 {
            return false;
        }
        let next = self.result_cursor.saturating_add_signed(delta).min(count - 1);
        if next == self.result_cursor {
            return false;
        }
        self.result_cursor = next;
        self.results_open = true;
        true
    }

    fn toggle_sidebar(&mut self) -> bool {
        let is_mobile = self.viewport.is_mobile();
        let Some(sidebar) = self.sidebar.as_mut() else {
            return false;
        };
        match self.overlay.as_mut() {
            Some(overlay) => {
                sidebar.toggle(is_mobile, overlay, &mut self.settings);
            }
            None if !is_mobile => {
                sidebar.toggle(false, &mut MobileOverlay::default(), &mut self.settings);
            }
            None => return false,
        }
        self.relayout();
        true
    }

    fn pointer_down(&mut self, x_px: u32) -> bool {
        let Some(sidebar) = self.sidebar.as_mut() else {
            return false;
        };
        sidebar.start_resize(x_px, &mut self.listeners);
        true
    }

    fn pointer_move(&mut self, x_px: u32) -> bool {
        let mut changed = false;
        for target in self.listeners.targets(PointerPhase::Move) {
            match target {
                PointerTarget::SidebarResize => {
                    changed |= self
                        .sidebar
                        .as_mut()
                        .and_then(|s| s.resize_to(x_px))
                        .is_some();
                }
            }
        }
        if changed {
            self.relayout();
        }
        changed
    }

    fn pointer_up(&mut self) -> bool {
        let mut changed = false;
        for target in self.listeners.targets(PointerPhase::Release) {
            match target {
                PointerTarget::SidebarResize => {
                    if let Some(sidebar) = self.sidebar.as_mut() {
                        changed |= sidebar
                            .finish_resize(&mut self.listeners, &mut self.settings)
                            .is_some();
                    }
                }
            }
        }
        changed
    }

    fn resize_viewport(&mut self, cols: u16, rows: u16, now_ms: u64) {
        self.viewport = Viewport::new(cols, rows, self.viewport.metrics)
            .with_font(self.viewport.font_percent);
        let is_mobile = self.viewport.is_mobile();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.schedule_resize(is_mobile, now_ms);
        }
        self.relayout();
    }

    fn step_font(&mut self, larger: bool) -> bool {
        let current = self.viewport.font_percent;
        let next = if larger {
            (current + FONT_SIZE_STEP).min(MAX_FONT_SIZE)
        } else {
            current.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE)
        };
        if next == current {
            return false;
        }
        self.viewport = self.viewport.with_font(next);
        self.settings.set_font_size(next);
        tracing::debug!(font = next, "font size changed");
        self.relayout();
        true
    }

    fn escape(&mut self) -> bool {
        if self.search_focused || self.results_open {
            self.search_focused = false;
            self.results_open = false;
            return true;
        }
        let is_mobile = self.viewport.is_mobile();
        let closed = self
            .overlay
            .as_mut()
            .is_some_and(|overlay| overlay.escape(is_mobile));
        self.sync_sidebar();
        closed
    }

    fn sync_sidebar(&mut self) {
        if let (Some(sidebar), Some(overlay)) = (self.sidebar.as_mut(), self.overlay.as_ref()) {
            sidebar.sync_overlay(overlay);
        }
    }

    fn run_spy(&mut self) -> bool {
        let Some(index) = self.spy.refresh(&self.page.sections, self.offset) else {
            return false;
        };
        let Some(section) = self.doc.sections.get(index) else {
            return false;
        };
        if let Some(sidebar) = self.sidebar.as_mut() {
            sidebar.tree_mut().mark_active(&section.id);
        }
        if let Some(outline) = self.outline.as_mut() {
            outline.mark_active(&section.id);
        }
        if let Some(breadcrumb) = self.breadcrumb.as_mut() {
            breadcrumb.update(section);
        }
        true
    }

    fn relayout(&mut self) {
        let widths = self.panel_widths();
        self.page = PageLayout::build(&self.doc, widths.content.saturating_sub(2), &self.viewport);
        self.offset = self.offset.min(self.max_offset());
    }

    #[must_use]
    /// Column widths of the docked panels for the current state.
    pub fn panel_widths(&self) -> PanelWidths {
        let total = self.viewport.cols;
        let mobile = self.viewport.is_mobile();
        let layout = self.layouts.current();
        let sidebar = match &self.sidebar {
            Some(s) if !mobile && layout.shows_sidebar() && s.visible(false) => self
                .viewport
                .px_to_cols(s.state().width_px)
                .min(total / 2),
            _ => 0,
        };
        let outline = if !mobile && layout.shows_outline() && self.outline.is_some() {
            self.viewport.px_to_cols(OUTLINE_WIDTH_PX).min(total / 4)
        } else {
            0
        };
        PanelWidths {
            sidebar,
            content: total.saturating_sub(sidebar + outline),
            outline,
        }
    }

    #[must_use]
    /// Columns of the sidebar drawn over the content on mobile.
    pub fn overlay_width(&self) -> u16 {
        let width = self
            .sidebar
            .as_ref()
            .map_or(DEFAULT_WIDTH_PX, |s| s.state().width_px);
        self.viewport
            .px_to_cols(width)
            .min(self.viewport.cols.saturating_mul(4) / 5)
    }

    #[must_use]
    /// Height of the content area in pixels.
    pub fn content_height_px(&self) -> u32 {
        self.viewport
            .rows_to_px(usize::from(self.viewport.rows.saturating_sub(CHROME_ROWS)))
    }

    #[must_use]
    /// Largest scroll offset.
    pub fn max_offset(&self) -> u32 {
        self.page.height.saturating_sub(self.content_height_px())
    }

    #[must_use]
    /// Current scroll offset in pixels.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    /// First content line visible at the current offset.
    pub fn first_visible_line(&self) -> usize {
        self.viewport.px_to_row(self.offset)
    }

    #[must_use]
    /// Reading progress in percent.
    pub fn progress(&self) -> u16 {
        scroll_spy::reading_progress(self.offset, self.page.height, self.content_height_px())
    }

    #[must_use]
    /// Whether the back-to-top control is shown.
    pub fn back_to_top_visible(&self) -> bool {
        scroll_spy::back_to_top_visible(self.offset)
    }

    #[must_use]
    /// The page being shown.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    /// Page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    /// Laid out page.
    pub fn page(&self) -> &PageLayout {
        &self.page
    }

    #[must_use]
    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    /// Panels present on the page.
    pub fn elements(&self) -> PageElements {
        self.elements
    }

    #[must_use]
    /// Active section, if any.
    pub fn active_section(&self) -> Option<&Section> {
        self.spy.active().and_then(|i| self.doc.sections.get(i))
    }

    #[must_use]
    /// Sidebar, when present.
    pub fn sidebar(&self) -> Option<&SidebarManager> {
        self.sidebar.as_ref()
    }

    #[must_use]
    /// Mobile overlay, when present.
    pub fn overlay(&self) -> Option<&MobileOverlay> {
        self.overlay.as_ref()
    }

    #[must_use]
    /// Outline, when present.
    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    #[must_use]
    /// Breadcrumb, when present.
    pub fn breadcrumb(&self) -> Option<&Breadcrumb> {
        self.breadcrumb.as_ref()
    }

    #[must_use]
    /// Theme manager.
    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    #[must_use]
    /// Active layout.
    pub fn layout(&self) -> Layout {
        self.layouts.current()
    }

    #[must_use]
    /// Font size percentage.
    pub fn font_percent(&self) -> u32 {
        self.viewport.font_percent
    }

    #[must_use]
    /// Whether the search feature is initialised.
    pub fn has_search(&self) -> bool {
        self.index.is_some()
    }

    #[must_use]
    /// Text in the search box.
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    /// Outcome of the last search.
    pub fn search_outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    #[must_use]
    /// Results of the last search, empty unless something matched.
    pub fn results(&self) -> &[SearchResult] {
        match &self.outcome {
            SearchOutcome::Found { results, .. } => results,
            _ => &[],
        }
    }

    #[must_use]
    /// Position of the highlighted search result.
    pub fn result_cursor(&self) -> usize {
        self.result_cursor
    }

    #[must_use]
    /// Whether the results panel is shown.
    pub fn results_open(&self) -> bool {
        self.results_open && !matches!(self.outcome, SearchOutcome::Cleared)
    }

    #[must_use]
    /// Whether keystrokes go to the search box.
    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    #[must_use]
    /// Background image preload progress.
    pub fn preload_progress(&self) -> PreloadProgress {
        self.preloader.progress()
    }

    /// Page event bus.
    pub fn events(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    #[must_use]
    /// Registered pointer listeners.
    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    #[must_use]
    /// Persisted preferences.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
#[path = "tests/controller.rs"]
mod tests;
