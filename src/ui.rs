//! The UI renders the page controller into something visible and clickable.
//!
//! The frame is split into a top bar, the docked panels (sidebar, content,
//! outline) and a status bar. On mobile viewports the sidebar is drawn over
//! dimmed content instead of beside it. [`hit_test`] maps mouse clicks back
//! onto the same areas so every control on screen can be clicked.

use crate::controller::{DocsController, PageInput};
use crate::geometry::{Line as PageLine, LineKind};
use crate::search::SearchOutcome;
use crate::sidebar::NavTree;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const RESULTS_MAX_ROWS: u16 = 12;

#[derive(Clone, Copy, Debug)]
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
    accent: Color,
    code: Color,
    mark_fg: Color,
    mark_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::Gray,
                bg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                code: Color::Green,
                mark_fg: Color::Black,
                mark_bg: Color::Yellow,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                code: Color::Magenta,
                mark_fg: Color::Black,
                mark_bg: Color::LightYellow,
            },
        }
    }

    fn base(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Screen regions of the page for one frame.
pub struct Areas {
    /// Menu button, breadcrumb, search box, theme and font controls.
    pub top: Rect,
    /// Docked sidebar.
    pub sidebar: Option<Rect>,
    /// Content column.
    pub content: Rect,
    /// Outline panel.
    pub outline: Option<Rect>,
    /// Sidebar drawn over the content on mobile.
    pub overlay: Option<Rect>,
    /// Search results drawn over the top of the content.
    pub results: Option<Rect>,
    /// Progress and status line.
    pub status: Rect,
}

#[must_use]
/// Splits `full` into the page's regions.
pub fn areas(page: &DocsController, full: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(full);
    let widths = page.panel_widths();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(widths.sidebar),
            Constraint::Min(0),
            Constraint::Length(widths.outline),
        ])
        .split(rows[1]);

    let overlay = page
        .overlay()
        .filter(|o| o.is_open() && page.viewport().is_mobile())
        .map(|_| Rect {
            width: page.overlay_width().min(rows[1].width),
            ..rows[1]
        });
    let results = page.results_open().then(|| {
        let wanted = u16::try_from(page.results().len()).unwrap_or(u16::MAX);
        let height = wanted
            .max(1)
            .saturating_mul(2)
            .saturating_add(2)
            .min(RESULTS_MAX_ROWS)
            .min(columns[1].height);
        Rect { height, ..columns[1] }
    });

    Areas {
        top: rows[0],
        sidebar: (widths.sidebar > 0).then_some(columns[0]),
        content: columns[1],
        outline: (widths.outline > 0).then_some(columns[2]),
        overlay,
        results,
        status: rows[2],
    }
}

/// Renders the page.
pub fn draw(f: &mut Frame, page: &DocsController) {
    let palette = Palette::for_theme(page.theme().theme());
    let areas = areas(page, f.area());
    f.render_widget(Block::default().style(palette.base()), f.area());

    draw_top_bar(f, page, areas.top, palette);
    draw_content(f, page, areas.content, palette);
    if let Some(area) = areas.sidebar {
        draw_sidebar(f, page, area, palette, Borders::RIGHT);
    }
    if let Some(area) = areas.outline {
        draw_outline(f, page, area, palette);
    }
    if let Some(area) = areas.overlay {
        f.render_widget(Clear, area);
        draw_sidebar(f, page, area, palette, Borders::RIGHT);
    }
    if let Some(area) = areas.results {
        draw_results(f, page, area, palette);
    }
    draw_status(f, page, areas.status, palette);
}

fn draw_top_bar(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette) {
    let mut spans = Vec::new();
    if page.sidebar().is_some() {
        let glyph = page
            .overlay()
            .filter(|_| page.viewport().is_mobile())
            .map_or("☰", |o| o.icon().glyph());
        spans.push(Span::styled(format!(" {glyph} "), Style::default().fg(palette.accent)));
    }
    let crumb = page
        .breadcrumb()
        .map_or_else(|| page.title().to_string(), crate::outline::Breadcrumb::render);
    spans.push(Span::styled(crumb, Style::default().add_modifier(Modifier::BOLD)));

    let right = format!(
        "{}  {}%  {} ",
        search_box(page),
        page.font_percent(),
        page.theme().icon().glyph()
    );
    let used: usize = spans.iter().map(Span::width).sum();
    let pad = usize::from(area.width).saturating_sub(used + right.width());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(right, Style::default().fg(palette.muted)));

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.base().add_modifier(Modifier::REVERSED)),
        area,
    );
}

fn search_box(page: &DocsController) -> String {
    if !page.has_search() {
        return String::new();
    }
    if page.search_focused() {
        format!("[/ {}▏]", page.query())
    } else if page.query().is_empty() {
        "[/ search]".to_string()
    } else {
        format!("[/ {}]", page.query())
    }
}

fn line_style(kind: LineKind, palette: Palette) -> Style {
    match kind {
        LineKind::Heading(1) => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Heading(_) => Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        LineKind::Quote => Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        LineKind::Code => Style::default().fg(palette.code),
        LineKind::Image(true) => Style::default().fg(Color::Red),
        LineKind::Image(false) => Style::default().fg(palette.muted),
        LineKind::Paragraph | LineKind::ListItem(_) | LineKind::Blank => Style::default(),
    }
}

fn render_line(line: &PageLine, palette: Palette) -> Line<'static> {
    let style = line_style(line.kind, palette);
    let prefix = match line.kind {
        LineKind::ListItem(true) => "• ",
        LineKind::ListItem(false) | LineKind::Quote | LineKind::Code => "  ",
        LineKind::Image(_) => "🖼 ",
        _ => "",
    };
    let mut spans = vec![Span::styled(prefix, style)];
    spans.extend(line.runs.iter().map(|run| {
        if run.highlighted {
            Span::styled(
                run.text.clone(),
                style.fg(palette.mark_fg).bg(palette.mark_bg),
            )
        } else {
            Span::styled(run.text.clone(), style)
        }
    }));
    Line::from(spans)
}

fn draw_content(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette) {
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    let first = page.first_visible_line();
    let lines: Vec<Line> = page
        .page()
        .lines
        .iter()
        .skip(first)
        .take(usize::from(inner.height))
        .map(|l| render_line(l, palette))
        .collect();
    let mut style = palette.base();
    if page.overlay().is_some_and(crate::overlay::MobileOverlay::backdrop_visible) {
        style = style.add_modifier(Modifier::DIM);
    }
    f.render_widget(Paragraph::new(lines).style(style), inner);
}

/// First visible row of the navigation list when `height` rows are shown.
fn nav_scroll(tree: &NavTree, height: usize) -> usize {
    let visible = tree.visible_items();
    let cursor = tree
        .cursor()
        .and_then(|c| visible.iter().position(|&i| i == c))
        .unwrap_or(0);
    cursor.saturating_sub(height.saturating_sub(1))
}

fn nav_label(tree: &NavTree, index: usize) -> String {
    let item = &tree.items()[index];
    let indent = "  ".repeat(item.level.saturating_sub(1));
    let marker = match (item.has_children, item.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    format!("{indent}{marker}{}", item.title)
}

fn draw_sidebar(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette, borders: Borders) {
    let Some(sidebar) = page.sidebar() else {
        return;
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(if sidebar.is_resizing() {
            palette.accent
        } else {
            palette.muted
        }));
    let inner = block.inner(area);
    f.render_widget(block.style(palette.base()), area);
    if inner.height == 0 {
        return;
    }

    let tree = sidebar.tree();
    let header = Line::from(vec![
        Span::styled("Contents ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(tree.collapse_all_glyph(), Style::default().fg(palette.accent)),
    ]);
    f.render_widget(Paragraph::new(header), Rect { height: 1, ..inner });

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let skip = nav_scroll(tree, usize::from(list_area.height));
    let items: Vec<ListItem> = tree
        .visible_items()
        .into_iter()
        .skip(skip)
        .map(|i| {
            let item = &tree.items()[i];
            let mut style = Style::default();
            if item.active {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if tree.cursor() == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(nav_label(tree, i)).style(style)
        })
        .collect();
    f.render_widget(List::new(items), list_area);
}

fn draw_outline(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette) {
    let Some(outline) = page.outline() else {
        return;
    };
    let items: Vec<ListItem> = outline
        .links()
        .iter()
        .map(|link| {
            let indent = if link.level > 2 { "  " } else { "" };
            let style = if link.active {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            ListItem::new(format!("{indent}{}", link.title)).style(style)
        })
        .collect();
    let block = Block::default()
        .borders(Borders::LEFT)
        .title("On this page")
        .border_style(Style::default().fg(palette.muted));
    f.render_widget(List::new(items).block(block).style(palette.base()), area);
}

/// First result shown and how many fit in a results panel of `area`.
///
/// Each result takes two rows inside the border; the window scrolls so the
/// result cursor stays visible.
fn results_window(page: &DocsController, area: Rect) -> (usize, usize) {
    let fits = usize::from(area.height.saturating_sub(2) / 2).max(1);
    (page.result_cursor().saturating_sub(fits - 1), fits)
}

fn draw_results(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let (first, _) = results_window(page, area);
    let items: Vec<ListItem> = match page.search_outcome() {
        SearchOutcome::Found { results, .. } => results
            .iter()
            .enumerate()
            .skip(first)
            .map(|(i, r)| {
                let mut title = Style::default().add_modifier(Modifier::BOLD);
                if i == page.result_cursor() {
                    title = title.fg(palette.accent).add_modifier(Modifier::REVERSED);
                }
                ListItem::new(vec![
                    Line::styled(r.title.clone(), title),
                    Line::styled(r.snippet.clone(), Style::default().fg(palette.muted)),
                ])
            })
            .collect(),
        SearchOutcome::NoResults { query } => {
            vec![ListItem::new(format!("No results for \"{query}\""))]
        }
        SearchOutcome::Cleared => Vec::new(),
    };
    let title = match page.search_outcome() {
        SearchOutcome::Found { results, .. } => {
            format!("{}/{} results", page.result_cursor() + 1, results.len())
        }
        _ => "Search".to_string(),
    };
    f.render_widget(List::new(items).block(block.title(title)).style(palette.base()), area);
}

fn draw_status(f: &mut Frame, page: &DocsController, area: Rect, palette: Palette) {
    let mut parts = vec![format!(" {:>3}%", page.progress())];
    if page.back_to_top_visible() {
        parts.push("↑ top (g)".to_string());
    }
    match page.search_outcome() {
        SearchOutcome::Found { query, results } => {
            parts.push(format!("{} matches for \"{query}\"", results.len()));
        }
        SearchOutcome::NoResults { query } => parts.push(format!("no results for \"{query}\"")),
        SearchOutcome::Cleared => {}
    }
    let preload = page.preload_progress();
    if !preload.is_complete() {
        parts.push(format!("images {}/{}", preload.loaded, preload.total));
    }
    parts.push(page.layout().to_string());
    f.render_widget(
        Paragraph::new(parts.join("  │  ")).style(Style::default().fg(palette.muted).bg(palette.bg)),
        area,
    );
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

fn sidebar_click(page: &DocsController, area: Rect, col: u16, row: u16, docked: bool) -> Option<PageInput> {
    let sidebar = page.sidebar()?;
    if docked && col + 1 == area.x + area.width {
        return Some(PageInput::PointerDown(page.viewport().cols_to_px(col + 1)));
    }
    let tree = sidebar.tree();
    if row == area.y {
        return Some(PageInput::CollapseAll);
    }
    let height = usize::from(area.height.saturating_sub(1));
    let offset = usize::from(row - area.y - 1) + nav_scroll(tree, height);
    let index = *tree.visible_items().get(offset)?;
    let item = &tree.items()[index];
    let marker_col = area.x + u16::try_from(item.level.saturating_sub(1) * 2).unwrap_or(0);
    if item.has_children && (col == marker_col || col == marker_col + 1) {
        Some(PageInput::ToggleNavItem(index))
    } else {
        Some(PageInput::Navigate(item.id.clone()))
    }
}

#[must_use]
/// Maps a left click at `col`, `row` onto the control under it.
pub fn hit_test(page: &DocsController, full: Rect, col: u16, row: u16) -> Option<PageInput> {
    let areas = areas(page, full);
    if contains(areas.top, col, row) {
        if page.sidebar().is_some() && col < areas.top.x + 3 {
            return Some(PageInput::ToggleSidebar);
        }
        if col + 2 >= areas.top.x + areas.top.width {
            return Some(PageInput::ToggleTheme);
        }
        return page.has_search().then_some(PageInput::FocusSearch);
    }
    if let Some(area) = areas.overlay {
        if contains(area, col, row) {
            return sidebar_click(page, area, col, row, false);
        }
        if row >= areas.content.y && row < areas.status.y {
            return Some(PageInput::BackdropClick);
        }
    }
    if let Some(area) = areas.results {
        if contains(area, col, row) {
            if row == area.y || row + 1 == area.y + area.height {
                return None;
            }
            let (first, fits) = results_window(page, area);
            let shown = usize::from((row - area.y - 1) / 2);
            let position = first + shown;
            return (shown < fits && position < page.results().len())
                .then_some(PageInput::SelectResult(position));
        }
    }
    if let Some(area) = areas.sidebar {
        if contains(area, col, row) {
            return sidebar_click(page, area, col, row, true);
        }
    }
    if let Some(area) = areas.outline {
        if contains(area, col, row) {
            // The first row holds the panel title.
            let link = page
                .outline()?
                .links()
                .get(usize::from(row.checked_sub(area.y + 1)?))?;
            return Some(PageInput::Navigate(link.id.clone()));
        }
    }
    if contains(areas.status, col, row) && page.back_to_top_visible() {
        return Some(PageInput::BackToTop);
    }
    None
}

#[must_use]
/// Rows of content scrolled by one mouse wheel notch.
pub fn wheel_rows() -> i32 {
    3
}

#[cfg(test)]
mod tests {
    use super::{areas, draw, hit_test};
    use crate::assets::ImageSource;
    use crate::controller::{Delays, DocsController, PageElements, PageInput, PageOptions};
    use crate::geometry::CellMetrics;
    use crate::input::Document;
    use crate::section::{link_hierarchy, Section};
    use crate::settings::Settings;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    struct Always;

    impl ImageSource for Always {
        fn load(&self, _src: &str) -> bool {
            true
        }
    }

    fn page(cols: u16) -> DocsController {
        page_with(
            cols,
            vec![
                Section::new("intro", "Intro", 1),
                Section::new("install", "Install", 2),
                Section::new("usage", "Usage", 2),
            ],
        )
    }

    fn page_with(cols: u16, mut sections: Vec<Section>) -> DocsController {
        link_hierarchy(&mut sections);
        DocsController::new(
            Document {
                preamble: Vec::new(),
                sections,
            },
            "Guide",
            PageOptions {
                elements: PageElements::all(),
                settings: Settings::in_memory(),
                size: (cols, 30),
                metrics: CellMetrics::default(),
                fallback_image: "assets/default.png".to_string(),
                image_source: Box::new(Always),
                system_theme: Theme::Light,
                delays: Delays::default(),
            },
        )
    }

    #[test]
    fn test_desktop_areas_and_edge_drag() {
        let page = page(200);
        let full = Rect::new(0, 0, 200, 30);
        let areas = areas(&page, full);
        let sidebar = areas.sidebar.unwrap();
        assert_eq!(sidebar.width, 30);
        assert!(areas.overlay.is_none());

        let edge = sidebar.x + sidebar.width - 1;
        assert_eq!(
            hit_test(&page, full, edge, 5),
            Some(PageInput::PointerDown(300))
        );
        assert_eq!(
            hit_test(&page, full, 6, 3),
            Some(PageInput::Navigate("install".to_string()))
        );
        assert_eq!(hit_test(&page, full, 1, 0), Some(PageInput::ToggleSidebar));
    }

    #[test]
    fn test_mobile_backdrop_click() {
        let mut page = page(80);
        let full = Rect::new(0, 0, 80, 30);
        assert!(areas(&page, full).sidebar.is_none());

        page.handle(PageInput::ToggleSidebar, 0);
        let overlay = areas(&page, full).overlay.unwrap();
        assert_eq!(
            hit_test(&page, full, overlay.width + 5, 10),
            Some(PageInput::BackdropClick)
        );
    }

    #[test]
    fn test_outline_click_under_title() {
        let page = page(200);
        let full = Rect::new(0, 0, 200, 30);
        let outline = areas(&page, full).outline.unwrap();
        let col = outline.x + 2;

        assert_eq!(hit_test(&page, full, col, outline.y), None);
        assert_eq!(
            hit_test(&page, full, col, outline.y + 1),
            Some(PageInput::Navigate("install".to_string()))
        );
        assert_eq!(
            hit_test(&page, full, col, outline.y + 2),
            Some(PageInput::Navigate("usage".to_string()))
        );
        assert_eq!(hit_test(&page, full, col, outline.y + 3), None);
    }

    #[test]
    fn test_results_panel_scrolls_to_cursor() {
        let sections = (0..8)
            .map(|i| Section::new(format!("common-{i}"), format!("Common {i}"), 2))
            .collect();
        let mut page = page_with(200, sections);
        let full = Rect::new(0, 0, 200, 30);
        page.handle(PageInput::FocusSearch, 0);
        page.handle(PageInput::SearchInput("common".to_string()), 0);
        page.tick(300);
        assert_eq!(page.results().len(), 8);

        let panel = areas(&page, full).results.unwrap();
        assert_eq!(panel.height, 12);
        let col = panel.x + 5;
        assert_eq!(hit_test(&page, full, col, panel.y), None);
        assert_eq!(hit_test(&page, full, col, panel.y + panel.height - 1), None);
        assert_eq!(
            hit_test(&page, full, col, panel.y + 1),
            Some(PageInput::SelectResult(0))
        );
        assert_eq!(
            hit_test(&page, full, col, panel.y + 9),
            Some(PageInput::SelectResult(4))
        );

        for _ in 0..7 {
            page.handle(PageInput::ResultCursor(1), 400);
        }
        assert_eq!(page.result_cursor(), 7);
        assert_eq!(
            hit_test(&page, full, col, panel.y + 9),
            Some(PageInput::SelectResult(7))
        );
        assert_eq!(
            hit_test(&page, full, col, panel.y + 1),
            Some(PageInput::SelectResult(3))
        );
    }

    #[test]
    fn test_status_bar_lists_only_bound_hints() {
        let page = page(200);
        let mut terminal = Terminal::new(TestBackend::new(200, 30)).unwrap();
        terminal.draw(|f| draw(f, &page)).unwrap();

        let buffer = terminal.backend().buffer();
        let status: String = (0..200u16).map(|x| buffer[(x, 29)].symbol().to_string()).collect();
        assert!(status.contains("layout1"), "{status}");
        assert!(!status.contains("help"), "{status}");
    }
}
