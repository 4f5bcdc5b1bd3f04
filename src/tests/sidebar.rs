use super::{clamp_width, SidebarManager, MAX_WIDTH_PX, MIN_WIDTH_PX};
use crate::overlay::{MenuIcon, MobileOverlay};
use crate::pointer::PointerListeners;
use crate::section::{link_hierarchy, Section};
use crate::settings::{MemoryStore, Settings, SIDEBAR_KEY, SIDEBAR_WIDTH_KEY};
use proptest::prelude::*;

fn sections() -> Vec<Section> {
    let mut sections = vec![
        Section::new("guide", "Guide", 1),
        Section::new("install", "Install", 2),
        Section::new("linux", "Linux", 3),
        Section::new("macos", "macOS", 3),
        Section::new("usage", "Usage", 2),
    ];
    link_hierarchy(&mut sections);
    sections
}

#[test]
fn test_desktop_toggle_collapses_and_persists() {
    let mut settings = Settings::in_memory();
    let mut overlay = MobileOverlay::default();
    let mut sidebar = SidebarManager::new(&sections(), 300);

    assert!(!sidebar.toggle(false, &mut overlay, &mut settings));
    assert!(sidebar.state().collapsed);
    assert_eq!(settings.raw(SIDEBAR_KEY).as_deref(), Some("collapsed"));
    assert!(!overlay.is_open());

    assert!(sidebar.toggle(false, &mut overlay, &mut settings));
    assert_eq!(settings.raw(SIDEBAR_KEY).as_deref(), Some("open"));
}

#[test]
fn test_mobile_toggle_opens_overlay_without_persisting() {
    let mut settings = Settings::in_memory();
    let mut overlay = MobileOverlay::default();
    let mut sidebar = SidebarManager::new(&sections(), 300);

    assert!(sidebar.toggle(true, &mut overlay, &mut settings));
    assert!(sidebar.state().is_open);
    assert!(overlay.backdrop_visible());
    assert_eq!(overlay.icon(), MenuIcon::Times);
    assert_eq!(settings.raw(SIDEBAR_KEY), None);
}

#[test]
fn test_restore_only_on_desktop() {
    let settings = Settings::new(MemoryStore::with_entries([
        (SIDEBAR_KEY, "collapsed"),
        (SIDEBAR_WIDTH_KEY, "900"),
    ]));

    let mut mobile = SidebarManager::new(&sections(), 300);
    mobile.restore(true, &settings);
    assert!(!mobile.state().collapsed);
    assert!(!mobile.state().is_open);
    assert_eq!(mobile.state().width_px, 300);

    let mut desktop = SidebarManager::new(&sections(), 300);
    desktop.restore(false, &settings);
    assert!(desktop.state().collapsed);
    assert_eq!(desktop.state().width_px, MAX_WIDTH_PX);
}

#[test]
fn test_drag_clamps_and_persists() {
    let mut settings = Settings::in_memory();
    let mut listeners = PointerListeners::new();
    let mut sidebar = SidebarManager::new(&sections(), 300);

    sidebar.start_resize(300, &mut listeners);
    assert_eq!(listeners.len(), 2);
    assert_eq!(sidebar.resize_to(350), Some(350));
    assert_eq!(sidebar.resize_to(10), Some(MIN_WIDTH_PX));
    assert_eq!(sidebar.resize_to(1_000), Some(MAX_WIDTH_PX));
    assert_eq!(sidebar.resize_to(320), Some(320));

    assert_eq!(sidebar.finish_resize(&mut listeners, &mut settings), Some(320));
    assert_eq!(settings.sidebar_width(), Some(320));
    assert_eq!(sidebar.resize_to(500), None);
}

#[test]
fn test_repeated_drags_leave_no_listeners() {
    let mut settings = Settings::in_memory();
    let mut listeners = PointerListeners::new();
    let mut sidebar = SidebarManager::new(&sections(), 300);

    for i in 0..50 {
        sidebar.start_resize(300, &mut listeners);
        sidebar.resize_to(300 + i);
        sidebar.finish_resize(&mut listeners, &mut settings);
    }
    assert!(listeners.is_empty());

    sidebar.start_resize(300, &mut listeners);
    sidebar.start_resize(310, &mut listeners);
    assert_eq!(listeners.len(), 2);
    sidebar.finish_resize(&mut listeners, &mut settings);
    assert!(listeners.is_empty());
}

#[test]
fn test_nav_tree_collapse() {
    let mut sidebar = SidebarManager::new(&sections(), 300);
    let tree = sidebar.tree_mut();
    assert_eq!(tree.visible_items(), vec![0, 1, 2, 3, 4]);

    assert_eq!(tree.toggle_item(1), Some(false));
    assert_eq!(tree.visible_items(), vec![0, 1, 4]);
    assert_eq!(tree.toggle_item(2), None);

    let glyph = tree.collapse_all_glyph();
    assert!(tree.collapse_all());
    assert_ne!(tree.collapse_all_glyph(), glyph);
    assert_eq!(tree.visible_items(), vec![0]);
    assert!(!tree.collapse_all());
    assert_eq!(tree.visible_items().len(), 5);
}

#[test]
fn test_mark_active_expands_ancestors() {
    let mut sidebar = SidebarManager::new(&sections(), 300);
    let tree = sidebar.tree_mut();
    tree.collapse_all();
    assert!(tree.mark_active("macos"));
    assert!(tree.visible_items().contains(&3));
    assert!(tree.mark_active("usage"));
    assert_eq!(tree.items().iter().filter(|i| i.active).count(), 1);
    assert!(!tree.mark_active("missing"));
    assert_eq!(tree.active().map(|i| i.id.as_str()), Some("usage"));
}

#[test]
fn test_cursor_moves_over_visible_items() {
    let mut sidebar = SidebarManager::new(&sections(), 300);
    let tree = sidebar.tree_mut();
    tree.toggle_item(1);
    tree.move_cursor(2);
    assert_eq!(tree.cursor(), Some(4));
    tree.move_cursor(10);
    assert_eq!(tree.cursor(), Some(4));
    tree.move_cursor(-1);
    assert_eq!(tree.cursor(), Some(1));
    tree.cursor_to_parent();
    assert_eq!(tree.cursor(), Some(0));
}

proptest! {
    #[test]
    fn prop_width_always_in_range(
        measured in 0u32..2_000,
        start_x in 0u32..3_000,
        moves in proptest::collection::vec(0u32..3_000, 1..20),
    ) {
        let mut settings = Settings::in_memory();
        let mut listeners = PointerListeners::new();
        let mut sidebar = SidebarManager::new(&[], measured);
        prop_assert!((MIN_WIDTH_PX..=MAX_WIDTH_PX).contains(&sidebar.state().width_px));

        sidebar.start_resize(start_x, &mut listeners);
        for x in moves {
            let width = sidebar.resize_to(x).unwrap_or_default();
            prop_assert!((MIN_WIDTH_PX..=MAX_WIDTH_PX).contains(&width));
        }
        sidebar.finish_resize(&mut listeners, &mut settings);
        prop_assert!(listeners.is_empty());
    }

    #[test]
    fn prop_clamp_width(width in i64::MIN / 2..i64::MAX / 2) {
        let clamped = clamp_width(width);
        prop_assert!((MIN_WIDTH_PX..=MAX_WIDTH_PX).contains(&clamped));
    }
}
