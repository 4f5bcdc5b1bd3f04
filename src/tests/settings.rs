use super::{
    FileStore, KeyValueStore, MemoryStore, Settings, FONT_SIZE_KEY, LAYOUT_KEY, SIDEBAR_KEY,
    SIDEBAR_WIDTH_KEY, THEME_KEY,
};
use crate::page_layout::Layout;
use crate::theme::Theme;

fn settings_with(entries: &[(&'static str, &'static str)]) -> Settings {
    Settings::new(MemoryStore::with_entries(entries.iter().copied()))
}

#[test]
fn test_defaults_when_empty() {
    let settings = Settings::in_memory();
    assert!(!settings.sidebar_collapsed());
    assert_eq!(settings.sidebar_width(), None);
    assert_eq!(settings.font_size(), 100);
    assert_eq!(settings.theme(), None);
    assert_eq!(settings.layout(), Layout::Layout1);
}

#[test]
fn test_malformed_values_fall_back() {
    let settings = settings_with(&[
        (SIDEBAR_KEY, "sideways"),
        (SIDEBAR_WIDTH_KEY, "wide"),
        (FONT_SIZE_KEY, "250"),
        (THEME_KEY, "sepia"),
        (LAYOUT_KEY, "layout9"),
    ]);
    assert!(!settings.sidebar_collapsed());
    assert_eq!(settings.sidebar_width(), None);
    assert_eq!(settings.font_size(), 100);
    assert_eq!(settings.theme(), None);
    assert_eq!(settings.layout(), Layout::Layout1);
}

#[test]
fn test_sidebar_width_is_clamped() {
    assert_eq!(settings_with(&[(SIDEBAR_WIDTH_KEY, "50")]).sidebar_width(), Some(200));
    assert_eq!(settings_with(&[(SIDEBAR_WIDTH_KEY, "999")]).sidebar_width(), Some(400));
    assert_eq!(settings_with(&[(SIDEBAR_WIDTH_KEY, "320px")]).sidebar_width(), Some(320));
}

#[test]
fn test_font_size_range_edges() {
    assert_eq!(settings_with(&[(FONT_SIZE_KEY, "80")]).font_size(), 80);
    assert_eq!(settings_with(&[(FONT_SIZE_KEY, "150")]).font_size(), 150);
    assert_eq!(settings_with(&[(FONT_SIZE_KEY, "70")]).font_size(), 100);
}

#[test]
fn test_setters_write_stored_strings() {
    let mut settings = Settings::in_memory();
    settings.set_sidebar_collapsed(true);
    settings.set_sidebar_width(280);
    settings.set_font_size(120);
    settings.set_theme(Theme::Dark);
    settings.set_layout(Layout::Layout3);

    assert_eq!(settings.raw(SIDEBAR_KEY).as_deref(), Some("collapsed"));
    assert_eq!(settings.raw(SIDEBAR_WIDTH_KEY).as_deref(), Some("280"));
    assert_eq!(settings.raw(FONT_SIZE_KEY).as_deref(), Some("120"));
    assert_eq!(settings.raw(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(settings.raw(LAYOUT_KEY).as_deref(), Some("layout3"));
    assert!(settings.sidebar_collapsed());
    assert_eq!(settings.layout(), Layout::Layout3);
}

#[test]
fn test_file_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut settings = Settings::new(FileStore::open(&path).unwrap());
    settings.set_theme(Theme::Light);
    settings.set_font_size(90);
    drop(settings);

    let reopened = Settings::new(FileStore::open(&path).unwrap());
    assert_eq!(reopened.theme(), Some(Theme::Light));
    assert_eq!(reopened.font_size(), 90);
}

#[test]
fn test_file_store_ignores_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json").unwrap();

    let mut store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(THEME_KEY), None);
    store.set(THEME_KEY, "dark").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed[THEME_KEY], "dark");
}
