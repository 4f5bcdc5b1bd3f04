use super::{preference_from_colorfgbg, Theme, ThemeIcon, ThemeManager};
use crate::settings::{MemoryStore, Settings, THEME_KEY};

#[test]
fn test_saved_theme_beats_system() {
    let settings = Settings::new(MemoryStore::with_entries([(THEME_KEY, "light")]));
    let manager = ThemeManager::init(&settings, Theme::Dark);
    assert_eq!(manager.theme(), Theme::Light);
    assert_eq!(manager.icon(), ThemeIcon::Moon);
}

#[test]
fn test_system_used_without_saved_theme() {
    let settings = Settings::in_memory();
    let manager = ThemeManager::init(&settings, Theme::Dark);
    assert_eq!(manager.theme(), Theme::Dark);
    assert_eq!(manager.icon(), ThemeIcon::Sun);
    assert_eq!(settings.raw(THEME_KEY), None);
}

#[test]
fn test_double_toggle_restores_theme() {
    let mut settings = Settings::in_memory();
    let mut manager = ThemeManager::init(&settings, Theme::Light);

    assert_eq!(manager.toggle(&mut settings), Theme::Dark);
    assert_eq!(settings.raw(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(manager.icon(), ThemeIcon::Sun);

    assert_eq!(manager.toggle(&mut settings), Theme::Light);
    assert_eq!(settings.theme(), Some(manager.theme()));
    assert_eq!(manager.icon(), ThemeIcon::Moon);
}

#[test]
fn test_colorfgbg_parsing() {
    assert_eq!(preference_from_colorfgbg(Some("0;15")), Theme::Light);
    assert_eq!(preference_from_colorfgbg(Some("0;default;7")), Theme::Light);
    assert_eq!(preference_from_colorfgbg(Some("15;0")), Theme::Dark);
    assert_eq!(preference_from_colorfgbg(Some("garbage")), Theme::Dark);
    assert_eq!(preference_from_colorfgbg(None), Theme::Dark);
}
