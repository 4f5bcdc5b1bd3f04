//! Light/dark theme selection.
//!
//! The theme starts from the persisted choice, or from the terminal's
//! reported background when nothing valid was saved. Toggling persists the new
//! theme and swaps the toggle icon: a sun while dark (click for light), a moon
//! while light.

use crate::settings::Settings;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Colour scheme of the page.
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    #[must_use]
    /// Persisted name of the theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    /// Icon shown on the toggle while this theme is active.
    pub fn icon(self) -> ThemeIcon {
        match self {
            Self::Dark => ThemeIcon::Sun,
            Self::Light => ThemeIcon::Moon,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Glyph on the theme toggle.
pub enum ThemeIcon {
    /// Offered while dark.
    Sun,
    /// Offered while light.
    Moon,
}

impl ThemeIcon {
    #[must_use]
    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☾",
        }
    }
}

/// Theme implied by the terminal, read from `COLORFGBG`.
#[must_use]
pub fn system_preference() -> Theme {
    preference_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// Interprets a `COLORFGBG` value (`fg;bg` or `fg;x;bg`): background colours
/// 7 and 9-15 are light, everything else dark. Missing or unreadable values
/// mean dark.
#[must_use]
pub fn preference_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7 | 9..=15) => Theme::Light,
        _ => Theme::Dark,
    }
}

#[derive(Debug)]
/// Owns the active theme and its toggle icon.
pub struct ThemeManager {
    theme: Theme,
    icon: ThemeIcon,
}

impl ThemeManager {
    #[must_use]
    /// Applies the saved theme, or `system` when none is saved.
    pub fn init(settings: &Settings, system: Theme) -> Self {
        let theme = settings.theme().unwrap_or(system);
        Self {
            theme,
            icon: theme.icon(),
        }
    }

    #[must_use]
    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    /// Icon currently displayed on the toggle.
    pub fn icon(&self) -> ThemeIcon {
        self.icon
    }

    /// Switches to `theme`, persisting it and updating the icon.
    pub fn set(&mut self, theme: Theme, settings: &mut Settings) {
        self.theme = theme;
        self.icon = theme.icon();
        settings.set_theme(theme);
        tracing::debug!(%theme, "theme applied");
    }

    /// Flips between light and dark; returns the new theme.
    pub fn toggle(&mut self, settings: &mut Settings) -> Theme {
        let next = self.theme.toggled();
        self.set(next, settings);
        next
    }
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
