//! Persisted page preferences.
//!
//! Values live in a flat string key/value store, the page's equivalent of
//! browser local storage. [`Settings`] is the only reader and writer: every
//! key has one typed accessor that parses the stored string and falls back
//! to a documented default when the value is missing or malformed.
//!
//! | Key                  | Values                      | Default                 |
//! |----------------------|-----------------------------|-------------------------|
//! | `docs.sidebar`       | `open`, `collapsed`         | open                    |
//! | `docs.sidebar-width` | pixels, 200-400             | measured initial width  |
//! | `docs.font-size`     | percent, 80-150, step 10    | 100                     |
//! | `theme`              | `light`, `dark`             | system preference       |
//! | `layout`             | `layout1`..`layout3`        | `layout1`               |

use crate::error::Result;
use crate::page_layout::Layout;
use crate::sidebar::{MAX_WIDTH_PX, MIN_WIDTH_PX};
use crate::theme::Theme;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Sidebar open/collapsed flag.
pub const SIDEBAR_KEY: &str = "docs.sidebar";
/// Sidebar width in pixels.
pub const SIDEBAR_WIDTH_KEY: &str = "docs.sidebar-width";
/// Font size percentage.
pub const FONT_SIZE_KEY: &str = "docs.font-size";
/// Theme name.
pub const THEME_KEY: &str = "theme";
/// Layout name.
pub const LAYOUT_KEY: &str = "layout";

/// Default font size percentage.
pub const DEFAULT_FONT_SIZE: u32 = 100;
/// Smallest font size percentage.
pub const MIN_FONT_SIZE: u32 = 80;
/// Largest font size percentage.
pub const MAX_FONT_SIZE: u32 = 150;
/// Font size change per step.
pub const FONT_SIZE_STEP: u32 = 10;

/// Raw string storage behind [`Settings`].
pub trait KeyValueStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
/// Store kept in memory only.
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Creates a store holding `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
/// Store backed by a JSON object on disk, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file starts empty. A file that is not a JSON object of
    /// strings is ignored with a warning and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    #[must_use]
    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Typed access to the persisted preferences.
pub struct Settings {
    store: Box<dyn KeyValueStore>,
}

impl Settings {
    #[must_use]
    /// Wraps a key/value store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    #[must_use]
    /// Settings held in memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    #[must_use]
    /// Raw stored value, bypassing parsing.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn parsed<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let raw = self.store.get(key)?;
        let value = parse(raw.trim());
        if value.is_none() {
            tracing::warn!(key, value = %raw, "ignoring malformed setting");
        }
        value
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "failed to persist setting");
        }
    }

    #[must_use]
    /// Whether the desktop sidebar was left collapsed. Defaults to open.
    pub fn sidebar_collapsed(&self) -> bool {
        self.parsed(SIDEBAR_KEY, |v| match v {
            "collapsed" => Some(true),
            "open" => Some(false),
            _ => None,
        })
        .unwrap_or(false)
    }

    /// Persists the desktop sidebar state.
    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.persist(SIDEBAR_KEY, if collapsed { "collapsed" } else { "open" });
    }

    #[must_use]
    /// Saved sidebar width, clamped to the allowed range. `None` when
    /// nothing valid is stored, meaning the measured width stays.
    pub fn sidebar_width(&self) -> Option<u32> {
        self.parsed(SIDEBAR_WIDTH_KEY, |v| {
            v.trim_end_matches("px").parse::<u32>().ok()
        })
        .map(|w| w.clamp(MIN_WIDTH_PX, MAX_WIDTH_PX))
    }

    /// Persists the sidebar width.
    pub fn set_sidebar_width(&mut self, width_px: u32) {
        self.persist(SIDEBAR_WIDTH_KEY, &width_px.to_string());
    }

    #[must_use]
    /// Saved font size percentage, or 100 when missing or out of range.
    pub fn font_size(&self) -> u32 {
        self.parsed(FONT_SIZE_KEY, |v| {
            v.parse::<u32>()
                .ok()
                .filter(|s| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(s))
        })
        .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Persists the font size percentage.
    pub fn set_font_size(&mut self, percent: u32) {
        self.persist(FONT_SIZE_KEY, &percent.to_string());
    }

    #[must_use]
    /// Saved theme; `None` means follow the system preference.
    pub fn theme(&self) -> Option<Theme> {
        self.parsed(THEME_KEY, |v| v.parse().ok())
    }

    /// Persists the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.persist(THEME_KEY, theme.as_str());
    }

    #[must_use]
    /// Saved layout, or `layout1`.
    pub fn layout(&self) -> Layout {
        self.parsed(LAYOUT_KEY, |v| v.parse().ok()).unwrap_or_default()
    }

    /// Persists the layout.
    pub fn set_layout(&mut self, layout: Layout) {
        self.persist(LAYOUT_KEY, layout.as_str());
    }
}

#[cfg(test)]
#[path = "tests/settings.rs"]
mod tests;
