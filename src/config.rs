//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a docspy.toml in the working directory and, if present, load
//! settings from there. Anything missing takes its default; a file that fails
//! to parse is reported and ignored.

use crate::controller::PageElements;
use crate::geometry::CellMetrics;
use facet::Facet;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "docspy.toml";

#[derive(Facet, Clone, Debug)]
/// Reader preferences loaded from docspy.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 10)]
    /// Pixel width of a terminal cell at 100% font size.
    pub cell_width_px: u32,
    #[facet(default = 20)]
    /// Pixel height of a terminal cell at 100% font size.
    pub cell_height_px: u32,
    #[facet(default = default_panels())]
    /// Panels present on the page: sidebar, overlay, outline, breadcrumb, search.
    pub panels: Vec<String>,
    #[facet(default = ".docspy-state.json".to_string())]
    /// JSON file holding persisted preferences.
    pub state_file: String,
    #[facet(default = "assets/default-image.png".to_string())]
    /// Asset shown in place of images that fail to load.
    pub fallback_image: String,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = 100)]
    /// Quiet period before the active section is recomputed.
    pub scroll_spy_delay_ms: u64,
    #[facet(default = 300)]
    /// Quiet period before a typed query is searched.
    pub search_delay_ms: u64,
    #[facet(default = 250)]
    /// Quiet period before the mobile overlay reacts to a resize.
    pub resize_delay_ms: u64,
}

fn default_panels() -> Vec<String> {
    PageElements::NAMES.iter().map(ToString::to_string).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_width_px: 10,
            cell_height_px: 20,
            panels: default_panels(),
            state_file: ".docspy-state.json".to_string(),
            fallback_image: "assets/default-image.png".to_string(),
            file_extensions: vec!["md".to_string()],
            scroll_spy_delay_ms: 100,
            search_delay_ms: 300,
            resize_delay_ms: 250,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from docspy.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    #[must_use]
    /// Cell metrics for pixel conversion.
    pub fn metrics(&self) -> CellMetrics {
        CellMetrics {
            width_px: self.cell_width_px.max(1),
            height_px: self.cell_height_px.max(1),
        }
    }

    #[must_use]
    /// Panels present on the page.
    pub fn elements(&self) -> PageElements {
        PageElements::from_names(&self.panels)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docspy.toml");
        std::fs::write(&path, "cell_width_px = 8\npanels = [\"search\"]\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.cell_width_px, 8);
        assert_eq!(config.cell_height_px, 20);
        assert_eq!(config.search_delay_ms, 300);
        let elements = config.elements();
        assert!(elements.search);
        assert!(!elements.sidebar);
    }

    #[test]
    fn test_missing_or_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(missing.file_extensions, vec!["md".to_string()]);

        let path = dir.path().join("docspy.toml");
        std::fs::write(&path, "cell_width_px = \"wide\"").unwrap();
        assert_eq!(Config::load_from(&path).cell_width_px, 10);
    }
}
