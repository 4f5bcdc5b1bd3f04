//! docspy: a terminal reader for markdown documentation pages.
//!
//! A page is parsed into sections, laid out in pixel-like units and driven by
//! a [`controller::DocsController`] that combines a scroll spy, an in-page
//! search with highlighting, a resizable sidebar with a mobile overlay, and
//! persisted theme, layout and font preferences.
#![allow(clippy::multiple_crate_versions)]

pub mod assets;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod formats;
pub mod geometry;
pub mod highlight;
pub mod input;
pub mod outline;
pub mod overlay;
pub mod page_layout;
pub mod pointer;
pub mod scroll_spy;
pub mod search;
pub mod section;
pub mod settings;
pub mod sidebar;
pub mod theme;
pub mod ui;
