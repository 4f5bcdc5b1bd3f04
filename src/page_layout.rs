//! Page layout modes and switching between them.

use crate::events::{EventBus, PageEvent};
use crate::settings::Settings;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Arrangement of the page's panels.
pub enum Layout {
    /// Sidebar, content and outline.
    #[default]
    Layout1,
    /// Sidebar and content.
    Layout2,
    /// Compact: content only.
    Layout3,
}

impl Layout {
    /// Every layout, in switching order.
    pub const ALL: [Self; 3] = [Self::Layout1, Self::Layout2, Self::Layout3];

    #[must_use]
    /// Persisted name of the layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layout1 => "layout1",
            Self::Layout2 => "layout2",
            Self::Layout3 => "layout3",
        }
    }

    #[must_use]
    /// Layout after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Layout1 => Self::Layout2,
            Self::Layout2 => Self::Layout3,
            Self::Layout3 => Self::Layout1,
        }
    }

    #[must_use]
    /// Whether the sidebar panel is part of the layout.
    pub fn shows_sidebar(self) -> bool {
        !matches!(self, Self::Layout3)
    }

    #[must_use]
    /// Whether the outline panel is part of the layout.
    pub fn shows_outline(self) -> bool {
        matches!(self, Self::Layout1)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown layout {s:?}"))
    }
}

#[derive(Debug, Default)]
/// Applies layout choices and announces them.
pub struct LayoutSwitcher {
    current: Layout,
}

impl LayoutSwitcher {
    #[must_use]
    /// Restores the saved layout (or the default) and announces it.
    pub fn init(settings: &Settings, bus: &mut EventBus) -> Self {
        let current = settings.layout();
        bus.emit(PageEvent::LayoutChanged(current));
        Self { current }
    }

    #[must_use]
    /// Active layout.
    pub fn current(&self) -> Layout {
        self.current
    }

    /// Switches to `layout`, persisting it and emitting a layout-change event.
    pub fn set(&mut self, layout: Layout, settings: &mut Settings, bus: &mut EventBus) {
        self.current = layout;
        settings.set_layout(layout);
        bus.emit(PageEvent::LayoutChanged(layout));
    }

    /// Advances to the next layout.
    pub fn cycle(&mut self, settings: &mut Settings, bus: &mut EventBus) -> Layout {
        let next = self.current.next();
        self.set(next, settings, bus);
        next
    }
}
