//! On-page outline ("on this page") and breadcrumb.

use crate::section::Section;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Link to a section in the outline panel.
pub struct OutlineLink {
    /// Target section id.
    pub id: String,
    /// Link text.
    pub title: String,
    /// Heading level, used for indentation.
    pub level: usize,
    /// Whether this link is the active one.
    pub active: bool,
}

#[derive(Clone, Debug, Default)]
/// Outline of the second- and third-level headings of the page.
pub struct Outline {
    links: Vec<OutlineLink>,
}

impl Outline {
    #[must_use]
    /// Builds the outline from the page's sections.
    pub fn build(sections: &[Section]) -> Self {
        let links = sections
            .iter()
            .filter(|s| (2..=3).contains(&s.level))
            .map(|s| OutlineLink {
                id: s.id.clone(),
                title: s.title.clone(),
                level: s.level,
                active: false,
            })
            .collect();
        Self { links }
    }

    #[must_use]
    /// Links in document order.
    pub fn links(&self) -> &[OutlineLink] {
        &self.links
    }

    /// Marks the link for `id` active and clears every other one. Sections
    /// without an outline link leave no link active.
    pub fn mark_active(&mut self, id: &str) {
        for link in &mut self.links {
            link.active = link.id == id;
        }
    }

    #[must_use]
    /// The active link, if any.
    pub fn active(&self) -> Option<&OutlineLink> {
        self.links.iter().find(|l| l.active)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Page title followed by the section being read.
pub struct Breadcrumb {
    /// Page title.
    pub root: String,
    /// Title of the active section.
    pub current: Option<String>,
}

impl Breadcrumb {
    #[must_use]
    /// Starts a breadcrumb for a page titled `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            current: None,
        }
    }

    /// Points the breadcrumb at `section`.
    pub fn update(&mut self, section: &Section) {
        self.current = Some(section.title.clone());
    }

    #[must_use]
    /// Display form, `root › current`.
    pub fn render(&self) -> String {
        match &self.current {
            Some(current) if *current != self.root => format!("{} › {current}", self.root),
            _ => self.root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Breadcrumb, Outline};
    use crate::section::Section;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("guide", "Guide", 1),
            Section::new("install", "Install", 2),
            Section::new("linux", "Linux", 3),
            Section::new("deep", "Deep", 4),
        ]
    }

    #[test]
    fn test_outline_keeps_levels_two_and_three() {
        let outline = Outline::build(&sections());
        let ids: Vec<_> = outline.links().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["install", "linux"]);
    }

    #[test]
    fn test_mark_active_is_exclusive() {
        let mut outline = Outline::build(&sections());
        outline.mark_active("install");
        outline.mark_active("linux");
        assert_eq!(outline.links().iter().filter(|l| l.active).count(), 1);
        assert_eq!(outline.active().map(|l| l.id.as_str()), Some("linux"));

        outline.mark_active("guide");
        assert!(outline.active().is_none());
    }

    #[test]
    fn test_breadcrumb_render() {
        let mut crumb = Breadcrumb::new("Guide");
        assert_eq!(crumb.render(), "Guide");
        crumb.update(&sections()[1]);
        assert_eq!(crumb.render(), "Guide › Install");
        crumb.update(&sections()[0]);
        assert_eq!(crumb.render(), "Guide");
    }
}
