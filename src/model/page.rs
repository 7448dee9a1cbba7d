//! Page-level types: the two-column layout unit and its regions.

use serde::{Deserialize, Serialize};

use super::Section;

/// A single page of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Whether a forced page break follows this page
    #[serde(default)]
    pub has_break_after: bool,

    /// Two-column layout regions
    pub regions: PageRegions,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            has_break_after: false,
            regions: PageRegions::default(),
        }
    }

    /// Whether this is a continuation page (no left column).
    pub fn is_continuation(&self) -> bool {
        self.regions.left_column.is_none()
    }

    /// All sections on the page, left column first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.regions
            .left_column
            .iter()
            .chain(self.regions.main_column.iter())
            .flat_map(|column| column.sections.iter())
    }
}

/// The regions of one two-column page.
///
/// A page with a left column carries exactly one column-switch marker in
/// the markup; continuation pages have only a main column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRegions {
    /// Full-width top region
    #[serde(default)]
    pub top: TopRegion,

    /// Left (narrow) column, absent on continuation pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_column: Option<Column>,

    /// Main column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_column: Option<Column>,

    /// Verbatim passthrough block (absolutely positioned bottom bar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<LiteralBlock>,

    /// Decorative commands removed from the content flow
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<Decoration>,
}

/// Full-width top region flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRegion {
    /// Whether the full-width summary is shown (page 1 only)
    #[serde(default)]
    pub show_summary: bool,
}

/// An ordered run of sections in one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Sections in document order
    pub sections: Vec<Section>,
}

impl Column {
    /// Wrap a section list in a column.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

/// A decorative page command (gradients, bars) with flat arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    /// Command name without backslash, e.g. `leftgrad`
    pub command: String,
    /// Brace arguments in order
    pub args: Vec<String>,
}

/// Markup stored verbatim and regenerated as-is, no parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralBlock {
    /// Raw markup content
    pub latex: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, SectionKind, Subsection};

    fn section(name: &str) -> Section {
        Section::from_parts(name, name, Subsection::new(SectionKind::Unknown))
    }

    #[test]
    fn test_continuation_detection() {
        let mut page = Page::new(2);
        page.regions.main_column = Some(Column::new(vec![section("More Experience")]));
        assert!(page.is_continuation());

        page.regions.left_column = Some(Column::new(vec![section("Core Skills")]));
        assert!(!page.is_continuation());
    }

    #[test]
    fn test_sections_iterates_left_then_main() {
        let mut page = Page::new(1);
        page.regions.left_column = Some(Column::new(vec![section("Skills")]));
        page.regions.main_column = Some(Column::new(vec![section("Experience")]));

        let names: Vec<&str> = page.sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Skills", "Experience"]);
    }
}
