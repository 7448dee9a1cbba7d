//! Document-level types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Page;
use crate::error::Result;

/// A parsed document: preamble metadata plus ordered pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Header metadata
    pub metadata: DocumentMetadata,

    /// Pages in order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Whether the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize to block-style YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Deserialize from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Preamble metadata.
///
/// Fields that may carry formatting are dual-stored: the raw value is
/// regenerated verbatim, the plain value serves text analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Display name, formatting preserved
    pub name: String,

    /// Display name, formatting stripped
    #[serde(default)]
    pub name_plain: String,

    /// Document date (verbatim string)
    #[serde(default)]
    pub date: String,

    /// Professional brand line, formatting preserved
    #[serde(default)]
    pub brand: String,

    /// Professional brand line, formatting stripped
    #[serde(default)]
    pub brand_plain: String,

    /// Summary paragraph, formatting preserved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Summary paragraph, formatting stripped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_plain: Option<String>,

    /// Declared line count of the summary block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_lines: Option<u32>,

    /// Highlight color name, when declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,

    /// Color scheme fields, in canonical order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, String>,

    /// Layout length parameters, in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub lengths: IndexMap<String, String>,

    /// All other metadata assignments, in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.get_page(1).is_none());
    }

    #[test]
    fn test_get_page_is_one_indexed() {
        let mut doc = Document::new();
        doc.pages.push(Page::new(1));
        doc.pages.push(Page::new(2));

        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.get_page(2).unwrap().number, 2);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut doc = Document::new();
        doc.metadata.name = r"\textbf{Ada Lovelace}".to_string();
        doc.metadata.name_plain = "Ada Lovelace".to_string();
        doc.metadata
            .colors
            .insert("emphcolor".to_string(), "NavyBlue".to_string());
        doc.pages.push(Page::new(1));

        let yaml = doc.to_yaml().unwrap();
        let back = Document::from_yaml(&yaml).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_color_order_survives_yaml() {
        let mut doc = Document::new();
        for color in ["emphcolor", "topbarcolor", "leftbarcolor"] {
            doc.metadata
                .colors
                .insert(color.to_string(), "black".to_string());
        }
        let yaml = doc.to_yaml().unwrap();
        let back = Document::from_yaml(&yaml).unwrap();
        let keys: Vec<&String> = back.metadata.colors.keys().collect();
        assert_eq!(keys, vec!["emphcolor", "topbarcolor", "leftbarcolor"]);
    }
}
