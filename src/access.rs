//! Semantic access layer: a read-only query façade over a parsed
//! document for content-selection logic.
//!
//! The output mode is fixed at construction: plain text for analysis,
//! markdown-equivalent rich text for display. Section text is rendered
//! lazily and cached on first access; the cache is a `RefCell` because
//! the converter core is single-threaded by design.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_yaml::Value;

use crate::extract::{to_markdown, to_plaintext, ContentItem};
use crate::model::{Document, Section, SectionKind, Subsection};
use crate::parser::paths::get_path;

/// How item and section text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Markdown-equivalent inline formatting preserved
    Rich,
    /// All formatting stripped
    Plain,
}

/// Which column a section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Left (narrow) column
    LeftColumn,
    /// Main column
    MainColumn,
}

/// One row of the section listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    /// Plain section name
    pub name: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Column the section sits in
    pub region: Region,
    /// Inferred content type
    pub kind: SectionKind,
}

/// Read-only view over a [`Document`].
pub struct DocumentView<'a> {
    doc: &'a Document,
    mode: TextMode,
    cache: RefCell<HashMap<(u32, Region, usize), String>>,
}

impl<'a> DocumentView<'a> {
    /// Create a view with the given output mode.
    pub fn new(doc: &'a Document, mode: TextMode) -> Self {
        Self {
            doc,
            mode,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Table-of-contents style listing of every section.
    pub fn outline(&self) -> Vec<SectionEntry> {
        let mut entries = Vec::new();
        for page in &self.doc.pages {
            for (region, column) in [
                (Region::LeftColumn, &page.regions.left_column),
                (Region::MainColumn, &page.regions.main_column),
            ] {
                let Some(column) = column else { continue };
                for section in &column.sections {
                    entries.push(SectionEntry {
                        name: section.name_plain.clone(),
                        page: page.number,
                        region,
                        kind: section.kind,
                    });
                }
            }
        }
        entries
    }

    /// List entries of every section whose name matches
    /// (case-insensitive). Non-list sections contribute nothing.
    pub fn section_items(&self, name: &str) -> Vec<String> {
        let wanted = name.to_lowercase();
        let mut items = Vec::new();
        for section in self.sections() {
            if section.name_plain.to_lowercase() == wanted {
                items.extend(self.items_of(section));
            }
        }
        items
    }

    /// Batch retrieval across several section names.
    pub fn items_for(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .flat_map(|name| self.section_items(name))
            .collect()
    }

    /// Full document text: every section's rendered text in order.
    pub fn full_text(&self) -> String {
        let mut parts = Vec::new();
        for page in &self.doc.pages {
            for (region, column) in [
                (Region::LeftColumn, &page.regions.left_column),
                (Region::MainColumn, &page.regions.main_column),
            ] {
                let Some(column) = column else { continue };
                for (index, section) in column.sections.iter().enumerate() {
                    parts.push(self.section_text(page.number, region, index, section));
                }
            }
        }
        parts.join("\n\n")
    }

    fn sections(&self) -> impl Iterator<Item = &Section> {
        self.doc.pages.iter().flat_map(|page| page.sections())
    }

    fn section_text(&self, page: u32, region: Region, index: usize, section: &Section) -> String {
        let key = (page, region, index);
        if let Some(cached) = self.cache.borrow().get(&key) {
            return cached.clone();
        }

        let mut lines = vec![section.name_plain.clone()];
        lines.extend(self.items_of(section));
        let text = lines.join("\n");

        self.cache.borrow_mut().insert(key, text.clone());
        text
    }

    fn render(&self, raw: &str) -> String {
        match self.mode {
            TextMode::Rich => to_markdown(raw),
            TextMode::Plain => to_plaintext(raw),
        }
    }

    fn item_text(&self, item: &ContentItem) -> String {
        match self.mode {
            TextMode::Rich => to_markdown(&item.raw),
            TextMode::Plain => item.plain.clone(),
        }
    }

    fn items_of(&self, section: &Section) -> Vec<String> {
        let body = section.body();
        self.items_of_node(section.kind, &body)
    }

    fn items_of_node(&self, kind: SectionKind, node: &Subsection) -> Vec<String> {
        match kind {
            SectionKind::WorkHistory | SectionKind::Projects => node
                .subsections
                .iter()
                .flat_map(|sub| self.items_of_node(sub.kind, sub))
                .collect(),
            SectionKind::WorkExperience | SectionKind::Project => {
                let mut items = self.content_items(node, "bullets");
                for sub in &node.subsections {
                    items.extend(self.items_of_node(sub.kind, sub));
                }
                items
            }
            SectionKind::SkillListCaps | SectionKind::SkillListPipes | SectionKind::SkillCategory => {
                self.string_items(node, "list")
            }
            SectionKind::SkillCategories => node
                .subsections
                .iter()
                .flat_map(|sub| self.items_of_node(sub.kind, sub))
                .collect(),
            SectionKind::Education => self.content_items(node, "degrees"),
            SectionKind::PersonalityAliasArray => {
                match get_path(&node.content, "items").and_then(Value::as_sequence) {
                    Some(rows) => rows
                        .iter()
                        .filter_map(|row| row.get("text").and_then(Value::as_str))
                        .map(|text| self.render(text))
                        .collect(),
                    None => Vec::new(),
                }
            }
            SectionKind::CustomItemize => self.content_items(node, "bullets"),
            SectionKind::SimpleList => self.content_items(node, "items"),
            SectionKind::Unknown => Vec::new(),
        }
    }

    fn content_items(&self, node: &Subsection, path: &str) -> Vec<String> {
        match get_path(&node.content, path) {
            Some(value) => serde_yaml::from_value::<Vec<ContentItem>>(value.clone())
                .map(|items| items.iter().map(|item| self.item_text(item)).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn string_items(&self, node: &Subsection, path: &str) -> Vec<String> {
        match get_path(&node.content, path).and_then(Value::as_sequence) {
            Some(values) => values
                .iter()
                .filter_map(Value::as_str)
                .map(|item| self.render(item))
                .collect(),
            None => Vec::new(),
        }
    }
}
