//! Markup generation: the structural inverse of the parser.
//!
//! Every literal, environment and marker the parse configs expect is
//! exactly what these templates emit, so that parsing generated output
//! reproduces the structured input.

pub mod document;
pub(crate) mod templates;

use serde_yaml::Mapping;

pub use document::DocumentRenderer;

use crate::error::{Error, Result};
use crate::model::{ContentItem, Section, SectionKind, Subsection};
use crate::parser::paths::{get_path, get_path_str};
use crate::registry::TypeRegistry;

/// Borrowed view over a section or subsection body for rendering.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    /// Kind being rendered (used in error context)
    pub kind: SectionKind,
    /// Type-specific metadata
    pub metadata: &'a Mapping,
    /// Type-specific content
    pub content: &'a Mapping,
    /// Nested entries
    pub subsections: &'a [Subsection],
}

impl<'a> From<&'a Section> for NodeRef<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            kind: section.kind,
            metadata: &section.metadata,
            content: &section.content,
            subsections: &section.subsections,
        }
    }
}

impl<'a> From<&'a Subsection> for NodeRef<'a> {
    fn from(sub: &'a Subsection) -> Self {
        Self {
            kind: sub.kind,
            metadata: &sub.metadata,
            content: &sub.content,
            subsections: &sub.subsections,
        }
    }
}

impl<'a> NodeRef<'a> {
    /// A required string field; missing fields are fatal for generation.
    pub fn require(&self, map: &'a Mapping, path: &str) -> Result<&'a str> {
        get_path_str(map, path).ok_or_else(|| Error::MissingField {
            kind: self.kind.as_str().to_string(),
            field: path.to_string(),
        })
    }

    /// Content items stored at a content path (empty when absent).
    pub fn items(&self, path: &str) -> Result<Vec<ContentItem>> {
        match get_path(self.content, path) {
            None => Ok(Vec::new()),
            Some(value) => Ok(serde_yaml::from_value(value.clone())?),
        }
    }

    /// A required list of strings at a content path.
    pub fn string_list(&self, path: &str) -> Result<Vec<String>> {
        let value = get_path(self.content, path).ok_or_else(|| Error::MissingField {
            kind: self.kind.as_str().to_string(),
            field: format!("content.{path}"),
        })?;
        Ok(serde_yaml::from_value(value.clone())?)
    }
}

/// Template function signature: registry access allows nested dispatch.
pub type RenderFn = fn(&TypeRegistry, NodeRef<'_>) -> Result<String>;

/// Render a section body (without its `\section*` wrapper).
pub fn render_section_body(registry: &TypeRegistry, section: &Section) -> Result<String> {
    (registry.template(section.kind)?)(registry, NodeRef::from(section))
}

/// Render a nested subsection.
pub fn render_subsection(registry: &TypeRegistry, sub: &Subsection) -> Result<String> {
    (registry.template(sub.kind)?)(registry, NodeRef::from(sub))
}

/// Prefix every non-blank line with `indent`.
pub(crate) fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
