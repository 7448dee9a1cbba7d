//! Section-level types.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

pub use crate::extract::ContentItem;

/// Closed set of section content types.
///
/// The eleven known kinds, the generic list fallback and the raw-capture
/// unknown variant. The kind decides which parse operations and which
/// generation template apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Sequence of work-experience entries
    WorkHistory,
    /// One employment entry (organization, title, location, dates)
    WorkExperience,
    /// Nested project inside a work-experience entry
    Project,
    /// Standalone projects section
    Projects,
    /// Small-caps skill list in a brace group
    SkillListCaps,
    /// Pipe-separated monospace skill list
    SkillListPipes,
    /// One icon-labelled skill category
    SkillCategory,
    /// Itemized collection of skill categories
    SkillCategories,
    /// Education (institution header plus degree entries)
    Education,
    /// Icon/text personality rows
    PersonalityAliasArray,
    /// Vanilla itemize with arbitrary per-item markers
    CustomItemize,
    /// Generic fallback for unrecognized list environments
    SimpleList,
    /// Raw capture when nothing matches
    Unknown,
}

impl SectionKind {
    /// The serialized (snake_case) name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::WorkHistory => "work_history",
            SectionKind::WorkExperience => "work_experience",
            SectionKind::Project => "project",
            SectionKind::Projects => "projects",
            SectionKind::SkillListCaps => "skill_list_caps",
            SectionKind::SkillListPipes => "skill_list_pipes",
            SectionKind::SkillCategory => "skill_category",
            SectionKind::SkillCategories => "skill_categories",
            SectionKind::Education => "education",
            SectionKind::PersonalityAliasArray => "personality_alias_array",
            SectionKind::CustomItemize => "custom_itemize",
            SectionKind::SimpleList => "simple_list",
            SectionKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nested entry within a section (or within another subsection).
///
/// Work-experience entries under a work-history section, projects under a
/// work-experience entry, categories under a category section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Content type tag
    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Type-specific metadata fields
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub metadata: Mapping,

    /// Type-specific content fields
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub content: Mapping,

    /// Nested entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

impl Subsection {
    /// Create an empty subsection of the given kind.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            metadata: Mapping::new(),
            content: Mapping::new(),
            subsections: Vec::new(),
        }
    }
}

/// A named section within a page column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Display name with formatting preserved
    pub name: String,

    /// Display name with formatting stripped
    #[serde(default)]
    pub name_plain: String,

    /// Content type tag
    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Type-specific metadata fields
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub metadata: Mapping,

    /// Type-specific content fields
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub content: Mapping,

    /// Nested entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,

    /// Trailing spacing directive (`\vspace` argument), when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_after: Option<String>,
}

impl Section {
    /// Create a section from its name and a parsed body.
    pub fn from_parts(name: impl Into<String>, name_plain: impl Into<String>, body: Subsection) -> Self {
        Self {
            name: name.into(),
            name_plain: name_plain.into(),
            kind: body.kind,
            metadata: body.metadata,
            content: body.content,
            subsections: body.subsections,
            spacing_after: None,
        }
    }

    /// Borrow the section body as a [`Subsection`]-shaped view.
    pub fn body(&self) -> Subsection {
        Subsection {
            kind: self.kind,
            metadata: self.metadata.clone(),
            content: self.content.clone(),
            subsections: self.subsections.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let yaml = serde_yaml::to_string(&SectionKind::SkillListCaps).unwrap();
        assert_eq!(yaml.trim(), "skill_list_caps");

        let kind: SectionKind = serde_yaml::from_str("personality_alias_array").unwrap();
        assert_eq!(kind, SectionKind::PersonalityAliasArray);
    }

    #[test]
    fn test_kind_as_str_matches_serde() {
        for kind in [
            SectionKind::WorkHistory,
            SectionKind::Project,
            SectionKind::SimpleList,
            SectionKind::Unknown,
        ] {
            let yaml = serde_yaml::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
        }
    }

    #[test]
    fn test_subsection_roundtrips_through_yaml() {
        let mut sub = Subsection::new(SectionKind::WorkExperience);
        sub.metadata.insert("company".into(), "Acme".into());

        let yaml = serde_yaml::to_string(&sub).unwrap();
        let back: Subsection = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, sub);
    }

    #[test]
    fn test_empty_maps_are_omitted() {
        let sub = Subsection::new(SectionKind::Project);
        let yaml = serde_yaml::to_string(&sub).unwrap();
        assert!(!yaml.contains("metadata"));
        assert!(!yaml.contains("subsections"));
    }
}
