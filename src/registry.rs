//! Type registry: per-kind parse configs and generation templates.
//!
//! Built once and passed by reference to the parser engine, the document
//! assembler and the renderer. Constructing a fresh registry per test
//! keeps tests independent; lookups never mutate.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::SectionKind;
use crate::parser::config::{self, ParseConfig};
use crate::render::{templates, RenderFn};

struct TypeEntry {
    config: Option<&'static ParseConfig>,
    render: RenderFn,
}

/// Lookup table from section kind to its parse/generate artifacts.
pub struct TypeRegistry {
    entries: HashMap<SectionKind, TypeEntry>,
}

impl TypeRegistry {
    /// Build the registry with every known kind.
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        let mut add = |kind: SectionKind, config: Option<&'static ParseConfig>, render: RenderFn| {
            entries.insert(kind, TypeEntry { config, render });
        };

        add(SectionKind::WorkHistory, None, templates::work_history);
        add(
            SectionKind::WorkExperience,
            Some(&config::WORK_EXPERIENCE),
            templates::work_experience,
        );
        add(SectionKind::Project, Some(&config::PROJECT), templates::project);
        add(SectionKind::Projects, Some(&config::PROJECTS), templates::projects);
        add(
            SectionKind::SkillListCaps,
            Some(&config::SKILL_LIST_CAPS),
            templates::skill_list_caps,
        );
        add(
            SectionKind::SkillListPipes,
            Some(&config::SKILL_LIST_PIPES),
            templates::skill_list_pipes,
        );
        add(
            SectionKind::SkillCategory,
            Some(&config::SKILL_CATEGORY),
            templates::skill_category,
        );
        add(
            SectionKind::SkillCategories,
            Some(&config::SKILL_CATEGORIES),
            templates::skill_categories,
        );
        add(SectionKind::Education, Some(&config::EDUCATION), templates::education);
        add(
            SectionKind::PersonalityAliasArray,
            Some(&config::PERSONALITY_ALIAS_ARRAY),
            templates::personality_alias_array,
        );
        add(
            SectionKind::CustomItemize,
            Some(&config::CUSTOM_ITEMIZE),
            templates::custom_itemize,
        );
        add(
            SectionKind::SimpleList,
            Some(&config::SIMPLE_LIST),
            templates::simple_list,
        );
        add(SectionKind::Unknown, None, templates::unknown);

        Self { entries }
    }

    /// The ordered parse operations for a kind.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] when the kind has no engine config (the
    /// assembler handles such kinds structurally).
    pub fn parse_config(&self, kind: SectionKind) -> Result<&'static ParseConfig> {
        self.entries
            .get(&kind)
            .and_then(|entry| entry.config)
            .ok_or_else(|| Error::UnknownType(kind.as_str().to_string()))
    }

    /// The generation template for a kind.
    pub fn template(&self, kind: SectionKind) -> Result<RenderFn> {
        self.entries
            .get(&kind)
            .map(|entry| entry.render)
            .ok_or_else(|| Error::UnknownType(kind.as_str().to_string()))
    }

    /// Whether a kind has an engine parse config.
    pub fn has_parse_config(&self, kind: SectionKind) -> bool {
        self.entries
            .get(&kind)
            .is_some_and(|entry| entry.config.is_some())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
