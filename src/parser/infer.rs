//! Section type inference.
//!
//! Assigns a section's kind from its raw body using an ordered check
//! list: unique-environment kinds first, then kinds needing several
//! corroborating structural signals, then single-signal kinds, then the
//! generic list fallback. A failed parse of a more specific kind falls
//! through to the next matching check; only a body matching nothing at
//! all is captured raw as unknown.

use serde_yaml::Value;

use super::engine::Engine;
use super::paths::{get_path, get_path_str, set_path};
use crate::error::{Error, Result};
use crate::extract::{find_environments, to_plaintext};
use crate::model::{Section, SectionKind, Subsection};
use crate::patterns;
use crate::registry::TypeRegistry;

fn begin_marker(name: &str) -> String {
    format!("\\begin{{{name}}}")
}

/// The ordered list of kinds whose structural signals match the body.
pub fn candidate_kinds(content: &str) -> Vec<SectionKind> {
    let mut kinds = Vec::new();

    // Unique-environment kinds.
    if content.contains(&begin_marker(patterns::ENV_PROJECTS_MAIN)) {
        kinds.push(SectionKind::Projects);
    }
    if content.contains(&begin_marker(patterns::ENV_WORK_EXPERIENCE)) {
        kinds.push(SectionKind::WorkHistory);
    }
    if content.contains(&begin_marker(patterns::ENV_PERSONALITY)) {
        kinds.push(SectionKind::PersonalityAliasArray);
    }

    // Multi-signal kinds. Education is the category-list shape plus the
    // institution marker, so it must be checked first.
    let plain_itemize = content.contains(patterns::BEGIN_ITEMIZE_EXACT);
    let bracketed_item = patterns::ITEM_BRACKETED_RE.is_match(content);
    let small_caps = content.contains(patterns::SCSHAPE);

    if plain_itemize
        && bracketed_item
        && small_caps
        && content.contains(patterns::EDUCATION_INSTITUTION)
    {
        kinds.push(SectionKind::Education);
    }
    if plain_itemize && bracketed_item && small_caps {
        kinds.push(SectionKind::SkillCategories);
    }
    if content.contains(patterns::SETLENGTH)
        && content.contains(patterns::BASELINESKIP)
        && small_caps
    {
        kinds.push(SectionKind::SkillListCaps);
    }

    // Single-signal kinds.
    if content.contains('|') {
        kinds.push(SectionKind::SkillListPipes);
    }
    if plain_itemize {
        kinds.push(SectionKind::CustomItemize);
    }

    // Generic fallback: any environment at all.
    if content.contains("\\begin{") {
        kinds.push(SectionKind::SimpleList);
    }

    kinds
}

/// Parse a section body by inference, falling back through the candidate
/// list and finally to a raw unknown capture.
pub fn parse_section(registry: &TypeRegistry, name: &str, content: &str) -> Section {
    let name_plain = to_plaintext(name);

    for kind in candidate_kinds(content) {
        match parse_as(registry, kind, content) {
            Ok(body) => return Section::from_parts(name, name_plain, body),
            Err(err) => {
                log::warn!("section '{name_plain}' failed to parse as {kind}: {err}");
            }
        }
    }

    let mut body = Subsection::new(SectionKind::Unknown);
    set_path(&mut body.content, "raw", Value::from(content));
    Section::from_parts(name, name_plain, body)
}

/// Parse a body as a specific kind, with post-parse validation.
pub fn parse_as(registry: &TypeRegistry, kind: SectionKind, content: &str) -> Result<Subsection> {
    let engine = Engine::new(registry);

    let body = match kind {
        SectionKind::WorkHistory => {
            let spans = find_environments(content, patterns::ENV_WORK_EXPERIENCE)?;
            let mut body = Subsection::new(SectionKind::WorkHistory);
            body.subsections = spans
                .iter()
                .map(|span| {
                    engine.parse(SectionKind::WorkExperience, &content[span.start..span.end])
                })
                .collect::<Result<_>>()?;
            body
        }
        SectionKind::Unknown => {
            let mut body = Subsection::new(SectionKind::Unknown);
            set_path(&mut body.content, "raw", Value::from(content));
            body
        }
        _ => engine.parse(kind, content)?,
    };

    validate(kind, content, &body)?;
    Ok(body)
}

/// Required-field checks matching what each kind's consumers rely on.
fn validate(kind: SectionKind, content: &str, body: &Subsection) -> Result<()> {
    let missing = |field: &str| -> Error {
        Error::pattern_mismatch(kind.as_str(), &format!("required {field}"), content)
    };

    match kind {
        SectionKind::WorkHistory | SectionKind::Projects | SectionKind::SkillCategories => {
            if body.subsections.is_empty() {
                return Err(missing("subsections"));
            }
        }
        SectionKind::WorkExperience => {
            if get_path_str(&body.metadata, "company").is_none() {
                return Err(missing("metadata.company"));
            }
        }
        SectionKind::Project => {
            if get_path_str(&body.metadata, "name").is_none() {
                return Err(missing("metadata.name"));
            }
        }
        SectionKind::SkillListCaps | SectionKind::SkillListPipes => {
            if list_len(body, "list") == 0 {
                return Err(missing("content.list"));
            }
        }
        SectionKind::SkillCategory => {
            if get_path_str(&body.metadata, "name").is_none() {
                return Err(missing("metadata.name"));
            }
        }
        SectionKind::Education => {
            if get_path_str(&body.metadata, "institution").is_none() {
                return Err(missing("metadata.institution"));
            }
        }
        SectionKind::PersonalityAliasArray => {
            if get_path(&body.content, "items").is_none() {
                return Err(missing("content.items"));
            }
        }
        SectionKind::CustomItemize => {
            if list_len(body, "bullets") == 0 {
                return Err(missing("content.bullets"));
            }
        }
        SectionKind::SimpleList => {
            if get_path_str(&body.metadata, "environment").is_none() {
                return Err(missing("metadata.environment"));
            }
        }
        SectionKind::Unknown => {}
    }
    Ok(())
}

fn list_len(body: &Subsection, path: &str) -> usize {
    get_path(&body.content, path)
        .and_then(Value::as_sequence)
        .map_or(0, Vec::len)
}
