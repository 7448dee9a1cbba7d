//! Operation-based parser engine.
//!
//! A single interpreter executing a section kind's ordered operation list
//! against raw markup. The engine owns no state between calls; every
//! parse gets a fresh context, and recursive parses of nested kinds get
//! their own.

use std::collections::HashMap;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use super::config::{
    EnvSelector, MarkerRule, ParseOp, RegexOutput, SourceRef, SplitOutput, SplitRule,
};
use super::paths::{get_path_str, set_path};
use crate::error::{Error, Result};
use crate::extract::{
    extract_balanced, extract_environment, find_environments, parse_item_entries,
    parse_items_balanced_markers, split_before_matches, unwrap_command,
};
use crate::model::{SectionKind, Subsection};
use crate::patterns;
use crate::registry::TypeRegistry;

/// Scratch state threaded through one parse call.
struct ParseContext {
    slots: HashMap<&'static str, Slot>,
    inherited_env: Option<String>,
}

enum Slot {
    Text(String),
    Chunks(Vec<String>),
}

/// The operation interpreter. Borrows the registry for nested-kind
/// configs.
pub struct Engine<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Engine<'r> {
    /// Create an engine over a registry.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Parse raw markup as the given kind.
    pub fn parse(&self, kind: SectionKind, raw: &str) -> Result<Subsection> {
        self.parse_inner(kind, raw, None)
    }

    fn parse_inner(
        &self,
        kind: SectionKind,
        raw: &str,
        inherited_env: Option<String>,
    ) -> Result<Subsection> {
        let config = self.registry.parse_config(kind)?;
        let mut result = Mapping::new();
        let mut context = ParseContext {
            slots: HashMap::new(),
            inherited_env,
        };

        for op in config.ops {
            self.run_op(kind, op, raw, &mut result, &mut context)
                .map_err(|e| match e {
                    wrapped @ Error::Parse { .. } => wrapped,
                    other => Error::Parse {
                        kind: kind.as_str().to_string(),
                        operation: op.name().to_string(),
                        source: Box::new(other),
                    },
                })?;
        }

        result.insert(
            Value::String("type".to_string()),
            Value::String(kind.as_str().to_string()),
        );
        Ok(serde_yaml::from_value(Value::Mapping(result))?)
    }

    fn run_op(
        &self,
        kind: SectionKind,
        op: &ParseOp,
        raw: &str,
        result: &mut Mapping,
        context: &mut ParseContext,
    ) -> Result<()> {
        match op {
            ParseOp::SetLiteral { path, value } => {
                set_path(result, path, Value::from(*value));
                Ok(())
            }
            ParseOp::ExtractEnvironment {
                env,
                params,
                optional_params,
                param_paths,
                name_path,
                output_context,
            } => self.extract_env_op(
                env,
                *params,
                *optional_params,
                param_paths,
                *name_path,
                *output_context,
                raw,
                result,
                context,
            ),
            ParseOp::Split {
                source,
                rule,
                cleanup,
                unwrap,
                output,
            } => split_op(*source, rule, *cleanup, *unwrap, *output, raw, result, context),
            ParseOp::RecursiveParse {
                source,
                env_pattern,
                nested,
                output_path,
            } => self.recursive_op(*source, env_pattern, *nested, output_path, raw, result, context),
            ParseOp::ParseItemizeContent {
                source,
                marker,
                output_path,
            } => {
                let text = context_text(context, source, raw);
                let items = match marker {
                    MarkerRule::Regex(pattern) => {
                        let re = compile(pattern);
                        parse_item_entries(&text, &re)?
                    }
                    MarkerRule::Balanced => parse_items_balanced_markers(&text),
                };
                let values: Vec<Value> = items
                    .iter()
                    .map(serde_yaml::to_value)
                    .collect::<std::result::Result<_, _>>()?;
                set_path(result, output_path, Value::Sequence(values));
                Ok(())
            }
            ParseOp::ExtractBracedAfterPattern {
                pattern,
                output_context,
            } => {
                let re = compile(pattern);
                let m = re
                    .find(raw)
                    .ok_or_else(|| Error::pattern_mismatch(kind.as_str(), pattern, raw))?;
                let (content, _) = extract_balanced(raw, '{', '}', m.end())?;
                context.slots.insert(*output_context, Slot::Text(content));
                Ok(())
            }
            ParseOp::ExtractRegex {
                source,
                pattern,
                output,
                required,
            } => regex_op(kind, *source, pattern, output, *required, raw, result, context),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn extract_env_op(
        &self,
        env: &EnvSelector,
        params: usize,
        optional_params: usize,
        param_paths: &[&str],
        name_path: Option<&str>,
        output_context: Option<&'static str>,
        raw: &str,
        result: &mut Mapping,
        context: &mut ParseContext,
    ) -> Result<()> {
        let name = match env {
            EnvSelector::Named(name) => (*name).to_string(),
            EnvSelector::AnyMatching(pattern) => first_env_name(raw, pattern)?,
            EnvSelector::Inherited => match &context.inherited_env {
                Some(name) => name.clone(),
                None => first_env_name(raw, patterns::ITEMIZE_VARIANT)?,
            },
        };

        let (values, body) = extract_environment(raw, &name, params, optional_params)?;
        for (path, value) in param_paths.iter().zip(values.iter()) {
            set_path(result, path, Value::from(value.as_str()));
        }
        if let Some(path) = name_path {
            set_path(result, path, Value::from(name.as_str()));
        }
        if let Some(slot) = output_context {
            context.slots.insert(slot, Slot::Text(body));
        }
        Ok(())
    }

    fn recursive_op(
        &self,
        source: &'static str,
        env_pattern: &str,
        nested: SectionKind,
        output_path: &str,
        raw: &str,
        result: &mut Mapping,
        context: &mut ParseContext,
    ) -> Result<()> {
        let chunks = match context.slots.get(source) {
            Some(Slot::Chunks(chunks)) => Some(chunks.clone()),
            _ => None,
        };

        let parsed: Vec<Subsection> = if let Some(chunks) = chunks {
            chunks
                .iter()
                .map(|chunk| self.parse_inner(nested, chunk, None))
                .collect::<Result<_>>()?
        } else {
            let text = context_text(context, source, raw);
            let spans = find_environments(&text, env_pattern)?;
            if spans.is_empty() {
                return Ok(());
            }

            // Excise the matched spans so later operations over this
            // buffer never see nested content as their own.
            let mut cleaned = text.clone();
            for span in spans.iter().rev() {
                cleaned.replace_range(span.start..span.end, "");
            }
            context.slots.insert(source, Slot::Text(cleaned));

            spans
                .iter()
                .map(|span| {
                    self.parse_inner(nested, &text[span.start..span.end], Some(span.name.clone()))
                })
                .collect::<Result<_>>()?
        };

        if !parsed.is_empty() {
            let values: Vec<Value> = parsed
                .iter()
                .map(serde_yaml::to_value)
                .collect::<std::result::Result<_, _>>()?;
            set_path(result, output_path, Value::Sequence(values));
        }
        Ok(())
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid configured pattern")
}

fn first_env_name(text: &str, name_pattern: &str) -> Result<String> {
    let re = compile(&format!(r"\\begin\{{({})\}}", name_pattern));
    re.captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::EnvironmentNotFound {
            name: name_pattern.to_string(),
            detail: "no matching \\begin found".to_string(),
        })
}

fn context_text(context: &ParseContext, slot: &str, raw: &str) -> String {
    match context.slots.get(slot) {
        Some(Slot::Text(text)) => text.clone(),
        Some(Slot::Chunks(chunks)) => chunks.join("\n"),
        None => raw.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn split_op(
    source: SourceRef,
    rule: &SplitRule,
    cleanup: Option<&str>,
    unwrap: Option<&str>,
    output: SplitOutput,
    raw: &str,
    result: &mut Mapping,
    context: &mut ParseContext,
) -> Result<()> {
    let text = match source {
        SourceRef::Input => raw.to_string(),
        SourceRef::Context(slot) => context_text(context, slot, raw),
        SourceRef::Path(path) => match get_path_str(result, path) {
            Some(value) => value.to_string(),
            None => return Ok(()),
        },
    };

    // A path-targeted split is bounded by the path count so extra
    // delimiter occurrences stay inside the last part instead of being
    // dropped.
    let limit = match output {
        SplitOutput::Paths(paths) => Some(paths.len()),
        _ => None,
    };

    let parts: Vec<String> = match (rule, limit) {
        (SplitRule::Literal(delim), Some(n)) => {
            text.splitn(n, delim).map(str::to_string).collect()
        }
        (SplitRule::Literal(delim), None) => text.split(delim).map(str::to_string).collect(),
        (SplitRule::Regex(pattern), Some(n)) => {
            compile(pattern).splitn(&text, n).map(str::to_string).collect()
        }
        (SplitRule::Regex(pattern), None) => {
            compile(pattern).split(&text).map(str::to_string).collect()
        }
        (SplitRule::BlankLines, _) => {
            compile(r"\n[ \t]*\n").split(&text).map(str::to_string).collect()
        }
        (SplitRule::BeforeMatches(pattern), _) => split_before_matches(&text, &compile(pattern)),
    };

    let cleanup_re = cleanup.map(compile);
    let parts: Vec<String> = parts
        .into_iter()
        .map(|part| {
            let mut part = match &cleanup_re {
                Some(re) => re.replace_all(&part, "").into_owned(),
                None => part,
            };
            if let Some(command) = unwrap {
                part = unwrap_command(&part, command);
            }
            part.trim().to_string()
        })
        .filter(|part| !part.is_empty())
        .collect();

    match output {
        SplitOutput::Paths(paths) => {
            for (path, part) in paths.iter().zip(parts.iter()) {
                set_path(result, path, Value::from(part.as_str()));
            }
        }
        SplitOutput::Path(path) => {
            let values = parts.into_iter().map(Value::String).collect();
            set_path(result, path, Value::Sequence(values));
        }
        SplitOutput::Context(slot) => {
            context.slots.insert(slot, Slot::Chunks(parts));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn regex_op(
    kind: SectionKind,
    source: SourceRef,
    pattern: &str,
    output: &RegexOutput,
    required: bool,
    raw: &str,
    result: &mut Mapping,
    context: &mut ParseContext,
) -> Result<()> {
    let text = match source {
        SourceRef::Input => raw.to_string(),
        SourceRef::Context(slot) => context_text(context, slot, raw),
        SourceRef::Path(path) => get_path_str(result, path).unwrap_or_default().to_string(),
    };
    let re = compile(pattern);

    match output {
        RegexOutput::Groups(mappings) => match re.captures(&text) {
            Some(caps) => {
                for (group, path) in *mappings {
                    if let Some(m) = caps.name(group) {
                        set_path(result, path, Value::from(m.as_str().trim()));
                    }
                }
                Ok(())
            }
            None if required => Err(Error::pattern_mismatch(kind.as_str(), pattern, &text)),
            None => Ok(()),
        },
        RegexOutput::List(path) => {
            let groups: Vec<&str> = re.capture_names().flatten().collect();
            let mut values = Vec::new();

            for caps in re.captures_iter(&text) {
                if groups.len() == 1 {
                    if let Some(m) = caps.name(groups[0]) {
                        values.push(Value::from(m.as_str().trim()));
                    }
                } else {
                    let mut entry = Mapping::new();
                    for group in &groups {
                        if let Some(m) = caps.name(group) {
                            entry.insert(
                                Value::String((*group).to_string()),
                                Value::from(m.as_str().trim()),
                            );
                        }
                    }
                    values.push(Value::Mapping(entry));
                }
            }

            if required && values.is_empty() {
                return Err(Error::pattern_mismatch(kind.as_str(), pattern, &text));
            }
            set_path(result, path, Value::Sequence(values));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::paths::get_path;
    use crate::registry::TypeRegistry;

    fn registry() -> TypeRegistry {
        TypeRegistry::new()
    }

    const WORK: &str = "\\begin{itemizeAcademic}{Acme}{Engineer\\\\Contractor}{Remote}{2020 -- 2022}\n\n    \\itemi First \\textbf{win}\n\n    \\itemi Second win\n\n    \\begin{itemizeAProject}{{\\large $\\bullet$}}{Pipeline}{2021}\n        \\itemii Project bullet\n    \\end{itemizeAProject}\n\n\\end{itemizeAcademic}";

    #[test]
    fn test_work_experience_parse() {
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::WorkExperience, WORK)
            .unwrap();

        assert_eq!(sub.kind, SectionKind::WorkExperience);
        assert_eq!(get_path_str(&sub.metadata, "company"), Some("Acme"));
        assert_eq!(get_path_str(&sub.metadata, "title"), Some("Engineer"));
        assert_eq!(get_path_str(&sub.metadata, "subtitle"), Some("Contractor"));
        assert_eq!(get_path_str(&sub.metadata, "dates"), Some("2020 -- 2022"));

        let bullets = get_path(&sub.content, "bullets").unwrap();
        let bullets = bullets.as_sequence().unwrap();
        assert_eq!(bullets.len(), 2);
        assert_eq!(
            bullets[0].get("raw").and_then(Value::as_str),
            Some(r"First \textbf{win}")
        );
        assert_eq!(
            bullets[0].get("plain").and_then(Value::as_str),
            Some("First win")
        );
    }

    #[test]
    fn test_nested_project_is_isolated() {
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::WorkExperience, WORK)
            .unwrap();

        assert_eq!(sub.subsections.len(), 1);
        let project = &sub.subsections[0];
        assert_eq!(project.kind, SectionKind::Project);
        assert_eq!(
            get_path_str(&project.metadata, "environment_type"),
            Some("itemizeAProject")
        );
        assert_eq!(get_path_str(&project.metadata, "name"), Some("Pipeline"));
        assert_eq!(
            get_path_str(&project.metadata, "bullet_symbol"),
            Some(r"{\large $\bullet$}")
        );

        // Project bullets must not leak into the parent bullet list.
        let parent_bullets = get_path(&sub.content, "bullets").unwrap();
        for bullet in parent_bullets.as_sequence().unwrap() {
            let raw = bullet.get("raw").and_then(Value::as_str).unwrap();
            assert!(!raw.contains("Project bullet"));
        }
    }

    #[test]
    fn test_title_split_keeps_tail_in_subtitle() {
        let latex = "\\begin{itemizeAcademic}{Acme}{Lead\\\\Staff\\\\Principal}{Remote}{2020}\n    \\itemi x\n\\end{itemizeAcademic}";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::WorkExperience, latex)
            .unwrap();
        assert_eq!(get_path_str(&sub.metadata, "title"), Some("Lead"));
        assert_eq!(
            get_path_str(&sub.metadata, "subtitle"),
            Some(r"Staff\\Principal")
        );
    }

    #[test]
    fn test_subtitle_unset_without_delimiter() {
        let latex = "\\begin{itemizeAcademic}{Acme}{Engineer}{Remote}{2020}\n    \\itemi Did things\n\\end{itemizeAcademic}";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::WorkExperience, latex)
            .unwrap();
        assert_eq!(get_path_str(&sub.metadata, "title"), Some("Engineer"));
        assert!(get_path(&sub.metadata, "subtitle").is_none());
    }

    #[test]
    fn test_simple_list_captures_environment_name() {
        let latex = "\\begin{mystery}\n    \\item One\n    \\item Two\n\\end{mystery}";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::SimpleList, latex)
            .unwrap();
        assert_eq!(get_path_str(&sub.metadata, "environment"), Some("mystery"));
        let items = get_path(&sub.content, "items").unwrap().as_sequence().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_skill_category_required_pattern() {
        let reg = registry();
        let err = Engine::new(&reg)
            .parse(SectionKind::SkillCategory, "no category header here")
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            Error::PatternMismatch { .. }
        ));
    }

    #[test]
    fn test_personality_items() {
        let latex = "\\begin{itemizeMain}\n    \\item[\\faTheaterMasks] Improv alum\n    \\item[\\faMicrophone] Karaoke regular\n\\end{itemizeMain}";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::PersonalityAliasArray, latex)
            .unwrap();
        let items = get_path(&sub.content, "items").unwrap().as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].get("icon").and_then(Value::as_str),
            Some(r"\faTheaterMasks")
        );
        assert_eq!(
            items[0].get("text").and_then(Value::as_str),
            Some("Improv alum")
        );
    }

    #[test]
    fn test_skill_list_caps_parse() {
        let latex = "{ \\setlength{\\baselineskip}{10pt} \\setlength{\\parskip}{7.5pt} \\scshape\n\n    Data Engineering\n\n    Distributed Systems\n\n}";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::SkillListCaps, latex)
            .unwrap();
        assert_eq!(get_path_str(&sub.metadata, "baselineskip"), Some("10pt"));
        let list = get_path(&sub.content, "list").unwrap().as_sequence().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].as_str(), Some("Data Engineering"));
    }

    #[test]
    fn test_skill_list_pipes_unwraps_texttt() {
        let latex = r"\texttt{Python} | \texttt{C++} | Bash";
        let reg = registry();
        let sub = Engine::new(&reg)
            .parse(SectionKind::SkillListPipes, latex)
            .unwrap();
        let list = get_path(&sub.content, "list").unwrap().as_sequence().unwrap();
        let items: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
        assert_eq!(items, vec!["Python", "C++", "Bash"]);
    }
}
