//! Parse-operation configuration: the declarative data the engine
//! interprets.
//!
//! Each section kind owns an ordered operation list. Operations are plain
//! values — the engine is a single interpreter over them, never generated
//! code. Order is load-bearing: later operations read context buffers
//! that earlier operations shrink.

use crate::model::SectionKind;
use crate::patterns;

/// Where an operation reads its input text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRef {
    /// The raw text the engine was invoked with
    Input,
    /// A named context slot
    Context(&'static str),
    /// A string already written at a dotted output path
    Path(&'static str),
}

/// How an environment is selected for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSelector {
    /// Exact environment name
    Named(&'static str),
    /// First environment whose name matches this pattern
    AnyMatching(&'static str),
    /// Name handed down by the enclosing recursive parse; falls back to
    /// the first `itemize` variant when parsed standalone
    Inherited,
}

/// How a split operation divides its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// Split on a literal delimiter
    Literal(&'static str),
    /// Split on a regex delimiter
    Regex(&'static str),
    /// Split on blank lines
    BlankLines,
    /// Cut before every match, keeping the match with its chunk
    BeforeMatches(&'static str),
}

/// Where split results go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutput {
    /// First N parts to N dotted paths; missing parts leave paths unset
    Paths(&'static [&'static str]),
    /// All parts as a string list at one path
    Path(&'static str),
    /// All parts as chunks in a context slot
    Context(&'static str),
}

/// How list-item markers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRule {
    /// Regex with a named `marker` capture group
    Regex(&'static str),
    /// `\item` markers whose brackets may nest braces
    Balanced,
}

/// Where regex captures go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexOutput {
    /// First match: each named group to its mapped path
    Groups(&'static [(&'static str, &'static str)]),
    /// Every match as a list at one path (strings for a single group,
    /// mappings for several)
    List(&'static str),
}

/// One parse operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOp {
    /// Write a constant at a dotted path.
    SetLiteral {
        path: &'static str,
        value: &'static str,
    },

    /// Locate an environment, store its parameters and body.
    ExtractEnvironment {
        env: EnvSelector,
        params: usize,
        optional_params: usize,
        /// Paths for the parameter values (optional first, then mandatory)
        param_paths: &'static [&'static str],
        /// Path receiving the environment's name, when wanted
        name_path: Option<&'static str>,
        /// Context slot receiving the body
        output_context: Option<&'static str>,
    },

    /// Split a string and distribute the parts.
    Split {
        source: SourceRef,
        rule: SplitRule,
        /// Regex removed from every part before trimming
        cleanup: Option<&'static str>,
        /// Wrapper command unwrapped from every part
        unwrap: Option<&'static str>,
        output: SplitOutput,
    },

    /// Parse nested structures with another kind's config, removing each
    /// matched span from the context buffer so later operations never
    /// re-consume it.
    RecursiveParse {
        source: &'static str,
        env_pattern: &'static str,
        nested: SectionKind,
        output_path: &'static str,
    },

    /// Scan marker-delimited list items into content-item triples.
    ParseItemizeContent {
        source: &'static str,
        marker: MarkerRule,
        output_path: &'static str,
    },

    /// Find a pattern that consumes an opening brace, then take the
    /// balanced group that follows it.
    ExtractBracedAfterPattern {
        pattern: &'static str,
        output_context: &'static str,
    },

    /// Match a regex with named capture groups.
    ExtractRegex {
        source: SourceRef,
        pattern: &'static str,
        output: RegexOutput,
        /// Whether a missing match aborts the parse
        required: bool,
    },
}

impl ParseOp {
    /// Operation name used in error context.
    pub fn name(&self) -> &'static str {
        match self {
            ParseOp::SetLiteral { .. } => "set_literal",
            ParseOp::ExtractEnvironment { .. } => "extract_environment",
            ParseOp::Split { .. } => "split",
            ParseOp::RecursiveParse { .. } => "recursive_parse",
            ParseOp::ParseItemizeContent { .. } => "parse_itemize_content",
            ParseOp::ExtractBracedAfterPattern { .. } => "extract_braced_after_pattern",
            ParseOp::ExtractRegex { .. } => "extract_regex",
        }
    }
}

/// The ordered operation list for one section kind.
#[derive(Debug, Clone, Copy)]
pub struct ParseConfig {
    pub kind: SectionKind,
    pub ops: &'static [ParseOp],
}

const ENV_BODY: &str = "environment_content";

pub static WORK_EXPERIENCE: ParseConfig = ParseConfig {
    kind: SectionKind::WorkExperience,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "work_experience",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_WORK_EXPERIENCE),
            params: 4,
            optional_params: 0,
            param_paths: &[
                "metadata.company",
                "metadata.title",
                "metadata.location",
                "metadata.dates",
            ],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        // A title of the form "Title\\Subtitle" splits in two; without the
        // delimiter the subtitle path stays unset.
        ParseOp::Split {
            source: SourceRef::Path("metadata.title"),
            rule: SplitRule::Literal(r"\\"),
            cleanup: None,
            unwrap: None,
            output: SplitOutput::Paths(&["metadata.title", "metadata.subtitle"]),
        },
        // Nested projects come out before bullet scanning; their spans are
        // removed from the buffer so project bullets never surface as
        // top-level bullets.
        ParseOp::RecursiveParse {
            source: ENV_BODY,
            env_pattern: patterns::ITEMIZE_VARIANT,
            nested: SectionKind::Project,
            output_path: "subsections",
        },
        ParseOp::ParseItemizeContent {
            source: ENV_BODY,
            marker: MarkerRule::Regex(patterns::ITEM_ALPHABETIC),
            output_path: "content.bullets",
        },
    ],
};

pub static PROJECT: ParseConfig = ParseConfig {
    kind: SectionKind::Project,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "project",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Inherited,
            params: 3,
            optional_params: 0,
            param_paths: &["metadata.bullet_symbol", "metadata.name", "metadata.dates"],
            name_path: Some("metadata.environment_type"),
            output_context: Some(ENV_BODY),
        },
        ParseOp::ParseItemizeContent {
            source: ENV_BODY,
            marker: MarkerRule::Regex(patterns::ITEM_ALPHABETIC),
            output_path: "content.bullets",
        },
    ],
};

pub static PROJECTS: ParseConfig = ParseConfig {
    kind: SectionKind::Projects,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "projects",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_PROJECTS_MAIN),
            params: 0,
            optional_params: 0,
            param_paths: &[],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::RecursiveParse {
            source: ENV_BODY,
            env_pattern: patterns::ITEMIZE_VARIANT,
            nested: SectionKind::Project,
            output_path: "subsections",
        },
    ],
};

pub static SKILL_LIST_CAPS: ParseConfig = ParseConfig {
    kind: SectionKind::SkillListCaps,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "skill_list_caps",
        },
        ParseOp::ExtractBracedAfterPattern {
            pattern: r"\{",
            output_context: "block",
        },
        ParseOp::ExtractRegex {
            source: SourceRef::Context("block"),
            pattern: r"\\setlength\{\\baselineskip\}\{(?P<baselineskip>[^}]*)\}\s*\\setlength\{\\parskip\}\{(?P<parskip>[^}]*)\}",
            output: RegexOutput::Groups(&[
                ("baselineskip", "metadata.baselineskip"),
                ("parskip", "metadata.parskip"),
            ]),
            required: true,
        },
        ParseOp::Split {
            source: SourceRef::Context("block"),
            rule: SplitRule::BlankLines,
            cleanup: Some(
                r"\\setlength\{\\baselineskip\}\{[^}]*\}|\\setlength\{\\parskip\}\{[^}]*\}|\\scshape",
            ),
            unwrap: None,
            output: SplitOutput::Path("content.list"),
        },
    ],
};

pub static SKILL_LIST_PIPES: ParseConfig = ParseConfig {
    kind: SectionKind::SkillListPipes,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "skill_list_pipes",
        },
        ParseOp::Split {
            source: SourceRef::Input,
            rule: SplitRule::Regex(r"\s*\|\s*"),
            cleanup: None,
            unwrap: Some("texttt"),
            output: SplitOutput::Path("content.list"),
        },
    ],
};

pub static SKILL_CATEGORY: ParseConfig = ParseConfig {
    kind: SectionKind::SkillCategory,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "skill_category",
        },
        ParseOp::ExtractRegex {
            source: SourceRef::Input,
            pattern: r"\\item\[(?P<icon>[^\]]*)\]\s*\{\\scshape\s+(?P<name>[^}]*)\}",
            output: RegexOutput::Groups(&[("icon", "metadata.icon"), ("name", "metadata.name")]),
            required: true,
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_CATEGORY_LIST),
            params: 0,
            optional_params: 0,
            param_paths: &[],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::ExtractRegex {
            source: SourceRef::Context(ENV_BODY),
            pattern: r"\\itemLL\s*\{(?P<item>[^}]*)\}",
            output: RegexOutput::List("content.list"),
            required: false,
        },
    ],
};

pub static SKILL_CATEGORIES: ParseConfig = ParseConfig {
    kind: SectionKind::SkillCategories,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "skill_categories",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_ITEMIZE),
            params: 0,
            optional_params: 1,
            param_paths: &["metadata.list_options"],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::Split {
            source: SourceRef::Context(ENV_BODY),
            rule: SplitRule::BeforeMatches(r"\\item\["),
            cleanup: None,
            unwrap: None,
            output: SplitOutput::Context("category_chunks"),
        },
        ParseOp::RecursiveParse {
            source: "category_chunks",
            env_pattern: "",
            nested: SectionKind::SkillCategory,
            output_path: "subsections",
        },
    ],
};

pub static EDUCATION: ParseConfig = ParseConfig {
    kind: SectionKind::Education,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "education",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_ITEMIZE),
            params: 0,
            optional_params: 1,
            param_paths: &["metadata.list_options"],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::ExtractRegex {
            source: SourceRef::Context(ENV_BODY),
            pattern: r"\\item\[(?P<icon>[^\]]*)\]\s*\{\\scshape\s+(?P<institution>[^}]*)\}\s*\\hfill[ \t]*(?P<location>[^\n]*)",
            output: RegexOutput::Groups(&[
                ("icon", "metadata.icon"),
                ("institution", "metadata.institution"),
                ("location", "metadata.location"),
            ]),
            required: true,
        },
        ParseOp::ParseItemizeContent {
            source: ENV_BODY,
            marker: MarkerRule::Regex(patterns::ITEM_LEVEL_ONE),
            output_path: "content.degrees",
        },
    ],
};

pub static PERSONALITY_ALIAS_ARRAY: ParseConfig = ParseConfig {
    kind: SectionKind::PersonalityAliasArray,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "personality_alias_array",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_PERSONALITY),
            params: 0,
            optional_params: 0,
            param_paths: &[],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::ExtractRegex {
            source: SourceRef::Context(ENV_BODY),
            pattern: r"(?m)^\s*\\item\[(?P<icon>[^\]]*)\][ \t]*(?P<text>\S[^\n]*)",
            output: RegexOutput::List("content.items"),
            required: false,
        },
    ],
};

pub static CUSTOM_ITEMIZE: ParseConfig = ParseConfig {
    kind: SectionKind::CustomItemize,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "custom_itemize",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::Named(patterns::ENV_ITEMIZE),
            params: 0,
            optional_params: 1,
            param_paths: &["metadata.list_options"],
            name_path: None,
            output_context: Some(ENV_BODY),
        },
        ParseOp::ParseItemizeContent {
            source: ENV_BODY,
            marker: MarkerRule::Balanced,
            output_path: "content.bullets",
        },
    ],
};

pub static SIMPLE_LIST: ParseConfig = ParseConfig {
    kind: SectionKind::SimpleList,
    ops: &[
        ParseOp::SetLiteral {
            path: "type",
            value: "simple_list",
        },
        ParseOp::ExtractEnvironment {
            env: EnvSelector::AnyMatching(patterns::ANY_ENVIRONMENT),
            params: 0,
            optional_params: 0,
            param_paths: &[],
            name_path: Some("metadata.environment"),
            output_context: Some(ENV_BODY),
        },
        ParseOp::ParseItemizeContent {
            source: ENV_BODY,
            marker: MarkerRule::Regex(patterns::ITEM_ANY),
            output_path: "content.items",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        assert_eq!(WORK_EXPERIENCE.ops[0].name(), "set_literal");
        assert_eq!(WORK_EXPERIENCE.ops[1].name(), "extract_environment");
        assert_eq!(WORK_EXPERIENCE.ops[2].name(), "split");
        assert_eq!(WORK_EXPERIENCE.ops[3].name(), "recursive_parse");
    }

    #[test]
    fn test_recursive_parse_precedes_bullet_scan() {
        // The ordering dependency is a correctness requirement: nested
        // project spans must leave the buffer before bullets are scanned.
        let recursive = WORK_EXPERIENCE
            .ops
            .iter()
            .position(|op| matches!(op, ParseOp::RecursiveParse { .. }))
            .unwrap();
        let bullets = WORK_EXPERIENCE
            .ops
            .iter()
            .position(|op| matches!(op, ParseOp::ParseItemizeContent { .. }))
            .unwrap();
        assert!(recursive < bullets);
    }
}
