//! Primitive extraction utilities.
//!
//! Markup-agnostic string operations with no dependency on the type
//! system: balanced-delimiter scanning, environment extraction, item
//! parsing and formatting-to-plaintext stripping. All functions here are
//! pure.

mod balanced;
mod environment;
mod items;
mod plaintext;

pub use balanced::{
    brace_arguments, extract_balanced, extract_brace_params, extract_bracket_params,
    split_before_matches,
};
pub use environment::{
    environment_span, extract_environment, find_environments, format_environment, EnvSpan,
};
pub use items::{
    parse_item_entries, parse_item_entry, parse_items_balanced_markers, split_item_entries,
    ContentItem,
};
pub use plaintext::{
    collapse_blank_lines, escape_latex, replace_command, strip_commands,
    strip_trailing_whitespace, to_markdown, to_plaintext, unwrap_command,
};
