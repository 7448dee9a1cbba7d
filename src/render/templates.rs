//! Per-kind generation templates.
//!
//! Each function is the registered template for one section kind. Nested
//! subsections render first and are spliced in as pre-formatted blocks; a
//! parent never re-derives a child's markup shape.

use serde_yaml::{Mapping, Value};

use super::{indent_block, render_subsection, NodeRef};
use crate::error::{Error, Result};
use crate::parser::paths::{get_path, get_path_str};
use crate::patterns;
use crate::registry::TypeRegistry;

const DEFAULT_BULLET_SYMBOL: &str = r"{\large $\bullet$}";

fn item_line(indent: &str, marker: &str, raw: &str) -> String {
    if raw.is_empty() {
        format!("{indent}\\{marker}\n")
    } else {
        format!("{indent}\\{marker} {raw}\n")
    }
}

/// Itemize opening with bracket options only when the parse captured any.
fn itemize_open(meta: &Mapping) -> String {
    match get_path_str(meta, "list_options") {
        Some(options) => format!("\\begin{{itemize}}[{options}]\n"),
        None => "\\begin{itemize}\n".to_string(),
    }
}

/// Sequence of work-experience entries.
pub(crate) fn work_history(registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let blocks: Vec<String> = node
        .subsections
        .iter()
        .map(|sub| render_subsection(registry, sub))
        .collect::<Result<_>>()?;
    Ok(blocks.join("\n\n"))
}

/// One employment entry in its four-parameter environment.
pub(crate) fn work_experience(registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let meta = node.metadata;
    let company = node.require(meta, "company")?;
    let location = node.require(meta, "location")?;
    let dates = node.require(meta, "dates")?;

    let mut title = node.require(meta, "title")?.to_string();
    if let Some(subtitle) = get_path_str(meta, "subtitle") {
        title = format!("{title}{}{subtitle}", r"\\");
    }

    let mut out = format!(
        "\\begin{{{}}}{{{company}}}{{{title}}}{{{location}}}{{{dates}}}\n",
        patterns::ENV_WORK_EXPERIENCE
    );

    for bullet in node.items("bullets")? {
        out.push('\n');
        out.push_str(&item_line("    ", &bullet.marker, &bullet.raw));
    }

    for sub in node.subsections {
        let block = render_subsection(registry, sub)?;
        out.push('\n');
        out.push_str(&indent_block(&block, "    "));
        out.push('\n');
    }

    out.push_str(&format!("\n\\end{{{}}}", patterns::ENV_WORK_EXPERIENCE));
    Ok(out)
}

/// Nested project entry; the environment name travels with the data.
pub(crate) fn project(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let meta = node.metadata;
    let env = get_path_str(meta, "environment_type").unwrap_or(patterns::ENV_PROJECT_DEFAULT);
    let symbol = get_path_str(meta, "bullet_symbol").unwrap_or(DEFAULT_BULLET_SYMBOL);
    let name = node.require(meta, "name")?;
    let dates = get_path_str(meta, "dates").unwrap_or("");

    let mut out = format!("\\begin{{{env}}}{{{symbol}}}{{{name}}}{{{dates}}}\n");
    for bullet in node.items("bullets")? {
        out.push_str(&item_line("    ", &bullet.marker, &bullet.raw));
    }
    out.push_str(&format!("\\end{{{env}}}"));
    Ok(out)
}

/// Standalone projects section.
pub(crate) fn projects(registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let mut out = format!("\\begin{{{}}}\n", patterns::ENV_PROJECTS_MAIN);
    for sub in node.subsections {
        let block = render_subsection(registry, sub)?;
        out.push('\n');
        out.push_str(&indent_block(&block, "    "));
        out.push('\n');
    }
    out.push_str(&format!("\n\\end{{{}}}", patterns::ENV_PROJECTS_MAIN));
    Ok(out)
}

/// Small-caps list inside a spacing-configured brace group.
pub(crate) fn skill_list_caps(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let baselineskip = get_path_str(node.metadata, "baselineskip").unwrap_or("10pt");
    let parskip = get_path_str(node.metadata, "parskip").unwrap_or("7.5pt");

    let mut out = format!(
        "{{ \\setlength{{\\baselineskip}}{{{baselineskip}}} \\setlength{{\\parskip}}{{{parskip}}} \\scshape\n"
    );
    for item in node.string_list("list")? {
        out.push_str(&format!("\n    {item}\n"));
    }
    out.push_str("\n}");
    Ok(out)
}

/// Pipe-separated monospace list.
pub(crate) fn skill_list_pipes(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let items: Vec<String> = node
        .string_list("list")?
        .iter()
        .map(|item| format!("\\texttt{{{item}}}"))
        .collect();
    Ok(items.join(" | "))
}

/// One icon-labelled category with its nested list.
pub(crate) fn skill_category(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let icon = get_path_str(node.metadata, "icon").unwrap_or("");
    let name = node.require(node.metadata, "name")?;

    let mut out = format!("\\item[{icon}] {{\\scshape {name}}}\n");
    out.push_str(&format!("\\begin{{{}}}\n", patterns::ENV_CATEGORY_LIST));
    for item in node.string_list("list")? {
        out.push_str(&format!("    \\itemLL {{{item}}}\n"));
    }
    out.push_str(&format!("\\end{{{}}}", patterns::ENV_CATEGORY_LIST));
    Ok(out)
}

/// Itemize wrapper around category subsections.
pub(crate) fn skill_categories(registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let mut out = itemize_open(node.metadata);
    for sub in node.subsections {
        let block = render_subsection(registry, sub)?;
        out.push('\n');
        out.push_str(&block);
        out.push('\n');
    }
    out.push_str("\n\\end{itemize}");
    Ok(out)
}

/// Education: institution header plus degree entries.
pub(crate) fn education(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let icon = get_path_str(node.metadata, "icon").unwrap_or("");
    let institution = node.require(node.metadata, "institution")?;
    let location = node.require(node.metadata, "location")?;

    let mut out = itemize_open(node.metadata);
    out.push_str(&format!(
        "\n\\item[{icon}] {{\\scshape {institution}}} \\hfill {location}\n"
    ));
    for degree in node.items("degrees")? {
        out.push('\n');
        out.push_str(&item_line("    ", &degree.marker, &degree.raw));
    }
    out.push_str("\n\\end{itemize}");
    Ok(out)
}

/// Icon/text rows in the personality environment.
pub(crate) fn personality_alias_array(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let items = get_path(node.content, "items").ok_or_else(|| Error::MissingField {
        kind: node.kind.as_str().to_string(),
        field: "content.items".to_string(),
    })?;
    let items = items.as_sequence().cloned().unwrap_or_default();

    let mut out = format!("\\begin{{{}}}\n", patterns::ENV_PERSONALITY);
    for item in &items {
        let icon = item.get("icon").and_then(Value::as_str).unwrap_or("");
        let text = item.get("text").and_then(Value::as_str).unwrap_or("");
        out.push_str(&format!("    \\item[{icon}] {text}\n"));
    }
    out.push_str(&format!("\\end{{{}}}", patterns::ENV_PERSONALITY));
    Ok(out)
}

/// Vanilla itemize with arbitrary per-item markers.
pub(crate) fn custom_itemize(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let mut out = itemize_open(node.metadata);
    for bullet in node.items("bullets")? {
        out.push_str(&item_line("    ", &bullet.marker, &bullet.raw));
    }
    out.push_str("\\end{itemize}");
    Ok(out)
}

/// Generic fallback list: the captured environment name is regenerated.
pub(crate) fn simple_list(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    let env = node.require(node.metadata, "environment")?;

    let mut out = format!("\\begin{{{env}}}\n");
    for item in node.items("items")? {
        out.push_str(&item_line("    ", &item.marker, &item.raw));
    }
    out.push_str(&format!("\\end{{{env}}}"));
    Ok(out)
}

/// Raw capture, regenerated verbatim.
pub(crate) fn unknown(_registry: &TypeRegistry, node: NodeRef<'_>) -> Result<String> {
    Ok(node.require(node.content, "raw")?.to_string())
}
