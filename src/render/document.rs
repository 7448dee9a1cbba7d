//! Whole-document generation: preamble, page assembly, section wrappers.

use crate::error::Result;
use crate::extract::{collapse_blank_lines, strip_trailing_whitespace};
use crate::model::{Decoration, Document, DocumentMetadata, Page, Section};
use crate::patterns;
use crate::registry::TypeRegistry;

use super::render_section_body;

/// Renders a [`Document`] back into markup.
pub struct DocumentRenderer<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> DocumentRenderer<'r> {
    /// Create a renderer over a registry.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Generate the complete document.
    ///
    /// Pages are joined with forced page breaks according to their
    /// `has_break_after` flag; output is normalized to at most one
    /// consecutive blank line and no trailing line whitespace.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut out = String::new();
        out.push_str(&self.render_preamble(&doc.metadata));
        out.push_str(&format!("\n{}\n\n", patterns::BEGIN_DOCUMENT));
        out.push_str(&format!("{}\n\n", patterns::BEGIN_PARACOL));

        for page in &doc.pages {
            out.push_str(&self.render_page(page)?);
            if page.has_break_after {
                out.push_str(&format!("\n{}\n\n", patterns::CLEARPAGE));
            }
        }

        out.push_str(&format!("\n{}\n\n", patterns::END_PARACOL));
        out.push_str(&format!("{}\n", patterns::END_DOCUMENT));

        Ok(collapse_blank_lines(&strip_trailing_whitespace(&out), 1))
    }

    /// Generate the preamble: document class, package block and every
    /// metadata assignment the parser recovers.
    pub fn render_preamble(&self, metadata: &DocumentMetadata) -> String {
        let mut out = String::from("\\documentclass[10pt]{article}\n\n");

        out.push_str("\\usepackage{enumitem}\n");
        out.push_str("\\usepackage{fontawesome5}\n");
        out.push_str("\\usepackage{hyperref}\n");
        out.push_str("\\usepackage{paracol}\n");
        out.push_str("\\usepackage{soul}\n");
        out.push_str("\\usepackage[absolute,overlay]{textpos}\n");
        out.push_str("\\usepackage{xcolor}\n\n");

        out.push_str(&renewcommand(patterns::META_NAME, &metadata.name));
        out.push_str(&renewcommand(patterns::META_DATE, &metadata.date));
        out.push_str(&renewcommand(patterns::META_BRAND, &metadata.brand));

        for (field, value) in &metadata.colors {
            out.push_str(&renewcommand(field, value));
        }
        for (field, value) in &metadata.fields {
            out.push_str(&renewcommand(field, value));
        }
        for (param, value) in &metadata.lengths {
            out.push_str(&format!("\\setlength{{\\{param}}}{{{value}}}\n"));
        }
        if let Some(color) = &metadata.highlight_color {
            out.push_str(&format!("\\sethlcolor{{{color}}}\n"));
        }
        if let Some(lines) = metadata.profile_lines {
            out.push_str(&format!("\\def\\nlinesPP{{{lines}}}\n"));
        }
        if let Some(profile) = &metadata.profile {
            out.push_str(&renewcommand(patterns::META_PROFILE, profile));
        }
        out
    }

    /// Generate one page: decorations, left column, switch marker, main
    /// column. The switch marker is emitted only when a left column is
    /// present; continuation pages go straight to the main column.
    pub fn render_page(&self, page: &Page) -> Result<String> {
        let mut out = String::new();

        if !page.regions.decorations.is_empty() {
            for decoration in &page.regions.decorations {
                out.push_str(&self.render_decoration(decoration, page));
                out.push('\n');
            }
            out.push('\n');
        }

        if let Some(left) = &page.regions.left_column {
            for section in &left.sections {
                out.push_str(&self.render_section(section)?);
                out.push_str("\n\n");
            }
            out.push_str(&format!("{}\n\n", patterns::SWITCHCOLUMN));
        }

        if let Some(main) = &page.regions.main_column {
            for section in &main.sections {
                out.push_str(&self.render_section(section)?);
                out.push_str("\n\n");
            }
        }

        Ok(out.trim_end().to_string() + "\n")
    }

    /// Generate a section with its header wrapper and trailing spacing.
    pub fn render_section(&self, section: &Section) -> Result<String> {
        let body = render_section_body(self.registry, section)?;
        let mut out = format!("\\section*{{{}}}\n\n{}\n", section.name, body);
        if let Some(spacing) = &section.spacing_after {
            out.push_str(&format!("\n\\vspace{{{spacing}}}\n"));
        }
        Ok(out.trim_end().to_string())
    }

    fn render_decoration(&self, decoration: &Decoration, page: &Page) -> String {
        if decoration.command == "textblock" {
            // The textblock wrapper carries the page's literal block.
            let latex = page
                .regions
                .literal
                .as_ref()
                .map(|block| block.latex.as_str())
                .unwrap_or_default();
            let width = decoration.args.first().map(String::as_str).unwrap_or_default();
            let coords = decoration.args.get(1).map(String::as_str).unwrap_or_default();
            format!(
                "\\begin{{textblock*}}{{{width}}}({coords})\n{latex}\n\\end{{textblock*}}"
            )
        } else {
            let args: String = decoration
                .args
                .iter()
                .map(|arg| format!("{{{arg}}}"))
                .collect();
            format!("\\{}{}", decoration.command, args)
        }
    }
}

fn renewcommand(field: &str, value: &str) -> String {
    format!("\\renewcommand{{\\{field}}}{{{value}}}\n")
}
