//! Whole-document parsing: preamble metadata, page splitting, region
//! extraction and column sectioning.

use indexmap::IndexMap;

use super::infer;
use crate::error::{Error, Result};
use crate::extract::{
    brace_arguments, collapse_blank_lines, environment_span, extract_balanced,
    extract_brace_params, to_plaintext,
};
use crate::model::{
    Column, Decoration, Document, DocumentMetadata, LiteralBlock, Page, PageRegions, Section,
    TopRegion,
};
use crate::patterns;
use crate::registry::TypeRegistry;

/// Parses markup into a [`Document`].
pub struct DocumentParser<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> DocumentParser<'r> {
    /// Create a parser over a registry.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Parse a complete document.
    pub fn parse(&self, source: &str) -> Result<Document> {
        let metadata = self.parse_metadata(source)?;
        let pages = self.extract_pages(source)?;
        Ok(Document { metadata, pages })
    }

    /// Extract preamble metadata (everything before the document-begin
    /// marker).
    ///
    /// Every metadata assignment with a balanced-brace value is read;
    /// known field names land in typed slots, known color names in the
    /// colors map, the rest in the generic fields map in document order.
    pub fn parse_metadata(&self, source: &str) -> Result<DocumentMetadata> {
        let doc_start = source
            .find(patterns::BEGIN_DOCUMENT)
            .ok_or_else(|| Error::Structure("no document-begin marker found".to_string()))?;
        let preamble = &source[..doc_start];

        let mut assignments: IndexMap<String, String> = IndexMap::new();
        for caps in patterns::RENEWCOMMAND_RE.captures_iter(preamble) {
            let field = caps[1].to_string();
            let after = caps.get(0).expect("match group 0").end();
            if preamble.as_bytes().get(after) != Some(&b'{') {
                continue;
            }
            // Malformed assignments are skipped rather than fatal.
            if let Ok((value, _)) = extract_balanced(preamble, '{', '}', after + 1) {
                assignments.insert(field, value);
            }
        }

        let mut lengths = IndexMap::new();
        for caps in patterns::SETLENGTH_RE.captures_iter(preamble) {
            lengths.insert(caps[1].to_string(), caps[2].to_string());
        }

        let highlight_color = patterns::SETHLCOLOR_RE
            .captures(preamble)
            .map(|caps| caps[1].to_string());
        let profile_lines = patterns::NLINES_RE
            .captures(preamble)
            .and_then(|caps| caps[1].parse().ok());

        let mut colors = IndexMap::new();
        for field in patterns::COLOR_FIELDS {
            if let Some(value) = assignments.shift_remove(field) {
                colors.insert(field.to_string(), value);
            }
        }

        let name = assignments
            .shift_remove(patterns::META_NAME)
            .unwrap_or_default();
        let date = assignments
            .shift_remove(patterns::META_DATE)
            .unwrap_or_default();
        let brand = assignments
            .shift_remove(patterns::META_BRAND)
            .unwrap_or_default();
        let profile = assignments
            .shift_remove(patterns::META_PROFILE)
            .map(|text| collapse_blank_lines(text.trim(), 0));

        Ok(DocumentMetadata {
            name_plain: to_plaintext(&name),
            brand_plain: to_plaintext(&brand),
            profile_plain: profile.as_deref().map(to_plaintext),
            name,
            date,
            brand,
            profile,
            profile_lines,
            highlight_color,
            colors,
            lengths,
            fields: assignments,
        })
    }

    /// Split the document body into pages on forced page breaks.
    ///
    /// Only the first…last span of the two-column environment is honored;
    /// multiple top-level blocks are not supported.
    pub fn extract_pages(&self, source: &str) -> Result<Vec<Page>> {
        let doc_start = source
            .find(patterns::BEGIN_DOCUMENT)
            .ok_or_else(|| Error::Structure("no document-begin marker found".to_string()))?;
        let doc_end = source
            .rfind(patterns::END_DOCUMENT)
            .ok_or_else(|| Error::Structure("no document-end marker found".to_string()))?;
        let body = &source[doc_start + patterns::BEGIN_DOCUMENT.len()..doc_end];

        let col_start = body
            .find(patterns::BEGIN_PARACOL)
            .ok_or_else(|| Error::Structure("no two-column environment found".to_string()))?;
        let col_end = body
            .rfind(patterns::END_PARACOL)
            .ok_or_else(|| Error::Structure("two-column environment never ends".to_string()))?;
        let inner = &body[col_start + patterns::BEGIN_PARACOL.len()..col_end];

        let break_count = patterns::CLEARPAGE_RE.find_iter(inner).count();
        let mut pages = Vec::new();

        for (index, segment) in patterns::CLEARPAGE_RE.split(inner).enumerate() {
            let number = (index + 1) as u32;
            if segment.trim().is_empty() {
                continue;
            }
            match self.page_regions(segment, number) {
                Ok(regions) => pages.push(Page {
                    number,
                    has_break_after: (index + 1) <= break_count,
                    regions,
                }),
                Err(err) => {
                    log::warn!("skipping page {number}: {err}");
                }
            }
        }

        Ok(pages)
    }

    /// Extract the regions of one page.
    ///
    /// The literal block comes out first (its wrapper is a decoration),
    /// then decorations leave the flow, then the column-switch marker
    /// divides the remainder. No marker means a continuation page: main
    /// column only.
    pub fn page_regions(&self, segment: &str, number: u32) -> Result<PageRegions> {
        let literal = self.extract_literal(segment);
        let (cleaned, decorations) = self.extract_decorations(segment);

        let switch_count = cleaned.matches(patterns::SWITCHCOLUMN).count();
        if switch_count > 1 {
            return Err(Error::Structure(format!(
                "page {number} has {switch_count} column-switch markers (at most one allowed)"
            )));
        }

        let (left_sections, main_sections) = match cleaned.find(patterns::SWITCHCOLUMN) {
            Some(pos) => {
                let left = &cleaned[..pos];
                let main = &cleaned[pos + patterns::SWITCHCOLUMN.len()..];
                (self.column_sections(left), self.column_sections(main))
            }
            None => (Vec::new(), self.column_sections(&cleaned)),
        };

        Ok(PageRegions {
            top: TopRegion {
                show_summary: number == 1,
            },
            left_column: (!left_sections.is_empty()).then(|| Column::new(left_sections)),
            main_column: (!main_sections.is_empty()).then(|| Column::new(main_sections)),
            literal,
            decorations,
        })
    }

    /// Split a column into sections on header markers and parse each by
    /// type inference.
    pub fn column_sections(&self, column: &str) -> Vec<Section> {
        let mut headers = Vec::new();
        for (pos, _) in column.match_indices(patterns::SECTION_STAR) {
            let name_start = pos + patterns::SECTION_STAR.len();
            match extract_balanced(column, '{', '}', name_start) {
                Ok((name, end)) => headers.push((pos, end, name.trim().to_string())),
                Err(_) => {
                    log::warn!("skipping section header with unbalanced name braces");
                }
            }
        }

        let mut sections = Vec::new();
        for (index, (_, content_start, name)) in headers.iter().enumerate() {
            let content_end = headers
                .get(index + 1)
                .map(|(next_start, _, _)| *next_start)
                .unwrap_or(column.len());
            let mut content = column[*content_start..content_end].trim().to_string();

            let spacing_after = patterns::TRAILING_VSPACE_RE
                .captures(&content)
                .map(|caps| caps[1].to_string());
            if let Some(m) = patterns::TRAILING_VSPACE_RE.find(&content) {
                content.truncate(m.start());
                content.truncate(content.trim_end().len());
            }

            let mut section = infer::parse_section(self.registry, name, &content);
            section.spacing_after = spacing_after;
            sections.push(section);
        }
        sections
    }

    fn extract_literal(&self, segment: &str) -> Option<LiteralBlock> {
        let span = environment_span(segment, patterns::ENV_LITERAL_BLOCK, 0).ok()?;
        let inner = &segment[span.content_start..span.content_end];

        // Skip the {width}(coordinates) arguments; they live in the
        // decoration entry, not in the literal content.
        let (_, after_brace) = extract_brace_params(inner, 0, 1).ok()?;
        let rest = &inner[after_brace..];
        let body = match rest.find('(') {
            Some(open) if rest[..open].trim().is_empty() => {
                let (_, after_paren) = extract_balanced(rest, '(', ')', open + 1).ok()?;
                &rest[after_paren..]
            }
            _ => rest,
        };

        Some(LiteralBlock {
            latex: body.trim().to_string(),
        })
    }

    fn extract_decorations(&self, segment: &str) -> (String, Vec<Decoration>) {
        let mut cleaned = segment.to_string();
        let mut decorations = Vec::new();

        if let Some(caps) = patterns::TEXTBLOCK_ARGS_RE.captures(&cleaned) {
            decorations.push(Decoration {
                command: "textblock".to_string(),
                args: vec![caps[1].to_string(), caps[2].to_string()],
            });
            if let Ok(span) = environment_span(&cleaned, patterns::ENV_LITERAL_BLOCK, 0) {
                cleaned.replace_range(span.start..span.end, "");
            }
        }

        for command in patterns::DECORATION_COMMANDS {
            let re = patterns::decoration_regex(command);
            let found: Vec<String> = re
                .find_iter(&cleaned)
                .map(|m| m.as_str().to_string())
                .collect();
            if found.is_empty() {
                continue;
            }
            for call in &found {
                decorations.push(Decoration {
                    command: command.to_string(),
                    args: brace_arguments(call),
                });
            }
            cleaned = re.replace_all(&cleaned, "").into_owned();
        }

        (cleaned, decorations)
    }
}
