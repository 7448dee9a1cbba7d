//! Marker-delimited list entry parsing.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::balanced::extract_balanced;
use super::plaintext::to_plaintext;
use crate::error::{Error, Result};

/// One list entry: structural marker plus dual-stored text.
///
/// `raw` keeps every formatting command for exact regeneration; `plain` is
/// always the formatting-stripped rendition of `raw`, stored rather than
/// recomputed because the two fields serve different consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item command without the leading backslash, e.g. `itemi` or
    /// `item[\faIcon]`
    pub marker: String,
    /// Entry text with formatting preserved
    pub raw: String,
    /// Entry text with formatting stripped
    pub plain: String,
}

impl ContentItem {
    /// Build an item from marker and raw text; `plain` is derived.
    pub fn new(marker: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let plain = to_plaintext(&raw);
        Self {
            marker: marker.into(),
            raw,
            plain,
        }
    }
}

/// Split list content into entry strings, each starting at its marker.
pub fn split_item_entries(content: &str, marker: &Regex) -> Vec<String> {
    let starts: Vec<usize> = marker.find_iter(content).map(|m| m.start()).collect();
    let mut entries = Vec::with_capacity(starts.len());

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        let entry = content[start..end].trim();
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }
    entries
}

/// Parse one entry string into its [`ContentItem`] triple.
///
/// The marker regex must carry a `marker` named capture group and match at
/// the start of the entry.
pub fn parse_item_entry(entry: &str, marker: &Regex) -> Result<ContentItem> {
    let entry = entry.trim();
    let caps = marker
        .captures(entry)
        .filter(|c| c.get(0).map(|m| m.start()) == Some(0))
        .ok_or_else(|| Error::pattern_mismatch("item", marker.as_str(), entry))?;

    let matched = caps.get(0).expect("match group 0");
    let tag = caps
        .name("marker")
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::pattern_mismatch("item", marker.as_str(), entry))?;

    Ok(ContentItem::new(tag, entry[matched.end()..].trim()))
}

/// Scan marker-delimited content into [`ContentItem`] triples.
pub fn parse_item_entries(content: &str, marker: &Regex) -> Result<Vec<ContentItem>> {
    split_item_entries(content, marker)
        .iter()
        .map(|entry| parse_item_entry(entry, marker))
        .collect()
}

/// Parse `\item` entries whose bracket markers may contain nested braces,
/// e.g. `\item[\raisebox{-1pt}{>} 20,000]`.
///
/// Plain regex scanning stops at the first inner brace; this variant
/// matches the bracket group with balanced-delimiter scanning instead.
pub fn parse_items_balanced_markers(content: &str) -> Vec<ContentItem> {
    let item_re = Regex::new(r"\\item\b").expect("valid pattern");
    let starts: Vec<usize> = item_re.find_iter(content).map(|m| m.start()).collect();
    let mut items = Vec::with_capacity(starts.len());

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());
        let entry = &content[start..end];
        let mut body_start = r"\item".len();

        let marker = if entry[body_start..].starts_with('[') {
            match extract_balanced(entry, '[', ']', body_start + 1) {
                Ok((inner, after)) => {
                    body_start = after;
                    format!("item[{}]", inner)
                }
                Err(_) => "item".to_string(),
            }
        } else {
            "item".to_string()
        };

        items.push(ContentItem::new(marker, entry[body_start..].trim()));
    }
    items
}
