//! Batch archive processing.
//!
//! Documents are independent, so an archive fans out across a thread
//! pool with no shared mutable state. Round-trip fidelity is reported in
//! two tiers: semantic-tree equality is the contract, byte equality is
//! best-effort and only measured.

use rayon::prelude::*;

use crate::error::Error;
use crate::extract::{collapse_blank_lines, strip_trailing_whitespace};
use crate::model::Document;
use crate::Converter;

/// Parse every source in parallel.
pub fn parse_all(sources: &[String]) -> Vec<Result<Document, Error>> {
    let converter = Converter::new();
    sources
        .par_iter()
        .map(|source| converter.parse(source))
        .collect()
}

/// Two-tier round-trip fidelity report over an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTripReport {
    /// Number of documents processed
    pub total: usize,
    /// Documents that parsed at all
    pub parsed: usize,
    /// Documents where `parse(generate(parse(d))) == parse(d)`
    pub semantic_identical: usize,
    /// Documents where regeneration reproduces the normalized source
    pub byte_identical: usize,
    /// Per-document failure messages, by source index
    pub failures: Vec<(usize, String)>,
}

impl RoundTripReport {
    /// Whether every parsed document round-tripped semantically.
    pub fn is_semantically_clean(&self) -> bool {
        self.parsed == self.semantic_identical && self.failures.is_empty()
    }
}

/// Round-trip every source and tally both fidelity tiers.
pub fn roundtrip_report(sources: &[String]) -> RoundTripReport {
    let converter = Converter::new();

    let results: Vec<(bool, bool, Option<String>)> = sources
        .par_iter()
        .map(|source| check_one(&converter, source))
        .collect();

    let mut report = RoundTripReport {
        total: sources.len(),
        ..Default::default()
    };
    for (index, (semantic, byte, failure)) in results.into_iter().enumerate() {
        match failure {
            Some(message) => report.failures.push((index, message)),
            None => report.parsed += 1,
        }
        if semantic {
            report.semantic_identical += 1;
        }
        if byte {
            report.byte_identical += 1;
        }
    }
    report
}

fn check_one(converter: &Converter, source: &str) -> (bool, bool, Option<String>) {
    let parsed = match converter.parse(source) {
        Ok(doc) => doc,
        Err(err) => return (false, false, Some(err.to_string())),
    };
    let generated = match converter.generate(&parsed) {
        Ok(latex) => latex,
        Err(err) => return (false, false, Some(err.to_string())),
    };
    let reparsed = match converter.parse(&generated) {
        Ok(doc) => doc,
        Err(err) => return (false, false, Some(err.to_string())),
    };

    let semantic = reparsed == parsed;
    let byte = generated.trim_end() == normalize(source).trim_end();
    log::debug!(
        "roundtrip: semantic={semantic} byte={byte} pages={}",
        parsed.page_count()
    );
    (semantic, byte, None)
}

fn normalize(source: &str) -> String {
    collapse_blank_lines(&strip_trailing_whitespace(source), 1)
}
