//! # retex
//!
//! Bidirectional conversion between a two-column LaTeX resume format and
//! a structured, hierarchical representation.
//!
//! The parser recovers a [`Document`] tree — preamble metadata, pages,
//! two-column regions, typed sections — from markup built on a fixed
//! style system; the generator reproduces equivalent markup from the
//! tree. Parsing is declarative: each content type carries an ordered
//! list of parse operations interpreted by a single engine, and a
//! generation template that is its structural inverse.
//!
//! ## Quick Start
//!
//! ```no_run
//! use retex::Converter;
//!
//! fn main() -> retex::Result<()> {
//!     let source = std::fs::read_to_string("resume.tex")?;
//!
//!     let converter = Converter::new();
//!     let doc = converter.parse(&source)?;
//!     println!("{} pages", doc.page_count());
//!
//!     // Serialize the structured form, then regenerate the markup.
//!     let yaml = doc.to_yaml()?;
//!     std::fs::write("resume.yaml", yaml)?;
//!     let latex = converter.generate(&doc)?;
//!     std::fs::write("resume.out.tex", latex)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Semantic round trip**: parsing generated markup reproduces the
//!   structured tree exactly.
//! - **Byte-level round trip** is best-effort: regeneration is canonical
//!   (normalized whitespace), so re-generating a reparsed document is
//!   stable after one pass. [`archive::roundtrip_report`] measures both
//!   tiers over a corpus.

pub mod access;
pub mod archive;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod patterns;
pub mod registry;
pub mod render;

pub use access::{DocumentView, Region, SectionEntry, TextMode};
pub use error::{Error, Result};
pub use model::{
    Column, ContentItem, Decoration, Document, DocumentMetadata, LiteralBlock, Page, PageRegions,
    Section, SectionKind, Subsection, TopRegion,
};
pub use parser::{DocumentParser, Engine};
pub use registry::TypeRegistry;
pub use render::DocumentRenderer;

use std::path::Path;

/// Bidirectional converter owning the type registry.
///
/// The registry is built once at construction and shared by the parser
/// and renderer; construct a fresh `Converter` per test when isolation
/// matters.
pub struct Converter {
    registry: TypeRegistry,
}

impl Converter {
    /// Create a converter with the default registry.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
        }
    }

    /// Create a converter over an explicit registry.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing this converter.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Parse markup into a structured document.
    pub fn parse(&self, source: &str) -> Result<Document> {
        DocumentParser::new(&self.registry).parse(source)
    }

    /// Generate markup from a structured document.
    pub fn generate(&self, doc: &Document) -> Result<String> {
        DocumentRenderer::new(&self.registry).render(doc)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a markup string into a structured document.
pub fn parse_document(source: &str) -> Result<Document> {
    Converter::new().parse(source)
}

/// Parse a markup file into a structured document.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let source = std::fs::read_to_string(path)?;
    parse_document(&source)
}

/// Generate markup from a structured document.
pub fn generate_document(doc: &Document) -> Result<String> {
    Converter::new().generate(doc)
}

/// Parse a structured YAML file into a document.
pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let yaml = std::fs::read_to_string(path)?;
    Document::from_yaml(&yaml)
}
