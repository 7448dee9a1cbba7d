//! Structured document model.
//!
//! The intermediate representation between markup parsing and markup
//! generation: a strict ownership tree of Document → Pages → PageRegions →
//! Sections → Subsections, fully serde-serializable so the whole tree can
//! round-trip through YAML or JSON.

mod document;
mod page;
mod section;

pub use document::{Document, DocumentMetadata};
pub use page::{Column, Decoration, LiteralBlock, Page, PageRegions, TopRegion};
pub use section::{ContentItem, Section, SectionKind, Subsection};
