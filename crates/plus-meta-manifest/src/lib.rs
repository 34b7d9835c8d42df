//! Component manifest loading and normalization.
//!
//! This crate reads a component manifest (a flat component list or a Custom
//! Elements Manifest), normalizes its loosely typed declarations into a closed
//! model, and ingests curated usage examples authored as Markdown documents.

pub mod codeblock;
pub mod docs;
pub mod frontmatter;
pub mod model;
pub mod naming;
mod raw;
pub mod store;
pub mod types;

pub use docs::{load_example_docs, parse_example_doc, ExampleDoc};
pub use model::{
    CodeExample, ComponentDescriptor, CssPartDescriptor, EventDescriptor, Format,
    PropertyDescriptor, SlotDescriptor, TaggedExample, UnknownFormat,
};
pub use store::{ManifestError, ManifestSource, ManifestStore};
pub use types::PropertyType;
