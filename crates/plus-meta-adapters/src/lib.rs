//! Component index and framework adapters.
//!
//! This crate builds the queryable index over a loaded manifest and provides
//! one adapter per output format. The adapters drive both snippet generation
//! and the parsing side of usage validation, so a property is spelled the same
//! way in both directions.

pub mod catalog;
pub mod generator;
pub mod html;
pub mod index;
pub mod inline;
pub mod react;
pub mod traits;
pub mod validator;
pub mod value;
pub mod vue;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::ExampleCatalog;
pub use generator::CodeGenerator;
pub use index::{ComponentIndex, IndexError, MatchRank};
pub use inline::{
    child_elements, parse_fragment, parse_fragment_for, Attribute, FragmentError, ParsedFragment,
};
pub use traits::{adapter_for, AttributeKind, ElementSpec, FormatAdapter, GenerateError};
pub use validator::{UsageValidator, ValidationResult};
pub use value::PropValue;
