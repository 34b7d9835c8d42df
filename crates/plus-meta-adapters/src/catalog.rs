//! Curated usage examples per component.
//!
//! Examples come from the manifest itself and from authored Markdown
//! documents; both are merged here in the order they were supplied.

use std::collections::HashMap;

use plus_meta_manifest::{CodeExample, Format, TaggedExample};

use crate::index::ComponentIndex;

/// Curated examples keyed by lowercase tag, in supply order.
#[derive(Debug, Clone, Default)]
pub struct ExampleCatalog {
    by_tag: HashMap<String, Vec<CodeExample>>,
}

impl ExampleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, dropping examples for tags the index does not know.
    pub fn build(
        index: &ComponentIndex,
        examples: impl IntoIterator<Item = TaggedExample>,
    ) -> Self {
        let mut catalog = Self::new();

        for tagged in examples {
            if !index.contains(&tagged.tag_name) {
                tracing::warn!(
                    "Dropping example \"{}\" for unknown component <{}>",
                    tagged.example.title,
                    tagged.tag_name
                );
                continue;
            }
            catalog.insert(tagged);
        }

        tracing::debug!("Catalogued {} examples", catalog.len());
        catalog
    }

    /// Add an example after those already present for its tag.
    pub fn insert(&mut self, tagged: TaggedExample) {
        self.by_tag
            .entry(tagged.tag_name.to_lowercase())
            .or_default()
            .push(tagged.example);
    }

    /// Examples for a tag in one format. Empty when there are none.
    pub fn get_examples(&self, tag: &str, format: Format) -> Vec<&CodeExample> {
        self.examples_for(tag)
            .iter()
            .filter(|example| example.format == format)
            .collect()
    }

    /// Every example for a tag, across formats.
    pub fn examples_for(&self, tag: &str) -> &[CodeExample] {
        self.by_tag
            .get(&tag.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Formats that have at least one example for a tag.
    pub fn formats_for(&self, tag: &str) -> Vec<Format> {
        let mut formats: Vec<Format> = self.examples_for(tag).iter().map(|e| e.format).collect();
        formats.sort();
        formats.dedup();
        formats
    }

    /// Total number of examples.
    pub fn len(&self) -> usize {
        self.by_tag.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
