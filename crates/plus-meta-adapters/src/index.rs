//! Component index for looking up and searching component descriptors.
//!
//! The index owns the normalized descriptors and keeps them in manifest
//! order. Lookup by tag is case-insensitive; search ranks every descriptor
//! into a fixed set of tiers so results are reproducible.

use std::collections::HashMap;

use plus_meta_manifest::naming::unprefixed_tag;
use plus_meta_manifest::ComponentDescriptor;

/// Minimum Jaro-Winkler similarity for a fuzzy tag suggestion.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Errors from building or querying the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("Cannot build an index with no components")]
    Empty,

    #[error("Duplicate component tag: {0}")]
    DuplicateTag(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),
}

/// How well a component matched a search query. Lower ranks sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchRank {
    /// Tag equals the query, with or without its namespace prefix
    ExactTag,
    /// Tag starts with the query, with or without its namespace prefix
    TagPrefix,
    /// Human name contains the query
    Name,
    /// Tag, description or category contains the query
    Text,
}

/// Lowercased search fields, computed once at build time.
#[derive(Debug, Clone)]
struct SearchKeys {
    tag: String,
    short_tag: String,
    name: String,
    description: String,
    category: String,
}

impl SearchKeys {
    fn new(component: &ComponentDescriptor) -> Self {
        let tag = component.tag_name.to_lowercase();
        Self {
            short_tag: unprefixed_tag(&tag).to_string(),
            tag,
            name: component.name.to_lowercase(),
            description: component.description.to_lowercase(),
            category: component.category.to_lowercase(),
        }
    }

    fn rank(&self, query: &str) -> Option<MatchRank> {
        if self.tag == query || self.short_tag == query {
            Some(MatchRank::ExactTag)
        } else if self.tag.starts_with(query) || self.short_tag.starts_with(query) {
            Some(MatchRank::TagPrefix)
        } else if self.name.contains(query) {
            Some(MatchRank::Name)
        } else if self.tag.contains(query)
            || self.description.contains(query)
            || self.category.contains(query)
        {
            Some(MatchRank::Text)
        } else {
            None
        }
    }
}

/// An immutable index over component descriptors.
#[derive(Debug, Clone)]
pub struct ComponentIndex {
    /// Descriptors in manifest order
    components: Vec<ComponentDescriptor>,

    /// Positions by lowercase tag
    by_tag: HashMap<String, usize>,

    /// Search fields, parallel to `components`
    keys: Vec<SearchKeys>,
}

impl ComponentIndex {
    /// Build an index. Tags must be unique and at least one component given.
    pub fn new(components: Vec<ComponentDescriptor>) -> Result<Self, IndexError> {
        if components.is_empty() {
            return Err(IndexError::Empty);
        }

        let mut by_tag = HashMap::with_capacity(components.len());
        for (position, component) in components.iter().enumerate() {
            let key = component.tag_name.to_lowercase();
            if by_tag.insert(key, position).is_some() {
                return Err(IndexError::DuplicateTag(component.tag_name.clone()));
            }
        }

        let keys = components.iter().map(SearchKeys::new).collect();

        tracing::debug!("Indexed {} components", components.len());

        Ok(Self {
            components,
            by_tag,
            keys,
        })
    }

    /// All components in manifest order.
    pub fn all(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Look up a component by tag (case-insensitive).
    pub fn get(&self, tag: &str) -> Option<&ComponentDescriptor> {
        self.by_tag
            .get(&tag.trim().to_lowercase())
            .map(|&position| &self.components[position])
    }

    /// Look up a component by tag, failing when it is not indexed.
    pub fn get_by_tag(&self, tag: &str) -> Result<&ComponentDescriptor, IndexError> {
        self.get(tag)
            .ok_or_else(|| IndexError::ComponentNotFound(tag.to_string()))
    }

    /// Check if a component exists.
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Rank components against a free-text query.
    ///
    /// The empty query matches everything in manifest order. Ties keep
    /// manifest order.
    pub fn search(&self, query: &str) -> Vec<&ComponentDescriptor> {
        self.search_ranked(query)
            .into_iter()
            .map(|(component, _)| component)
            .collect()
    }

    /// Like [`search`](Self::search), with the tier each result matched in.
    pub fn search_ranked(&self, query: &str) -> Vec<(&ComponentDescriptor, MatchRank)> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return self
                .components
                .iter()
                .map(|c| (c, MatchRank::Text))
                .collect();
        }

        let mut hits: Vec<(&ComponentDescriptor, MatchRank)> = self
            .components
            .iter()
            .zip(&self.keys)
            .filter_map(|(component, keys)| keys.rank(&query).map(|rank| (component, rank)))
            .collect();

        // Stable: manifest order within a tier
        hits.sort_by_key(|&(_, rank)| rank);
        hits
    }

    /// Components in a category (case-insensitive), in manifest order.
    pub fn by_category(&self, category: &str) -> Vec<&ComponentDescriptor> {
        let category = category.trim().to_lowercase();
        self.components
            .iter()
            .zip(&self.keys)
            .filter(|(_, keys)| keys.category == category)
            .map(|(component, _)| component)
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for component in &self.components {
            if !seen.contains(&component.category.as_str()) {
                seen.push(&component.category);
            }
        }
        seen
    }

    /// Known tags closest to a possibly misspelled tag.
    ///
    /// Tries the search ranking first (full tag, then without its prefix) and
    /// falls back to string similarity when neither finds anything.
    pub fn nearest(&self, tag: &str, limit: usize) -> Vec<&str> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || limit == 0 {
            return Vec::new();
        }

        for query in [tag.as_str(), unprefixed_tag(&tag)] {
            let hits = self.search(query);
            if !hits.is_empty() {
                return hits
                    .into_iter()
                    .take(limit)
                    .map(|c| c.tag_name.as_str())
                    .collect();
            }
        }

        // Compared without prefixes, which every tag shares
        let mut scored: Vec<(&str, f64)> = self
            .components
            .iter()
            .zip(&self.keys)
            .map(|(component, keys)| {
                let score = strsim::jaro_winkler(&tag, &keys.short_tag)
                    .max(strsim::jaro_winkler(unprefixed_tag(&tag), &keys.short_tag));
                (component.tag_name.as_str(), score)
            })
            .filter(|&(_, score)| score >= FUZZY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(limit).map(|(tag, _)| tag).collect()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false for a built index; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{component, test_index};
    use pretty_assertions::assert_eq;

    fn tags<'a>(components: &[&'a ComponentDescriptor]) -> Vec<&'a str> {
        components.iter().map(|c| c.tag_name.as_str()).collect()
    }

    #[test]
    fn every_tag_round_trips() {
        let index = test_index();

        for component in index.all() {
            assert_eq!(index.get_by_tag(&component.tag_name).unwrap(), component);
        }
        assert!(index.contains("PLUS-BUTTON"));
    }

    #[test]
    fn missing_tag_is_not_found() {
        let index = test_index();

        assert_eq!(
            index.get_by_tag("plus-nope"),
            Err(IndexError::ComponentNotFound("plus-nope".to_string()))
        );
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let index = test_index();

        let all: Vec<&ComponentDescriptor> = index.all().iter().collect();
        assert_eq!(index.search(""), all);
        assert_eq!(index.search("   "), all);
    }

    #[test]
    fn search_is_case_insensitive() {
        let index = test_index();

        assert_eq!(index.search("AVATAR"), index.search("avatar"));
        assert!(!index.search("Avatar").is_empty());
    }

    #[test]
    fn exact_short_tag_ranks_before_longer_prefix_match() {
        let index = test_index();

        // plus-avatar-group is declared before plus-avatar
        let results = index.search("avatar");

        assert_eq!(tags(&results)[..2], ["plus-avatar", "plus-avatar-group"]);
        assert_eq!(
            index.search_ranked("avatar")[0].1,
            MatchRank::ExactTag
        );
    }

    #[test]
    fn ranks_name_above_description() {
        let index = test_index();

        let ranked = index.search_ranked("card");

        assert_eq!(ranked[0].0.tag_name, "plus-card");
        assert_eq!(ranked[0].1, MatchRank::ExactTag);
        assert!(ranked[1..].iter().all(|(_, rank)| *rank == MatchRank::Text));
    }

    #[test]
    fn no_match_is_empty() {
        let index = test_index();

        assert!(index.search("carousel").is_empty());
    }

    #[test]
    fn groups_by_category() {
        let index = test_index();

        assert_eq!(tags(&index.by_category("Data-Display")), ["plus-avatar-group", "plus-avatar"]);
        assert_eq!(index.categories(), ["actions", "data-display", "forms", "layout"]);
        assert!(index.by_category("unknown").is_empty());
    }

    #[test]
    fn suggests_nearest_tags() {
        let index = test_index();

        assert_eq!(index.nearest("plus-avatr", 3), ["plus-avatar", "plus-avatar-group"]);
        assert_eq!(index.nearest("x-button", 3), ["plus-button"]);
        assert_eq!(index.nearest("plus-buton", 1), ["plus-button"]);
        assert!(index.nearest("zzz", 3).is_empty());
    }

    #[test]
    fn rejects_empty_and_duplicate_components() {
        assert_eq!(ComponentIndex::new(vec![]).unwrap_err(), IndexError::Empty);

        let result = ComponentIndex::new(vec![component("plus-tag"), component("PLUS-TAG")]);
        assert!(matches!(result, Err(IndexError::DuplicateTag(_))));
    }
}
