//! Normalized component model.
//!
//! Everything here is built once by [`ManifestStore`](crate::ManifestStore)
//! and treated as an immutable snapshot afterwards.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::PropertyType;

/// One custom element declared by the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Custom element tag, unique across the manifest (e.g. "plus-button")
    pub tag_name: String,

    /// Human label (e.g. "Button")
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Grouping tag shared by related components
    pub category: String,

    /// Properties in declaration order
    pub properties: Vec<PropertyDescriptor>,

    /// Slots in declaration order; an empty name is the default slot
    pub slots: Vec<SlotDescriptor>,

    /// Events in declaration order
    pub events: Vec<EventDescriptor>,

    /// Exposed CSS shadow parts
    pub css_parts: Vec<CssPartDescriptor>,
}

impl ComponentDescriptor {
    /// Look up a declared property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a declared slot by name ("" for the default slot).
    pub fn slot(&self, name: &str) -> Option<&SlotDescriptor> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Look up a declared event by name.
    pub fn event(&self, name: &str) -> Option<&EventDescriptor> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Properties that must be present in every usage.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.required)
    }
}

/// A component property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: PropertyType,

    pub description: String,

    /// Default value with source quoting removed
    pub default_value: Option<String>,

    pub required: bool,
}

/// A content slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDescriptor {
    pub name: String,
    pub description: String,
}

impl SlotDescriptor {
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

/// An event the component dispatches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    pub description: String,

    /// Structural hint for the event detail payload
    pub detail_shape: Option<String>,
}

/// A CSS shadow part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssPartDescriptor {
    pub name: String,
    pub description: String,
}

/// Output target for generated and curated snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Plain custom element markup
    Html,
    /// Function-component binding (JSX)
    React,
    /// Template binding
    Vue,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 3] = [Format::Html, Format::React, Format::Vue];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::React => "react",
            Format::Vue => "vue",
        }
    }

    /// Parse the format of a code fence from its info string.
    ///
    /// Only the first word counts: `html title="Basic"` is HTML.
    pub fn from_info(info: &str) -> Option<Self> {
        info.split_whitespace().next()?.parse().ok()
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "markup" | "web-component" | "wc" => Ok(Format::Html),
            "react" | "jsx" | "tsx" => Ok(Format::React),
            "vue" => Ok(Format::Vue),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format identifier outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported format \"{0}\" (expected one of: html, react, vue)")]
pub struct UnknownFormat(pub String);

/// A curated usage example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeExample {
    pub title: String,
    pub description: String,
    pub code: String,
    pub format: Format,
}

/// A curated example together with the tag it illustrates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedExample {
    pub tag_name: String,
    pub example: CodeExample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_aliases() {
        assert_eq!("markup".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("HTML".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("jsx".parse::<Format>().unwrap(), Format::React);
        assert_eq!("vue".parse::<Format>().unwrap(), Format::Vue);
        assert!("svelte".parse::<Format>().is_err());
    }

    #[test]
    fn parses_format_from_fence_info() {
        assert_eq!(Format::from_info("html title=\"Basic\""), Some(Format::Html));
        assert_eq!(Format::from_info("tsx"), Some(Format::React));
        assert_eq!(Format::from_info("bash"), None);
        assert_eq!(Format::from_info(""), None);
    }

    #[test]
    fn serializes_with_manifest_field_names() {
        let prop = PropertyDescriptor {
            name: "kind".to_string(),
            ty: PropertyType::Enum(vec!["filled".to_string()]),
            description: String::new(),
            default_value: Some("filled".to_string()),
            required: false,
        };

        let json = serde_json::to_value(&prop).unwrap();

        assert_eq!(json["defaultValue"], "filled");
        assert_eq!(json["type"]["kind"], "enum");
        assert_eq!(json["type"]["values"][0], "filled");
    }
}
