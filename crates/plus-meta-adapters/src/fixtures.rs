//! Shared test manifest.

use plus_meta_manifest::{ComponentDescriptor, ManifestSource, ManifestStore, TaggedExample};
use serde_json::json;

use crate::index::ComponentIndex;

fn manifest() -> serde_json::Value {
    json!({
        "components": [
            {
                "tagName": "plus-button",
                "name": "Button",
                "description": "Triggers an action when pressed.",
                "category": "actions",
                "properties": [
                    { "name": "kind", "type": "'filled' | 'outline' | 'dashed'", "default": "'filled'" },
                    { "name": "size", "values": ["sm", "md", "lg"] },
                    { "name": "disabled", "type": "boolean" },
                    { "name": "loading", "type": "boolean" }
                ],
                "slots": [
                    { "name": "", "description": "Label" },
                    { "name": "prefix", "description": "Leading icon" },
                    { "name": "suffix", "description": "Trailing icon" }
                ],
                "events": [
                    { "name": "plus-click", "description": "Fired on activation" }
                ],
                "examples": [
                    { "title": "Filled", "code": "<plus-button kind=\"filled\">Save</plus-button>", "format": "html" },
                    { "title": "Filled", "code": "<PlusButton kind=\"filled\">Save</PlusButton>", "format": "react" },
                    { "title": "Outline", "code": "<plus-button kind=\"outline\">Cancel</plus-button>", "format": "html" }
                ]
            },
            {
                "tagName": "plus-avatar-group",
                "name": "Avatar Group",
                "description": "Stacks several avatars.",
                "category": "data-display",
                "properties": [
                    { "name": "max", "type": "number" }
                ],
                "slots": [{ "name": "" }]
            },
            {
                "tagName": "plus-avatar",
                "name": "Avatar",
                "description": "Shows a user image or initials.",
                "category": "data-display",
                "properties": [
                    { "name": "size", "type": ["small", "medium", "large"], "default": "medium" },
                    { "name": "src", "type": "string" },
                    { "name": "alt", "type": "string" },
                    { "name": "shape", "type": "'circle' | 'square'" },
                    { "name": "visible", "type": "boolean", "default": true }
                ]
            },
            {
                "tagName": "plus-input",
                "name": "Input",
                "description": "Text field, often placed inside a card.",
                "category": "forms",
                "properties": [
                    { "name": "label", "type": "string", "required": true },
                    { "name": "maxLength", "type": "number" },
                    { "name": "clearable", "type": "boolean" }
                ],
                "events": [
                    { "name": "plus-change", "detail": "{ value: string }" }
                ]
            },
            {
                "tagName": "plus-card",
                "name": "Card",
                "description": "Groups related content.",
                "category": "layout",
                "slots": [
                    { "name": "header" },
                    { "name": "" },
                    { "name": "footer" }
                ]
            }
        ]
    })
}

/// Load the shared manifest.
pub(crate) fn test_manifest() -> (Vec<ComponentDescriptor>, Vec<TaggedExample>) {
    ManifestStore::load(&ManifestSource::Value(manifest()))
        .expect("test manifest loads")
        .into_parts()
}

/// Index over the shared manifest.
pub(crate) fn test_index() -> ComponentIndex {
    let (components, _) = test_manifest();
    ComponentIndex::new(components).expect("test manifest indexes")
}

/// A bare component with only a tag.
pub(crate) fn component(tag: &str) -> ComponentDescriptor {
    ComponentDescriptor {
        tag_name: tag.to_string(),
        name: tag.to_string(),
        description: String::new(),
        category: "general".to_string(),
        properties: Vec::new(),
        slots: Vec::new(),
        events: Vec::new(),
        css_parts: Vec::new(),
    }
}
