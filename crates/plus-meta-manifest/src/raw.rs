//! Raw manifest shapes and their normalization into the component model.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    CodeExample, ComponentDescriptor, CssPartDescriptor, EventDescriptor, Format,
    PropertyDescriptor, SlotDescriptor, TaggedExample,
};
use crate::naming::{label_from_tag, to_camel_case};
use crate::types::{unquote, PropertyType};

/// Category assigned to components that declare none.
pub(crate) const DEFAULT_CATEGORY: &str = "general";

/// Flat manifest: `{ "components": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct FlatManifest {
    pub components: Vec<RawComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawComponent {
    #[serde(default, alias = "tag")]
    tag_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "props", alias = "attributes")]
    properties: Vec<RawProperty>,
    #[serde(default)]
    slots: Vec<RawSlot>,
    #[serde(default)]
    events: Vec<RawEvent>,
    #[serde(default, alias = "parts")]
    css_parts: Vec<RawPart>,
    #[serde(default)]
    examples: Vec<RawExample>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperty {
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default, alias = "enum", alias = "options")]
    values: Option<Vec<Value>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "default")]
    default_value: Option<Value>,
    #[serde(default)]
    required: bool,
}

/// The spellings a property type shows up in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawType {
    /// `"string"`, `"'a' | 'b'"`, `"enum"`
    Text(String),
    /// `["a", "b"]`
    Literals(Vec<Value>),
    /// `{ "text": "..." }` or `{ "enum": [...] }`
    Object {
        #[serde(default)]
        text: Option<String>,
        #[serde(default, alias = "enum")]
        values: Option<Vec<Value>>,
    },
}

#[derive(Debug, Deserialize)]
struct RawSlot {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default, alias = "detailShape")]
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawPart {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    code: String,
    format: String,
}

/// Custom Elements Manifest: `{ "modules": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct CemManifest {
    #[serde(default)]
    pub modules: Vec<CemModule>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CemModule {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    declarations: Vec<CemDeclaration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CemDeclaration {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tag_name: Option<String>,
    #[serde(default)]
    custom_element: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    members: Vec<CemMember>,
    #[serde(default)]
    attributes: Vec<CemAttribute>,
    #[serde(default)]
    slots: Vec<RawSlot>,
    #[serde(default)]
    events: Vec<RawEvent>,
    #[serde(default)]
    css_parts: Vec<RawPart>,
    #[serde(default)]
    examples: Vec<RawExample>,
}

#[derive(Debug, Deserialize)]
struct CemMember {
    #[serde(default)]
    kind: Option<String>,
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    privacy: Option<String>,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    required: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CemAttribute {
    name: String,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    field_name: Option<String>,
    #[serde(default)]
    required: bool,
}

/// Normalized manifest content.
#[derive(Debug, Default)]
pub(crate) struct Normalized {
    pub components: Vec<ComponentDescriptor>,
    pub examples: Vec<TaggedExample>,
}

impl Normalized {
    fn push(
        &mut self,
        component: ComponentDescriptor,
        examples: Vec<RawExample>,
    ) -> Result<(), String> {
        if self
            .components
            .iter()
            .any(|c| c.tag_name == component.tag_name)
        {
            return Err(format!("duplicate tagName \"{}\"", component.tag_name));
        }

        for raw in examples {
            match raw.format.parse::<Format>() {
                Ok(format) => self.examples.push(TaggedExample {
                    tag_name: component.tag_name.clone(),
                    example: CodeExample {
                        title: raw.title.unwrap_or_else(|| component.name.clone()),
                        description: raw.description.unwrap_or_default(),
                        code: raw.code,
                        format,
                    },
                }),
                Err(e) => {
                    tracing::warn!("Skipping example for <{}>: {}", component.tag_name, e);
                }
            }
        }

        self.components.push(component);
        Ok(())
    }
}

/// Normalize a flat component list.
pub(crate) fn normalize_flat(components: Vec<RawComponent>) -> Result<Normalized, String> {
    let mut out = Normalized::default();

    for (position, raw) in components.into_iter().enumerate() {
        let Some(tag_name) = raw.tag_name.filter(|t| !t.trim().is_empty()) else {
            let hint = raw
                .name
                .map(|n| format!(" (\"{n}\")"))
                .unwrap_or_default();
            return Err(format!(
                "component #{}{} is missing required field `tagName`",
                position + 1,
                hint
            ));
        };
        let tag_name = tag_name.trim().to_lowercase();

        let properties = raw
            .properties
            .into_iter()
            .map(|p| {
                let ty = property_type(p.ty.as_ref(), p.values.as_deref());
                PropertyDescriptor {
                    name: p.name,
                    ty,
                    description: p.description.unwrap_or_default(),
                    default_value: default_value(p.default_value.as_ref()),
                    required: p.required,
                }
            })
            .collect();

        let component = finish_component(
            tag_name,
            raw.name,
            raw.description,
            raw.category,
            properties,
            raw.slots,
            raw.events,
            raw.css_parts,
        )?;
        out.push(component, raw.examples)?;
    }

    Ok(out)
}

/// Normalize a Custom Elements Manifest.
pub(crate) fn normalize_cem(manifest: CemManifest) -> Result<Normalized, String> {
    let mut out = Normalized::default();

    for module in manifest.modules {
        for decl in module.declarations {
            if !decl.custom_element && decl.tag_name.is_none() {
                continue;
            }

            let Some(tag_name) = decl.tag_name.filter(|t| !t.trim().is_empty()) else {
                return Err(format!(
                    "custom element {} in {} is missing required field `tagName`",
                    decl.name.as_deref().unwrap_or("<anonymous>"),
                    module.path.as_deref().unwrap_or("<unknown module>")
                ));
            };
            let tag_name = tag_name.trim().to_lowercase();

            let properties = cem_properties(decl.members, decl.attributes);
            let description = decl.description.or(decl.summary);

            let component = finish_component(
                tag_name,
                None,
                description,
                decl.category,
                properties,
                decl.slots,
                decl.events,
                decl.css_parts,
            )?;
            out.push(component, decl.examples)?;
        }
    }

    Ok(out)
}

/// Merge public fields and reflected attributes into one property list.
fn cem_properties(members: Vec<CemMember>, attributes: Vec<CemAttribute>) -> Vec<PropertyDescriptor> {
    let mut properties: Vec<PropertyDescriptor> = members
        .into_iter()
        .filter(|m| m.kind.as_deref().unwrap_or("field") == "field")
        .filter(|m| !m.is_static)
        .filter(|m| matches!(m.privacy.as_deref(), None | Some("public")))
        .filter(|m| !m.name.starts_with('#') && !m.name.starts_with('_'))
        .map(|m| PropertyDescriptor {
            ty: property_type(m.ty.as_ref(), None),
            name: m.name,
            description: m.description.unwrap_or_default(),
            default_value: default_value(m.default.as_ref()),
            required: m.required,
        })
        .collect();

    for attr in attributes {
        let field = attr
            .field_name
            .clone()
            .unwrap_or_else(|| to_camel_case(&attr.name));

        if let Some(existing) = properties.iter_mut().find(|p| p.name == field) {
            if existing.description.is_empty() {
                existing.description = attr.description.unwrap_or_default();
            }
            if existing.default_value.is_none() {
                existing.default_value = default_value(attr.default.as_ref());
            }
            if attr.ty.is_some() && existing.ty == PropertyType::String {
                existing.ty = property_type(attr.ty.as_ref(), None);
            }
            existing.required |= attr.required;
            continue;
        }

        properties.push(PropertyDescriptor {
            name: field,
            ty: property_type(attr.ty.as_ref(), None),
            description: attr.description.unwrap_or_default(),
            default_value: default_value(attr.default.as_ref()),
            required: attr.required,
        });
    }

    properties
}

#[allow(clippy::too_many_arguments)]
fn finish_component(
    tag_name: String,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    properties: Vec<PropertyDescriptor>,
    slots: Vec<RawSlot>,
    events: Vec<RawEvent>,
    parts: Vec<RawPart>,
) -> Result<ComponentDescriptor, String> {
    let mut seen = HashSet::new();
    for property in &properties {
        if !seen.insert(property.name.as_str()) {
            return Err(format!(
                "<{tag_name}> declares property \"{}\" more than once",
                property.name
            ));
        }
    }

    let mut seen = HashSet::new();
    for slot in &slots {
        if !seen.insert(slot.name.as_str()) {
            let label = if slot.name.is_empty() {
                "the default slot".to_string()
            } else {
                format!("slot \"{}\"", slot.name)
            };
            return Err(format!("<{tag_name}> declares {label} more than once"));
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| label_from_tag(&tag_name));
    let category = category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Ok(ComponentDescriptor {
        name,
        description: description.unwrap_or_default(),
        category,
        properties,
        slots: slots
            .into_iter()
            .map(|s| SlotDescriptor {
                name: s.name,
                description: s.description.unwrap_or_default(),
            })
            .collect(),
        events: events
            .into_iter()
            .map(|e| EventDescriptor {
                detail_shape: detail_shape(e.detail.as_ref(), e.ty.as_ref()),
                name: e.name,
                description: e.description.unwrap_or_default(),
            })
            .collect(),
        css_parts: parts
            .into_iter()
            .map(|p| CssPartDescriptor {
                name: p.name,
                description: p.description.unwrap_or_default(),
            })
            .collect(),
        tag_name,
    })
}

/// Resolve the heterogeneous type spellings into the closed taxonomy.
fn property_type(ty: Option<&RawType>, values: Option<&[Value]>) -> PropertyType {
    if let Some(values) = values.filter(|v| !v.is_empty()) {
        return PropertyType::from_literals(values.iter().map(literal));
    }

    match ty {
        None => PropertyType::String,
        Some(RawType::Literals(values)) => PropertyType::from_literals(values.iter().map(literal)),
        Some(RawType::Object {
            values: Some(values),
            ..
        }) if !values.is_empty() => PropertyType::from_literals(values.iter().map(literal)),
        Some(RawType::Object {
            text: Some(text), ..
        }) => PropertyType::from_type_text(text),
        Some(RawType::Object { .. }) => PropertyType::String,
        Some(RawType::Text(text)) => PropertyType::from_type_text(text),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            match s {
                "" | "undefined" | "null" => None,
                _ => Some(unquote(s).unwrap_or(s).to_string()),
            }
        }
        other => Some(other.to_string()),
    }
}

fn detail_shape(detail: Option<&Value>, ty: Option<&RawType>) -> Option<String> {
    match detail {
        Some(Value::Null) | None => {}
        Some(Value::String(s)) => return Some(s.clone()),
        Some(other) => return Some(other.to_string()),
    }

    let text = match ty? {
        RawType::Text(text) => text,
        RawType::Object {
            text: Some(text), ..
        } => text,
        _ => return None,
    };

    let inner = text
        .trim()
        .strip_prefix("CustomEvent<")?
        .strip_suffix('>')?
        .trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn flat(value: Value) -> Result<Normalized, String> {
        let manifest: FlatManifest = serde_json::from_value(value).unwrap();
        normalize_flat(manifest.components)
    }

    #[test]
    fn normalizes_flat_component() {
        let out = flat(json!({
            "components": [{
                "tagName": "plus-button",
                "description": "A button",
                "category": "actions",
                "properties": [
                    { "name": "kind", "type": "'filled' | 'outline'", "default": "'filled'" },
                    { "name": "size", "type": "enum", "values": ["sm", "md"] },
                    { "name": "disabled", "type": { "text": "boolean" } },
                    { "name": "label", "type": "string", "required": true }
                ],
                "slots": [{ "name": "" }, { "name": "prefix", "description": "Leading icon" }],
                "events": [{ "name": "plus-click", "type": { "text": "CustomEvent<{ value: string }>" } }]
            }]
        }))
        .unwrap();

        let button = &out.components[0];
        assert_eq!(button.tag_name, "plus-button");
        assert_eq!(button.name, "Button");
        assert_eq!(button.category, "actions");
        assert_eq!(
            button.properties[0].ty,
            PropertyType::Enum(vec!["filled".to_string(), "outline".to_string()])
        );
        assert_eq!(button.properties[0].default_value.as_deref(), Some("filled"));
        assert_eq!(
            button.properties[1].ty,
            PropertyType::Enum(vec!["sm".to_string(), "md".to_string()])
        );
        assert_eq!(button.properties[2].ty, PropertyType::Boolean);
        assert!(button.properties[3].required);
        assert!(button.slots[0].is_default());
        assert_eq!(
            button.events[0].detail_shape.as_deref(),
            Some("{ value: string }")
        );
    }

    #[test]
    fn rejects_missing_tag_name() {
        let err = flat(json!({
            "components": [
                { "tagName": "plus-button" },
                { "name": "Broken" }
            ]
        }))
        .unwrap_err();

        assert!(err.contains("#2"));
        assert!(err.contains("\"Broken\""));
        assert!(err.contains("tagName"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = flat(json!({
            "components": [{ "tagName": "plus-a" }, { "tagName": "plus-a" }]
        }))
        .unwrap_err();
        assert!(err.contains("duplicate tagName"));

        let err = flat(json!({
            "components": [{
                "tagName": "plus-a",
                "properties": [{ "name": "x" }, { "name": "x" }]
            }]
        }))
        .unwrap_err();
        assert!(err.contains("property \"x\""));

        let err = flat(json!({
            "components": [{ "tagName": "plus-a", "slots": [{ "name": "" }, {}] }]
        }))
        .unwrap_err();
        assert!(err.contains("default slot"));
    }

    #[test]
    fn collects_inline_examples_and_skips_unknown_formats() {
        let out = flat(json!({
            "components": [{
                "tagName": "plus-badge",
                "examples": [
                    { "title": "Basic", "code": "<plus-badge></plus-badge>", "format": "html" },
                    { "code": "{#if x}", "format": "svelte" }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(out.examples.len(), 1);
        assert_eq!(out.examples[0].tag_name, "plus-badge");
        assert_eq!(out.examples[0].example.format, Format::Html);
        assert_eq!(out.examples[0].example.title, "Basic");
    }

    #[test]
    fn normalizes_custom_elements_manifest() {
        let manifest: CemManifest = serde_json::from_value(json!({
            "schemaVersion": "1.0.0",
            "modules": [{
                "kind": "javascript-module",
                "path": "src/avatar.ts",
                "declarations": [
                    { "kind": "function", "name": "helper" },
                    {
                        "kind": "class",
                        "name": "PlusAvatar",
                        "tagName": "plus-avatar",
                        "customElement": true,
                        "summary": "Shows a user picture",
                        "members": [
                            { "kind": "field", "name": "size", "type": { "text": "'small' | 'medium' | 'large'" }, "default": "'medium'" },
                            { "kind": "field", "name": "internal", "privacy": "private" },
                            { "kind": "field", "name": "styles", "static": true },
                            { "kind": "method", "name": "focus" }
                        ],
                        "attributes": [
                            { "name": "size", "fieldName": "size", "description": "Avatar size" },
                            { "name": "image-url", "type": { "text": "string" } }
                        ],
                        "cssParts": [{ "name": "base" }]
                    }
                ]
            }]
        }))
        .unwrap();

        let out = normalize_cem(manifest).unwrap();

        assert_eq!(out.components.len(), 1);
        let avatar = &out.components[0];
        assert_eq!(avatar.name, "Avatar");
        assert_eq!(avatar.description, "Shows a user picture");
        assert_eq!(avatar.category, DEFAULT_CATEGORY);
        let names: Vec<&str> = avatar.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["size", "imageUrl"]);
        assert_eq!(avatar.properties[0].description, "Avatar size");
        assert_eq!(avatar.properties[0].default_value.as_deref(), Some("medium"));
        assert_eq!(avatar.css_parts[0].name, "base");
    }

    #[test]
    fn custom_element_without_tag_is_an_error() {
        let manifest: CemManifest = serde_json::from_value(json!({
            "modules": [{
                "path": "src/x.ts",
                "declarations": [{ "name": "PlusX", "customElement": true }]
            }]
        }))
        .unwrap();

        let err = normalize_cem(manifest).unwrap_err();
        assert!(err.contains("PlusX"));
        assert!(err.contains("src/x.ts"));
    }

    #[test]
    fn normalizes_defaults() {
        assert_eq!(default_value(Some(&json!("'a'"))), Some("a".to_string()));
        assert_eq!(default_value(Some(&json!(false))), Some("false".to_string()));
        assert_eq!(default_value(Some(&json!(3))), Some("3".to_string()));
        assert_eq!(default_value(Some(&json!(null))), None);
        assert_eq!(default_value(Some(&json!("undefined"))), None);
    }
}
