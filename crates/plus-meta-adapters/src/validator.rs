//! Usage validation against the indexed schema.
//!
//! Validation is total: malformed input, unknown formats and unknown tags all
//! come back as an invalid [`ValidationResult`] rather than an error.

use std::collections::HashSet;

use serde::Serialize;

use plus_meta_manifest::naming::to_kebab_case;
use plus_meta_manifest::{ComponentDescriptor, Format, PropertyDescriptor, PropertyType};

use crate::index::ComponentIndex;
use crate::inline::{child_elements, parse_fragment_for, ParsedFragment};
use crate::traits::{adapter_for, AttributeKind, FormatAdapter};
use crate::value::PropValue;

/// How many known tags to offer for an unknown one.
const MAX_TAG_SUGGESTIONS: usize = 3;

/// Minimum similarity for a "did you mean" property hint.
const HINT_THRESHOLD: f64 = 0.8;

/// DOM events every element dispatches; listeners for them are never flagged.
const NATIVE_EVENTS: &[&str] = &[
    "click", "dblclick", "focus", "blur", "focusin", "focusout", "input", "change", "submit",
    "keydown", "keyup", "keypress", "mousedown", "mouseup", "mouseenter", "mouseleave",
    "mouseover", "mouseout", "mousemove", "pointerdown", "pointerup", "pointerenter",
    "pointerleave", "pointermove", "touchstart", "touchend", "contextmenu", "scroll", "wheel",
];

/// Outcome of validating a usage fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,

    /// Human-readable findings, most important first
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    fn invalid(suggestion: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            suggestions: vec![suggestion.into()],
        }
    }
}

/// Validates usage fragments for indexed components.
#[derive(Debug, Clone, Copy)]
pub struct UsageValidator<'a> {
    index: &'a ComponentIndex,
}

impl<'a> UsageValidator<'a> {
    pub fn new(index: &'a ComponentIndex) -> Self {
        Self { index }
    }

    /// Validate a fragment written in a format given by name.
    pub fn validate(&self, fragment: &str, format: &str) -> ValidationResult {
        match format.parse::<Format>() {
            Ok(format) => self.validate_for(fragment, format),
            Err(e) => ValidationResult::invalid(e.to_string()),
        }
    }

    /// Validate a fragment written in a format.
    pub fn validate_for(&self, fragment: &str, format: Format) -> ValidationResult {
        let adapter = adapter_for(format);

        let parsed = match parse_fragment_for(fragment, format) {
            Ok(parsed) => parsed,
            Err(e) => return ValidationResult::invalid(format!("Could not parse fragment: {e}")),
        };

        let tag = adapter.resolve_tag(&parsed.element);

        let Some(component) = self.index.get(&tag) else {
            tracing::debug!("Validation of unknown component <{}>", tag);
            let mut suggestions = vec![format!("Unknown component <{tag}>")];
            suggestions.extend(
                self.index
                    .nearest(&tag, MAX_TAG_SUGGESTIONS)
                    .into_iter()
                    .map(|known| format!("Did you mean <{known}>?")),
            );
            return ValidationResult {
                is_valid: false,
                suggestions,
            };
        };

        let mut result = check_component(adapter, component, &parsed);

        if parsed.consumed < fragment.trim().len() {
            result.suggestions.push(format!(
                "Only the first element was checked; content after </{}> was ignored",
                parsed.element
            ));
        }

        result
    }
}

/// Check a parsed fragment against a known component.
fn check_component(
    adapter: &dyn FormatAdapter,
    component: &ComponentDescriptor,
    parsed: &ParsedFragment,
) -> ValidationResult {
    let tag = &component.tag_name;
    let mut present: HashSet<&str> = HashSet::new();
    let mut errors = 0;
    let mut findings = Vec::new();

    for attribute in &parsed.attributes {
        // Declared properties win over global and framework attribute names
        let declared = adapter.property_binding(attribute).and_then(|(name, value)| {
            component
                .properties
                .iter()
                .find(|p| adapter.matches_property(&name, &p.name))
                .map(|property| (property, value))
        });

        if let Some((property, value)) = declared {
            present.insert(property.name.as_str());
            errors += check_value(adapter, component, property, &value, &mut findings);
            continue;
        }

        match adapter.classify_attribute(attribute) {
            AttributeKind::Passthrough => {}

            AttributeKind::Listener(event) => {
                let declared = component
                    .events
                    .iter()
                    .any(|e| e.name == event || to_kebab_case(&e.name) == event);
                if !declared && !NATIVE_EVENTS.contains(&event.as_str()) {
                    findings.push(unknown_event(component, &event));
                }
            }

            AttributeKind::Property { name, .. } => {
                findings.push(unrecognized_property(adapter, component, &name));
            }
        }
    }

    if parsed.self_closing && adapter.format() == Format::Html {
        findings.push(format!("<{tag} /> is not closed in markup; write <{tag}></{tag}>"));
    }

    if let Some(children) = &parsed.children {
        for child in child_elements(children, adapter.format()) {
            if let Some(slot) = adapter.slot_of(&child) {
                if !slot_declared(component, &slot) {
                    findings.push(unknown_slot(component, &slot));
                }
            }
        }
    }

    let mut suggestions: Vec<String> = component
        .required_properties()
        .filter(|p| !present.contains(p.name.as_str()))
        .map(|p| {
            errors += 1;
            format!(
                "Missing required property \"{}\" on <{tag}>",
                adapter.attribute_name(&p.name)
            )
        })
        .collect();
    suggestions.extend(findings);

    ValidationResult {
        is_valid: errors == 0,
        suggestions,
    }
}

/// Check a value assigned to a declared property, returning how many
/// invalidating findings it added.
fn check_value(
    adapter: &dyn FormatAdapter,
    component: &ComponentDescriptor,
    property: &PropertyDescriptor,
    value: &PropValue,
    findings: &mut Vec<String>,
) -> usize {
    let tag = &component.tag_name;
    let attr = adapter.attribute_name(&property.name);

    match &property.ty {
        PropertyType::Enum(values) => {
            if *value == PropValue::Boolean(true) {
                findings.push(format!(
                    "Property \"{attr}\" on <{tag}> needs a value; expected one of: {}",
                    values.join(", ")
                ));
                return 1;
            }
            if let Some(literal) = value.literal() {
                if !values.iter().any(|v| *v == literal) {
                    findings.push(format!(
                        "Invalid value \"{literal}\" for property \"{attr}\" on <{tag}>; expected one of: {}",
                        values.join(", ")
                    ));
                    return 1;
                }
            }
        }

        PropertyType::Number => {
            if let Some(literal) = value.literal() {
                if literal.trim().parse::<f64>().is_err() {
                    findings.push(format!(
                        "Property \"{attr}\" on <{tag}> expects a number, got \"{literal}\""
                    ));
                }
            }
        }

        // Presence alone enables a markup boolean attribute
        PropertyType::Boolean
            if adapter.format() == Format::Html
                && value.as_str().is_some_and(|s| s.trim() == "false") =>
        {
            findings.push(format!(
                "Boolean attribute \"{attr}\" is enabled whenever it is present; remove it instead of setting \"false\""
            ));
        }

        _ => {}
    }

    0
}

fn slot_declared(component: &ComponentDescriptor, slot: &str) -> bool {
    component.slot(slot).is_some() || (slot == "default" && component.slot("").is_some())
}

fn unknown_slot(component: &ComponentDescriptor, slot: &str) -> String {
    let named: Vec<&str> = component
        .slots
        .iter()
        .filter(|s| !s.is_default())
        .map(|s| s.name.as_str())
        .collect();

    if named.is_empty() {
        return format!(
            "Unknown slot \"{slot}\": <{}> declares no named slots",
            component.tag_name
        );
    }

    format!(
        "Unknown slot \"{slot}\" on <{}> (known slots: {})",
        component.tag_name,
        named.join(", ")
    )
}

fn unrecognized_property(
    adapter: &dyn FormatAdapter,
    component: &ComponentDescriptor,
    name: &str,
) -> String {
    let closest = component
        .properties
        .iter()
        .map(|p| adapter.attribute_name(&p.name))
        .map(|attr| {
            let score = strsim::jaro_winkler(&name.to_lowercase(), &attr.to_lowercase());
            (attr, score)
        })
        .filter(|(_, score)| *score >= HINT_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match closest {
        Some((attr, _)) => format!(
            "Unrecognized property \"{name}\" on <{}>; did you mean \"{attr}\"?",
            component.tag_name
        ),
        None => format!("Unrecognized property \"{name}\" on <{}>", component.tag_name),
    }
}

fn unknown_event(component: &ComponentDescriptor, event: &str) -> String {
    if component.events.is_empty() {
        return format!(
            "Unknown event \"{event}\": <{}> declares no events",
            component.tag_name
        );
    }

    let known: Vec<&str> = component.events.iter().map(|e| e.name.as_str()).collect();
    format!(
        "Unknown event \"{event}\" on <{}> (known events: {})",
        component.tag_name,
        known.join(", ")
    )
}
