//! React/JSX adapter: components addressed through their PascalCase wrappers.

use plus_meta_manifest::naming::{to_camel_case, to_kebab_case, to_pascal_case};
use plus_meta_manifest::{Format, PropertyDescriptor};

use crate::inline::Attribute;
use crate::traits::{
    boolean_presence, is_global_attribute, with_slot_attribute, AttributeKind, FormatAdapter,
};
use crate::value::{format_number, PropValue};

/// React-only attributes with no component semantics.
const REACT_ATTRIBUTES: &[&str] = &[
    "key",
    "ref",
    "className",
    "htmlFor",
    "children",
    "dangerouslySetInnerHTML",
    "suppressHydrationWarning",
];

/// React/JSX adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReactAdapter;

impl FormatAdapter for ReactAdapter {
    fn format(&self) -> Format {
        Format::React
    }

    fn element_name(&self, tag_name: &str) -> String {
        to_pascal_case(tag_name)
    }

    fn resolve_tag(&self, element_name: &str) -> String {
        if element_name.contains('-') {
            element_name.to_ascii_lowercase()
        } else {
            to_kebab_case(element_name)
        }
    }

    fn attribute_name(&self, property: &str) -> String {
        to_camel_case(property)
    }

    fn matches_property(&self, attribute: &str, property: &str) -> bool {
        attribute == property || attribute == self.attribute_name(property)
    }

    fn render_attribute(&self, property: &PropertyDescriptor, value: &PropValue) -> Option<String> {
        let name = self.attribute_name(&property.name);

        match boolean_presence(property, value) {
            Some(true) => return Some(name),
            Some(false) => return None,
            None => {}
        }

        let rendered = match value {
            PropValue::String(s) if s.contains('"') => {
                let json = serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"));
                format!("{name}={{{json}}}")
            }
            PropValue::String(s) => format!("{name}=\"{s}\""),
            PropValue::Number(n) => format!("{name}={{{}}}", format_number(*n)),
            PropValue::Boolean(b) => format!("{name}={{{b}}}"),
            PropValue::Expression(expr) => format!("{name}={{{expr}}}"),
        };

        Some(rendered)
    }

    fn wrap_named_slot(&self, slot: &str, content: &str) -> String {
        with_slot_attribute(slot, content)
    }

    fn self_closes_empty(&self) -> bool {
        true
    }

    fn classify_attribute(&self, attribute: &Attribute) -> AttributeKind {
        let name = attribute.name.as_str();

        if REACT_ATTRIBUTES.contains(&name) || is_global_attribute(name) {
            return AttributeKind::Passthrough;
        }

        if let Some(event) = name.strip_prefix("on") {
            if event.starts_with(|c: char| c.is_ascii_uppercase()) {
                return AttributeKind::Listener(to_kebab_case(event));
            }
        }

        AttributeKind::Property {
            name: name.to_string(),
            value: attribute.value.clone(),
        }
    }
}
