//! Vue template adapter.

use plus_meta_manifest::naming::{to_camel_case, to_kebab_case};
use plus_meta_manifest::{Format, PropertyDescriptor};

use crate::inline::{Attribute, ParsedFragment};
use crate::traits::{
    boolean_presence, html_escape, is_global_attribute, slot_attribute, AttributeKind, FormatAdapter,
};
use crate::value::{format_number, PropValue};

/// Template directives and special attributes with no component semantics.
const VUE_ATTRIBUTES: &[&str] = &[
    "key", "ref", "is", "v-if", "v-else", "v-else-if", "v-for", "v-show", "v-model", "v-html",
    "v-text", "v-once", "v-memo", "v-cloak", "v-pre",
];

/// Vue adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct VueAdapter;

impl FormatAdapter for VueAdapter {
    fn format(&self) -> Format {
        Format::Vue
    }

    fn element_name(&self, tag_name: &str) -> String {
        tag_name.to_string()
    }

    fn resolve_tag(&self, element_name: &str) -> String {
        if element_name.contains('-') {
            element_name.to_ascii_lowercase()
        } else {
            to_kebab_case(element_name)
        }
    }

    fn attribute_name(&self, property: &str) -> String {
        to_kebab_case(property)
    }

    // Templates accept both spellings
    fn matches_property(&self, attribute: &str, property: &str) -> bool {
        attribute == self.attribute_name(property)
            || attribute == property
            || attribute == to_camel_case(property)
    }

    fn render_attribute(&self, property: &PropertyDescriptor, value: &PropValue) -> Option<String> {
        let name = self.attribute_name(&property.name);

        match boolean_presence(property, value) {
            Some(true) => return Some(name),
            Some(false) => return None,
            None => {}
        }

        let rendered = match value {
            PropValue::String(s) => format!("{name}=\"{}\"", html_escape(s)),
            PropValue::Number(n) => format!(":{name}=\"{}\"", format_number(*n)),
            PropValue::Boolean(b) => format!(":{name}=\"{b}\""),
            PropValue::Expression(expr) => format!(":{name}=\"{}\"", html_escape(expr)),
        };

        Some(rendered)
    }

    fn wrap_named_slot(&self, slot: &str, content: &str) -> String {
        let content = content.trim();
        if content.contains('\n') {
            let body = content
                .lines()
                .map(|line| format!("  {line}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<template #{slot}>\n{body}\n</template>")
        } else {
            format!("<template #{slot}>{content}</template>")
        }
    }

    fn self_closes_empty(&self) -> bool {
        true
    }

    fn classify_attribute(&self, attribute: &Attribute) -> AttributeKind {
        let name = attribute.name.as_str();

        if let Some(event) = name.strip_prefix('@').or_else(|| name.strip_prefix("v-on:")) {
            // Drop modifiers: @click.prevent
            let event = event.split('.').next().unwrap_or(event);
            return AttributeKind::Listener(event.to_string());
        }

        if let Some(bound) = name.strip_prefix(':').or_else(|| name.strip_prefix("v-bind:")) {
            if is_global_attribute(bound) || VUE_ATTRIBUTES.contains(&bound) {
                return AttributeKind::Passthrough;
            }
            let value = match &attribute.value {
                PropValue::String(expr) => PropValue::Expression(expr.clone()),
                other => other.clone(),
            };
            return AttributeKind::Property {
                name: bound.to_string(),
                value,
            };
        }

        if VUE_ATTRIBUTES.contains(&name)
            || is_global_attribute(name)
            || name.starts_with('#')
            || name.starts_with("v-slot")
        {
            return AttributeKind::Passthrough;
        }

        AttributeKind::Property {
            name: name.to_string(),
            value: attribute.value.clone(),
        }
    }

    fn property_binding(&self, attribute: &Attribute) -> Option<(String, PropValue)> {
        let name = attribute.name.as_str();

        match name.strip_prefix(':').or_else(|| name.strip_prefix("v-bind:")) {
            Some(bound) => {
                let value = match &attribute.value {
                    PropValue::String(expr) => PropValue::Expression(expr.clone()),
                    other => other.clone(),
                };
                Some((bound.to_string(), value))
            }
            None if name.starts_with(['@', '#']) || name.starts_with("v-") => None,
            None => Some((name.to_string(), attribute.value.clone())),
        }
    }

    fn slot_of(&self, child: &ParsedFragment) -> Option<String> {
        if child.element != "template" {
            return slot_attribute(child);
        }

        child.attributes.iter().find_map(|a| {
            a.name
                .strip_prefix('#')
                .or_else(|| a.name.strip_prefix("v-slot:"))
                .map(str::to_string)
        })
    }
}
