//! Plain markup adapter: custom elements written as they are registered.

use plus_meta_manifest::naming::to_kebab_case;
use plus_meta_manifest::{Format, PropertyDescriptor};

use crate::inline::Attribute;
use crate::traits::{
    boolean_presence, html_escape, is_global_attribute, with_slot_attribute, AttributeKind,
    FormatAdapter,
};
use crate::value::PropValue;

/// Markup adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlAdapter;

impl FormatAdapter for HtmlAdapter {
    fn format(&self) -> Format {
        Format::Html
    }

    fn element_name(&self, tag_name: &str) -> String {
        tag_name.to_string()
    }

    fn resolve_tag(&self, element_name: &str) -> String {
        element_name.to_ascii_lowercase()
    }

    fn attribute_name(&self, property: &str) -> String {
        to_kebab_case(property)
    }

    // Attribute names are case-insensitive in markup
    fn matches_property(&self, attribute: &str, property: &str) -> bool {
        let attribute = attribute.to_ascii_lowercase();
        attribute == self.attribute_name(property) || attribute == property.to_ascii_lowercase()
    }

    fn render_attribute(&self, property: &PropertyDescriptor, value: &PropValue) -> Option<String> {
        let name = self.attribute_name(&property.name);

        match boolean_presence(property, value) {
            Some(true) => return Some(name),
            Some(false) => return None,
            None => {}
        }

        Some(format!("{name}=\"{}\"", html_escape(&value.to_string())))
    }

    fn wrap_named_slot(&self, slot: &str, content: &str) -> String {
        with_slot_attribute(slot, content)
    }

    fn self_closes_empty(&self) -> bool {
        false
    }

    fn classify_attribute(&self, attribute: &Attribute) -> AttributeKind {
        let name = attribute.name.to_ascii_lowercase();

        // Inline handlers (onclick="...") are plain script, not schema
        if is_global_attribute(&name) || (name.starts_with("on") && name.len() > 2) {
            return AttributeKind::Passthrough;
        }

        AttributeKind::Property {
            name,
            value: attribute.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_index;
    use crate::traits::ElementSpec;
    use pretty_assertions::assert_eq;

    #[test]
    fn kebab_cases_attributes() {
        let adapter = HtmlAdapter;

        assert_eq!(adapter.attribute_name("maxLength"), "max-length");
        assert!(adapter.matches_property("max-length", "maxLength"));
        assert!(adapter.matches_property("MAXLENGTH", "maxLength"));
        assert!(!adapter.matches_property("max", "maxLength"));
    }

    #[test]
    fn renders_named_slots_with_slot_attribute() {
        let index = test_index();
        let card = index.get_by_tag("plus-card").unwrap();

        let rendered = HtmlAdapter.render(&ElementSpec {
            component: card,
            properties: vec![],
            slots: vec![("header", "<h3>Title</h3>"), ("", "Body"), ("footer", "Done")],
        });

        assert_eq!(
            rendered,
            "<plus-card>\n  <h3 slot=\"header\">Title</h3>\n  Body\n  <span slot=\"footer\">Done</span>\n</plus-card>"
        );
    }

    #[test]
    fn escapes_attribute_values() {
        let index = test_index();
        let input = index.get_by_tag("plus-input").unwrap();
        let label = input.property("label").unwrap();

        assert_eq!(
            HtmlAdapter.render_attribute(label, &PropValue::from("Say \"hi\"")),
            Some("label=\"Say &quot;hi&quot;\"".to_string())
        );
    }

    #[test]
    fn inline_handlers_pass_through() {
        let attribute = Attribute {
            name: "onclick".to_string(),
            value: PropValue::from("go()"),
        };

        assert_eq!(HtmlAdapter.classify_attribute(&attribute), AttributeKind::Passthrough);
    }
}
