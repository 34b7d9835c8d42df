//! Usage snippet generator.
//!
//! Generation is best-effort: values for properties or slots the component
//! does not declare are dropped, and enum values are emitted verbatim.
//! Checking a usage is [`UsageValidator`](crate::UsageValidator)'s job.

use std::collections::HashMap;

use plus_meta_manifest::naming::to_kebab_case;
use plus_meta_manifest::{ComponentDescriptor, Format, PropertyDescriptor};

use crate::index::ComponentIndex;
use crate::traits::{adapter_for, ElementSpec, GenerateError};
use crate::value::PropValue;

/// Renders usage snippets for indexed components.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator<'a> {
    index: &'a ComponentIndex,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(index: &'a ComponentIndex) -> Self {
        Self { index }
    }

    /// Generate a snippet for a format given by name.
    ///
    /// An unknown tag is reported before an unsupported format.
    pub fn generate(
        &self,
        tag: &str,
        format: &str,
        properties: &HashMap<String, PropValue>,
        slots: &HashMap<String, String>,
    ) -> Result<String, GenerateError> {
        if !self.index.contains(tag) {
            return Err(GenerateError::UnknownComponent(tag.to_string()));
        }

        let format: Format = format
            .parse()
            .map_err(|_| GenerateError::UnsupportedFormat(format.to_string()))?;

        self.generate_for(tag, format, properties, slots)
    }

    /// Generate a snippet for a format.
    pub fn generate_for(
        &self,
        tag: &str,
        format: Format,
        properties: &HashMap<String, PropValue>,
        slots: &HashMap<String, String>,
    ) -> Result<String, GenerateError> {
        let component = self
            .index
            .get(tag)
            .ok_or_else(|| GenerateError::UnknownComponent(tag.to_string()))?;

        let element = ElementSpec {
            component,
            properties: resolve_properties(component, properties),
            slots: resolve_slots(component, slots),
        };

        let snippet = adapter_for(format).render(&element);
        tracing::debug!("Generated {} snippet for <{}>", format, component.tag_name);

        Ok(snippet)
    }
}

/// Pair supplied values with declared properties, in declaration order.
///
/// Keys may use the declared name or its kebab-case attribute spelling.
fn resolve_properties<'a>(
    component: &'a ComponentDescriptor,
    values: &'a HashMap<String, PropValue>,
) -> Vec<(&'a PropertyDescriptor, &'a PropValue)> {
    let mut matched: Vec<(usize, &PropertyDescriptor, &PropValue)> = Vec::new();

    for (key, value) in values {
        let position = component
            .properties
            .iter()
            .position(|p| p.name == *key)
            .or_else(|| {
                let kebab = to_kebab_case(key);
                component
                    .properties
                    .iter()
                    .position(|p| to_kebab_case(&p.name) == kebab)
            });

        match position {
            Some(position) if !matched.iter().any(|(p, _, _)| *p == position) => {
                matched.push((position, &component.properties[position], value));
            }
            Some(_) => {
                tracing::debug!("Ignoring duplicate value for property {}", key);
            }
            None => {
                tracing::debug!("Ignoring unknown property {} on <{}>", key, component.tag_name);
            }
        }
    }

    matched.sort_by_key(|(position, _, _)| *position);
    matched
        .into_iter()
        .map(|(_, property, value)| (property, value))
        .collect()
}

/// Supplied, non-blank slot content in declaration order.
///
/// `default` addresses the unnamed slot unless a slot is literally named so.
fn resolve_slots<'a>(
    component: &'a ComponentDescriptor,
    values: &'a HashMap<String, String>,
) -> Vec<(&'a str, &'a str)> {
    for key in values.keys() {
        let declared = component.slot(key).is_some()
            || (key == "default" && component.slot("").is_some());
        if !declared {
            tracing::debug!("Ignoring undeclared slot {} on <{}>", key, component.tag_name);
        }
    }

    component
        .slots
        .iter()
        .filter_map(|slot| {
            let content = values.get(&slot.name).or_else(|| {
                (slot.is_default() && component.slot("default").is_none())
                    .then(|| values.get("default"))
                    .flatten()
            })?;
            let content = content.trim();
            (!content.is_empty()).then_some((slot.name.as_str(), content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_index;
    use pretty_assertions::assert_eq;

    fn props(pairs: &[(&str, PropValue)]) -> HashMap<String, PropValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn slots(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_supplied_properties_only() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let html = generator
            .generate(
                "plus-avatar",
                "markup",
                &props(&[("size", PropValue::from("medium"))]),
                &HashMap::new(),
            )
            .unwrap();

        assert_eq!(html, r#"<plus-avatar size="medium"></plus-avatar>"#);
        assert!(!html.contains("src"));
        assert!(!html.contains("shape"));
    }

    #[test]
    fn false_booleans_are_omitted_in_every_format() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);
        let values = props(&[("visible", PropValue::Boolean(false))]);

        for format in Format::ALL {
            let snippet = generator
                .generate_for("plus-avatar", format, &values, &HashMap::new())
                .unwrap();
            assert!(!snippet.contains("visible"), "{format}: {snippet}");
        }
    }

    #[test]
    fn true_booleans_are_bare_attributes() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);
        let values = props(&[("disabled", PropValue::Boolean(true))]);

        let html = generator
            .generate("plus-button", "html", &values, &HashMap::new())
            .unwrap();
        let vue = generator
            .generate("plus-button", "vue", &values, &HashMap::new())
            .unwrap();

        assert_eq!(html, "<plus-button disabled></plus-button>");
        assert_eq!(vue, "<plus-button disabled />");
    }

    #[test]
    fn renders_react_with_slots_in_declaration_order() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let jsx = generator
            .generate(
                "plus-button",
                "react",
                &props(&[
                    ("disabled", PropValue::Boolean(true)),
                    ("kind", PropValue::from("outline")),
                    ("color", PropValue::from("red")),
                ]),
                &slots(&[
                    ("prefix", r#"<plus-icon name="save"></plus-icon>"#),
                    ("", "Save"),
                    ("suffix", "   "),
                ]),
            )
            .unwrap();

        assert_eq!(
            jsx,
            "<PlusButton kind=\"outline\" disabled>\n  Save\n  <plus-icon slot=\"prefix\" name=\"save\"></plus-icon>\n</PlusButton>"
        );
    }

    #[test]
    fn single_line_default_slot_stays_inline() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let html = generator
            .generate(
                "plus-button",
                "html",
                &props(&[("kind", PropValue::from("bogus"))]),
                &slots(&[("default", "Submit")]),
            )
            .unwrap();

        assert_eq!(html, r#"<plus-button kind="bogus">Submit</plus-button>"#);
    }

    #[test]
    fn accepts_attribute_spelled_keys() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let vue = generator
            .generate(
                "plus-input",
                "vue",
                &props(&[
                    ("max-length", PropValue::Number(10.0)),
                    ("label", PropValue::from("Name")),
                ]),
                &HashMap::new(),
            )
            .unwrap();

        assert_eq!(vue, r#"<plus-input label="Name" :max-length="10" />"#);
    }

    #[test]
    fn unknown_tag_fails() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let result = generator.generate("unknown-tag", "markup", &HashMap::new(), &HashMap::new());

        assert_eq!(
            result,
            Err(GenerateError::UnknownComponent("unknown-tag".to_string()))
        );
    }

    #[test]
    fn unsupported_format_fails() {
        let index = test_index();
        let generator = CodeGenerator::new(&index);

        let result = generator.generate("plus-button", "svelte", &HashMap::new(), &HashMap::new());
        assert_eq!(
            result,
            Err(GenerateError::UnsupportedFormat("svelte".to_string()))
        );

        // Unknown tag wins when both are wrong
        let result = generator.generate("plus-nope", "svelte", &HashMap::new(), &HashMap::new());
        assert!(matches!(result, Err(GenerateError::UnknownComponent(_))));
    }
}
