//! Trait definitions for format adapters.

use plus_meta_manifest::{ComponentDescriptor, Format, PropertyDescriptor, PropertyType};

use crate::html::HtmlAdapter;
use crate::inline::{Attribute, ParsedFragment};
use crate::react::ReactAdapter;
use crate::value::PropValue;
use crate::vue::VueAdapter;

/// Errors that can occur during snippet generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Unsupported format \"{0}\" (expected one of: html, react, vue)")]
    UnsupportedFormat(String),
}

/// A resolved element ready to be rendered by an adapter.
///
/// Properties and slots are already filtered to what the component declares
/// and sorted in declaration order.
#[derive(Debug, Clone)]
pub struct ElementSpec<'a> {
    /// The component being rendered
    pub component: &'a ComponentDescriptor,

    /// Declared properties with their supplied values
    pub properties: Vec<(&'a PropertyDescriptor, &'a PropValue)>,

    /// Slot name ("" for default) and its content
    pub slots: Vec<(&'a str, &'a str)>,
}

/// How a parsed attribute relates to the component schema.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Candidate property, named as the format spells attributes
    Property { name: String, value: PropValue },

    /// Event listener for the named event
    Listener(String),

    /// Global, framework or handler attribute with no component semantics
    Passthrough,
}

/// Attributes every element accepts regardless of its schema.
const GLOBAL_ATTRIBUTES: &[&str] = &[
    "id", "class", "style", "slot", "part", "title", "hidden", "role", "tabindex", "lang", "dir",
    "inert", "exportparts", "autofocus", "draggable", "translate", "spellcheck", "contenteditable",
];

/// Whether an attribute is accepted on every element.
pub(crate) fn is_global_attribute(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    GLOBAL_ATTRIBUTES.contains(&lower.as_str())
        || lower.starts_with("aria-")
        || lower.starts_with("data-")
}

/// Value of a child's `slot="..."` attribute.
pub(crate) fn slot_attribute(child: &ParsedFragment) -> Option<String> {
    child
        .attributes
        .iter()
        .find(|a| a.name == "slot")
        .and_then(|a| a.value.as_str())
        .map(str::to_string)
}

/// Trait for format-specific adapters.
///
/// One implementation exists per [`Format`] variant; [`adapter_for`] maps the
/// variant to its adapter with an exhaustive match.
pub trait FormatAdapter: Send + Sync {
    /// The format this adapter renders
    fn format(&self) -> Format;

    /// Element name as written in this format (e.g. `plus-button`, `PlusButton`)
    fn element_name(&self, tag_name: &str) -> String;

    /// Tag name for an element name written in this format
    fn resolve_tag(&self, element_name: &str) -> String;

    /// Attribute spelling of a declared property name
    fn attribute_name(&self, property: &str) -> String;

    /// Whether a written attribute name refers to the given property
    fn matches_property(&self, attribute: &str, property: &str) -> bool {
        self.attribute_name(property) == attribute
    }

    /// Render one property assignment, or `None` to omit it
    fn render_attribute(&self, property: &PropertyDescriptor, value: &PropValue) -> Option<String>;

    /// Wrap content destined for a named slot
    fn wrap_named_slot(&self, slot: &str, content: &str) -> String;

    /// Whether an element without children is written self-closing
    fn self_closes_empty(&self) -> bool;

    /// Classify an attribute parsed from a usage fragment
    fn classify_attribute(&self, attribute: &Attribute) -> AttributeKind;

    /// The property name and value an attribute would assign, with any
    /// binding syntax removed. `None` for attributes that can never name a
    /// property, such as listeners.
    fn property_binding(&self, attribute: &Attribute) -> Option<(String, PropValue)> {
        Some((attribute.name.clone(), attribute.value.clone()))
    }

    /// Slot a child element is assigned to, if any
    fn slot_of(&self, child: &ParsedFragment) -> Option<String> {
        slot_attribute(child)
    }

    /// Render a complete element.
    fn render(&self, element: &ElementSpec<'_>) -> String {
        let name = self.element_name(&element.component.tag_name);

        let attrs: Vec<String> = element
            .properties
            .iter()
            .filter_map(|(property, value)| self.render_attribute(property, value))
            .collect();

        let open = if attrs.is_empty() {
            format!("<{name}")
        } else {
            format!("<{name} {}", attrs.join(" "))
        };

        let children: Vec<String> = element
            .slots
            .iter()
            .map(|(slot, content)| {
                if slot.is_empty() {
                    content.to_string()
                } else {
                    self.wrap_named_slot(slot, content)
                }
            })
            .collect();

        match children.as_slice() {
            [] if self.self_closes_empty() => format!("{open} />"),
            [] => format!("{open}></{name}>"),
            [only] if element.slots[0].0.is_empty() && !only.contains('\n') => {
                format!("{open}>{only}</{name}>")
            }
            _ => {
                let body = children
                    .iter()
                    .map(|child| indent(child))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{open}>\n{body}\n</{name}>")
            }
        }
    }
}

/// Select the adapter for a format.
pub fn adapter_for(format: Format) -> &'static dyn FormatAdapter {
    static HTML: HtmlAdapter = HtmlAdapter;
    static REACT: ReactAdapter = ReactAdapter;
    static VUE: VueAdapter = VueAdapter;

    match format {
        Format::Html => &HTML,
        Format::React => &REACT,
        Format::Vue => &VUE,
    }
}

/// Whether a property renders as a bare boolean attribute for this value.
///
/// Returns `Some(true)` for bare, `Some(false)` for omitted and `None` when the
/// property is not boolean-typed or the value is not a boolean.
pub(crate) fn boolean_presence(property: &PropertyDescriptor, value: &PropValue) -> Option<bool> {
    if property.ty != PropertyType::Boolean {
        return None;
    }
    value.as_bool()
}

/// Escape HTML special characters including single quotes for XSS prevention.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Put a `slot` attribute on slotted content.
///
/// Content that is a single element gets the attribute on that element;
/// anything else is wrapped in a `<span>`.
pub(crate) fn with_slot_attribute(slot: &str, content: &str) -> String {
    let content = content.trim();
    let slot_attr = format!("slot=\"{}\"", html_escape(slot));

    if let Some(name_end) = single_element_name_end(content) {
        return format!("{} {}{}", &content[..name_end], slot_attr, &content[name_end..]);
    }

    format!("<span {slot_attr}>{content}</span>")
}

/// Byte offset just past the element name when `content` is exactly one element.
fn single_element_name_end(content: &str) -> Option<usize> {
    let rest = content.strip_prefix('<')?;
    let first = rest.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..name_len];

    let parsed = crate::inline::parse_fragment_for(content, Format::Html).ok()?;
    if parsed.element != name || parsed.consumed != content.len() {
        return None;
    }

    Some(1 + name_len)
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
