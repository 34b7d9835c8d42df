//! Inline usage fragment parser.
//!
//! Parses a single element written in any supported format, such as
//! `<plus-button kind="filled">Submit</plus-button>` or
//! `<PlusButton onPlusClick={save} />`, into its element name, attributes and
//! children. Attribute values are kept as written; what a name like `:size` or
//! `onClick` means is decided by the format adapter.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use plus_meta_manifest::Format;

use crate::value::PropValue;

/// A parsed usage fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFragment {
    /// Element name as written (e.g. "plus-button", "PlusButton")
    pub element: String,

    /// Attributes in source order
    pub attributes: Vec<Attribute>,

    /// Children content (text or nested markup as string)
    pub children: Option<String>,

    /// Whether self-closing
    pub self_closing: bool,

    /// Byte length of the element within the trimmed fragment
    pub consumed: usize,
}

/// One attribute as written in a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: PropValue,
}

/// Errors from parsing a usage fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    #[error("fragment is empty")]
    Empty,

    #[error("expected an element, found `{0}`")]
    NotAnElement(String),

    #[error("opening tag <{0}> is not terminated")]
    UnterminatedTag(String),

    #[error("<{0}> is never closed")]
    Unclosed(String),

    #[error("malformed attributes on <{element}>: {reason}")]
    MalformedAttributes { element: String, reason: String },
}

/// HTML elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse a usage fragment with case-sensitive closing tags.
///
/// Only the first top-level element is parsed; anything after it is left for
/// the caller to inspect through [`ParsedFragment::consumed`].
pub fn parse_fragment(source: &str) -> Result<ParsedFragment, FragmentError> {
    parse_element(source, false)
}

/// Parse a usage fragment written in a format.
///
/// Markup tag names are case-insensitive, so `</PLUS-BUTTON>` closes
/// `<plus-button>` there and nowhere else.
pub fn parse_fragment_for(source: &str, format: Format) -> Result<ParsedFragment, FragmentError> {
    parse_element(source, format == Format::Html)
}

/// Top-level elements among an element's children, skipping text between them.
///
/// Stops at the first child that does not parse.
pub fn child_elements(children: &str, format: Format) -> Vec<ParsedFragment> {
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(offset) = children[pos..].find('<') {
        let start = pos + offset;
        let rest = &children[start..];

        if !rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            pos = start + 1;
            continue;
        }

        match parse_fragment_for(rest, format) {
            Ok(element) => {
                pos = start + element.consumed;
                elements.push(element);
            }
            Err(e) => {
                tracing::debug!("Stopped reading children: {}", e);
                break;
            }
        }
    }

    elements
}

fn parse_element(source: &str, ignore_case: bool) -> Result<ParsedFragment, FragmentError> {
    static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^<([A-Za-z][A-Za-z0-9._:-]*)").expect("Invalid element name regex")
    });

    let source = source.trim();
    if source.is_empty() {
        return Err(FragmentError::Empty);
    }

    let caps = NAME_RE
        .captures(source)
        .ok_or_else(|| FragmentError::NotAnElement(preview(source)))?;
    let name_match = caps
        .get(1)
        .ok_or_else(|| FragmentError::NotAnElement(preview(source)))?;
    let element = name_match.as_str().to_string();
    let name_end = name_match.end();

    // Name must end at a tag boundary
    if let Some(c) = source[name_end..].chars().next() {
        if !(c.is_whitespace() || c == '>' || c == '/') {
            return Err(FragmentError::NotAnElement(preview(source)));
        }
    }

    let gt = find_tag_end(source, name_end)
        .ok_or_else(|| FragmentError::UnterminatedTag(element.clone()))?;

    let mut attr_text = source[name_end..gt].trim_end();
    let self_closing = attr_text.ends_with('/');
    if self_closing {
        attr_text = &attr_text[..attr_text.len() - 1];
    }

    let attributes =
        parse_attributes(attr_text).map_err(|reason| FragmentError::MalformedAttributes {
            element: element.clone(),
            reason,
        })?;

    if self_closing || VOID_ELEMENTS.contains(&element.to_ascii_lowercase().as_str()) {
        return Ok(ParsedFragment {
            element,
            attributes,
            children: None,
            self_closing,
            consumed: gt + 1,
        });
    }

    let (close_pos, close_end) = find_matching_close_tag(source, &element, gt + 1, ignore_case)
        .ok_or_else(|| FragmentError::Unclosed(element.clone()))?;

    let children = source[gt + 1..close_pos].trim();
    let children = if children.is_empty() {
        None
    } else {
        Some(children.to_string())
    };

    Ok(ParsedFragment {
        element,
        attributes,
        children,
        self_closing: false,
        consumed: close_end,
    })
}

/// Find the `>` closing an opening tag, skipping quoted and braced values.
fn find_tag_end(source: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for (i, c) in source[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'' | '`') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => depth = depth.saturating_sub(1),
            (None, '>') if depth == 0 => return Some(from + i),
            _ => {}
        }
    }

    None
}

/// Find the matching closing tag, handling nested same-name elements.
///
/// Returns the byte range of the closing tag. Whitespace is allowed before
/// its `>`.
fn find_matching_close_tag(
    source: &str,
    element: &str,
    start_pos: usize,
    ignore_case: bool,
) -> Option<(usize, usize)> {
    // ASCII lowercasing keeps byte offsets intact
    let (haystack, element) = if ignore_case {
        (
            Cow::Owned(source.to_ascii_lowercase()),
            Cow::Owned(element.to_ascii_lowercase()),
        )
    } else {
        (Cow::Borrowed(source), Cow::Borrowed(element))
    };
    let open_pattern = format!("<{element}");
    let close_pattern = format!("</{element}");

    let mut depth = 1;
    let mut pos = start_pos;

    while pos < haystack.len() {
        let rest = &haystack[pos..];
        let next_open = rest.find(&open_pattern);
        let next_close = rest.find(&close_pattern)?;

        match next_open {
            Some(o) if o < next_close => {
                let tag_start = pos + o;
                let after_name = tag_start + open_pattern.len();
                let boundary = haystack[after_name..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/');

                if !boundary {
                    // Longer name sharing the prefix (<plus-card-header)
                    pos = after_name;
                    continue;
                }

                let end = find_tag_end(&haystack, after_name)?;
                if !haystack[after_name..end].trim_end().ends_with('/') {
                    depth += 1;
                }
                pos = end + 1;
            }
            _ => {
                let close_start = pos + next_close;
                let after_name = close_start + close_pattern.len();
                let tail = &haystack[after_name..];
                let trimmed = tail.trim_start();

                if !trimmed.starts_with('>') {
                    // </plus-card-header>
                    pos = after_name;
                    continue;
                }

                let close_end = after_name + (tail.len() - trimmed.len()) + 1;
                depth -= 1;
                if depth == 0 {
                    return Some((close_start, close_end));
                }
                pos = close_end;
            }
        }
    }

    None
}

/// Tokenize the attribute section of an opening tag.
fn parse_attributes(text: &str) -> Result<Vec<Attribute>, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut attributes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        // Spread attributes ({...props}) carry nothing we can check
        if chars[i] == '{' {
            let (_, next) = read_braced(&chars, i)?;
            i = next;
            continue;
        }

        let start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        if i == start {
            return Err(format!("unexpected `{}`", chars[i]));
        }
        let name: String = chars[start..i].iter().collect();

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }

        if j >= chars.len() || chars[j] != '=' {
            attributes.push(Attribute {
                name,
                value: PropValue::Boolean(true),
            });
            continue;
        }

        j += 1;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j >= chars.len() {
            return Err(format!("attribute `{name}` is missing a value"));
        }

        let value = match chars[j] {
            q @ ('"' | '\'') => {
                let close = chars[j + 1..]
                    .iter()
                    .position(|&c| c == q)
                    .ok_or_else(|| format!("unterminated quote in `{name}`"))?;
                let inner: String = chars[j + 1..j + 1 + close].iter().collect();
                i = j + close + 2;
                PropValue::String(inner)
            }
            '{' => {
                let (inner, next) = read_braced(&chars, j)?;
                i = next;
                PropValue::Expression(inner.trim().to_string())
            }
            _ => {
                let start = j;
                while j < chars.len() && !chars[j].is_whitespace() {
                    j += 1;
                }
                i = j;
                PropValue::String(chars[start..j].iter().collect())
            }
        };

        attributes.push(Attribute { name, value });
    }

    Ok(attributes)
}

/// Read a brace-balanced expression starting at `open`, returning its inner
/// text and the index after the closing brace.
fn read_braced(chars: &[char], open: usize) -> Result<(String, usize), String> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (offset, &c) in chars[open..].iter().enumerate() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'' | '`') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => {
                depth -= 1;
                if depth == 0 {
                    let end = open + offset;
                    return Ok((chars[open + 1..end].iter().collect(), end + 1));
                }
            }
            _ => {}
        }
    }

    Err("unbalanced braces".to_string())
}

fn is_name_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '=' | '"' | '\'' | '{' | '}' | '/' | '<' | '>'))
}

fn preview(source: &str) -> String {
    let line = source.lines().next().unwrap_or_default();
    match line.char_indices().nth(24) {
        Some((i, _)) => format!("{}...", &line[..i]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attr(name: &str, value: PropValue) -> Attribute {
        Attribute {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn parses_element_with_children() {
        let parsed = parse_fragment(r#"<plus-button kind="filled">Submit</plus-button>"#).unwrap();

        assert_eq!(parsed.element, "plus-button");
        assert_eq!(parsed.attributes, vec![attr("kind", PropValue::from("filled"))]);
        assert_eq!(parsed.children, Some("Submit".to_string()));
        assert!(!parsed.self_closing);
    }

    #[test]
    fn parses_self_closing_jsx() {
        let parsed =
            parse_fragment(r#"<PlusAvatar size="small" onLoad={() => setReady(true)} visible />"#)
                .unwrap();

        assert_eq!(parsed.element, "PlusAvatar");
        assert!(parsed.self_closing);
        assert_eq!(
            parsed.attributes,
            vec![
                attr("size", PropValue::from("small")),
                attr("onLoad", PropValue::Expression("() => setReady(true)".to_string())),
                attr("visible", PropValue::Boolean(true)),
            ]
        );
    }

    #[test]
    fn braces_and_quotes_do_not_end_the_tag() {
        let parsed = parse_fragment(
            r#"<PlusCard style={{ color: "red" }} title='a > b'>Body</PlusCard>"#,
        )
        .unwrap();

        assert_eq!(
            parsed.attributes,
            vec![
                attr("style", PropValue::Expression(r#"{ color: "red" }"#.to_string())),
                attr("title", PropValue::from("a > b")),
            ]
        );
        assert_eq!(parsed.children, Some("Body".to_string()));
    }

    #[test]
    fn parses_vue_bindings_and_listeners() {
        let parsed =
            parse_fragment(r#"<plus-input :max-length="10" @plus-change="onChange" v-model="text" />"#)
                .unwrap();

        let names: Vec<&str> = parsed.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec![":max-length", "@plus-change", "v-model"]);
    }

    #[test]
    fn handles_nested_same_name_elements() {
        let source = "<plus-card><plus-card>Inner</plus-card></plus-card>";
        let parsed = parse_fragment(source).unwrap();

        assert_eq!(parsed.children, Some("<plus-card>Inner</plus-card>".to_string()));
        assert_eq!(parsed.consumed, source.len());
    }

    #[test]
    fn ignores_longer_names_sharing_a_prefix() {
        let parsed =
            parse_fragment("<plus-card><plus-card-header>H</plus-card-header></plus-card>").unwrap();

        assert_eq!(
            parsed.children,
            Some("<plus-card-header>H</plus-card-header>".to_string())
        );
    }

    #[test]
    fn markup_close_tags_ignore_case_and_whitespace() {
        let source = "<plus-button>Go</PLUS-BUTTON >";
        let parsed = parse_fragment_for(source, Format::Html).unwrap();

        assert_eq!(parsed.children, Some("Go".to_string()));
        assert_eq!(parsed.consumed, source.len());

        let spaced = parse_fragment("<PlusButton>Go</PlusButton\n>").unwrap();
        assert_eq!(spaced.children, Some("Go".to_string()));

        assert_eq!(
            parse_fragment_for("<PlusButton>Go</plusbutton>", Format::React),
            Err(FragmentError::Unclosed("PlusButton".to_string()))
        );
    }

    #[test]
    fn lists_child_elements() {
        let children = r#"Intro <span slot="header">H</span> text <!-- note --> <b>Body</b>"#;

        let names: Vec<String> = child_elements(children, Format::Html)
            .into_iter()
            .map(|child| child.element)
            .collect();

        assert_eq!(names, vec!["span", "b"]);
    }

    #[test]
    fn void_elements_need_no_close_tag() {
        let parsed = parse_fragment(r#"<img src="a.png">"#).unwrap();

        assert_eq!(parsed.element, "img");
        assert_eq!(parsed.children, None);
    }

    #[test]
    fn reports_malformed_fragments() {
        assert_eq!(parse_fragment("   "), Err(FragmentError::Empty));
        assert!(matches!(
            parse_fragment("plus-button"),
            Err(FragmentError::NotAnElement(_))
        ));
        assert_eq!(
            parse_fragment(r#"<plus-button kind="filled""#),
            Err(FragmentError::UnterminatedTag("plus-button".to_string()))
        );
        assert_eq!(
            parse_fragment("<plus-button>Submit"),
            Err(FragmentError::Unclosed("plus-button".to_string()))
        );
        assert!(matches!(
            parse_fragment("<plus-button kind=>x</plus-button>"),
            Err(FragmentError::MalformedAttributes { .. })
        ));
    }
}
