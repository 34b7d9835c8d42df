//! Closed property type taxonomy and normalization of type spellings.

use serde::Serialize;

/// Normalized type of a component property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    /// Closed set of literal values, in declaration order.
    Enum(Vec<String>),
    /// Rendered content (elements, templates, framework nodes).
    Node,
}

impl PropertyType {
    /// Declared values for an enum type.
    pub fn enum_values(&self) -> Option<&[String]> {
        match self {
            PropertyType::Enum(values) => Some(values),
            _ => None,
        }
    }

    /// Short name used in messages and listings.
    pub fn label(&self) -> String {
        match self {
            PropertyType::String => "string".to_string(),
            PropertyType::Number => "number".to_string(),
            PropertyType::Boolean => "boolean".to_string(),
            PropertyType::Node => "node".to_string(),
            PropertyType::Enum(values) => values
                .iter()
                .map(|v| format!("\"{v}\""))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    /// Build an enum type from a literal list.
    ///
    /// Values are deduplicated, keeping the first occurrence. A list made
    /// only of `true`/`false` is a boolean, not an enum.
    pub fn from_literals<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !out.contains(&value) {
                out.push(value);
            }
        }

        if !out.is_empty() && out.iter().all(|v| v == "true" || v == "false") {
            return PropertyType::Boolean;
        }

        PropertyType::Enum(out)
    }

    /// Normalize a TypeScript-style type expression.
    pub fn from_type_text(text: &str) -> Self {
        let members: Vec<&str> = flatten_union(text)
            .into_iter()
            .filter(|m| !m.is_empty() && *m != "undefined" && *m != "null")
            .collect();

        if members.is_empty() {
            return PropertyType::String;
        }

        let kinds: Vec<Member> = members.iter().map(|m| classify_member(m)).collect();

        if kinds.iter().all(|k| matches!(k, Member::Boolean)) {
            return PropertyType::Boolean;
        }
        if kinds.iter().all(|k| matches!(k, Member::Literal(_))) {
            let literals = kinds.into_iter().filter_map(|k| match k {
                Member::Literal(v) => Some(v),
                _ => None,
            });
            return PropertyType::from_literals(literals);
        }
        if kinds.iter().any(|k| matches!(k, Member::String)) {
            return PropertyType::String;
        }
        if kinds.iter().all(|k| match k {
            Member::Number => true,
            Member::Literal(v) => v.parse::<f64>().is_ok(),
            _ => false,
        }) {
            return PropertyType::Number;
        }
        if kinds.iter().all(|k| matches!(k, Member::Node)) {
            return PropertyType::Node;
        }

        PropertyType::String
    }
}

/// One member of a union type expression.
enum Member {
    String,
    Number,
    Boolean,
    Node,
    Literal(String),
    Other,
}

fn classify_member(member: &str) -> Member {
    if let Some(literal) = unquote(member) {
        return Member::Literal(literal.to_string());
    }
    if member.parse::<f64>().is_ok() {
        return Member::Literal(member.to_string());
    }

    match member {
        "string" | "String" => Member::String,
        "number" | "Number" | "bigint" => Member::Number,
        "boolean" | "Boolean" | "true" | "false" => Member::Boolean,
        _ if is_node_type(member) => Member::Node,
        _ => Member::Other,
    }
}

fn is_node_type(name: &str) -> bool {
    matches!(
        name,
        "Node"
            | "Element"
            | "TemplateResult"
            | "DocumentFragment"
            | "ReactNode"
            | "ReactElement"
            | "JSX.Element"
            | "VNode"
            | "Snippet"
    ) || (name.ends_with("Element") && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.'))
}

/// Return the inner text of a quoted literal (`'a'`, `"a"` or `` `a` ``).
pub(crate) fn unquote(s: &str) -> Option<&str> {
    let s = s.trim();
    let first = s.chars().next()?;
    if !matches!(first, '\'' | '"' | '`') || s.len() < 2 || !s.ends_with(first) {
        return None;
    }
    Some(&s[1..s.len() - 1])
}

fn strip_parens(s: &str) -> &str {
    let mut s = s.trim();
    while s.starts_with('(') && s.ends_with(')') && encloses(s) {
        s = s[1..s.len() - 1].trim();
    }
    s
}

/// Whether the opening `(` of `s` is closed by its final character.
fn encloses(s: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;

    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return i == s.len() - 1;
                    }
                }
                _ => {}
            },
        }
    }

    false
}

/// Split a union into its members, expanding parenthesized sub-unions.
fn flatten_union(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for part in split_union(text) {
        let inner = strip_parens(part);
        if inner.len() != part.len() && split_union(inner).len() > 1 {
            out.extend(flatten_union(inner));
        } else {
            out.push(inner);
        }
    }
    out
}

/// Split a type expression on top-level `|`, ignoring separators nested in
/// brackets or quotes.
fn split_union(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '<' | '(' | '{' | '[' => depth += 1,
                '>' | ')' | '}' | ']' => depth -= 1,
                '|' if depth == 0 => {
                    parts.push(text[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(text[start..].trim());

    parts
}
