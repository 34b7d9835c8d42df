//! Property values supplied by callers or parsed from usage fragments.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// String literal: kind="filled"
    String(String),
    /// Numeric literal: max={3}
    Number(f64),
    /// Boolean; a bare attribute parses as `Boolean(true)`
    Boolean(bool),
    /// Unevaluated binding: onClick={handler}, :count="n"
    Expression(String),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as a boolean. Accepts booleans and the strings "true"/"false".
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Boolean(b) => Some(*b),
            PropValue::String(s) | PropValue::Expression(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            PropValue::Number(_) => None,
        }
    }

    /// The literal value as text, when it is statically known.
    ///
    /// Expressions count only when they are a quoted string, a number or a
    /// boolean; anything else depends on runtime state and yields `None`.
    pub fn literal(&self) -> Option<Cow<'_, str>> {
        match self {
            PropValue::String(s) => Some(Cow::Borrowed(s)),
            PropValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            PropValue::Boolean(b) => Some(Cow::Owned(b.to_string())),
            PropValue::Expression(expr) => {
                let expr = expr.trim();
                if let Some(inner) = unquote(expr) {
                    Some(Cow::Borrowed(inner))
                } else if expr.parse::<f64>().is_ok() || expr == "true" || expr == "false" {
                    Some(Cow::Borrowed(expr))
                } else {
                    None
                }
            }
        }
    }

    /// Parse a command-line style `value`: booleans and numbers are typed,
    /// `{...}` is an expression, everything else is a string.
    pub fn parse_loose(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return PropValue::Boolean(true),
            "false" => return PropValue::Boolean(false),
            _ => {}
        }
        if let Some(expr) = trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            return PropValue::Expression(expr.trim().to_string());
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return PropValue::Number(n);
            }
        }
        PropValue::String(raw.to_string())
    }

    /// Convert from a JSON value. Arrays and objects become expressions
    /// holding their JSON text; `null` has no value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(PropValue::Boolean(*b)),
            Value::Number(n) => n.as_f64().map(PropValue::Number),
            Value::String(s) => Some(PropValue::String(s.clone())),
            other => Some(PropValue::Expression(other.to_string())),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::String(s) | PropValue::Expression(s) => f.write_str(s),
            PropValue::Number(n) => f.write_str(&format_number(*n)),
            PropValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Boolean(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n as f64)
    }
}

/// Format a number without a trailing `.0` for integral values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn unquote(s: &str) -> Option<&str> {
    let first = s.chars().next()?;
    if !matches!(first, '\'' | '"' | '`') || s.len() < 2 || !s.ends_with(first) {
        return None;
    }
    Some(&s[1..s.len() - 1])
}
