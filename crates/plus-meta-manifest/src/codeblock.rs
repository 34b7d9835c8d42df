//! Code fence classification for example documents.

use crate::model::Format;

/// A fenced code block that holds a usage snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleBlock {
    /// Output format named by the fence language
    pub format: Format,

    /// Snippet text without the trailing newline
    pub code: String,

    /// Title given in the info string, if any
    pub title: Option<String>,
}

impl ExampleBlock {
    /// Classify a fence. Returns `None` for fences that are not snippets in a
    /// supported format (shell sessions, CSS, plain text).
    pub fn from_fence(info: &str, code: &str) -> Option<Self> {
        let format = Format::from_info(info)?;
        Some(Self {
            format,
            code: code.trim_end_matches('\n').to_string(),
            title: extract_title(info),
        })
    }
}

/// Extract a title from a code fence info string if present.
///
/// Supports formats like:
/// - `html title="Disabled state"`
/// - `vue title=Basic`
pub fn extract_title(info: &str) -> Option<String> {
    if let Some(start) = info.find("title=\"") {
        let rest = &info[start + 7..];
        if let Some(end) = rest.find('"') {
            let title = rest[..end].trim();
            return (!title.is_empty()).then(|| title.to_string());
        }
    }

    if let Some(start) = info.find("title=") {
        let rest = &info[start + 6..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let title = rest[..end].trim_matches('"');
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    None
}
