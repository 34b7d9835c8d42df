//! Frontmatter extraction for authored example documents.

use serde::Deserialize;

/// Parsed frontmatter of an example document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Tag of the component the document illustrates
    #[serde(default, alias = "tag", alias = "tagName")]
    pub component: Option<String>,

    /// Document title, used when a block has no closer heading
    #[serde(default)]
    pub title: Option<String>,

    /// Fallback description for blocks without their own prose
    #[serde(default)]
    pub description: Option<String>,

    /// Order among documents for the same component (lower = first)
    #[serde(default)]
    pub order: Option<i32>,
}

/// Extract frontmatter from a Markdown document.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = if yaml_content.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start_matches('-').trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
