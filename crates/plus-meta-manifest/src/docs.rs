//! Authored example documents.
//!
//! Curated examples can live next to the manifest as Markdown files: the
//! frontmatter names the component, and every fenced block in a supported
//! format becomes a [`CodeExample`] titled by its closest heading.

use std::fs;
use std::path::Path;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use walkdir::WalkDir;

use crate::codeblock::ExampleBlock;
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::model::{CodeExample, TaggedExample};
use crate::store::ManifestError;

/// A parsed example document.
#[derive(Debug, Clone)]
pub struct ExampleDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Examples in document order
    pub examples: Vec<CodeExample>,
}

impl ExampleDoc {
    /// Tag of the documented component, from the frontmatter.
    pub fn component(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.component.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    fn order(&self) -> i32 {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.order)
            .unwrap_or(999)
    }
}

/// Parse one example document.
pub fn parse_example_doc(source: &str) -> Result<ExampleDoc, FrontmatterError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let parser = Parser::new_ext(content, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);

    let mut examples = Vec::new();
    let mut heading: Option<String> = None;
    let mut in_heading = false;
    let mut prose = String::new();
    let mut fence: Option<(String, String)> = None; // (info, code)

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                fence = Some((info, String::new()));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, code)) = fence.take() {
                    if let Some(block) = ExampleBlock::from_fence(&info, &code) {
                        let title = block
                            .title
                            .or_else(|| heading.clone().filter(|h| !h.trim().is_empty()))
                            .or_else(|| frontmatter.as_ref().and_then(|f| f.title.clone()))
                            .unwrap_or_else(|| format!("Example {}", examples.len() + 1));

                        let description = if prose.trim().is_empty() {
                            frontmatter
                                .as_ref()
                                .and_then(|f| f.description.clone())
                                .unwrap_or_default()
                        } else {
                            prose.trim().to_string()
                        };

                        examples.push(CodeExample {
                            title,
                            description,
                            code: block.code,
                            format: block.format,
                        });
                    }
                    prose.clear();
                }
            }

            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                heading = Some(String::new());
                prose.clear();
            }

            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
            }

            Event::End(TagEnd::Paragraph) => {
                if !prose.is_empty() && !prose.ends_with(' ') {
                    prose.push(' ');
                }
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, code)) = fence.as_mut() {
                    code.push_str(&text);
                } else if in_heading {
                    if let Some(h) = heading.as_mut() {
                        h.push_str(&text);
                    }
                } else {
                    prose.push_str(&text);
                }
            }

            Event::SoftBreak | Event::HardBreak => {
                if fence.is_none() && !in_heading {
                    prose.push(' ');
                }
            }

            _ => {}
        }
    }

    Ok(ExampleDoc {
        frontmatter,
        examples,
    })
}

/// Load every example document under a directory.
///
/// Documents are ordered by frontmatter `order`, then path. Documents that do
/// not name a component are skipped.
pub fn load_example_docs(dir: &Path) -> Result<Vec<TaggedExample>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::NotFound(format!(
            "examples directory {}",
            dir.display()
        )));
    }

    let mut docs = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "md" && ext != "mdx" {
            continue;
        }

        let source = fs::read_to_string(path).map_err(|e| ManifestError::read(path, e))?;
        let doc = parse_example_doc(&source)
            .map_err(|e| ManifestError::parse(path.display().to_string(), e.to_string()))?;

        if doc.component().is_none() {
            tracing::warn!(
                "Skipping {}: frontmatter does not name a component",
                path.display()
            );
            continue;
        }

        docs.push(doc);
    }

    // Stable sort keeps path order for equal `order` values
    docs.sort_by_key(|doc| doc.order());

    let examples: Vec<TaggedExample> = docs
        .into_iter()
        .flat_map(|doc| {
            let tag = doc.component().unwrap_or_default().to_lowercase();
            doc.examples.into_iter().map(move |example| TaggedExample {
                tag_name: tag.clone(),
                example,
            })
        })
        .collect();

    tracing::info!(
        "Loaded {} authored examples from {}",
        examples.len(),
        dir.display()
    );

    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Format;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const BUTTON_DOC: &str = r#"---
component: plus-button
title: Button
---

# Basic

A filled button with a label.

```html
<plus-button kind="filled">Submit</plus-button>
```

```jsx
<PlusButton kind="filled">Submit</PlusButton>
```

## Disabled

```html title="Disabled button"
<plus-button disabled>Submit</plus-button>
```

```bash
npm install @plus/ui
```
"#;

    #[test]
    fn parses_examples_with_headings_and_prose() {
        let doc = parse_example_doc(BUTTON_DOC).unwrap();

        assert_eq!(doc.component(), Some("plus-button"));
        assert_eq!(doc.examples.len(), 3);

        let first = &doc.examples[0];
        assert_eq!(first.title, "Basic");
        assert_eq!(first.description, "A filled button with a label.");
        assert_eq!(first.format, Format::Html);
        assert_eq!(first.code, r#"<plus-button kind="filled">Submit</plus-button>"#);

        assert_eq!(doc.examples[1].title, "Basic");
        assert_eq!(doc.examples[1].format, Format::React);

        assert_eq!(doc.examples[2].title, "Disabled button");
        assert_eq!(doc.examples[2].description, "");
    }

    #[test]
    fn falls_back_to_frontmatter_title() {
        let doc = parse_example_doc("---\ncomponent: plus-tag\ntitle: Tags\n---\n\n```vue\n<plus-tag />\n```\n")
            .unwrap();

        assert_eq!(doc.examples[0].title, "Tags");
    }

    #[test]
    fn numbers_untitled_examples() {
        let doc = parse_example_doc("```html\n<plus-a></plus-a>\n```\n\n```html\n<plus-b></plus-b>\n```\n")
            .unwrap();

        assert_eq!(doc.examples[0].title, "Example 1");
        assert_eq!(doc.examples[1].title, "Example 2");
        assert_eq!(doc.component(), None);
    }

    #[test]
    fn loads_documents_in_order() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("a-button.md"),
            "---\ncomponent: plus-button\norder: 2\n---\n\n# Second\n\n```html\n<plus-button></plus-button>\n```\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("b-button.md"),
            "---\ncomponent: plus-button\norder: 1\n---\n\n# First\n\n```html\n<plus-button></plus-button>\n```\n",
        )
        .unwrap();
        fs::write(temp.path().join("notes.md"), "# No component\n\n```html\n<p></p>\n```\n").unwrap();
        fs::write(temp.path().join("readme.txt"), "ignored").unwrap();

        let examples = load_example_docs(temp.path()).unwrap();

        let titles: Vec<&str> = examples.iter().map(|e| e.example.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert!(examples.iter().all(|e| e.tag_name == "plus-button"));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let temp = tempdir().unwrap();

        let result = load_example_docs(&temp.path().join("missing"));

        assert!(matches!(result, Err(ManifestError::NotFound(_))));
    }

    #[test]
    fn invalid_frontmatter_is_parse_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.md"), "---\ncomponent: plus-x\n").unwrap();

        let result = load_example_docs(temp.path());

        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }
}
