//! Initialize plus-meta in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing plus-meta...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {}", config_path.display());

    let examples_dir = Path::new("docs/examples");
    if !examples_dir.exists() {
        fs::create_dir_all(examples_dir).context("Failed to create examples directory")?;
    }

    let button_path = examples_dir.join("button.md");
    if !button_path.exists() || yes {
        fs::write(&button_path, DEFAULT_BUTTON_DOC).context("Failed to write button.md")?;
        println!("Created {}", button_path.display());
    }

    println!("Run 'plus-meta list' to check the manifest loads.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# plus-meta configuration

[manifest]
# Manifest file, or a directory searched for custom-elements.json,
# components.json or components.yaml
path = "."

[examples]
# Markdown documents with curated examples
dir = "docs/examples"

[output]
# Default format: html, react or vue
format = "html"
"#;

const DEFAULT_BUTTON_DOC: &str = r#"---
component: plus-button
order: 1
---

# Basic

A button with a text label.

```html
<plus-button kind="filled">Save</plus-button>
```

```jsx
<PlusButton kind="filled">Save</PlusButton>
```

```vue
<plus-button kind="filled">Save</plus-button>
```

## Disabled

```html
<plus-button disabled>Save</plus-button>
```
"#;
