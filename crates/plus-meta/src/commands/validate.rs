//! Usage validation command.

use std::io::Read;

use anyhow::{bail, Context as _, Result};

use super::{print_json, Context};

/// Run the validate command. Fails when the fragment is invalid.
pub async fn run(ctx: &Context, fragment: &str, format: Option<String>) -> Result<()> {
    let format = ctx.format(format);

    let fragment = if fragment == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read fragment from stdin")?;
        buf
    } else {
        fragment.to_string()
    };

    let result = ctx.service.validate(&fragment, &format).await?;

    if ctx.json {
        print_json(&result)?;
    } else {
        for suggestion in &result.suggestions {
            println!("- {suggestion}");
        }
        if result.is_valid {
            println!("Valid");
        }
    }

    if !result.is_valid {
        bail!("Fragment is not valid {format}");
    }

    Ok(())
}
