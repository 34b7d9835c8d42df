//! Curated examples command.

use anyhow::Result;

use super::{print_json, Context};

/// Run the examples command.
pub async fn run(ctx: &Context, tag: &str, format: Option<String>) -> Result<()> {
    let format = ctx.format(format);

    // Unknown tags are an error here, unlike in get_examples
    ctx.service.get_component(tag).await?;

    let examples = ctx.service.get_examples(tag, &format).await?;

    if ctx.json {
        return print_json(&examples);
    }

    if examples.is_empty() {
        let available = ctx.service.example_formats(tag).await?;
        if available.is_empty() {
            println!("No examples for <{tag}>");
        } else {
            let available: Vec<&str> = available.iter().map(|f| f.as_str()).collect();
            println!(
                "No {format} examples for <{tag}> (available: {})",
                available.join(", ")
            );
        }
        return Ok(());
    }

    for (i, example) in examples.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("## {}", example.title);
        if !example.description.is_empty() {
            println!("{}", example.description);
        }
        println!("```{}\n{}\n```", example.format, example.code.trim_end());
    }

    Ok(())
}
