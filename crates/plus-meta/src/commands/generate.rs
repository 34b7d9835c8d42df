//! Snippet generation command.

use std::collections::HashMap;

use anyhow::{bail, Result};

use plus_meta_adapters::PropValue;

use super::{print_json, Context};

/// Run the generate command.
pub async fn run(
    ctx: &Context,
    tag: &str,
    format: Option<String>,
    props: &[String],
    slots: &[String],
    content: Option<String>,
) -> Result<()> {
    let format = ctx.format(format);
    let properties = parse_props(props);
    let mut slot_values = parse_slots(slots)?;

    if let Some(content) = content {
        slot_values.insert(String::new(), content);
    }

    let snippet = ctx
        .service
        .generate(tag, &format, &properties, &slot_values)
        .await?;

    if ctx.json {
        return print_json(&serde_json::json!({
            "tagName": tag,
            "format": format,
            "code": snippet,
        }));
    }

    println!("{snippet}");
    Ok(())
}

/// Parse `name=value` pairs; a bare `name` is `true`.
fn parse_props(args: &[String]) -> HashMap<String, PropValue> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), PropValue::parse_loose(value)),
            None => (arg.trim().to_string(), PropValue::Boolean(true)),
        })
        .collect()
}

/// Parse `slot=content` pairs.
fn parse_slots(args: &[String]) -> Result<HashMap<String, String>> {
    let mut slots = HashMap::new();

    for arg in args {
        let Some((name, content)) = arg.split_once('=') else {
            bail!("Invalid slot \"{arg}\": expected slot=content");
        };
        slots.insert(name.trim().to_string(), content.to_string());
    }

    Ok(slots)
}
