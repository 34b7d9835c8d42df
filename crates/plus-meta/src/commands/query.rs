//! Discovery commands: list, categories, search and show.

use anyhow::Result;

use plus_meta_manifest::ComponentDescriptor;

use super::{print_json, Context};

/// Run the list command.
pub async fn list(ctx: &Context, category: Option<&str>) -> Result<()> {
    let components = match category {
        Some(category) => ctx.service.components_in_category(category).await?,
        None => ctx.service.list_components().await?,
    };

    if ctx.json {
        return print_json(&components);
    }

    print_table(&components);
    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let categories = ctx.service.categories().await?;

    if ctx.json {
        return print_json(&categories);
    }

    for category in categories {
        println!("{category}");
    }
    Ok(())
}

/// Run the search command.
pub async fn search(ctx: &Context, query: &str) -> Result<()> {
    let components = ctx.service.search(query).await?;

    if ctx.json {
        return print_json(&components);
    }

    if components.is_empty() {
        println!("No components match \"{query}\"");
        return Ok(());
    }

    print_table(&components);
    Ok(())
}

/// Run the show command.
pub async fn show(ctx: &Context, tag: &str) -> Result<()> {
    let component = ctx.service.get_component(tag).await?;

    if ctx.json {
        return print_json(&component);
    }

    print!("{}", describe(&component));
    Ok(())
}

fn print_table(components: &[ComponentDescriptor]) {
    let width = components
        .iter()
        .map(|c| c.tag_name.len())
        .max()
        .unwrap_or(0);

    for component in components {
        println!(
            "{:<width$}  {:<14}  {}",
            component.tag_name, component.category, component.description
        );
    }
}

/// Human-readable summary of one component.
fn describe(component: &ComponentDescriptor) -> String {
    let mut out = format!("<{}> {}\n", component.tag_name, component.name);
    if !component.description.is_empty() {
        out.push_str(&format!("{}\n", component.description));
    }
    out.push_str(&format!("Category: {}\n", component.category));

    if !component.properties.is_empty() {
        out.push_str("\nProperties:\n");
        for property in &component.properties {
            let mut line = format!("  {}: {}", property.name, property.ty.label());
            if property.required {
                line.push_str(" (required)");
            }
            if let Some(default) = &property.default_value {
                line.push_str(&format!(" = {default}"));
            }
            if !property.description.is_empty() {
                line.push_str(&format!("  {}", property.description));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    if !component.slots.is_empty() {
        out.push_str("\nSlots:\n");
        for slot in &component.slots {
            let name = if slot.is_default() { "(default)" } else { slot.name.as_str() };
            out.push_str(&format!("  {name}  {}\n", slot.description).trim_end());
            out.push('\n');
        }
    }

    if !component.events.is_empty() {
        out.push_str("\nEvents:\n");
        for event in &component.events {
            let mut line = format!("  {}", event.name);
            if let Some(shape) = &event.detail_shape {
                line.push_str(&format!(" -> {shape}"));
            }
            if !event.description.is_empty() {
                line.push_str(&format!("  {}", event.description));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    if !component.css_parts.is_empty() {
        out.push_str("\nCSS parts:\n");
        for part in &component.css_parts {
            out.push_str(&format!("  {}  {}", part.name, part.description).trim_end());
            out.push('\n');
        }
    }

    out
}
