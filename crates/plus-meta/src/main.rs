//! plus-meta CLI - component discovery, snippet generation and usage validation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::config::load_config;
use commands::Context;

#[derive(Parser)]
#[command(name = "plus-meta")]
#[command(about = "Query, generate and validate component usage from a component manifest")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to plus-meta.toml config file
    #[arg(short, long, default_value = "plus-meta.toml", global = true)]
    config: PathBuf,

    /// Manifest file or directory (overrides the config file)
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a plus-meta.toml and an example document
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// List components in manifest order
    List {
        /// Only components in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// List component categories
    Categories,

    /// Search components by tag, name, description or category
    Search {
        /// Search text (empty lists everything)
        #[arg(default_value = "")]
        query: String,
    },

    /// Show one component's properties, slots, events and parts
    Show {
        /// Component tag (e.g. plus-button)
        tag: String,
    },

    /// Generate a usage snippet
    Generate {
        /// Component tag
        tag: String,

        /// Output format: html, react or vue (defaults to config)
        #[arg(short, long)]
        format: Option<String>,

        /// Property value as name=value; a bare name sets a boolean
        #[arg(short = 'p', long = "prop")]
        props: Vec<String>,

        /// Slot content as slot=content
        #[arg(short = 's', long = "slot")]
        slots: Vec<String>,

        /// Default slot content
        #[arg(long)]
        content: Option<String>,
    },

    /// Show curated examples for a component
    Examples {
        /// Component tag
        tag: String,

        /// Output format: html, react or vue (defaults to config)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Validate a usage fragment ("-" reads from stdin)
    Validate {
        /// Fragment to check
        fragment: String,

        /// Format the fragment is written in (defaults to config)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { yes } = cli.command {
        return commands::init::run(&cli.config, yes).await;
    }

    let config = load_config(&cli.config)?;
    let ctx = Context::new(&config, cli.manifest, cli.json);

    // Execute command
    match cli.command {
        Commands::Init { .. } => {}
        Commands::List { category } => {
            commands::query::list(&ctx, category.as_deref()).await?;
        }
        Commands::Categories => {
            commands::query::categories(&ctx).await?;
        }
        Commands::Search { query } => {
            commands::query::search(&ctx, &query).await?;
        }
        Commands::Show { tag } => {
            commands::query::show(&ctx, &tag).await?;
        }
        Commands::Generate {
            tag,
            format,
            props,
            slots,
            content,
        } => {
            commands::generate::run(&ctx, &tag, format, &props, &slots, content).await?;
        }
        Commands::Examples { tag, format } => {
            commands::examples::run(&ctx, &tag, format).await?;
        }
        Commands::Validate { fragment, format } => {
            commands::validate::run(&ctx, &fragment, format).await?;
        }
    }

    Ok(())
}
