//! CLI command implementations.

pub mod config;
pub mod examples;
pub mod generate;
pub mod init;
pub mod query;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use plus_meta_service::ComponentService;

use config::ConfigFile;

/// State shared by every query command.
pub struct Context {
    pub service: ComponentService,

    /// Format used when a command does not name one
    pub default_format: String,

    /// Print JSON instead of text
    pub json: bool,
}

impl Context {
    pub fn new(config: &ConfigFile, manifest: Option<PathBuf>, json: bool) -> Self {
        Self {
            service: ComponentService::new(config.service_config(manifest)),
            default_format: config.output.format.clone(),
            json,
        }
    }

    /// The requested format, or the configured default.
    pub fn format(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.default_format.clone())
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
