//! Configuration file (plus-meta.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use plus_meta_service::ServiceConfig;

/// Configuration file structure (plus-meta.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub examples: ExamplesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ManifestConfig {
    /// Manifest file, or a directory to search for one
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ExamplesConfig {
    /// Directory of authored example documents
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_manifest_path() -> String {
    ".".to_string()
}
fn default_format() -> String {
    "html".to_string()
}

impl ConfigFile {
    /// Service configuration, with an optional manifest path override.
    pub fn service_config(&self, manifest: Option<PathBuf>) -> ServiceConfig {
        let manifest = manifest.unwrap_or_else(|| PathBuf::from(&self.manifest.path));
        let config = ServiceConfig::new(manifest);

        match &self.examples.dir {
            Some(dir) => config.with_examples_dir(dir),
            None => config,
        }
    }
}

/// Load configuration from a plus-meta.toml if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
