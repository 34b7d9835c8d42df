//! Manifest loading.
//!
//! Locates a manifest on disk (or takes it in memory), detects its shape and
//! normalizes it. A load either yields a complete, non-empty component list or
//! fails; nothing partial is ever handed out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::model::{ComponentDescriptor, TaggedExample};
use crate::raw::{normalize_cem, normalize_flat, CemManifest, FlatManifest, Normalized, RawComponent};

/// File names recognised when a directory is given as the manifest source.
pub const MANIFEST_FILE_NAMES: [&str; 4] = [
    "custom-elements.json",
    "components.json",
    "components.yaml",
    "components.yml",
];

/// How deep directory discovery descends.
const DISCOVERY_DEPTH: usize = 4;

/// Where a manifest comes from.
#[derive(Debug, Clone)]
pub enum ManifestSource {
    /// A manifest file, or a directory to search for one
    Path(PathBuf),
    /// In-memory JSON text
    Json(String),
    /// In-memory YAML text
    Yaml(String),
    /// An already-parsed document
    Value(Value),
}

impl ManifestSource {
    /// Human-readable origin used in error messages.
    pub fn origin(&self) -> String {
        match self {
            ManifestSource::Path(path) => path.display().to_string(),
            ManifestSource::Json(_) => "<inline json>".to_string(),
            ManifestSource::Yaml(_) => "<inline yaml>".to_string(),
            ManifestSource::Value(_) => "<inline value>".to_string(),
        }
    }
}

impl From<PathBuf> for ManifestSource {
    fn from(path: PathBuf) -> Self {
        ManifestSource::Path(path)
    }
}

impl From<&Path> for ManifestSource {
    fn from(path: &Path) -> Self {
        ManifestSource::Path(path.to_path_buf())
    }
}

/// Errors that can occur while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(String),

    #[error("Failed to parse manifest {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ManifestError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ManifestError::NotFound(path.display().to_string())
        } else {
            ManifestError::Read {
                path: path.display().to_string(),
                source,
            }
        }
    }
}

/// A loaded, normalized manifest.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    origin: String,
    components: Vec<ComponentDescriptor>,
    examples: Vec<TaggedExample>,
}

impl ManifestStore {
    /// Load and normalize a manifest.
    pub fn load(source: &ManifestSource) -> Result<Self, ManifestError> {
        let (origin, document) = match source {
            ManifestSource::Path(path) => {
                let file = locate(path)?;
                let text = fs::read_to_string(&file).map_err(|e| ManifestError::read(&file, e))?;
                let origin = file.display().to_string();
                let document = if is_yaml(&file) {
                    parse_yaml(&origin, &text)?
                } else {
                    parse_json(&origin, &text)?
                };
                (origin, document)
            }
            ManifestSource::Json(text) => {
                let origin = source.origin();
                let document = parse_json(&origin, text)?;
                (origin, document)
            }
            ManifestSource::Yaml(text) => {
                let origin = source.origin();
                let document = parse_yaml(&origin, text)?;
                (origin, document)
            }
            ManifestSource::Value(value) => (source.origin(), value.clone()),
        };

        let normalized = normalize(document).map_err(|m| ManifestError::parse(&origin, m))?;

        if normalized.components.is_empty() {
            return Err(ManifestError::parse(&origin, "manifest declares no components"));
        }

        tracing::info!(
            "Loaded {} components and {} examples from {}",
            normalized.components.len(),
            normalized.examples.len(),
            origin
        );

        Ok(Self {
            origin,
            components: normalized.components,
            examples: normalized.examples,
        })
    }

    /// Where the manifest was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Components in manifest order.
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Curated examples declared inline in the manifest.
    pub fn examples(&self) -> &[TaggedExample] {
        &self.examples
    }

    /// Split into owned components and examples.
    pub fn into_parts(self) -> (Vec<ComponentDescriptor>, Vec<TaggedExample>) {
        (self.components, self.examples)
    }
}

/// Resolve a path to a manifest file, searching directories.
fn locate(path: &Path) -> Result<PathBuf, ManifestError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(ManifestError::NotFound(path.display().to_string()));
    }

    for name in MANIFEST_FILE_NAMES {
        let found = WalkDir::new(path)
            .max_depth(DISCOVERY_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e))
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == name);

        if let Some(entry) = found {
            tracing::debug!("Discovered manifest at {}", entry.path().display());
            return Ok(entry.into_path());
        }
    }

    Err(ManifestError::NotFound(format!(
        "no {} under {}",
        MANIFEST_FILE_NAMES.join(" / "),
        path.display()
    )))
}

fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n == "node_modules" || n.starts_with('.'))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn parse_json(origin: &str, text: &str) -> Result<Value, ManifestError> {
    serde_json::from_str(text).map_err(|e| ManifestError::parse(origin, e.to_string()))
}

fn parse_yaml(origin: &str, text: &str) -> Result<Value, ManifestError> {
    serde_yaml::from_str(text).map_err(|e| ManifestError::parse(origin, e.to_string()))
}

/// Detect the manifest shape from its top-level keys and normalize it.
fn normalize(document: Value) -> Result<Normalized, String> {
    let has_key = |key: &str| document.as_object().is_some_and(|m| m.contains_key(key));
    let (is_flat, is_cem) = (has_key("components"), has_key("modules"));

    if document.is_array() {
        let components: Vec<RawComponent> =
            serde_json::from_value(document).map_err(|e| e.to_string())?;
        normalize_flat(components)
    } else if is_flat {
        let manifest: FlatManifest = serde_json::from_value(document).map_err(|e| e.to_string())?;
        normalize_flat(manifest.components)
    } else if is_cem {
        let manifest: CemManifest = serde_json::from_value(document).map_err(|e| e.to_string())?;
        normalize_cem(manifest)
    } else {
        Err("expected a `components` list or a Custom Elements Manifest `modules` list".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FLAT: &str = r#"{
        "components": [
            { "tagName": "plus-button", "category": "actions" },
            { "tagName": "plus-avatar", "category": "data-display" }
        ]
    }"#;

    #[test]
    fn loads_inline_json() {
        let store = ManifestStore::load(&ManifestSource::Json(FLAT.to_string())).unwrap();

        let tags: Vec<&str> = store.components().iter().map(|c| c.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["plus-button", "plus-avatar"]);
        assert_eq!(store.origin(), "<inline json>");
    }

    #[test]
    fn loads_yaml_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("components.yaml");
        fs::write(
            &path,
            r#"
components:
  - tagName: plus-tag
    properties:
      - name: closable
        type: boolean
"#,
        )
        .unwrap();

        let store = ManifestStore::load(&ManifestSource::Path(path)).unwrap();

        assert_eq!(store.components()[0].tag_name, "plus-tag");
        assert_eq!(
            store.components()[0].properties[0].ty,
            crate::PropertyType::Boolean
        );
    }

    #[test]
    fn discovers_manifest_in_directory() {
        let temp = tempdir().unwrap();
        let dist = temp.path().join("packages").join("core");
        fs::create_dir_all(&dist).unwrap();
        fs::write(dist.join("custom-elements.json"), FLAT).unwrap();

        let ignored = temp.path().join("node_modules").join("other");
        fs::create_dir_all(&ignored).unwrap();
        fs::write(ignored.join("custom-elements.json"), "not json").unwrap();

        let store = ManifestStore::load(&ManifestSource::Path(temp.path().to_path_buf())).unwrap();

        assert_eq!(store.components().len(), 2);
        assert!(store.origin().ends_with("custom-elements.json"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let result = ManifestStore::load(&ManifestSource::Path(temp.path().join("nope.json")));

        assert!(matches!(result, Err(ManifestError::NotFound(_))));
    }

    #[test]
    fn directory_without_manifest_is_not_found() {
        let temp = tempdir().unwrap();
        let result = ManifestStore::load(&ManifestSource::Path(temp.path().to_path_buf()));

        assert!(matches!(result, Err(ManifestError::NotFound(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = ManifestStore::load(&ManifestSource::Json("{ \"components\": [".to_string()));

        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn missing_tag_name_is_parse_error() {
        let result = ManifestStore::load(&ManifestSource::Json(
            r#"{ "components": [{ "name": "Nameless" }] }"#.to_string(),
        ));

        match result {
            Err(ManifestError::Parse { message, .. }) => assert!(message.contains("tagName")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let result = ManifestStore::load(&ManifestSource::Json(r#"{ "components": [] }"#.to_string()));

        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let result = ManifestStore::load(&ManifestSource::Value(serde_json::json!({ "tags": [] })));

        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn accepts_bare_component_array() {
        let store = ManifestStore::load(&ManifestSource::Value(serde_json::json!([
            { "tagName": "plus-divider" }
        ])))
        .unwrap();

        assert_eq!(store.components()[0].name, "Divider");
    }
}
