//! Build-once service over a component manifest.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;

use plus_meta_adapters::{
    CodeGenerator, ComponentIndex, ExampleCatalog, GenerateError, IndexError, PropValue,
    UsageValidator, ValidationResult,
};
use plus_meta_manifest::{
    load_example_docs, CodeExample, ComponentDescriptor, Format, ManifestError, ManifestSource,
    ManifestStore,
};

/// Where the service loads its data from.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Component manifest
    pub manifest: ManifestSource,

    /// Directory of authored example documents, if any
    pub examples_dir: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn new(manifest: impl Into<ManifestSource>) -> Self {
        Self {
            manifest: manifest.into(),
            examples_dir: None,
        }
    }

    pub fn with_examples_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.examples_dir = Some(dir.into());
        self
    }
}

/// Errors that make the snapshot unavailable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Manifest load task failed: {0}")]
    Task(String),
}

/// Errors returned by service operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// The one-time load failed; every call reports the same failure
    #[error("Component metadata unavailable: {0}")]
    Load(Arc<LoadError>),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Unsupported format \"{0}\" (expected one of: html, react, vue)")]
    UnsupportedFormat(String),
}

impl From<GenerateError> for ServiceError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::UnknownComponent(tag) => ServiceError::UnknownComponent(tag),
            GenerateError::UnsupportedFormat(format) => ServiceError::UnsupportedFormat(format),
        }
    }
}

/// The frozen index and catalog every query runs against.
#[derive(Debug)]
pub struct Snapshot {
    pub index: ComponentIndex,
    pub examples: ExampleCatalog,
}

impl Snapshot {
    /// Load the manifest and any authored examples, then index them.
    pub fn load(config: &ServiceConfig) -> Result<Self, LoadError> {
        let store = ManifestStore::load(&config.manifest)?;
        let (components, mut examples) = store.into_parts();

        if let Some(dir) = &config.examples_dir {
            examples.extend(load_example_docs(dir)?);
        }

        let index = ComponentIndex::new(components)?;
        let examples = ExampleCatalog::build(&index, examples);

        Ok(Self { index, examples })
    }
}

type LoadResult = Result<Arc<Snapshot>, Arc<LoadError>>;

/// Component metadata service.
///
/// The first call to any operation starts loading the manifest on a blocking
/// task; concurrent callers wait on that same task. A caller that gives up
/// waiting leaves the task running for the next one. A failed load is kept
/// and reported to every later call rather than retried.
#[derive(Debug)]
pub struct ComponentService {
    config: Option<ServiceConfig>,
    snapshot: OnceCell<LoadResult>,
    loader: OnceLock<Mutex<JoinHandle<LoadResult>>>,
    build_count: AtomicUsize,
}

impl ComponentService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Some(config),
            snapshot: OnceCell::new(),
            loader: OnceLock::new(),
            build_count: AtomicUsize::new(0),
        }
    }

    /// Wrap an already-built snapshot. Nothing is ever loaded.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            config: None,
            snapshot: OnceCell::new_with(Some(Ok(Arc::new(snapshot)))),
            loader: OnceLock::new(),
            build_count: AtomicUsize::new(0),
        }
    }

    /// The loaded snapshot, loading it on first use.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, ServiceError> {
        let result = self
            .snapshot
            .get_or_init(|| async {
                let Some(config) = &self.config else {
                    return Err(Arc::new(LoadError::Task(
                        "no manifest source configured".to_string(),
                    )));
                };

                // Initializers run one at a time; a later one resumes the same task
                let loader = self.loader.get_or_init(|| Mutex::new(self.spawn_load(config)));
                let mut handle = loader.lock().await;

                match (&mut *handle).await {
                    Ok(result) => result,
                    Err(e) => Err(Arc::new(LoadError::Task(e.to_string()))),
                }
            })
            .await;

        result.clone().map_err(ServiceError::Load)
    }

    fn spawn_load(&self, config: &ServiceConfig) -> JoinHandle<LoadResult> {
        self.build_count.fetch_add(1, Ordering::SeqCst);
        let config = config.clone();

        tokio::task::spawn_blocking(move || match Snapshot::load(&config) {
            Ok(snapshot) => {
                tracing::info!(
                    "Component metadata ready: {} components, {} examples",
                    snapshot.index.len(),
                    snapshot.examples.len()
                );
                Ok(Arc::new(snapshot))
            }
            Err(e) => {
                tracing::error!("Failed to load component metadata: {}", e);
                Err(Arc::new(e))
            }
        })
    }

    /// How many times the snapshot has been built (0 or 1).
    pub fn build_count(&self) -> usize {
        self.build_count.load(Ordering::SeqCst)
    }

    /// All components in manifest order.
    pub async fn list_components(&self) -> Result<Vec<ComponentDescriptor>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot.index.all().to_vec())
    }

    /// Ranked free-text search.
    pub async fn search(&self, query: &str) -> Result<Vec<ComponentDescriptor>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot.index.search(query).into_iter().cloned().collect())
    }

    /// Exact lookup by tag.
    pub async fn get_component(&self, tag: &str) -> Result<ComponentDescriptor, ServiceError> {
        let snapshot = self.snapshot().await?;
        snapshot
            .index
            .get(tag)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownComponent(tag.to_string()))
    }

    pub async fn components_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<ComponentDescriptor>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot
            .index
            .by_category(category)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot
            .index
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Generate a usage snippet.
    pub async fn generate(
        &self,
        tag: &str,
        format: &str,
        properties: &HashMap<String, PropValue>,
        slots: &HashMap<String, String>,
    ) -> Result<String, ServiceError> {
        let snapshot = self.snapshot().await?;
        let snippet = CodeGenerator::new(&snapshot.index).generate(tag, format, properties, slots)?;
        Ok(snippet)
    }

    /// Curated examples for a tag in a format.
    ///
    /// Never fails for an unknown tag or format; there are simply no examples.
    pub async fn get_examples(
        &self,
        tag: &str,
        format: &str,
    ) -> Result<Vec<CodeExample>, ServiceError> {
        let snapshot = self.snapshot().await?;

        let Ok(format) = format.parse::<Format>() else {
            tracing::debug!("No examples in unsupported format {}", format);
            return Ok(Vec::new());
        };

        Ok(snapshot
            .examples
            .get_examples(tag, format)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Formats with at least one curated example for a tag.
    pub async fn example_formats(&self, tag: &str) -> Result<Vec<Format>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot.examples.formats_for(tag))
    }

    /// Validate a usage fragment.
    pub async fn validate(
        &self,
        fragment: &str,
        format: &str,
    ) -> Result<ValidationResult, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(UsageValidator::new(&snapshot.index).validate(fragment, format))
    }
}
