//! Scenario definition and builder.

use std::path::{Path, PathBuf};

use varaxis_constraint::ValidatorConfig;
use varaxis_core::VariantEntity;
use varaxis_registry::Registry;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{HarnessError, HarnessResult};
use crate::loader::{Catalog, EntityFile};
use crate::runner::Runner;

/// An expected outcome for one batch entity.
#[derive(Debug)]
pub struct Expectation {
    /// Display identifier of the entity.
    pub entity: String,
    /// Assertion to verify its outcome.
    pub assertion: Assertion,
}

/// Where a fixture comes from.
#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Inline(String),
}

/// A complete test scenario.
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Attributes and family variants.
    catalog: Option<Source>,
    /// Entities persisted before the batch, applied in order.
    seeds: Vec<Source>,
    /// Entities validated together.
    batch: Option<Source>,
    /// Validator settings; sequential unless overridden.
    config: ValidatorConfig,
    /// Per-entity expectations.
    expectations: Vec<Expectation>,
    /// Expected number of claims at the end of the batch.
    claims: Option<usize>,
    /// Expected batch-level error fragment.
    error: Option<String>,
    /// Base path for resolving relative paths.
    base_path: PathBuf,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: None,
            seeds: Vec::new(),
            batch: None,
            config: ValidatorConfig::sequential(),
            expectations: Vec::new(),
            claims: None,
            error: None,
            base_path: fixtures_root(),
        }
    }

    /// Set the base path for resolving relative paths.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the catalog file path (relative to fixtures/).
    pub fn catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(Source::File(path.into()));
        self
    }

    /// Set the catalog from a string.
    pub fn catalog_source(mut self, source: impl Into<String>) -> Self {
        self.catalog = Some(Source::Inline(source.into()));
        self
    }

    /// Add a seed file path (relative to fixtures/).
    pub fn seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.seeds.push(Source::File(path.into()));
        self
    }

    /// Add seed entities from a string.
    pub fn seed_source(mut self, source: impl Into<String>) -> Self {
        self.seeds.push(Source::Inline(source.into()));
        self
    }

    /// Set the batch file path (relative to fixtures/).
    pub fn batch(mut self, path: impl Into<PathBuf>) -> Self {
        self.batch = Some(Source::File(path.into()));
        self
    }

    /// Set the batch entities from a string.
    pub fn batch_source(mut self, source: impl Into<String>) -> Self {
        self.batch = Some(Source::Inline(source.into()));
        self
    }

    /// Override the validator configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an expectation for one batch entity.
    pub fn expect<F>(mut self, entity: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let entity = entity.into();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.expectations.push(Expectation { entity, assertion });
        self
    }

    /// Expect the batch to end with `count` claimed combinations.
    pub fn claims(mut self, count: usize) -> Self {
        self.claims = Some(count);
        self
    }

    /// Expect the whole batch to fail with an error containing `fragment`.
    pub fn error(mut self, fragment: impl Into<String>) -> Self {
        self.error = Some(fragment.into());
        self
    }

    /// Run the scenario and return the result.
    pub fn run(&self) -> HarnessResult<()> {
        Runner::new(self)?.run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validator_config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    pub fn expected_claims(&self) -> Option<usize> {
        self.claims
    }

    pub fn expected_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Build the registry from the catalog.
    pub fn load_catalog(&self) -> HarnessResult<Registry> {
        match &self.catalog {
            Some(Source::File(path)) => Catalog::load(&self.resolve_path(path)),
            Some(Source::Inline(source)) => Catalog::parse(source, Path::new("<inline>")),
            None => Err(HarnessError::missing_catalog(&self.name)),
        }
    }

    /// Load every seed entity, in seed order.
    pub fn load_seeds(&self, registry: &Registry) -> HarnessResult<Vec<VariantEntity>> {
        let mut entities = Vec::new();
        for seed in &self.seeds {
            entities.extend(self.load_entities(seed, registry)?);
        }
        Ok(entities)
    }

    /// Load the batch entities.
    pub fn load_batch(&self, registry: &Registry) -> HarnessResult<Vec<VariantEntity>> {
        match &self.batch {
            Some(source) => self.load_entities(source, registry),
            None => Err(HarnessError::missing_batch(&self.name)),
        }
    }

    fn load_entities(
        &self,
        source: &Source,
        registry: &Registry,
    ) -> HarnessResult<Vec<VariantEntity>> {
        match source {
            Source::File(path) => EntityFile::load(&self.resolve_path(path), registry),
            Source::Inline(source) => EntityFile::parse(source, Path::new("<inline>"), registry),
        }
    }

    /// Resolve a path relative to the base path.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

/// Get the fixtures root directory.
///
/// This looks for the `fixtures/` directory at the workspace root.
fn fixtures_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        // tests -> workspace root -> fixtures
        if let Some(workspace) = PathBuf::from(manifest_dir).parent() {
            let fixtures = workspace.join("fixtures");
            if fixtures.exists() {
                return fixtures;
            }
        }
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    for candidate in [cwd.join("fixtures"), cwd.join("../fixtures")] {
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("fixtures")
}
