//! Scenario runner.

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use varaxis_constraint::BatchValidator;
use varaxis_store::CatalogStore;

use crate::error::{HarnessError, HarnessResult};
use crate::scenario::Scenario;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`, once per process.
fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Runs a scenario against a fresh catalog store.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> HarnessResult<Self> {
        init_tracing();
        Ok(Self { scenario })
    }

    /// Run the scenario.
    pub fn run(&self) -> HarnessResult<()> {
        // 1. Build the registry from the catalog
        let registry = self.scenario.load_catalog()?;

        // 2. Persist the seed entities
        let mut store = CatalogStore::new();
        store.save_all(self.scenario.load_seeds(&registry)?);

        // 3. Validate the batch
        let batch = self.scenario.load_batch(&registry)?;
        let config = self.scenario.validator_config().clone();
        let validator = BatchValidator::new(&registry, &store, config);
        let result = validator.run(&batch);

        let report = match (result, self.scenario.expected_error()) {
            (Err(err), Some(fragment)) if err.to_string().contains(fragment) => return Ok(()),
            (Err(err), _) => return Err(err.into()),
            (Ok(_), Some(fragment)) => {
                return Err(HarnessError::assertion_failed(
                    self.scenario.name(),
                    format!("expected batch error containing '{}', but batch succeeded", fragment),
                ))
            }
            (Ok(report), None) => report,
        };

        // 4. Verify each expectation
        for expectation in self.scenario.expectations() {
            let outcome = report
                .outcome(&expectation.entity)
                .ok_or_else(|| HarnessError::entity_not_found(&expectation.entity))?;
            expectation.assertion.verify(outcome)?;
        }

        if let Some(expected) = self.scenario.expected_claims() {
            if report.claims() != expected {
                return Err(HarnessError::assertion_failed(
                    self.scenario.name(),
                    format!("expected {} claimed combinations, got {}", expected, report.claims()),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::HarnessError;
    use crate::scenario::Scenario;

    const CATALOG: &str = r#"
[attributes]
color = "simpleselect"

[[family_variants]]
code = "by_color"
family = "clothing"
levels = [{ level = 1, axes = ["color"] }]
"#;

    const BATCH: &str = r#"
[[entities]]
kind = "product_model"
identifier = "pm1"
parent = "P"
family_variant = "by_color"
values = { color = "blue" }

[[entities]]
kind = "product_model"
identifier = "pm2"
parent = "P"
family_variant = "by_color"
values = { color = "blue" }
"#;

    #[test]
    fn test_runner_with_inline_fixtures() {
        let scenario = Scenario::new("inline")
            .catalog_source(CATALOG)
            .batch_source(BATCH)
            .expect("pm1", |a| a.accepted())
            .expect("pm2", |a| a.violated_by("pm1").values("[blue]"))
            .claims(1);

        scenario.run().unwrap();
    }

    #[test]
    fn test_runner_reports_failed_expectation() {
        let scenario = Scenario::new("inline")
            .catalog_source(CATALOG)
            .batch_source(BATCH)
            .expect("pm2", |a| a.accepted());

        assert!(matches!(scenario.run(), Err(HarnessError::AssertionFailed { .. })));
    }

    #[test]
    fn test_runner_reports_unknown_entity() {
        let scenario = Scenario::new("inline")
            .catalog_source(CATALOG)
            .batch_source(BATCH)
            .expect("pm3", |a| a.accepted());

        assert!(matches!(scenario.run(), Err(HarnessError::EntityNotFound { .. })));
    }

    #[test]
    fn test_runner_requires_batch() {
        let scenario = Scenario::new("no_batch").catalog_source(CATALOG);

        assert!(matches!(scenario.run(), Err(HarnessError::MissingBatch { .. })));
    }
}
