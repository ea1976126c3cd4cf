//! Batch validation.

use rayon::prelude::*;
use tracing::{info, info_span, warn};
use varaxis_core::{EntityKind, VariantEntity};
use varaxis_registry::AxisResolver;

use crate::error::{ConstraintError, ConstraintResult};
use crate::{
    BatchUniquenessRegistry, ConstraintDef, SiblingProvider, ValidatorConfig, VariantAxisValidator,
    Verdict, Violations,
};

/// Result of validating one entity of a batch.
#[derive(Debug)]
pub struct EntityOutcome {
    pub identifier: String,
    pub kind: EntityKind,
    /// Verdict, or the lookup error that prevented one.
    pub result: ConstraintResult<Verdict>,
}

impl EntityOutcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        self.result.as_ref().ok()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug)]
pub struct BatchReport {
    outcomes: Vec<EntityOutcome>,
    claims: usize,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[EntityOutcome] {
        &self.outcomes
    }

    /// First outcome for a display identifier.
    pub fn outcome(&self, identifier: &str) -> Option<&EntityOutcome> {
        self.outcomes.iter().find(|o| o.identifier == identifier)
    }

    /// Every violation of the batch, in input order.
    pub fn violations(&self) -> Violations {
        self.outcomes
            .iter()
            .filter_map(|o| o.verdict().and_then(Verdict::violation))
            .cloned()
            .collect()
    }

    /// Entities whose validation failed with an error.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ConstraintError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.identifier.as_str(), e)))
    }

    pub fn accepted_count(&self) -> usize {
        self.count(Verdict::is_accepted)
    }

    pub fn exempt_count(&self) -> usize {
        self.count(Verdict::is_exempt)
    }

    pub fn violated_count(&self) -> usize {
        self.count(|v| v.violation().is_some())
    }

    /// Number of combinations claimed during the batch.
    pub fn claims(&self) -> usize {
        self.claims
    }

    /// True when no entity was violated or failed.
    pub fn is_valid(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.result, Ok(Verdict::Accepted) | Ok(Verdict::Exempt(_))))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, predicate: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter_map(EntityOutcome::verdict)
            .filter(|v| predicate(*v))
            .count()
    }
}

/// Validates whole batches against one constraint.
///
/// Every run gets a fresh [`BatchUniquenessRegistry`], so claims never leak
/// from one batch into the next.
pub struct BatchValidator<'a> {
    validator: VariantAxisValidator<'a>,
    constraint: ConstraintDef,
    config: ValidatorConfig,
}

impl<'a> BatchValidator<'a> {
    pub fn new(
        axes: &'a dyn AxisResolver,
        siblings: &'a dyn SiblingProvider,
        config: ValidatorConfig,
    ) -> Self {
        Self {
            validator: VariantAxisValidator::new(axes, siblings)
                .with_violation_path(config.violation_path.as_str()),
            constraint: ConstraintDef::unique_variant_axis(),
            config,
        }
    }

    /// Validate against another constraint definition.
    pub fn with_constraint(mut self, constraint: ConstraintDef) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every entity of the batch.
    ///
    /// A misconfiguration aborts the whole batch. Sibling lookup failures are
    /// recorded on the entity they concern.
    pub fn run(&self, entities: &[VariantEntity]) -> ConstraintResult<BatchReport> {
        let span = info_span!(
            "validate_batch",
            entities = entities.len(),
            parallel = self.config.parallel
        );
        let _enter = span.enter();

        VariantAxisValidator::ensure_supported(&self.constraint)?;
        self.config.validate()?;

        let registry = BatchUniquenessRegistry::new();
        let results = if self.config.parallel {
            self.validate_parallel(entities, &registry)?
        } else {
            self.validate_sequential(entities, &registry)?
        };

        let mut outcomes = Vec::with_capacity(entities.len());
        for (entity, result) in entities.iter().zip(results) {
            match result {
                Err(err) if err.is_misconfiguration() => return Err(err),
                Err(err) => {
                    warn!(
                        entity = entity.display_identifier(),
                        error = %err,
                        "entity not validated"
                    );
                    outcomes.push(outcome(entity, Err(err)));
                }
                ok => outcomes.push(outcome(entity, ok)),
            }
        }

        let report = BatchReport {
            outcomes,
            claims: registry.finish(),
        };
        info!(
            accepted = report.accepted_count(),
            exempt = report.exempt_count(),
            violated = report.violated_count(),
            claims = report.claims(),
            "batch validated"
        );
        Ok(report)
    }

    fn validate_sequential(
        &self,
        entities: &[VariantEntity],
        registry: &BatchUniquenessRegistry,
    ) -> ConstraintResult<Vec<ConstraintResult<Verdict>>> {
        let mut results = Vec::with_capacity(entities.len());
        for entity in entities {
            match self.validator.validate(entity, &self.constraint, registry) {
                Err(err) if err.is_misconfiguration() => return Err(err),
                result => results.push(result),
            }
        }
        Ok(results)
    }

    fn validate_parallel(
        &self,
        entities: &[VariantEntity],
        registry: &BatchUniquenessRegistry,
    ) -> ConstraintResult<Vec<ConstraintResult<Verdict>>> {
        let validate = || {
            entities
                .par_iter()
                .map(|entity| self.validator.validate(entity, &self.constraint, registry))
                .collect::<Vec<_>>()
        };

        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ConstraintError::worker_pool(e.to_string()))?;
                Ok(pool.install(validate))
            }
            None => Ok(validate()),
        }
    }
}

fn outcome(entity: &VariantEntity, result: ConstraintResult<Verdict>) -> EntityOutcome {
    EntityOutcome {
        identifier: entity.display_identifier().to_string(),
        kind: entity.kind(),
        result,
    }
}
