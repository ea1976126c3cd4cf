//! Unique variant axis checking.

use tracing::{debug, trace};
use varaxis_core::VariantEntity;
use varaxis_registry::AxisResolver;

use crate::error::{ConstraintError, ConstraintResult};
use crate::{
    AxisCombination, BatchUniquenessRegistry, Claim, CombinationKey, CombinationKeyBuilder,
    SiblingProvider, Violation, ViolationKind, DEFAULT_VIOLATION_PATH,
};

/// Condition handled by [`VariantAxisValidator`].
pub const UNIQUE_VARIANT_AXIS: &str = "unique_variant_axis";

/// A named constraint attached to catalog entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDef {
    /// Constraint name, for reporting.
    pub name: String,
    /// Condition the constraint enforces.
    pub condition: String,
}

impl ConstraintDef {
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }

    /// The unique variant axis constraint.
    pub fn unique_variant_axis() -> Self {
        Self::new(UNIQUE_VARIANT_AXIS, UNIQUE_VARIANT_AXIS)
    }
}

/// Why an entity skipped uniqueness checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptReason {
    NoFamilyVariant,
    NoParent,
    NoAxes,
    /// The named axis has no value.
    EmptyAxisValue { attribute: String },
}

/// Decision for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not subject to the check.
    Exempt(ExemptReason),
    /// Combination is unique; it is now claimed in the batch.
    Accepted,
    /// Combination is already held by a sibling.
    Violated(Violation),
}

impl Verdict {
    pub fn is_exempt(&self) -> bool {
        matches!(self, Verdict::Exempt(_))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Violated(violation) => Some(violation),
            _ => None,
        }
    }
}

/// Validates that an entity's axis combination is unique among its siblings.
///
/// Persisted siblings are checked first. Only when none matches is the
/// combination claimed in the batch registry.
pub struct VariantAxisValidator<'a> {
    axes: &'a dyn AxisResolver,
    siblings: &'a dyn SiblingProvider,
    violation_path: String,
}

impl<'a> VariantAxisValidator<'a> {
    /// Create a new validator.
    pub fn new(axes: &'a dyn AxisResolver, siblings: &'a dyn SiblingProvider) -> Self {
        Self {
            axes,
            siblings,
            violation_path: DEFAULT_VIOLATION_PATH.to_string(),
        }
    }

    /// Attach violations to another property path.
    pub fn with_violation_path(mut self, path: impl Into<String>) -> Self {
        self.violation_path = path.into();
        self
    }

    /// Fail unless the constraint is the unique variant axis constraint.
    pub fn ensure_supported(constraint: &ConstraintDef) -> ConstraintResult<()> {
        if constraint.condition == UNIQUE_VARIANT_AXIS {
            Ok(())
        } else {
            Err(ConstraintError::UnsupportedConstraint {
                name: constraint.name.clone(),
                condition: constraint.condition.clone(),
                expected: UNIQUE_VARIANT_AXIS,
            })
        }
    }

    /// Validate one entity of a batch.
    pub fn validate(
        &self,
        entity: &VariantEntity,
        constraint: &ConstraintDef,
        combinations: &BatchUniquenessRegistry,
    ) -> ConstraintResult<Verdict> {
        Self::ensure_supported(constraint)?;

        let verdict = self.check(entity, combinations)?;
        debug!(
            entity = entity.display_identifier(),
            kind = %entity.kind(),
            verdict = ?verdict,
            "variant axes validated"
        );
        Ok(verdict)
    }

    fn check(
        &self,
        entity: &VariantEntity,
        combinations: &BatchUniquenessRegistry,
    ) -> ConstraintResult<Verdict> {
        if entity.family_variant().is_none() {
            return Ok(Verdict::Exempt(ExemptReason::NoFamilyVariant));
        }
        let Some(parent) = entity.parent_code() else {
            return Ok(Verdict::Exempt(ExemptReason::NoParent));
        };

        let axes = self.axes.resolve(entity)?;
        let key = match CombinationKeyBuilder::build(entity.values_for_variation(), &axes) {
            AxisCombination::NoAxes => return Ok(Verdict::Exempt(ExemptReason::NoAxes)),
            AxisCombination::Incomplete { attribute } => {
                return Ok(Verdict::Exempt(ExemptReason::EmptyAxisValue { attribute }))
            }
            AxisCombination::Key(key) => key,
        };

        let identifier = entity.display_identifier();
        for sibling in self.siblings.siblings_of(entity)? {
            // An entity never conflicts with its persisted self.
            if sibling.identifier == identifier {
                continue;
            }
            let sibling_combination = CombinationKeyBuilder::build(&sibling.values, &axes);
            let sibling_key = sibling_combination.key().map(CombinationKey::combination);
            if sibling_key == Some(key.combination()) {
                trace!(
                    entity = identifier,
                    sibling = %sibling.identifier,
                    "persisted sibling holds combination"
                );
                return Ok(Verdict::Violated(self.violation(entity, &key, sibling.identifier)));
            }
        }

        match combinations.add_combination(parent, entity.kind(), identifier, &key) {
            Claim::Claimed => Ok(Verdict::Accepted),
            Claim::Conflict(holder) => Ok(Verdict::Violated(self.violation(entity, &key, holder))),
        }
    }

    fn violation(&self, entity: &VariantEntity, key: &CombinationKey, holder: String) -> Violation {
        Violation::new(
            ViolationKind::for_entity(entity.kind()),
            key.combination(),
            key.attributes(),
            entity.display_identifier(),
            holder,
        )
        .at_path(self.violation_path.as_str())
    }
}
