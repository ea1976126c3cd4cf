//! Variant axis resolution.

use crate::{AttributeDef, Registry, RegistryError, RegistryResult};
use varaxis_core::VariantEntity;

/// Resolves which attributes are the variant axes of an entity.
///
/// Implementations must be deterministic: the same entity state yields the
/// same axes in the same order for the whole batch.
pub trait AxisResolver: Send + Sync {
    /// Ordered axes of the entity; empty when the entity has none.
    fn resolve(&self, entity: &VariantEntity) -> RegistryResult<Vec<AttributeDef>>;
}

impl AxisResolver for Registry {
    fn resolve(&self, entity: &VariantEntity) -> RegistryResult<Vec<AttributeDef>> {
        let Some(code) = entity.family_variant() else {
            return Ok(Vec::new());
        };
        if entity.parent().is_none() {
            return Ok(Vec::new());
        }

        let family_variant = self.family_variant(code).ok_or_else(|| {
            RegistryError::unknown_family_variant(entity.display_identifier(), code)
        })?;

        family_variant
            .axes_at(entity.variation_level())
            .iter()
            .map(|axis| {
                self.attribute(axis)
                    .cloned()
                    .ok_or_else(|| RegistryError::UnknownAttribute {
                        family_variant: family_variant.code.clone(),
                        attribute: axis.clone(),
                    })
            })
            .collect()
    }
}
