//! Persisted catalog.

use std::collections::HashMap;

use tracing::{debug, trace};
use varaxis_constraint::{BatchReport, ConstraintResult, Sibling, SiblingProvider, Verdict};
use varaxis_core::{EntityKind, VariantEntity};

use crate::{EntityKey, ParentIndex};

/// Committed product models and variant products.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entities: HashMap<EntityKey, VariantEntity>,
    by_parent: ParentIndex,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist an entity, replacing any entity with the same kind and identifier.
    pub fn insert(&mut self, entity: VariantEntity) -> Option<VariantEntity> {
        let key = key_of(&entity);
        let previous = self.remove(entity.kind(), entity.display_identifier());
        if let Some(parent) = entity.parent_code() {
            self.by_parent.insert(parent, key.clone());
        }
        trace!(entity = %key.1, kind = %key.0, "entity persisted");
        self.entities.insert(key, entity);
        previous
    }

    pub fn get(&self, kind: EntityKind, identifier: &str) -> Option<&VariantEntity> {
        self.entities.get(&(kind, identifier.to_string()))
    }

    pub fn remove(&mut self, kind: EntityKind, identifier: &str) -> Option<VariantEntity> {
        let key = (kind, identifier.to_string());
        let entity = self.entities.remove(&key)?;
        if let Some(parent) = entity.parent_code() {
            self.by_parent.remove(parent, &key);
        }
        Some(entity)
    }

    pub fn contains(&self, kind: EntityKind, identifier: &str) -> bool {
        self.get(kind, identifier).is_some()
    }

    /// Persisted children of a product model, in index order.
    pub fn children_of<'a>(&'a self, parent: &str) -> impl Iterator<Item = &'a VariantEntity> + 'a {
        self.by_parent
            .get(parent)
            .filter_map(move |key| self.entities.get(key))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Persist every entity, returning how many were written.
    pub fn save_all(&mut self, entities: impl IntoIterator<Item = VariantEntity>) -> usize {
        let mut saved = 0;
        for entity in entities {
            self.insert(entity);
            saved += 1;
        }
        debug!(saved, "entities saved");
        saved
    }

    /// Persist the entities a batch did not reject.
    ///
    /// Violated entities and entities whose validation failed are left out.
    pub fn save_accepted(&mut self, entities: &[VariantEntity], report: &BatchReport) -> usize {
        let accepted = entities
            .iter()
            .zip(report.outcomes())
            .filter(|(_, outcome)| {
                matches!(outcome.result, Ok(Verdict::Accepted) | Ok(Verdict::Exempt(_)))
            })
            .map(|(entity, _)| entity.clone());
        self.save_all(accepted)
    }
}

impl SiblingProvider for CatalogStore {
    fn siblings_of(&self, entity: &VariantEntity) -> ConstraintResult<Vec<Sibling>> {
        let Some(parent) = entity.parent_code() else {
            return Ok(Vec::new());
        };
        Ok(self
            .children_of(parent)
            .filter(|sibling| sibling.kind() == entity.kind())
            .filter(|sibling| sibling.display_identifier() != entity.display_identifier())
            .map(|sibling| {
                Sibling::new(
                    sibling.display_identifier(),
                    sibling.values_for_variation().clone(),
                )
            })
            .collect())
    }
}

fn key_of(entity: &VariantEntity) -> EntityKey {
    (entity.kind(), entity.display_identifier().to_string())
}
