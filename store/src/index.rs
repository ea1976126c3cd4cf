//! Indexes for sibling lookups.

use std::collections::{BTreeSet, HashMap};

use varaxis_core::EntityKind;

/// Identity of a persisted entity: codes and identifiers are separate namespaces.
pub type EntityKey = (EntityKind, String);

/// Parent index: parent code -> Set<EntityKey>
#[derive(Debug, Default)]
pub struct ParentIndex {
    index: HashMap<String, BTreeSet<EntityKey>>,
}

impl ParentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: &str, key: EntityKey) {
        self.index.entry(parent.to_string()).or_default().insert(key);
    }

    pub fn remove(&mut self, parent: &str, key: &EntityKey) {
        if let Some(set) = self.index.get_mut(parent) {
            set.remove(key);
            if set.is_empty() {
                self.index.remove(parent);
            }
        }
    }

    /// Children of `parent`, ordered by kind then identifier.
    pub fn get<'a>(&'a self, parent: &str) -> impl Iterator<Item = &'a EntityKey> + 'a {
        self.index.get(parent).into_iter().flat_map(|set| set.iter())
    }

    /// Number of parents with at least one child.
    pub fn parent_count(&self) -> usize {
        self.index.len()
    }
}
