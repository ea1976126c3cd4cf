//! Batch-scoped registry of claimed axis combinations.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::trace;

use varaxis_core::EntityKind;

use crate::CombinationKey;

type ClaimKey = (String, EntityKind, String);

/// Outcome of claiming a combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The combination now belongs to the claimant.
    Claimed,
    /// Another entity claimed the combination first.
    Conflict(String),
}

/// Registry enforcing at most one claim per `(parent, kind, combination)` in a batch.
///
/// Product models and variant products under one parent never compete, the
/// same way persisted siblings are scoped by kind.
///
/// Create one per batch and share it by reference with every validation
/// task of that batch. Claims are never overwritten or removed.
#[derive(Debug, Default)]
pub struct BatchUniquenessRegistry {
    /// `(parent code, kind, combination)` -> claimant display identifier.
    claims: Mutex<HashMap<ClaimKey, String>>,
}

impl BatchUniquenessRegistry {
    /// Create an empty registry for a new batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `key` among the `kind` children of `parent` for `claimant`.
    ///
    /// A claimant repeating its own claim keeps it.
    pub fn add_combination(
        &self,
        parent: &str,
        kind: EntityKind,
        claimant: &str,
        key: &CombinationKey,
    ) -> Claim {
        let combination = key.combination();
        let mut claims = self.claims.lock();
        match claims.entry((parent.to_string(), kind, combination.to_string())) {
            Entry::Occupied(entry) if entry.get() != claimant => {
                let holder = entry.get();
                trace!(parent, combination, %holder, claimant, "combination already claimed");
                Claim::Conflict(holder.clone())
            }
            Entry::Occupied(_) => Claim::Claimed,
            Entry::Vacant(entry) => {
                trace!(parent, combination, claimant, "combination claimed");
                entry.insert(claimant.to_string());
                Claim::Claimed
            }
        }
    }

    /// Current holder of a combination among the `kind` children of a parent.
    pub fn claimant_of(&self, parent: &str, kind: EntityKind, combination: &str) -> Option<String> {
        self.claims
            .lock()
            .get(&(parent.to_string(), kind, combination.to_string()))
            .cloned()
    }

    /// Number of claimed combinations.
    pub fn len(&self) -> usize {
        self.claims.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.lock().is_empty()
    }

    /// End the batch, returning the number of claims it made.
    pub fn finish(self) -> usize {
        self.claims.into_inner().len()
    }
}
