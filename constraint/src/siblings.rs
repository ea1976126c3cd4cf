//! Persisted siblings.

use varaxis_core::{ValueCollection, VariantEntity};

use crate::ConstraintResult;

/// Values of a persisted sibling.
#[derive(Debug, Clone, PartialEq)]
pub struct Sibling {
    /// Display identifier of the sibling.
    pub identifier: String,
    /// Values used to compute its variant axes.
    pub values: ValueCollection,
}

impl Sibling {
    pub fn new(identifier: impl Into<String>, values: ValueCollection) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }
}

/// Source of persisted siblings.
///
/// Returns the persisted entities sharing the entity's parent, excluding the
/// entity itself. Order is not significant. Calls may happen concurrently.
pub trait SiblingProvider: Send + Sync {
    fn siblings_of(&self, entity: &VariantEntity) -> ConstraintResult<Vec<Sibling>>;
}
