//! Common error types for catalog entities.

use crate::EntityKind;
use thiserror::Error;

/// Errors raised while building catalog entities.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Identifier or code is empty.
    #[error("A {0} requires a non-empty identifier")]
    EmptyIdentifier(EntityKind),
}

/// Result type for entity construction.
pub type CoreResult<T> = Result<T, CoreError>;
