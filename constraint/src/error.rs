//! Constraint error types.

use std::path::PathBuf;

use thiserror::Error;
use varaxis_registry::RegistryError;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur during constraint checking.
///
/// Duplicate combinations are not errors: they are reported as violations.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Unsupported constraint '{name}': condition '{condition}' is not '{expected}'")]
    UnsupportedConstraint {
        name: String,
        condition: String,
        expected: &'static str,
    },

    #[error("Axis resolution failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to load siblings of '{entity}': {message}")]
    SiblingLookup { entity: String, message: String },

    #[error("Invalid validator configuration: {message}")]
    Config { message: String },

    #[error("Failed to read configuration '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to start validation workers: {message}")]
    WorkerPool { message: String },
}

impl ConstraintError {
    pub fn sibling_lookup(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SiblingLookup {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn worker_pool(message: impl Into<String>) -> Self {
        Self::WorkerPool {
            message: message.into(),
        }
    }

    /// Whether this error comes from wiring rather than catalog data.
    ///
    /// Misconfiguration aborts a batch; other errors only affect the entity
    /// being validated.
    pub fn is_misconfiguration(&self) -> bool {
        !matches!(self, Self::SiblingLookup { .. })
    }
}
