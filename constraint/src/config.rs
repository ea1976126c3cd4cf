//! Validator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};
use crate::DEFAULT_VIOLATION_PATH;

/// How a batch is validated.
///
/// ```toml
/// parallel = true
/// threads = 4
/// violation_path = "attribute"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Validate the entities of a batch concurrently.
    pub parallel: bool,
    /// Worker count for parallel runs. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Property path violations are attached to.
    pub violation_path: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            violation_path: DEFAULT_VIOLATION_PATH.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Sequential validation, in input order.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> ConstraintResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConstraintError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConstraintResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConstraintError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject values no batch can run with.
    pub fn validate(&self) -> ConstraintResult<()> {
        if self.threads == Some(0) {
            return Err(ConstraintError::config("threads must be at least 1"));
        }
        if self.violation_path.trim().is_empty() {
            return Err(ConstraintError::config("violation_path must not be empty"));
        }
        Ok(())
    }
}
