//! Varaxis Constraint
//!
//! Enforce unique variant-axis combinations among siblings.
//!
//! Responsibilities:
//! - Build canonical combination keys from axis values
//! - Compare against persisted siblings
//! - Claim combinations in a batch-scoped registry
//! - Produce attributable violation payloads

mod batch;
mod checker;
mod combination_set;
mod config;
mod error;
mod key;
mod siblings;
mod violation;

pub use batch::{BatchReport, BatchValidator, EntityOutcome};
pub use checker::{ConstraintDef, ExemptReason, VariantAxisValidator, Verdict, UNIQUE_VARIANT_AXIS};
pub use combination_set::{BatchUniquenessRegistry, Claim};
pub use config::ValidatorConfig;
pub use error::{ConstraintError, ConstraintResult};
pub use key::{AxisCombination, CombinationKey, CombinationKeyBuilder, AXIS_SEPARATOR};
pub use siblings::{Sibling, SiblingProvider};
pub use violation::{Violation, ViolationKind, Violations, DEFAULT_VIOLATION_PATH};
