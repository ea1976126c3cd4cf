//! Varaxis Store
//!
//! In-memory persisted catalog.
//!
//! Responsibilities:
//! - Hold committed product models and variant products
//! - Index them by parent for sibling lookups
//! - Serve persisted siblings to the axis validator

mod catalog;
mod index;

pub use catalog::CatalogStore;
pub use index::{EntityKey, ParentIndex};
