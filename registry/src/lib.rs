//! Varaxis Registry
//!
//! Runtime lookup of attributes and family variants, and resolution of the
//! variant axes that apply to an entity. The registry is immutable after
//! construction via RegistryBuilder.

mod builder;
mod factory;
mod registry;
mod resolver;
mod types;

pub use builder::{FamilyVariantBuilder, RegistryBuilder, RegistryError, RegistryResult};
pub use factory::ValueFactory;
pub use registry::Registry;
pub use resolver::AxisResolver;
pub use types::*;
