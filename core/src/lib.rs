//! Varaxis Core Types
//!
//! This crate provides the foundational types used throughout Varaxis:
//! - Entities with a family variant (product models, variant products)
//! - Attribute values and their canonical projections
//! - Value collections keyed by attribute code
//! - Common error types

mod entity;
mod error;
mod value;

pub use entity::*;
pub use error::*;
pub use value::*;
