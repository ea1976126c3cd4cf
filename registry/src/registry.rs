//! The Registry - immutable catalog structure lookup.

use crate::{AttributeDef, FamilyVariant};
use std::collections::HashMap;

/// The Registry provides runtime lookup of attributes and family variants.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Registry {
    /// Attribute definitions by code.
    attributes: HashMap<String, AttributeDef>,
    /// Family variant definitions by code.
    family_variants: HashMap<String, FamilyVariant>,
}

impl Registry {
    /// Create a registry (use RegistryBuilder for construction).
    pub(crate) fn new(
        attributes: HashMap<String, AttributeDef>,
        family_variants: HashMap<String, FamilyVariant>,
    ) -> Self {
        Self {
            attributes,
            family_variants,
        }
    }

    // ==================== Attribute Lookups ====================

    /// Get an attribute definition by code.
    pub fn attribute(&self, code: &str) -> Option<&AttributeDef> {
        self.attributes.get(code)
    }

    /// Check if an attribute is registered.
    pub fn has_attribute(&self, code: &str) -> bool {
        self.attributes.contains_key(code)
    }

    /// Get the number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    // ==================== Family Variant Lookups ====================

    /// Get a family variant by code.
    pub fn family_variant(&self, code: &str) -> Option<&FamilyVariant> {
        self.family_variants.get(code)
    }

    /// Get all family variants.
    pub fn all_family_variants(&self) -> impl Iterator<Item = &FamilyVariant> {
        self.family_variants.values()
    }

    /// Get the number of family variants.
    pub fn family_variant_count(&self) -> usize {
        self.family_variants.len()
    }
}
