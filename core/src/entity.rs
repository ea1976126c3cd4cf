//! Entities with a family variant.
//!
//! Product models and variant products share one structure and differ only
//! in their kind tag: the kind decides which accessor names the display
//! identifier (code vs identifier) and which duplicate message applies.

use std::fmt;

use crate::{CoreError, CoreResult, Value, ValueCollection};

/// Kind of an entity with a family variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// A product model, identified by its code.
    ProductModel,
    /// A variant product, identified by its identifier.
    VariantProduct,
}

impl EntityKind {
    /// Human-readable name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::ProductModel => "product model",
            EntityKind::VariantProduct => "variant product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to the parent product model of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentRef {
    /// Code of the parent product model.
    pub code: String,
    /// Variation level of the parent (a root product model is level 0).
    pub level: u8,
}

impl ParentRef {
    pub fn new(code: impl Into<String>, level: u8) -> Self {
        Self {
            code: code.into(),
            level,
        }
    }

    /// Reference to a root product model.
    pub fn root(code: impl Into<String>) -> Self {
        Self::new(code, 0)
    }
}

/// A product model or variant product.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantEntity {
    kind: EntityKind,
    identifier: String,
    parent: Option<ParentRef>,
    family_variant: Option<String>,
    values: ValueCollection,
}

impl VariantEntity {
    /// Create an entity of the given kind.
    pub fn new(kind: EntityKind, identifier: impl Into<String>) -> CoreResult<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(CoreError::EmptyIdentifier(kind));
        }
        Ok(Self {
            kind,
            identifier,
            parent: None,
            family_variant: None,
            values: ValueCollection::new(),
        })
    }

    /// Create a product model with the given code.
    pub fn product_model(code: impl Into<String>) -> CoreResult<Self> {
        Self::new(EntityKind::ProductModel, code)
    }

    /// Create a variant product with the given identifier.
    pub fn variant_product(identifier: impl Into<String>) -> CoreResult<Self> {
        Self::new(EntityKind::VariantProduct, identifier)
    }

    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_family_variant(mut self, code: impl Into<String>) -> Self {
        self.family_variant = Some(code.into());
        self
    }

    pub fn with_value(mut self, code: impl Into<String>, value: Value) -> Self {
        self.values.insert(code, value);
        self
    }

    pub fn with_values(mut self, values: ValueCollection) -> Self {
        self.values = values;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Code for a product model, identifier for a variant product.
    pub fn display_identifier(&self) -> &str {
        &self.identifier
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    /// Code of the parent product model, if any.
    pub fn parent_code(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.code.as_str())
    }

    /// Code of the family variant, if any.
    pub fn family_variant(&self) -> Option<&str> {
        self.family_variant.as_deref()
    }

    /// Values used to compute variant axes, ancestors' values included.
    pub fn values_for_variation(&self) -> &ValueCollection {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ValueCollection {
        &mut self.values
    }

    /// Level in the variant tree: 0 without a parent, else one below the parent.
    pub fn variation_level(&self) -> u8 {
        self.parent
            .as_ref()
            .map(|p| p.level.saturating_add(1))
            .unwrap_or(0)
    }
}
