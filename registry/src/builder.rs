//! RegistryBuilder for constructing an immutable Registry.

use crate::{
    AttributeDef, AttributeType, FamilyVariant, Registry, VariantAttributeSet,
    MAX_AXES_PER_LEVEL, MAX_VARIATION_LEVELS,
};
use regex_lite::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

/// Codes of attributes and family variants.
const CODE_PATTERN: &str = r"^[A-Za-z0-9_]+$";

static CODE_REGEX: OnceLock<Result<Regex, String>> = OnceLock::new();

/// Errors that can occur during registry construction or axis resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid {kind} code: '{code}'")]
    InvalidCode { kind: &'static str, code: String },

    #[error("Duplicate attribute code: {0}")]
    DuplicateAttribute(String),

    #[error("Duplicate family variant code: {0}")]
    DuplicateFamilyVariant(String),

    #[error(
        "Family variant '{family_variant}' has {count} levels, expected 1 to {max}",
        max = MAX_VARIATION_LEVELS
    )]
    LevelCount { family_variant: String, count: usize },

    #[error("Family variant '{family_variant}' declares level {level} out of sequence")]
    LevelOutOfSequence { family_variant: String, level: u8 },

    #[error(
        "Family variant '{family_variant}' has {count} axes on level {level}, expected 1 to {max}",
        max = MAX_AXES_PER_LEVEL
    )]
    AxisCount {
        family_variant: String,
        level: u8,
        count: usize,
    },

    #[error("Family variant '{family_variant}' uses unknown attribute '{attribute}'")]
    UnknownAttribute {
        family_variant: String,
        attribute: String,
    },

    #[error(
        "Attribute '{attribute}' of type {attribute_type} cannot be an axis of '{family_variant}'"
    )]
    IneligibleAxis {
        family_variant: String,
        attribute: String,
        attribute_type: AttributeType,
    },

    #[error("Attribute '{attribute}' is an axis on more than one level of '{family_variant}'")]
    AxisReused {
        family_variant: String,
        attribute: String,
    },

    #[error("Entity '{entity}' references unknown family variant '{code}'")]
    UnknownFamilyVariant { entity: String, code: String },

    #[error("Invalid code pattern: {0}")]
    Pattern(String),
}

impl RegistryError {
    pub fn unknown_family_variant(entity: impl Into<String>, code: impl Into<String>) -> Self {
        Self::UnknownFamilyVariant {
            entity: entity.into(),
            code: code.into(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// The code pattern, compiled on first use.
fn code_regex() -> RegistryResult<&'static Regex> {
    CODE_REGEX
        .get_or_init(|| Regex::new(CODE_PATTERN).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| RegistryError::Pattern(e.clone()))
}

fn check_code(kind: &'static str, code: &str) -> RegistryResult<()> {
    if code_regex()?.is_match(code) {
        Ok(())
    } else {
        Err(RegistryError::InvalidCode {
            kind,
            code: code.to_string(),
        })
    }
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Attributes by code.
    attributes: HashMap<String, AttributeDef>,
    /// Family variants by code.
    family_variants: HashMap<String, FamilyVariant>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute definition.
    pub fn add_attribute(
        &mut self,
        code: impl Into<String>,
        attribute_type: AttributeType,
    ) -> RegistryResult<()> {
        let code = code.into();
        check_code("attribute", &code)?;
        if self.attributes.contains_key(&code) {
            return Err(RegistryError::DuplicateAttribute(code));
        }
        self.attributes
            .insert(code.clone(), AttributeDef::new(code, attribute_type));
        Ok(())
    }

    /// Add a family variant definition.
    ///
    /// Attributes used by the variant must already be registered.
    pub fn add_family_variant(
        &mut self,
        code: impl Into<String>,
        family: impl Into<String>,
    ) -> FamilyVariantBuilder<'_> {
        FamilyVariantBuilder {
            builder: self,
            code: code.into(),
            family: family.into(),
            sets: Vec::new(),
        }
    }

    /// Build the immutable Registry.
    pub fn build(self) -> RegistryResult<Registry> {
        Ok(Registry::new(self.attributes, self.family_variants))
    }
}

/// Builder for a family variant definition.
pub struct FamilyVariantBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    code: String,
    family: String,
    sets: Vec<VariantAttributeSet>,
}

impl<'a> FamilyVariantBuilder<'a> {
    /// Add a variation level with its axes and owned attributes.
    pub fn level<A, B, S, T>(mut self, level: u8, axes: A, attributes: B) -> Self
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.sets.push(VariantAttributeSet {
            level,
            axes: axes.into_iter().map(Into::into).collect(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a variation level that only declares axes.
    pub fn axes<A, S>(self, level: u8, axes: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.level(level, axes, Vec::<String>::new())
    }

    /// Finish building this family variant.
    pub fn done(self) -> RegistryResult<()> {
        check_code("family variant", &self.code)?;
        if self.builder.family_variants.contains_key(&self.code) {
            return Err(RegistryError::DuplicateFamilyVariant(self.code));
        }

        if self.sets.is_empty() || self.sets.len() > MAX_VARIATION_LEVELS {
            return Err(RegistryError::LevelCount {
                family_variant: self.code,
                count: self.sets.len(),
            });
        }

        let mut seen_axes = HashSet::new();
        for (expected, set) in (1u8..).zip(&self.sets) {
            if set.level != expected {
                return Err(RegistryError::LevelOutOfSequence {
                    family_variant: self.code,
                    level: set.level,
                });
            }

            if set.axes.is_empty() || set.axes.len() > MAX_AXES_PER_LEVEL {
                return Err(RegistryError::AxisCount {
                    family_variant: self.code,
                    level: set.level,
                    count: set.axes.len(),
                });
            }

            for axis in &set.axes {
                let attribute = self.builder.attributes.get(axis).ok_or_else(|| {
                    RegistryError::UnknownAttribute {
                        family_variant: self.code.clone(),
                        attribute: axis.clone(),
                    }
                })?;
                if !attribute.attribute_type.is_axis_eligible() {
                    return Err(RegistryError::IneligibleAxis {
                        family_variant: self.code,
                        attribute: axis.clone(),
                        attribute_type: attribute.attribute_type,
                    });
                }
                if !seen_axes.insert(axis.clone()) {
                    return Err(RegistryError::AxisReused {
                        family_variant: self.code,
                        attribute: axis.clone(),
                    });
                }
            }

            if let Some(unknown) = set
                .attributes
                .iter()
                .find(|code| !self.builder.attributes.contains_key(*code))
            {
                return Err(RegistryError::UnknownAttribute {
                    family_variant: self.code,
                    attribute: unknown.clone(),
                });
            }
        }

        let family_variant = FamilyVariant {
            code: self.code.clone(),
            family: self.family,
            variant_attribute_sets: self.sets,
        };
        self.builder
            .family_variants
            .insert(self.code, family_variant);

        Ok(())
    }
}
