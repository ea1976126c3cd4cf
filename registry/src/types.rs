//! Catalog structure definition types.

use std::fmt;

/// Maximum number of variation levels in a family variant.
pub const MAX_VARIATION_LEVELS: usize = 2;

/// Maximum number of axes on one variation level.
pub const MAX_AXES_PER_LEVEL: usize = 5;

/// Type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Text,
    SimpleSelect,
    MultiSelect,
    ReferenceDataSimpleSelect,
    Boolean,
    Number,
    Metric,
}

impl AttributeType {
    /// Whether attributes of this type may be used as variant axes.
    pub fn is_axis_eligible(&self) -> bool {
        matches!(
            self,
            AttributeType::SimpleSelect
                | AttributeType::ReferenceDataSimpleSelect
                | AttributeType::Boolean
                | AttributeType::Metric
        )
    }

    /// Parse a type name as written in catalog definitions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(AttributeType::Text),
            "simpleselect" => Some(AttributeType::SimpleSelect),
            "multiselect" => Some(AttributeType::MultiSelect),
            "reference_data_simpleselect" => Some(AttributeType::ReferenceDataSimpleSelect),
            "boolean" => Some(AttributeType::Boolean),
            "number" => Some(AttributeType::Number),
            "metric" => Some(AttributeType::Metric),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::SimpleSelect => "simpleselect",
            AttributeType::MultiSelect => "multiselect",
            AttributeType::ReferenceDataSimpleSelect => "reference_data_simpleselect",
            AttributeType::Boolean => "boolean",
            AttributeType::Number => "number",
            AttributeType::Metric => "metric",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeDef {
    /// Stable attribute code.
    pub code: String,
    /// Type of the attribute.
    pub attribute_type: AttributeType,
}

impl AttributeDef {
    pub fn new(code: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            code: code.into(),
            attribute_type,
        }
    }
}

/// Attributes owned by one variation level of a family variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAttributeSet {
    /// Variation level, starting at 1.
    pub level: u8,
    /// Axis attribute codes, in declared order.
    pub axes: Vec<String>,
    /// Non-axis attribute codes owned by this level.
    pub attributes: Vec<String>,
}

/// Family variant definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyVariant {
    /// Family variant code.
    pub code: String,
    /// Code of the family this variant belongs to.
    pub family: String,
    /// Attribute sets ordered by level.
    pub variant_attribute_sets: Vec<VariantAttributeSet>,
}

impl FamilyVariant {
    /// Number of variation levels.
    pub fn level_count(&self) -> usize {
        self.variant_attribute_sets.len()
    }

    /// Attribute set of a level, if the level exists.
    pub fn attribute_set(&self, level: u8) -> Option<&VariantAttributeSet> {
        self.variant_attribute_sets.iter().find(|set| set.level == level)
    }

    /// Axis codes of a level; empty when the level is not defined.
    pub fn axes_at(&self, level: u8) -> &[String] {
        self.attribute_set(level)
            .map(|set| set.axes.as_slice())
            .unwrap_or(&[])
    }

    /// Every axis code across all levels.
    pub fn all_axes(&self) -> impl Iterator<Item = &str> {
        self.variant_attribute_sets
            .iter()
            .flat_map(|set| set.axes.iter().map(String::as_str))
    }
}
