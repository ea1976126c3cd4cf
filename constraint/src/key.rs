//! Canonical combination keys.

use varaxis_core::ValueCollection;
use varaxis_registry::AttributeDef;

/// Separator between axis values and between axis codes.
pub const AXIS_SEPARATOR: &str = ",";

/// Canonical, order-preserving representation of an entity's axis values.
///
/// Only meaningful within the scope of one parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombinationKey {
    combination: String,
    attributes: String,
}

impl CombinationKey {
    /// Axis values, comma-joined in axis order.
    pub fn combination(&self) -> &str {
        &self.combination
    }

    /// Axis codes, comma-joined in axis order.
    pub fn attributes(&self) -> &str {
        &self.attributes
    }
}

/// Result of building a key for one value set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisCombination {
    /// No axes apply.
    NoAxes,
    /// An axis has no value; the whole value set is exempt.
    Incomplete { attribute: String },
    /// Every axis has a value.
    Key(CombinationKey),
}

impl AxisCombination {
    pub fn is_exempt(&self) -> bool {
        !matches!(self, AxisCombination::Key(_))
    }

    pub fn key(&self) -> Option<&CombinationKey> {
        match self {
            AxisCombination::Key(key) => Some(key),
            _ => None,
        }
    }
}

/// Turns axis values into combination keys.
pub struct CombinationKeyBuilder;

impl CombinationKeyBuilder {
    /// Build the key of `values` for `axes`, keeping axis order.
    ///
    /// The first axis whose canonical projection is empty makes the whole
    /// value set exempt.
    pub fn build(values: &ValueCollection, axes: &[AttributeDef]) -> AxisCombination {
        if axes.is_empty() {
            return AxisCombination::NoAxes;
        }

        let mut projections = Vec::with_capacity(axes.len());
        for axis in axes {
            let projection = values.canonical(&axis.code);
            if projection.is_empty() {
                return AxisCombination::Incomplete {
                    attribute: axis.code.clone(),
                };
            }
            projections.push(projection);
        }

        AxisCombination::Key(CombinationKey {
            combination: projections.join(AXIS_SEPARATOR),
            attributes: axes
                .iter()
                .map(|axis| axis.code.as_str())
                .collect::<Vec<_>>()
                .join(AXIS_SEPARATOR),
        })
    }
}
