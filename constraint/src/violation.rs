//! Constraint violation types.

use serde::Serialize;
use varaxis_core::EntityKind;

/// Property path violations are attached to.
pub const DEFAULT_VIOLATION_PATH: &str = "attribute";

/// Which duplicate message applies to a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Two product models under one parent share an axis combination.
    DuplicateInProductModel,
    /// Two variant products under one parent share an axis combination.
    DuplicateInVariantProduct,
}

impl ViolationKind {
    /// Select the kind matching the validated entity.
    pub fn for_entity(kind: EntityKind) -> Self {
        match kind {
            EntityKind::ProductModel => ViolationKind::DuplicateInProductModel,
            EntityKind::VariantProduct => ViolationKind::DuplicateInVariantProduct,
        }
    }

    /// Message template with `%placeholder%` parameters.
    pub fn template(&self) -> &'static str {
        match self {
            ViolationKind::DuplicateInProductModel => {
                "Cannot set value \"%values%\" for the attribute axis \"%attributes%\" \
                 on product model \"%validated_entity%\", \
                 as the product model \"%sibling_with_same_value%\" already has this value"
            }
            ViolationKind::DuplicateInVariantProduct => {
                "Cannot set value \"%values%\" for the attribute axis \"%attributes%\" \
                 on variant product \"%validated_entity%\", \
                 as the variant product \"%sibling_with_same_value%\" already has this value"
            }
        }
    }
}

/// A duplicate axis combination found for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Message kind.
    pub kind: ViolationKind,
    /// Combination of axis values, comma-joined.
    pub values: String,
    /// Axis attribute codes, comma-joined.
    pub attributes: String,
    /// Display identifier of the validated entity.
    pub validated_entity: String,
    /// Display identifier of the entity already holding the combination.
    pub sibling_with_same_value: String,
    /// Property path the violation is attached to.
    pub path: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        values: impl Into<String>,
        attributes: impl Into<String>,
        validated_entity: impl Into<String>,
        sibling_with_same_value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            values: values.into(),
            attributes: attributes.into(),
            validated_entity: validated_entity.into(),
            sibling_with_same_value: sibling_with_same_value.into(),
            path: DEFAULT_VIOLATION_PATH.to_string(),
        }
    }

    /// Attach the violation to another property path.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Template parameters, in template order.
    pub fn parameters(&self) -> [(&'static str, &str); 4] {
        [
            ("%values%", &self.values),
            ("%attributes%", &self.attributes),
            ("%validated_entity%", &self.validated_entity),
            ("%sibling_with_same_value%", &self.sibling_with_same_value),
        ]
    }

    /// Render the untranslated message.
    pub fn message(&self) -> String {
        self.parameters()
            .iter()
            .fold(self.kind.template().to_string(), |message, (placeholder, value)| {
                message.replace(placeholder, value)
            })
    }
}

/// Collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations raised for one validated entity.
    pub fn for_entity<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations
            .iter()
            .filter(move |v| v.validated_entity == identifier)
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
