//! Attribute values and value collections.
//!
//! Every value has a canonical string projection. Two values are considered
//! equal for variant-axis purposes when their projections are equal, and an
//! empty projection means the value is not set.

use std::collections::BTreeMap;
use std::fmt;

/// A value held by a product model or a variant product for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No data.
    Empty,
    /// Free text.
    Text(String),
    /// Code of the selected option.
    SimpleSelect(String),
    /// Codes of the selected options, in stored order.
    MultiSelect(Vec<String>),
    /// Code of the selected reference data record.
    ReferenceData(String),
    /// Yes/no.
    Boolean(bool),
    /// Plain number.
    Number(f64),
    /// Amount expressed in a measurement unit.
    Metric { amount: f64, unit: String },
}

impl Value {
    /// Returns true if this value carries no data.
    pub fn is_empty(&self) -> bool {
        self.to_canonical_string().is_empty()
    }

    /// Render the canonical projection used for equality.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(text) => text.clone(),
            Value::SimpleSelect(code) | Value::ReferenceData(code) => bracketed(code),
            Value::MultiSelect(codes) => codes
                .iter()
                .map(|code| bracketed(code))
                .collect::<Vec<_>>()
                .join(","),
            Value::Boolean(true) => "1".to_string(),
            Value::Boolean(false) => "0".to_string(),
            Value::Number(n) => format!("{}", n),
            Value::Metric { amount, unit } => {
                if unit.is_empty() {
                    String::new()
                } else {
                    format!("{:.4} {}", amount, unit)
                }
            }
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "Empty",
            Value::Text(_) => "Text",
            Value::SimpleSelect(_) => "SimpleSelect",
            Value::MultiSelect(_) => "MultiSelect",
            Value::ReferenceData(_) => "ReferenceData",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::Metric { .. } => "Metric",
        }
    }
}

// Empty codes project to "" so that an unselected option reads as unset.
fn bracketed(code: &str) -> String {
    if code.is_empty() {
        String::new()
    } else {
        format!("[{}]", code)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Values of an entity keyed by attribute code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCollection {
    values: BTreeMap<String, Value>,
}

impl ValueCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for an attribute code.
    pub fn get_by_code(&self, code: &str) -> Option<&Value> {
        self.values.get(code)
    }

    /// Canonical projection of the value for `code`, empty when absent.
    pub fn canonical(&self, code: &str) -> String {
        self.values
            .get(code)
            .map(Value::to_canonical_string)
            .unwrap_or_default()
    }

    /// Set the value for an attribute code, returning the previous one.
    pub fn insert(&mut self, code: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(code.into(), value)
    }

    /// Remove the value for an attribute code.
    pub fn remove(&mut self, code: &str) -> Option<Value> {
        self.values.remove(code)
    }

    /// Attribute codes that hold a value, in code order.
    pub fn attribute_codes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(code, value)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(code, value)| (code.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ValueCollection {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Helper macro to create value collections.
///
/// ```ignore
/// let values = values! { "color" => Value::SimpleSelect("blue".into()) };
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::ValueCollection::new()
    };
    ($($code:expr => $value:expr),+ $(,)?) => {
        {
            let mut collection = $crate::ValueCollection::new();
            $(
                collection.insert($code, $crate::Value::from($value));
            )+
            collection
        }
    };
}
