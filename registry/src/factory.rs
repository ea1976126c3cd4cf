//! Builds value collections from raw attribute data.
//!
//! Raw data maps attribute codes to JSON values. A raw value is skipped, and
//! never fails the whole collection, when its attribute is unknown, when it
//! is null, or when its shape does not match the attribute type.

use crate::{AttributeType, Registry};
use serde_json::Value as Raw;
use tracing::warn;
use varaxis_core::{Value, ValueCollection};

/// Creates typed values using the attribute types of a registry.
pub struct ValueFactory<'r> {
    registry: &'r Registry,
}

impl<'r> ValueFactory<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Build a collection from raw values, skipping the ones that do not fit.
    pub fn create_from_raw<'a, I>(&self, raw: I) -> ValueCollection
    where
        I: IntoIterator<Item = (&'a String, &'a Raw)>,
    {
        let mut values = ValueCollection::new();

        for (code, data) in raw {
            let Some(attribute) = self.registry.attribute(code) else {
                warn!(attribute = %code, "skipping value of unknown attribute");
                continue;
            };
            if data.is_null() {
                continue;
            }
            match create_value(attribute.attribute_type, data) {
                Some(value) => {
                    values.insert(code.clone(), value);
                }
                None => {
                    warn!(
                        attribute = %code,
                        attribute_type = %attribute.attribute_type,
                        "skipping value with unexpected shape"
                    );
                }
            }
        }

        values
    }
}

/// Convert one raw value according to an attribute type.
fn create_value(attribute_type: AttributeType, data: &Raw) -> Option<Value> {
    match attribute_type {
        AttributeType::Text => data.as_str().map(|s| Value::Text(s.to_string())),
        AttributeType::SimpleSelect => data.as_str().map(|s| Value::SimpleSelect(s.to_string())),
        AttributeType::ReferenceDataSimpleSelect => {
            data.as_str().map(|s| Value::ReferenceData(s.to_string()))
        }
        AttributeType::MultiSelect => data
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(Value::MultiSelect),
        AttributeType::Boolean => data.as_bool().map(Value::Boolean),
        AttributeType::Number => number(data).map(Value::Number),
        AttributeType::Metric => {
            let object = data.as_object()?;
            let amount = number(object.get("amount")?)?;
            let unit = object.get("unit")?.as_str()?.to_string();
            Some(Value::Metric { amount, unit })
        }
    }
}

// Numbers are accepted as JSON numbers or decimal strings such as "10.00".
fn number(data: &Raw) -> Option<f64> {
    match data {
        Raw::Number(n) => n.as_f64(),
        Raw::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
