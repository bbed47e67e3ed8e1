//! Conversion between JSON items and DynamoDB attribute maps.
//!
//! Pure functions, testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Number, Value};

use super::{Item, StoreError};

pub(crate) fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

pub(crate) fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StoreError> {
    attributes
        .iter()
        .map(|(name, value)| Ok((name.clone(), attribute_to_value(value)?)))
        .collect()
}

pub(crate) fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

pub(crate) fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_value(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(general_purpose::STANDARD.encode(blob.as_ref())),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_value(v)?)))
                .collect::<Result<Map<_, _>, StoreError>>()?,
        ),
        AttributeValue::Ss(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(values.iter().map(|n| number_value(n)).collect()),
        AttributeValue::Bs(values) => Value::Array(
            values
                .iter()
                .map(|blob| Value::String(general_purpose::STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(StoreError::InvalidItem(format!(
                "unsupported attribute type: {other:?}"
            )))
        }
    };
    Ok(value)
}

// DynamoDB numbers can exceed f64 precision; keep the text when serde_json can't hold it.
fn number_value(text: &str) -> Value {
    text.parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(text.to_string()))
}
