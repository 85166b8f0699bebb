//! Attribute maps as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::model::{Attribute, AttributeMap, MetaItem, Value};

/// A loosely typed attribute as received from outside.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawAttribute {
    pub name: String,
    pub value: Option<serde_json::Value>,
    pub meta: BTreeMap<String, serde_json::Value>,
}

/// One entry of an encoded attribute object; the name is the key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEntry {
    value: Option<serde_json::Value>,
    meta: BTreeMap<String, serde_json::Value>,
}

impl RawEntry {
    pub(crate) fn named(self, name: String) -> RawAttribute {
        RawAttribute {
            name,
            value: self.value,
            meta: self.meta,
        }
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// Converts a JSON value. `null` is absence; nested `null`s are dropped.
pub fn value_from_json(json: serde_json::Value) -> Option<Value> {
    match json {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Bool(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Number),
        },
        serde_json::Value::String(s) => Some(Value::Text(s)),
        serde_json::Value::Array(items) => Some(Value::Array(
            items.into_iter().filter_map(value_from_json).collect(),
        )),
        serde_json::Value::Object(entries) => Some(Value::Object(
            entries
                .into_iter()
                .filter_map(|(key, entry)| value_from_json(entry).map(|v| (key, v)))
                .collect(),
        )),
    }
}

/// Converts a value to JSON. Non-finite numbers become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Object(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), value_to_json(entry)))
                .collect(),
        ),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Builds an attribute from a raw one. Meta entries holding `null` are dropped.
pub fn decode_attribute(raw: RawAttribute) -> Attribute {
    let mut attribute = Attribute::new(raw.name);
    attribute.set_raw_value(raw.value.and_then(value_from_json));
    for (name, json) in raw.meta {
        match value_from_json(json) {
            Some(value) => {
                attribute.meta_mut().insert(MetaItem::raw(name, value));
            }
            None => tracing::debug!(attribute = attribute.name(), meta = %name, "dropping null meta item"),
        }
    }
    attribute
}

/// Puts every raw attribute into the map, replacing same-named ones.
///
/// Nothing is validated here.
pub fn absorb(attributes: &mut AttributeMap, raws: impl IntoIterator<Item = RawAttribute>) {
    let before = attributes.len();
    attributes.extend(raws.into_iter().map(decode_attribute));
    tracing::trace!(
        absorbed = attributes.len().saturating_sub(before),
        total = attributes.len(),
        "absorbed raw attributes"
    );
}

/// Decodes an attribute object.
pub fn decode_attributes(input: &[u8]) -> Result<AttributeMap, DecodeError> {
    let entries: BTreeMap<String, RawEntry> = serde_json::from_slice(input)?;
    let mut attributes = AttributeMap::with_capacity(entries.len());
    absorb(
        &mut attributes,
        entries.into_iter().map(|(name, entry)| entry.named(name)),
    );
    tracing::debug!(attributes = attributes.len(), bytes = input.len(), "decoded attributes");
    Ok(attributes)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an attribute map as a JSON object sorted by name.
pub fn encode_attributes(attributes: &AttributeMap) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(attributes)?)
}

/// Attribute values and metadata split into two name-keyed maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StructuredAttributes {
    pub values: BTreeMap<String, Value>,
    pub meta: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Splits a map into values and metadata. Attributes without a value or
/// without metadata are left out of the respective half.
pub fn to_structured(attributes: &AttributeMap) -> StructuredAttributes {
    let mut structured = StructuredAttributes::default();
    for (name, attribute) in attributes.sorted() {
        if let Some(value) = attribute.value() {
            structured.values.insert(name.to_owned(), value.clone());
        }
        if !attribute.meta().is_empty() {
            structured.meta.insert(name.to_owned(), attribute.meta().to_sorted());
        }
    }
    structured
}
