//! Metadata descriptors and items.
//!
//! A [`MetaDescriptor`] declares the shape of one metadata fact, e.g.
//! `readOnly: boolean`. A [`MetaItem`] binds a concrete value to that shape
//! and is attached to an attribute descriptor or an attribute instance.

use std::borrow::Cow;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::error::MetaError;
use crate::model::descriptor::ValueDescriptor;
use crate::model::value::{AttributeValue, Value};

/// Declares a metadata key, its value type and an optional default.
#[derive(Debug)]
pub struct MetaDescriptor<T: 'static> {
    name: &'static str,
    value_descriptor: &'static ValueDescriptor<T>,
    default_value: Option<T>,
}

impl<T: 'static> MetaDescriptor<T> {
    pub const fn new(
        name: &'static str,
        value_descriptor: &'static ValueDescriptor<T>,
        default_value: Option<T>,
    ) -> Self {
        Self {
            name,
            value_descriptor,
            default_value,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn value_descriptor(&self) -> &'static ValueDescriptor<T> {
        self.value_descriptor
    }

    pub const fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }
}

/// A metadata value bound to its key.
///
/// Immutable once built. Typed construction validates the value eagerly.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem {
    name: Cow<'static, str>,
    value: Value,
}

impl MetaItem {
    /// Creates a meta item, checking `value` against the descriptor's value type.
    pub fn new<T: AttributeValue>(descriptor: &MetaDescriptor<T>, value: T) -> Result<Self, MetaError> {
        let value_descriptor = descriptor.value_descriptor();
        if let Some(reason) = value_descriptor.validate(&value) {
            return Err(MetaError::InvalidMetaValue {
                meta: descriptor.name(),
                value_type: value_descriptor.name(),
                reason,
            });
        }
        Ok(Self {
            name: Cow::Borrowed(descriptor.name()),
            value: value.to_value(),
        })
    }

    /// Creates a meta item holding the descriptor's default value.
    pub fn with_default<T: AttributeValue>(descriptor: &MetaDescriptor<T>) -> Result<Self, MetaError> {
        let value = descriptor
            .default_value()
            .cloned()
            .ok_or(MetaError::NoDefault {
                meta: descriptor.name(),
            })?;
        Self::new(descriptor, value)
    }

    /// Creates an untyped meta item, as absorbed from an external payload.
    pub fn raw(name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Checks the name, and the value when the name is one of [`meta_types`].
    ///
    /// Items of other names carry any value.
    pub fn check(&self) -> Result<(), MetaError> {
        if self.name.trim().is_empty() {
            return Err(MetaError::EmptyName);
        }
        use meta_types::{LABEL, READ_ONLY, STORE_DATA_POINTS, UNIT_TYPE};
        match &*self.name {
            name if name == READ_ONLY.name() => check_against(&READ_ONLY, &self.value),
            name if name == UNIT_TYPE.name() => check_against(&UNIT_TYPE, &self.value),
            name if name == LABEL.name() => check_against(&LABEL, &self.value),
            name if name == STORE_DATA_POINTS.name() => check_against(&STORE_DATA_POINTS, &self.value),
            _ => Ok(()),
        }
    }

    /// Reads the value through a descriptor; `None` on name or type mismatch.
    pub fn value_as<T: AttributeValue>(&self, descriptor: &MetaDescriptor<T>) -> Option<T> {
        if self.name != descriptor.name() {
            return None;
        }
        descriptor.value_descriptor().coerce(&self.value).ok()
    }
}

fn check_against<T: AttributeValue>(descriptor: &MetaDescriptor<T>, value: &Value) -> Result<(), MetaError> {
    let value_descriptor = descriptor.value_descriptor();
    match value_descriptor.check(value) {
        None => Ok(()),
        Some(reason) => Err(MetaError::InvalidMetaValue {
            meta: descriptor.name(),
            value_type: value_descriptor.name(),
            reason,
        }),
    }
}

/// Meta items of one holder, at most one per name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaMap {
    items: FxHashMap<Cow<'static, str>, MetaItem>,
}

impl MetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item, replacing and returning any item with the same name.
    pub fn insert(&mut self, item: MetaItem) -> Option<MetaItem> {
        self.items.insert(item.name.clone(), item)
    }

    /// Inserts an item unless one with the same name is present.
    ///
    /// On conflict the rejected item is handed back.
    pub fn try_insert(&mut self, item: MetaItem) -> Result<(), MetaItem> {
        if self.items.contains_key(item.name()) {
            return Err(item);
        }
        self.items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Typed read. Absent and non-conforming values both read as `None`.
    pub fn get<T: AttributeValue>(&self, descriptor: &MetaDescriptor<T>) -> Option<T> {
        self.items
            .get(descriptor.name())
            .and_then(|item| item.value_as(descriptor))
    }

    pub fn get_named(&self, name: &str) -> Option<&MetaItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<MetaItem> {
        self.items.remove(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaItem> {
        self.items.values()
    }

    /// Returns name → value sorted by name.
    pub fn to_sorted(&self) -> BTreeMap<String, Value> {
        self.items
            .values()
            .map(|item| (item.name().to_owned(), item.value.clone()))
            .collect()
    }
}

impl Extend<MetaItem> for MetaMap {
    fn extend<I: IntoIterator<Item = MetaItem>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl FromIterator<MetaItem> for MetaMap {
    fn from_iter<I: IntoIterator<Item = MetaItem>>(iter: I) -> Self {
        let mut map = MetaMap::new();
        map.extend(iter);
        map
    }
}

impl Serialize for MetaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &Value> = self
            .items
            .values()
            .map(|item| (item.name(), &item.value))
            .collect();
        sorted.serialize(serializer)
    }
}

/// Standard metadata.
pub mod meta_types {
    use super::MetaDescriptor;
    use crate::model::descriptor::value_types::{BOOLEAN, NON_EMPTY_TEXT};

    /// The attribute is not writable by clients.
    pub static READ_ONLY: MetaDescriptor<bool> = MetaDescriptor::new("readOnly", &BOOLEAN, Some(false));

    /// Unit of the attribute value, see [`crate::units`].
    pub static UNIT_TYPE: MetaDescriptor<String> = MetaDescriptor::new("unitType", &NON_EMPTY_TEXT, None);

    pub static LABEL: MetaDescriptor<String> = MetaDescriptor::new("label", &NON_EMPTY_TEXT, None);

    /// Whether a persistence layer should keep a history of the value.
    pub static STORE_DATA_POINTS: MetaDescriptor<bool> =
        MetaDescriptor::new("storeDataPoints", &BOOLEAN, Some(true));
}

#[cfg(test)]
mod tests {
    use super::meta_types::*;
    use super::*;

    #[test]
    fn test_meta_item_validates_eagerly() {
        let err = MetaItem::new(&UNIT_TYPE, String::new()).unwrap_err();
        assert!(matches!(err, MetaError::InvalidMetaValue { meta: "unitType", .. }));

        let item = MetaItem::new(&UNIT_TYPE, "KILOWATT_HOUR".to_string()).unwrap();
        assert_eq!(item.name(), "unitType");
        assert_eq!(item.value(), &Value::from("KILOWATT_HOUR"));
    }

    #[test]
    fn test_meta_item_default() {
        let item = MetaItem::with_default(&READ_ONLY).unwrap();
        assert_eq!(item.value_as(&READ_ONLY), Some(false));

        let item = MetaItem::with_default(&STORE_DATA_POINTS).unwrap();
        assert_eq!(item.value_as(&STORE_DATA_POINTS), Some(true));

        assert_eq!(
            MetaItem::with_default(&LABEL),
            Err(MetaError::NoDefault { meta: "label" })
        );
    }

    #[test]
    fn test_meta_map_unique_names() {
        let mut meta = MetaMap::new();
        assert!(meta.try_insert(MetaItem::new(&READ_ONLY, true).unwrap()).is_ok());
        assert!(meta.try_insert(MetaItem::new(&READ_ONLY, false).unwrap()).is_err());
        assert_eq!(meta.get(&READ_ONLY), Some(true));

        let replaced = meta.insert(MetaItem::new(&READ_ONLY, false).unwrap());
        assert!(replaced.is_some());
        assert_eq!(meta.get(&READ_ONLY), Some(false));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_meta_map_typed_read_tolerates_drift() {
        let mut meta = MetaMap::new();
        meta.insert(MetaItem::raw("readOnly", Value::from("yes")));
        assert_eq!(meta.get(&READ_ONLY), None);
        assert!(meta.contains("readOnly"));
    }

    #[test]
    fn test_raw_item_check() {
        assert_eq!(MetaItem::raw("", Value::Integer(1)).check(), Err(MetaError::EmptyName));
        assert!(matches!(
            MetaItem::raw("readOnly", Value::from("yes")).check(),
            Err(MetaError::InvalidMetaValue { meta: "readOnly", value_type: "boolean", .. })
        ));
        assert!(MetaItem::raw("unitType", Value::from("")).check().is_err());
        assert!(MetaItem::raw("readOnly", Value::Bool(true)).check().is_ok());
        assert!(MetaItem::raw("vendorHint", Value::from("")).check().is_ok());
    }

    #[test]
    fn test_meta_map_serializes_sorted() {
        let meta: MetaMap = [
            MetaItem::new(&UNIT_TYPE, "KILOWATT".to_string()).unwrap(),
            MetaItem::new(&READ_ONLY, true).unwrap(),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"readOnly":true,"unitType":"KILOWATT"}"#);
    }
}
