//! The attribute container owned by one asset.
//!
//! Lookups are keyed by descriptor name. Reads are forgiving: a missing
//! attribute, a missing value and a stored value that does not conform to the
//! descriptor all read as `None`. Writes through [`AttributeMap::set_value`]
//! are strict and leave the map untouched when validation fails.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::model::attribute::{Attribute, AttributeDescriptor};
use crate::model::value::{AttributeValue, Value};

/// Live attributes of one asset, at most one per name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    attributes: FxHashMap<String, Attribute>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    // =========================================================================
    // Descriptor-based access
    // =========================================================================

    /// Looks up the attribute named by the descriptor.
    pub fn get<T: AttributeValue>(&self, descriptor: &AttributeDescriptor<T>) -> Option<&Attribute> {
        self.attributes.get(descriptor.name())
    }

    /// Returns the stored value as `T`.
    ///
    /// Never synthesizes a value. A stored value that fails the descriptor's
    /// type check is treated as absent.
    pub fn value<T: AttributeValue>(&self, descriptor: &AttributeDescriptor<T>) -> Option<T> {
        let raw = self.get(descriptor)?.value()?;
        match descriptor.value_descriptor().coerce(raw) {
            Ok(value) => Some(value),
            Err(reason) => {
                tracing::debug!(
                    attribute = descriptor.name(),
                    expected = descriptor.value_descriptor().name(),
                    found = %raw.value_type(),
                    reason,
                    "stored value does not conform, reading as absent"
                );
                None
            }
        }
    }

    /// Like [`value`](Self::value), falling back to the descriptor's default.
    ///
    /// The fallback is read-only: no attribute is created.
    pub fn value_or_default<T: AttributeValue>(&self, descriptor: &AttributeDescriptor<T>) -> Option<T> {
        self.value(descriptor)
            .or_else(|| descriptor.default_value().cloned())
    }

    /// Returns the attribute named by the descriptor, creating it from the
    /// descriptor's default and metadata if absent.
    ///
    /// Repeated calls return the same stored attribute.
    pub fn get_or_create<T: AttributeValue>(&mut self, descriptor: &AttributeDescriptor<T>) -> &mut Attribute {
        self.attributes
            .entry(descriptor.name().to_owned())
            .or_insert_with(|| {
                tracing::trace!(attribute = descriptor.name(), "creating attribute");
                Attribute::from_descriptor(descriptor)
            })
    }

    /// Validates `value` against the descriptor and stores it.
    ///
    /// On failure the map is left unchanged; in particular no attribute is
    /// created.
    pub fn set_value<T: AttributeValue>(
        &mut self,
        descriptor: &AttributeDescriptor<T>,
        value: T,
    ) -> Result<(), ValidationError> {
        let value_descriptor = descriptor.value_descriptor();
        if let Some(reason) = value_descriptor.validate(&value) {
            return Err(ValidationError::ConstraintViolated {
                attribute: descriptor.name().to_owned(),
                constraint: value_descriptor.constraint().to_string(),
                reason,
            });
        }
        self.get_or_create(descriptor).set_value(value);
        Ok(())
    }

    pub fn contains<T: AttributeValue>(&self, descriptor: &AttributeDescriptor<T>) -> bool {
        self.attributes.contains_key(descriptor.name())
    }

    pub fn remove<T: AttributeValue>(&mut self, descriptor: &AttributeDescriptor<T>) -> Option<Attribute> {
        self.attributes.remove(descriptor.name())
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Inserts an attribute as is, replacing any attribute of the same name.
    pub fn put(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes.insert(attribute.name().to_owned(), attribute)
    }

    pub fn get_named(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn get_named_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    pub fn raw_value(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).and_then(Attribute::value)
    }

    pub fn contains_named(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove_named(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates attributes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Returns attribute names sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns attributes sorted by name.
    pub fn sorted(&self) -> BTreeMap<&str, &Attribute> {
        self.attributes
            .iter()
            .map(|(name, attribute)| (name.as_str(), attribute))
            .collect()
    }
}

impl Extend<Attribute> for AttributeMap {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        for attribute in iter {
            self.put(attribute);
        }
    }
}

impl FromIterator<Attribute> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        map.extend(iter);
        map
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}
