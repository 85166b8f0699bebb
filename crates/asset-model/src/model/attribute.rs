//! Attribute descriptors and attribute instances.
//!
//! An [`AttributeDescriptor`] is declared once per logical attribute and used
//! as the key and contract for every [`Attribute`] of that name. Descriptor
//! identity is the name: two independently built descriptors with the same
//! name address the same stored attribute.
//!
//! # Example
//!
//! ```rust
//! use asset_model::model::{AttributeDescriptor, value_types, meta_types};
//! use asset_model::units;
//!
//! let energy = AttributeDescriptor::builder("energyIn", &value_types::POSITIVE_NUMBER)
//!     .externally_sourced()
//!     .meta(&meta_types::UNIT_TYPE, units::ENERGY_KILOWATT_HOUR.to_string())
//!     .meta(&meta_types::READ_ONLY, true)
//!     .build()
//!     .unwrap();
//!
//! assert!(energy.is_read_only());
//! assert_eq!(energy.unit_type().as_deref(), Some(units::ENERGY_KILOWATT_HOUR));
//! ```

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::DescriptorError;
use crate::model::descriptor::ValueDescriptor;
use crate::model::meta::{meta_types, MetaDescriptor, MetaItem, MetaMap};
use crate::model::value::{AttributeValue, Value, ValueType};

/// Static declaration of one attribute: name, value type, default and metadata.
#[derive(Debug)]
pub struct AttributeDescriptor<T: 'static> {
    name: Cow<'static, str>,
    externally_sourced: bool,
    value_descriptor: &'static ValueDescriptor<T>,
    default_value: Option<T>,
    meta: MetaMap,
}

impl<T: AttributeValue> AttributeDescriptor<T> {
    /// Creates a descriptor.
    ///
    /// Fails if the name is empty, the default violates the value type, a meta
    /// item is malformed (see [`MetaItem::check`]) or two meta items share a
    /// name.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        externally_sourced: bool,
        value_descriptor: &'static ValueDescriptor<T>,
        default_value: Option<T>,
        meta_items: impl IntoIterator<Item = MetaItem>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        if let Some(reason) = default_value.as_ref().and_then(|v| value_descriptor.validate(v)) {
            return Err(DescriptorError::InvalidDefault {
                attribute: name.into_owned(),
                value_type: value_descriptor.name(),
                reason,
            });
        }

        let mut meta = MetaMap::new();
        for item in meta_items {
            if let Err(source) = item.check() {
                return Err(DescriptorError::InvalidMeta {
                    attribute: name.into_owned(),
                    source,
                });
            }
            if let Err(item) = meta.try_insert(item) {
                return Err(DescriptorError::DuplicateMetaItem {
                    attribute: name.into_owned(),
                    meta: item.name().to_owned(),
                });
            }
        }

        Ok(Self {
            name,
            externally_sourced,
            value_descriptor,
            default_value,
            meta,
        })
    }

    /// Starts a fluent declaration.
    pub fn builder(
        name: impl Into<Cow<'static, str>>,
        value_descriptor: &'static ValueDescriptor<T>,
    ) -> AttributeDescriptorBuilder<T> {
        AttributeDescriptorBuilder::new(name, value_descriptor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values normally arrive from a device or feed rather than a user.
    pub fn is_externally_sourced(&self) -> bool {
        self.externally_sourced
    }

    pub fn value_descriptor(&self) -> &'static ValueDescriptor<T> {
        self.value_descriptor
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }

    pub fn meta(&self) -> &MetaMap {
        &self.meta
    }

    pub fn meta_items(&self) -> impl Iterator<Item = &MetaItem> {
        self.meta.iter()
    }

    pub fn is_read_only(&self) -> bool {
        self.meta.get(&meta_types::READ_ONLY).unwrap_or(false)
    }

    pub fn unit_type(&self) -> Option<String> {
        self.meta.get(&meta_types::UNIT_TYPE)
    }
}

impl<T: 'static> PartialEq for AttributeDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: 'static> Eq for AttributeDescriptor<T> {}

impl<T: 'static> Hash for AttributeDescriptor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Fluent builder for [`AttributeDescriptor`].
///
/// The first meta item that fails validation is reported by `build`.
#[derive(Debug)]
pub struct AttributeDescriptorBuilder<T: 'static> {
    name: Cow<'static, str>,
    externally_sourced: bool,
    value_descriptor: &'static ValueDescriptor<T>,
    default_value: Option<T>,
    meta: Vec<MetaItem>,
    error: Option<DescriptorError>,
}

impl<T: AttributeValue> AttributeDescriptorBuilder<T> {
    fn new(name: impl Into<Cow<'static, str>>, value_descriptor: &'static ValueDescriptor<T>) -> Self {
        Self {
            name: name.into(),
            externally_sourced: false,
            value_descriptor,
            default_value: None,
            meta: Vec::new(),
            error: None,
        }
    }

    pub fn externally_sourced(mut self) -> Self {
        self.externally_sourced = true;
        self
    }

    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Attaches a typed meta item.
    pub fn meta<M: AttributeValue>(mut self, descriptor: &MetaDescriptor<M>, value: M) -> Self {
        let item = MetaItem::new(descriptor, value);
        self.push_meta(item);
        self
    }

    /// Attaches a meta item holding the meta descriptor's default.
    pub fn meta_default<M: AttributeValue>(mut self, descriptor: &MetaDescriptor<M>) -> Self {
        let item = MetaItem::with_default(descriptor);
        self.push_meta(item);
        self
    }

    pub fn meta_item(mut self, item: MetaItem) -> Self {
        self.meta.push(item);
        self
    }

    fn push_meta(&mut self, item: Result<MetaItem, crate::error::MetaError>) {
        match item {
            Ok(item) => self.meta.push(item),
            Err(source) => {
                if self.error.is_none() {
                    self.error = Some(DescriptorError::InvalidMeta {
                        attribute: self.name.to_string(),
                        source,
                    });
                }
            }
        }
    }

    pub fn build(self) -> Result<AttributeDescriptor<T>, DescriptorError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        AttributeDescriptor::new(
            self.name,
            self.externally_sourced,
            self.value_descriptor,
            self.default_value,
            self.meta,
        )
    }

    /// Builds a descriptor for a static declaration.
    ///
    /// # Panics
    ///
    /// Panics if the declaration is malformed.
    pub fn declare(self) -> AttributeDescriptor<T> {
        match self.build() {
            Ok(descriptor) => descriptor,
            Err(err) => panic!("invalid attribute declaration: {err}"),
        }
    }
}

/// Type-erased view of an [`AttributeDescriptor`].
///
/// Lets vocabularies of differently typed descriptors be listed and checked
/// together.
pub trait DescribeAttribute: Sync {
    fn name(&self) -> &str;

    fn value_type(&self) -> ValueType;

    /// Name of the value descriptor, e.g. `"positiveNumber"`.
    fn value_type_name(&self) -> &'static str;

    fn is_externally_sourced(&self) -> bool;

    fn meta(&self) -> &MetaMap;

    /// Checks a raw value. Returns the violation, or `None` if it conforms.
    fn check(&self, raw: &Value) -> Option<&'static str>;
}

impl<T: AttributeValue + Sync> DescribeAttribute for AttributeDescriptor<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    fn value_type_name(&self) -> &'static str {
        self.value_descriptor.name()
    }

    fn is_externally_sourced(&self) -> bool {
        self.externally_sourced
    }

    fn meta(&self) -> &MetaMap {
        &self.meta
    }

    fn check(&self, raw: &Value) -> Option<&'static str> {
        self.value_descriptor.check(raw)
    }
}

/// A live attribute of one asset: name, current value and metadata.
///
/// Storage never refuses a value; validation happens before a value is
/// written through [`crate::model::AttributeMap::set_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(skip)]
    name: String,
    value: Option<Value>,
    #[serde(skip_serializing_if = "MetaMap::is_empty")]
    meta: MetaMap,
}

impl Attribute {
    /// Creates an empty attribute with no value and no metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            meta: MetaMap::new(),
        }
    }

    /// Creates an attribute holding the descriptor's default and metadata.
    pub fn from_descriptor<T: AttributeValue>(descriptor: &AttributeDescriptor<T>) -> Self {
        Self {
            name: descriptor.name().to_owned(),
            value: descriptor.default_value().map(T::to_value),
            meta: descriptor.meta().clone(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_meta(mut self, item: MetaItem) -> Self {
        self.meta.insert(item);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Reads the value as `T`, checked against the descriptor's value type.
    pub fn value_as<T: AttributeValue>(&self, descriptor: &AttributeDescriptor<T>) -> Option<T> {
        let raw = self.value.as_ref()?;
        descriptor.value_descriptor().coerce(raw).ok()
    }

    /// Stores a typed value without validation.
    pub fn set_value<T: AttributeValue>(&mut self, value: T) {
        self.value = Some(value.to_value());
    }

    pub fn set_raw_value(&mut self, value: Option<Value>) {
        self.value = value;
    }

    pub fn clear_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    pub fn meta(&self) -> &MetaMap {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaMap {
        &mut self.meta
    }

    pub fn meta_value<M: AttributeValue>(&self, descriptor: &MetaDescriptor<M>) -> Option<M> {
        self.meta.get(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetaError;
    use crate::model::descriptor::value_types::{BOOLEAN, NON_EMPTY_TEXT, PERCENTAGE_INTEGER_0_100};
    use crate::model::meta::meta_types::{LABEL, READ_ONLY, UNIT_TYPE};

    #[test]
    fn test_empty_name_is_rejected() {
        let result = AttributeDescriptor::<bool>::new("", false, &BOOLEAN, None, Vec::new());
        assert_eq!(result.unwrap_err(), DescriptorError::EmptyName);

        let result = AttributeDescriptor::builder("  ", &BOOLEAN).build();
        assert_eq!(result.unwrap_err(), DescriptorError::EmptyName);
    }

    #[test]
    fn test_duplicate_meta_is_rejected() {
        let result = AttributeDescriptor::builder("onOff", &BOOLEAN)
            .meta(&READ_ONLY, true)
            .meta(&READ_ONLY, false)
            .build();
        assert!(matches!(
            result,
            Err(DescriptorError::DuplicateMetaItem { ref meta, .. }) if meta == "readOnly"
        ));
    }

    #[test]
    fn test_invalid_meta_is_rejected() {
        let result = AttributeDescriptor::builder("status", &NON_EMPTY_TEXT)
            .meta(&LABEL, String::new())
            .build();
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidMeta {
                source: MetaError::InvalidMetaValue { meta: "label", .. },
                ..
            })
        ));

        let result = AttributeDescriptor::builder("status", &NON_EMPTY_TEXT)
            .meta_default(&UNIT_TYPE)
            .build();
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidMeta {
                source: MetaError::NoDefault { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_raw_meta_items_are_checked() {
        let result = AttributeDescriptor::builder("onOff", &BOOLEAN)
            .meta_item(MetaItem::raw("readOnly", Value::from("yes")))
            .build();
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidMeta {
                source: MetaError::InvalidMetaValue { meta: "readOnly", .. },
                ..
            })
        ));

        let result = AttributeDescriptor::builder("onOff", &BOOLEAN)
            .meta_item(MetaItem::raw("", Value::Integer(1)))
            .build();
        assert!(matches!(
            result,
            Err(DescriptorError::InvalidMeta { source: MetaError::EmptyName, .. })
        ));

        let d = AttributeDescriptor::builder("onOff", &BOOLEAN)
            .meta_item(MetaItem::raw("readOnly", Value::Bool(true)))
            .meta_item(MetaItem::raw("vendorHint", Value::from("relay")))
            .declare();
        assert!(d.is_read_only());
        assert_eq!(d.meta_items().count(), 2);
    }

    #[test]
    fn test_invalid_default_is_rejected() {
        let result = AttributeDescriptor::builder("brightness", &PERCENTAGE_INTEGER_0_100)
            .default_value(150)
            .build();
        assert!(matches!(result, Err(DescriptorError::InvalidDefault { .. })));
    }

    #[test]
    #[should_panic(expected = "invalid attribute declaration")]
    fn test_declare_panics_on_malformed_declaration() {
        AttributeDescriptor::builder("", &BOOLEAN).declare();
    }

    #[test]
    fn test_equality_is_by_name() {
        let a = AttributeDescriptor::builder("onOff", &BOOLEAN).declare();
        let b = AttributeDescriptor::builder(String::from("onOff"), &BOOLEAN)
            .meta(&READ_ONLY, true)
            .declare();
        let c = AttributeDescriptor::builder("enabled", &BOOLEAN).declare();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_read_only_and_unit() {
        let d = AttributeDescriptor::builder("onOff", &BOOLEAN)
            .meta(&UNIT_TYPE, "ON_OFF".to_string())
            .meta_default(&READ_ONLY)
            .declare();
        assert!(!d.is_read_only());
        assert_eq!(d.unit_type().as_deref(), Some("ON_OFF"));
        assert_eq!(d.meta_items().count(), 2);
    }

    #[test]
    fn test_attribute_from_descriptor_copies_default_and_meta() {
        let d = AttributeDescriptor::builder("brightness", &PERCENTAGE_INTEGER_0_100)
            .default_value(50)
            .meta(&READ_ONLY, true)
            .declare();
        let attr = Attribute::from_descriptor(&d);
        assert_eq!(attr.name(), "brightness");
        assert_eq!(attr.value_as(&d), Some(50));
        assert_eq!(attr.meta_value(&READ_ONLY), Some(true));
    }

    #[test]
    fn test_attribute_value_as_checks_constraint() {
        let d = AttributeDescriptor::builder("brightness", &PERCENTAGE_INTEGER_0_100).declare();
        let attr = Attribute::new("brightness").with_value(Value::Integer(150));
        assert_eq!(attr.value_as(&d), None);
        assert!(attr.has_value());
    }

    #[test]
    fn test_erased_descriptor() {
        let d = AttributeDescriptor::builder("brightness", &PERCENTAGE_INTEGER_0_100)
            .externally_sourced()
            .declare();
        let erased: &dyn DescribeAttribute = &d;
        assert_eq!(erased.name(), "brightness");
        assert_eq!(erased.value_type(), ValueType::Integer);
        assert_eq!(erased.value_type_name(), "percentageInteger0100");
        assert!(erased.is_externally_sourced());
        assert_eq!(erased.check(&Value::Integer(101)), Some("integer out of range"));
    }
}
