//! Schema-level validation of stored attributes.
//!
//! Writes through typed descriptors are validated at the boundary. Values
//! that entered a map some other way (decoded payloads, raw `put`) are only
//! checked when a caller asks for it here.
//!
//! **Note:** Checks are per attribute. Unknown names are allowed, and rules
//! spanning several attributes of one asset are not expressed.

use rustc_hash::FxHashMap;

use crate::asset::{AssetKind, HasAttributes};
use crate::error::ValidationError;
use crate::model::{AttributeMap, DescribeAttribute};

/// Registry of attribute descriptors for one vocabulary, keyed by name.
#[derive(Default)]
pub struct AttributeSchema {
    descriptors: FxHashMap<String, &'static dyn DescribeAttribute>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from a vocabulary, failing on the first name declared
    /// with two value types.
    pub fn from_vocabulary(
        vocabulary: impl IntoIterator<Item = &'static dyn DescribeAttribute>,
    ) -> Result<Self, ValidationError> {
        let mut schema = Self::new();
        for descriptor in vocabulary {
            schema.register(descriptor)?;
        }
        Ok(schema)
    }

    /// Registers a descriptor.
    ///
    /// Re-registering a name with the same value type replaces the previous
    /// entry; a different value type is rejected.
    pub fn register(&mut self, descriptor: &'static dyn DescribeAttribute) -> Result<(), ValidationError> {
        if let Some(registered) = self.descriptors.get(descriptor.name()) {
            if registered.value_type() != descriptor.value_type() {
                return Err(ValidationError::DataTypeInconsistent {
                    attribute: descriptor.name().to_owned(),
                    registered: registered.value_type(),
                    declared: descriptor.value_type(),
                });
            }
        }
        self.descriptors.insert(descriptor.name().to_owned(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&'static dyn DescribeAttribute> {
        self.descriptors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl std::fmt::Debug for AttributeSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AttributeSchema").field("descriptors", &names).finish()
    }
}

/// Validates stored values against a schema.
///
/// Attributes without a value and attributes not in the schema are skipped.
/// Attributes are visited in name order, so the reported error is stable.
pub fn validate_attributes(attributes: &AttributeMap, schema: &AttributeSchema) -> Result<(), ValidationError> {
    for (name, attribute) in attributes.sorted() {
        let (Some(descriptor), Some(value)) = (schema.get(name), attribute.value()) else {
            continue;
        };
        if let Some(reason) = descriptor.check(value) {
            return Err(ValidationError::TypeMismatch {
                attribute: name.to_owned(),
                expected: descriptor.value_type_name(),
                reason,
            });
        }
    }
    Ok(())
}

/// Validates the attributes of a façade against its kind's vocabulary.
pub fn validate_asset<K: AssetKind>(asset: &K) -> Result<(), ValidationError> {
    let schema = K::schema()?;
    validate_attributes(asset.attributes(), &schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::light::{self, Light};
    use crate::asset::storage::ElectricityStorage;
    use crate::model::{value_types, Attribute, AttributeDescriptor, Value};

    fn leak<T: crate::model::AttributeValue + Sync + Send>(
        descriptor: AttributeDescriptor<T>,
    ) -> &'static dyn DescribeAttribute {
        Box::leak(Box::new(descriptor))
    }

    #[test]
    fn test_register_rejects_inconsistent_type() {
        let mut schema = AttributeSchema::new();
        schema
            .register(leak(AttributeDescriptor::builder("level", &value_types::PERCENTAGE_INTEGER_0_100).declare()))
            .unwrap();
        // Same storage type, different constraint: allowed.
        schema
            .register(leak(AttributeDescriptor::builder("level", &value_types::POSITIVE_INTEGER).declare()))
            .unwrap();

        let err = schema
            .register(leak(AttributeDescriptor::builder("level", &value_types::TEXT).declare()))
            .unwrap_err();
        assert!(matches!(err, ValidationError::DataTypeInconsistent { ref attribute, .. } if attribute == "level"));
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_validate_type_mismatch() {
        let schema = Light::schema().unwrap();
        let mut attributes = AttributeMap::new();
        attributes.put(Attribute::new("brightness").with_value(250));

        let err = validate_attributes(&attributes, &schema).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                attribute: "brightness".to_string(),
                expected: "percentageInteger0100",
                reason: "integer out of range",
            }
        );
    }

    #[test]
    fn test_unknown_and_empty_attributes_are_allowed() {
        let schema = Light::schema().unwrap();
        let mut attributes = AttributeMap::new();
        attributes.put(Attribute::new("firmware").with_value(Value::from(3)));
        attributes.put(Attribute::new("brightness"));
        attributes.put(Attribute::new("onOff").with_value(true));
        assert!(validate_attributes(&attributes, &schema).is_ok());
    }

    #[test]
    fn test_validate_asset_reports_first_by_name() {
        let mut battery = ElectricityStorage::new("battery-1");
        battery
            .attributes_mut()
            .put(Attribute::new("energyIn").with_value("lots"));
        battery
            .attributes_mut()
            .put(Attribute::new("chargeCycles").with_value(Value::Number(12.5)));

        let err = validate_asset(&battery).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { ref attribute, .. } if attribute == "chargeCycles"));
    }

    #[test]
    fn test_schema_lookup() {
        let schema = Light::schema().unwrap();
        assert!(schema.contains("onOff"));
        assert_eq!(schema.get("brightness").map(|d| d.name()), Some(light::BRIGHTNESS.name()));
        assert!(schema.get("energyIn").is_none());
    }
}
