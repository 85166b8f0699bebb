//! Vocabulary shared by device kinds.

use lazy_static::lazy_static;

use crate::asset::HasAttributes;
use crate::error::ValidationError;
use crate::model::{value_types, AttributeDescriptor, DescribeAttribute};

lazy_static! {
    pub static ref MANUFACTURER: AttributeDescriptor<String> =
        AttributeDescriptor::builder("manufacturer", &value_types::TEXT).declare();
    pub static ref MODEL: AttributeDescriptor<String> =
        AttributeDescriptor::builder("model", &value_types::TEXT).declare();
}

/// Descriptors of every device, including those inherited from assets.
pub fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
    let mut vocabulary = crate::asset::vocabulary();
    vocabulary.extend([&*MANUFACTURER as &dyn DescribeAttribute, &*MODEL]);
    vocabulary
}

/// Implemented by façades of device kinds.
pub trait DeviceAttributes: HasAttributes {
    fn manufacturer(&self) -> Option<String> {
        self.attributes().value(&*MANUFACTURER)
    }

    fn set_manufacturer(&mut self, manufacturer: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*MANUFACTURER, manufacturer.into())
    }

    fn model(&self) -> Option<String> {
        self.attributes().value(&*MODEL)
    }

    fn set_model(&mut self, model: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*MODEL, model.into())
    }
}
