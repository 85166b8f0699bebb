//! Lights: switchable, dimmable devices.

use lazy_static::lazy_static;

use crate::asset::device::{self, DeviceAttributes};
use crate::asset::{Asset, AssetDescriptor, AssetKind, HasAttributes};
use crate::error::ValidationError;
use crate::model::{meta_types, value_types, AttributeDescriptor, AttributeMap, DescribeAttribute};
use crate::units;

pub static LIGHT: AssetDescriptor = AssetDescriptor::new("Light", "lightbulb", Some("e6688a"));

lazy_static! {
    pub static ref ON_OFF: AttributeDescriptor<bool> =
        AttributeDescriptor::builder("onOff", &value_types::BOOLEAN)
            .meta(&meta_types::UNIT_TYPE, units::ON_OFF.to_string())
            .declare();
    pub static ref BRIGHTNESS: AttributeDescriptor<i32> =
        AttributeDescriptor::builder("brightness", &value_types::PERCENTAGE_INTEGER_0_100)
            .externally_sourced()
            .meta(&meta_types::UNIT_TYPE, units::PERCENTAGE.to_string())
            .declare();
    pub static ref COLOUR_TEMPERATURE: AttributeDescriptor<i32> =
        AttributeDescriptor::builder("colourTemperature", &value_types::POSITIVE_INTEGER)
            .meta(&meta_types::UNIT_TYPE, units::TEMPERATURE_KELVIN.to_string())
            .declare();
}

/// Typed façade over a light asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    asset: Asset,
}

impl Light {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            asset: Asset::new(name, &LIGHT),
        }
    }

    pub fn on_off(&self) -> Option<bool> {
        self.attributes().value(&*ON_OFF)
    }

    pub fn set_on_off(&mut self, on: bool) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*ON_OFF, on)
    }

    /// Brightness in percent.
    pub fn brightness(&self) -> Option<i32> {
        self.attributes().value(&*BRIGHTNESS)
    }

    pub fn set_brightness(&mut self, brightness: i32) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*BRIGHTNESS, brightness)
    }

    /// Colour temperature in kelvin.
    pub fn colour_temperature(&self) -> Option<i32> {
        self.attributes().value(&*COLOUR_TEMPERATURE)
    }

    pub fn set_colour_temperature(&mut self, kelvin: i32) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*COLOUR_TEMPERATURE, kelvin)
    }
}

impl HasAttributes for Light {
    fn attributes(&self) -> &AttributeMap {
        self.asset.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        self.asset.attributes_mut()
    }
}

impl DeviceAttributes for Light {}

impl AssetKind for Light {
    fn descriptor() -> &'static AssetDescriptor {
        &LIGHT
    }

    fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
        let mut vocabulary = device::vocabulary();
        vocabulary.extend([
            &*ON_OFF as &dyn DescribeAttribute,
            &*BRIGHTNESS,
            &*COLOUR_TEMPERATURE,
        ]);
        vocabulary
    }

    fn from_asset(asset: Asset) -> Result<Self, Asset> {
        if asset.is_kind(&LIGHT) {
            Ok(Self { asset })
        } else {
            Err(asset)
        }
    }

    fn asset(&self) -> &Asset {
        &self.asset
    }

    fn into_asset(self) -> Asset {
        self.asset
    }
}
