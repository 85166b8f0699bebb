//! Electricity storage: batteries and similar devices.
//!
//! Nearly every attribute is fed by an external system. Only the power
//! setpoint gets a typed setter; feeds write through
//! [`AttributeMap::set_value`] with the descriptors below.

use lazy_static::lazy_static;

use crate::asset::device::{self, DeviceAttributes};
use crate::asset::{Asset, AssetDescriptor, AssetKind, HasAttributes};
use crate::error::ValidationError;
use crate::model::{
    meta_types, value_types, AttributeDescriptor, AttributeDescriptorBuilder, AttributeMap,
    AttributeValue, DescribeAttribute, ValueDescriptor,
};
use crate::units;

pub static ELECTRICITY_STORAGE: AssetDescriptor =
    AssetDescriptor::new("Electricity storage", "battery-charging", Some("1B7C89"));

fn sourced<T: AttributeValue>(
    name: &'static str,
    value_descriptor: &'static ValueDescriptor<T>,
) -> AttributeDescriptorBuilder<T> {
    AttributeDescriptor::builder(name, value_descriptor).externally_sourced()
}

fn in_unit<T: AttributeValue>(builder: AttributeDescriptorBuilder<T>, unit: &str) -> AttributeDescriptorBuilder<T> {
    builder.meta(&meta_types::UNIT_TYPE, unit.to_string())
}

fn read_only<T: AttributeValue>(builder: AttributeDescriptorBuilder<T>) -> AttributeDescriptorBuilder<T> {
    builder.meta(&meta_types::READ_ONLY, true)
}

lazy_static! {
    pub static ref STATUS: AttributeDescriptor<String> =
        read_only(sourced("status", &value_types::TEXT)).declare();
    pub static ref LEVELISED_COST_OF_STORAGE: AttributeDescriptor<f64> = in_unit(
        sourced("levelisedCostOfStorage", &value_types::POSITIVE_NUMBER),
        units::CURRENCY_EUR
    )
    .declare();
    pub static ref ENERGY_CAPACITY: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("energyCapacity", &value_types::POSITIVE_NUMBER),
        units::ENERGY_KILOWATT_HOUR
    ))
    .declare();
    pub static ref ENERGY_IN_PERCENTAGE: AttributeDescriptor<i32> =
        sourced("energyInPercentage", &value_types::PERCENTAGE_INTEGER_0_100).declare();
    pub static ref ENERGY_IN: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("energyIn", &value_types::POSITIVE_NUMBER),
        units::ENERGY_KILOWATT_HOUR
    ))
    .declare();
    pub static ref ENERGY_CAPACITY_REMAINING: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("energyCapacityRemaining", &value_types::POSITIVE_NUMBER),
        units::ENERGY_KILOWATT_HOUR
    ))
    .declare();
    pub static ref ENERGY_IN_TOTAL: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("energyInTotal", &value_types::POSITIVE_NUMBER),
        units::ENERGY_KILOWATT_HOUR
    ))
    .declare();
    pub static ref ENERGY_OUT_TOTAL: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("energyOutTotal", &value_types::POSITIVE_NUMBER),
        units::ENERGY_KILOWATT_HOUR
    ))
    .declare();
    pub static ref POWER_CAPACITY_IN: AttributeDescriptor<f64> = in_unit(
        sourced("powerCapacityIn", &value_types::POSITIVE_NUMBER),
        units::POWER_KILOWATT
    )
    .declare();
    pub static ref POWER_CAPACITY_OUT: AttributeDescriptor<f64> = in_unit(
        sourced("powerCapacityOut", &value_types::POSITIVE_NUMBER),
        units::POWER_KILOWATT
    )
    .declare();
    pub static ref POWER_TOTAL: AttributeDescriptor<f64> = read_only(in_unit(
        sourced("powerTotal", &value_types::POSITIVE_NUMBER),
        units::POWER_KILOWATT
    ))
    .declare();
    pub static ref POWER_SETPOINT: AttributeDescriptor<f64> = in_unit(
        sourced("powerSetpoint", &value_types::POSITIVE_NUMBER),
        units::POWER_KILOWATT
    )
    .declare();
    pub static ref CHARGE_CYCLES: AttributeDescriptor<i32> =
        read_only(sourced("chargeCycles", &value_types::POSITIVE_INTEGER)).declare();
    pub static ref FINANCIAL_WALLET: AttributeDescriptor<f64> = in_unit(
        sourced("financialWallet", &value_types::POSITIVE_NUMBER),
        units::CURRENCY_EUR
    )
    .declare();
    pub static ref CARBON_WALLET: AttributeDescriptor<i32> = read_only(in_unit(
        sourced("carbonWallet", &value_types::POSITIVE_INTEGER),
        units::MASS_KILOGRAM
    ))
    .declare();
}

/// Typed façade over an electricity storage asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricityStorage {
    asset: Asset,
}

impl ElectricityStorage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            asset: Asset::new(name, &ELECTRICITY_STORAGE),
        }
    }

    pub fn status(&self) -> Option<String> {
        self.attributes().value(&*STATUS)
    }

    /// Cost per kWh stored over the lifetime of the device, in EUR.
    pub fn levelised_cost_of_storage(&self) -> Option<f64> {
        self.attributes().value(&*LEVELISED_COST_OF_STORAGE)
    }

    pub fn energy_capacity(&self) -> Option<f64> {
        self.attributes().value(&*ENERGY_CAPACITY)
    }

    pub fn energy_in_percentage(&self) -> Option<i32> {
        self.attributes().value(&*ENERGY_IN_PERCENTAGE)
    }

    pub fn energy_in(&self) -> Option<f64> {
        self.attributes().value(&*ENERGY_IN)
    }

    pub fn energy_capacity_remaining(&self) -> Option<f64> {
        self.attributes().value(&*ENERGY_CAPACITY_REMAINING)
    }

    pub fn energy_in_total(&self) -> Option<f64> {
        self.attributes().value(&*ENERGY_IN_TOTAL)
    }

    pub fn energy_out_total(&self) -> Option<f64> {
        self.attributes().value(&*ENERGY_OUT_TOTAL)
    }

    pub fn power_capacity_in(&self) -> Option<f64> {
        self.attributes().value(&*POWER_CAPACITY_IN)
    }

    pub fn power_capacity_out(&self) -> Option<f64> {
        self.attributes().value(&*POWER_CAPACITY_OUT)
    }

    pub fn power_total(&self) -> Option<f64> {
        self.attributes().value(&*POWER_TOTAL)
    }

    pub fn power_setpoint(&self) -> Option<f64> {
        self.attributes().value(&*POWER_SETPOINT)
    }

    pub fn set_power_setpoint(&mut self, kilowatts: f64) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*POWER_SETPOINT, kilowatts)
    }

    pub fn charge_cycles(&self) -> Option<i32> {
        self.attributes().value(&*CHARGE_CYCLES)
    }

    pub fn financial_wallet(&self) -> Option<f64> {
        self.attributes().value(&*FINANCIAL_WALLET)
    }

    /// Carbon saved, in kg.
    pub fn carbon_wallet(&self) -> Option<i32> {
        self.attributes().value(&*CARBON_WALLET)
    }
}

impl HasAttributes for ElectricityStorage {
    fn attributes(&self) -> &AttributeMap {
        self.asset.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        self.asset.attributes_mut()
    }
}

impl DeviceAttributes for ElectricityStorage {}

impl AssetKind for ElectricityStorage {
    fn descriptor() -> &'static AssetDescriptor {
        &ELECTRICITY_STORAGE
    }

    fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
        let mut vocabulary = device::vocabulary();
        vocabulary.extend([
            &*STATUS as &dyn DescribeAttribute,
            &*LEVELISED_COST_OF_STORAGE,
            &*ENERGY_CAPACITY,
            &*ENERGY_IN_PERCENTAGE,
            &*ENERGY_IN,
            &*ENERGY_CAPACITY_REMAINING,
            &*ENERGY_IN_TOTAL,
            &*ENERGY_OUT_TOTAL,
            &*POWER_CAPACITY_IN,
            &*POWER_CAPACITY_OUT,
            &*POWER_TOTAL,
            &*POWER_SETPOINT,
            &*CHARGE_CYCLES,
            &*FINANCIAL_WALLET,
            &*CARBON_WALLET,
        ]);
        vocabulary
    }

    fn from_asset(asset: Asset) -> Result<Self, Asset> {
        if asset.is_kind(&ELECTRICITY_STORAGE) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_are_absent() {
        let battery = ElectricityStorage::new("battery-1");
        assert_eq!(battery.charge_cycles(), None);
        assert_eq!(battery.energy_capacity(), None);
        assert_eq!(battery.status(), None);
        assert!(battery.attributes().is_empty());
    }

    #[test]
    fn test_feed_writes_through_map() {
        let mut battery = ElectricityStorage::new("battery-1");
        let feed = battery.attributes_mut();
        feed.set_value(&*ENERGY_CAPACITY, 13.5).unwrap();
        feed.set_value(&*ENERGY_IN_PERCENTAGE, 64).unwrap();
        feed.set_value(&*CHARGE_CYCLES, 212).unwrap();
        assert!(feed.set_value(&*ENERGY_IN, -1.0).is_err());

        assert_eq!(battery.energy_capacity(), Some(13.5));
        assert_eq!(battery.energy_in_percentage(), Some(64));
        assert_eq!(battery.charge_cycles(), Some(212));
        assert_eq!(battery.energy_in(), None);
    }

    #[test]
    fn test_power_setpoint() {
        let mut battery = ElectricityStorage::new("battery-1");
        battery.set_power_setpoint(4.2).unwrap();
        assert!(battery.set_power_setpoint(f64::NAN).is_err());
        assert_eq!(battery.power_setpoint(), Some(4.2));
    }

    #[test]
    fn test_power_setpoint_rejects_infinity() {
        let mut battery = ElectricityStorage::new("battery-1");
        assert!(battery.set_power_setpoint(f64::INFINITY).is_err());
        assert_eq!(battery.power_setpoint(), None);
        assert!(!battery.attributes().contains_named("powerSetpoint"));

        battery.set_power_setpoint(2.0).unwrap();
        assert!(battery.set_power_setpoint(f64::INFINITY).is_err());
        assert_eq!(battery.power_setpoint(), Some(2.0));
    }

    #[test]
    fn test_units_and_read_only_flags() {
        assert!(ENERGY_CAPACITY.is_read_only());
        assert_eq!(ENERGY_CAPACITY.unit_type().as_deref(), Some(units::ENERGY_KILOWATT_HOUR));
        assert!(!POWER_SETPOINT.is_read_only());
        assert_eq!(POWER_SETPOINT.unit_type().as_deref(), Some(units::POWER_KILOWATT));
        assert_eq!(CARBON_WALLET.unit_type().as_deref(), Some(units::MASS_KILOGRAM));
        assert!(CHARGE_CYCLES.is_read_only());
        assert_eq!(CHARGE_CYCLES.unit_type(), None);
        assert_eq!(ENERGY_IN_PERCENTAGE.meta().len(), 0);
    }

    #[test]
    fn test_vocabulary_is_complete_and_consistent() {
        assert_eq!(ElectricityStorage::vocabulary().len(), 4 + 15);
        assert!(ElectricityStorage::vocabulary()
            .iter()
            .all(|descriptor| descriptor.is_externally_sourced()
                || ["notes", "tags", "manufacturer", "model"].contains(&descriptor.name())));
        assert!(ElectricityStorage::schema().is_ok());
    }
}
