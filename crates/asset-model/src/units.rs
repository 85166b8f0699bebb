//! Unit identifiers carried in `unitType` metadata.

pub const ON_OFF: &str = "ON_OFF";
pub const PERCENTAGE: &str = "PERCENTAGE";
pub const TEMPERATURE_KELVIN: &str = "TEMPERATURE_KELVIN";
pub const ENERGY_KILOWATT_HOUR: &str = "ENERGY_KILOWATT_HOUR";
pub const POWER_KILOWATT: &str = "POWER_KILOWATT";
pub const CURRENCY_EUR: &str = "CURRENCY_EUR";
pub const MASS_KILOGRAM: &str = "MASS_KILOGRAM";
