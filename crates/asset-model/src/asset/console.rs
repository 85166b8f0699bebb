//! Consoles: client applications registered as assets.
//!
//! A console carries its name, version and platform plus a map of named
//! providers (push notifications, geofencing, ...) it supports.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::asset::{Asset, AssetDescriptor, AssetKind, HasAttributes};
use crate::error::ValidationError;
use crate::model::{
    value_types, AttributeDescriptor, AttributeMap, AttributeValue, Constraint, DescribeAttribute,
    Value, ValueDescriptor, ValueType,
};

pub static CONSOLE: AssetDescriptor = AssetDescriptor::new("Console", "monitor-cellphone", None);

/// Configuration of one console provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleProvider {
    pub version: String,
    pub requires_permission: bool,
    pub has_permission: bool,
    pub success: bool,
    pub enabled: bool,
    pub disabled: bool,
    pub data: Option<BTreeMap<String, Value>>,
}

impl ConsoleProvider {
    /// Creates an enabled provider of the given version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            enabled: true,
            ..Self::default()
        }
    }
}

impl AttributeValue for ConsoleProvider {
    const VALUE_TYPE: ValueType = ValueType::Object;

    fn to_value(&self) -> Value {
        let mut fields = BTreeMap::new();
        fields.insert("version".to_string(), Value::from(self.version.as_str()));
        fields.insert("requiresPermission".to_string(), Value::Bool(self.requires_permission));
        fields.insert("hasPermission".to_string(), Value::Bool(self.has_permission));
        fields.insert("success".to_string(), Value::Bool(self.success));
        fields.insert("enabled".to_string(), Value::Bool(self.enabled));
        fields.insert("disabled".to_string(), Value::Bool(self.disabled));
        if let Some(data) = &self.data {
            fields.insert("data".to_string(), Value::Object(data.clone()));
        }
        Value::Object(fields)
    }

    /// Flags default to `false` when missing; `version` is required.
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let flag = |name: &str| match fields.get(name) {
            None => Some(false),
            Some(v) => v.as_bool(),
        };
        let data = match fields.get("data") {
            None => None,
            Some(Value::Object(data)) => Some(data.clone()),
            Some(_) => return None,
        };
        Some(Self {
            version: fields.get("version")?.as_str()?.to_owned(),
            requires_permission: flag("requiresPermission")?,
            has_permission: flag("hasPermission")?,
            success: flag("success")?,
            enabled: flag("enabled")?,
            disabled: flag("disabled")?,
            data,
        })
    }
}

/// Providers of a console keyed by provider name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleProviders(BTreeMap<String, ConsoleProvider>);

impl ConsoleProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a provider, returning the one it replaces.
    pub fn insert(&mut self, name: impl Into<String>, provider: ConsoleProvider) -> Option<ConsoleProvider> {
        self.0.insert(name.into(), provider)
    }

    pub fn get(&self, name: &str) -> Option<&ConsoleProvider> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ConsoleProvider> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConsoleProvider)> {
        self.0.iter().map(|(name, provider)| (name.as_str(), provider))
    }
}

impl FromIterator<(String, ConsoleProvider)> for ConsoleProviders {
    fn from_iter<I: IntoIterator<Item = (String, ConsoleProvider)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AttributeValue for ConsoleProviders {
    const VALUE_TYPE: ValueType = ValueType::Object;

    fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, provider)| (name.clone(), provider.to_value()))
                .collect(),
        )
    }

    /// Every entry must be a well-formed provider.
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(name, entry)| ConsoleProvider::from_value(entry).map(|p| (name.clone(), p)))
            .collect()
    }
}

/// Structural check of one providers map entry.
fn check_provider(entry: &Value) -> Option<&'static str> {
    match ConsoleProvider::from_value(entry) {
        None => Some("malformed console provider"),
        Some(provider) if provider.version.trim().is_empty() => {
            Some("console provider version must not be empty")
        }
        Some(_) => None,
    }
}

pub static CONSOLE_PROVIDERS_TYPE: ValueDescriptor<ConsoleProviders> = ValueDescriptor::new(
    "consoleProviders",
    Constraint::Entries {
        description: "map of console providers",
        check: check_provider,
    },
);

lazy_static! {
    pub static ref CONSOLE_NAME: AttributeDescriptor<String> =
        AttributeDescriptor::builder("consoleName", &value_types::NON_EMPTY_TEXT).declare();
    pub static ref CONSOLE_VERSION: AttributeDescriptor<String> =
        AttributeDescriptor::builder("consoleVersion", &value_types::NON_EMPTY_TEXT).declare();
    pub static ref CONSOLE_PLATFORM: AttributeDescriptor<String> =
        AttributeDescriptor::builder("consolePlatform", &value_types::NON_EMPTY_TEXT).declare();
    pub static ref CONSOLE_PROVIDERS: AttributeDescriptor<ConsoleProviders> =
        AttributeDescriptor::builder("consoleProviders", &CONSOLE_PROVIDERS_TYPE).declare();
}

/// Typed façade over a console asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Console {
    asset: Asset,
}

impl Console {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            asset: Asset::new(name, &CONSOLE),
        }
    }

    pub fn console_name(&self) -> Option<String> {
        self.attributes().value_or_default(&*CONSOLE_NAME)
    }

    pub fn set_console_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*CONSOLE_NAME, name.into())
    }

    pub fn console_version(&self) -> Option<String> {
        self.attributes().value_or_default(&*CONSOLE_VERSION)
    }

    pub fn set_console_version(&mut self, version: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*CONSOLE_VERSION, version.into())
    }

    pub fn console_platform(&self) -> Option<String> {
        self.attributes().value_or_default(&*CONSOLE_PLATFORM)
    }

    pub fn set_console_platform(&mut self, platform: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*CONSOLE_PLATFORM, platform.into())
    }

    pub fn console_providers(&self) -> Option<ConsoleProviders> {
        self.attributes().value_or_default(&*CONSOLE_PROVIDERS)
    }

    /// Replaces the whole providers map.
    pub fn set_console_providers(&mut self, providers: ConsoleProviders) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*CONSOLE_PROVIDERS, providers)
    }

    /// Adds or replaces one provider, keeping the others.
    pub fn set_console_provider(
        &mut self,
        name: impl Into<String>,
        provider: ConsoleProvider,
    ) -> Result<(), ValidationError> {
        let mut providers = self.console_providers().unwrap_or_default();
        providers.insert(name, provider);
        self.set_console_providers(providers)
    }
}

impl HasAttributes for Console {
    fn attributes(&self) -> &AttributeMap {
        self.asset.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        self.asset.attributes_mut()
    }
}

impl AssetKind for Console {
    fn descriptor() -> &'static AssetDescriptor {
        &CONSOLE
    }

    fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
        let mut vocabulary = crate::asset::vocabulary();
        vocabulary.extend([
            &*CONSOLE_NAME as &dyn DescribeAttribute,
            &*CONSOLE_VERSION,
            &*CONSOLE_PLATFORM,
            &*CONSOLE_PROVIDERS,
        ]);
        vocabulary
    }

    fn from_asset(asset: Asset) -> Result<Self, Asset> {
        if asset.is_kind(&CONSOLE) {
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
    use crate::model::Attribute;

    #[test]
    fn test_console_name_scenario() {
        let mut console = Console::new("reception");
        console.set_console_name("kiosk-7").unwrap();
        assert_eq!(console.console_name().as_deref(), Some("kiosk-7"));

        let err = console.set_console_name("").unwrap_err();
        assert!(matches!(err, ValidationError::ConstraintViolated { ref attribute, .. } if attribute == "consoleName"));
        assert_eq!(console.console_name().as_deref(), Some("kiosk-7"));
    }

    #[test]
    fn test_unset_fields_are_absent() {
        let console = Console::new("reception");
        assert_eq!(console.console_version(), None);
        assert_eq!(console.console_platform(), None);
        assert_eq!(console.console_providers(), None);
        assert!(console.attributes().is_empty());
    }

    #[test]
    fn test_set_console_provider_merges() {
        let mut console = Console::new("phone");
        let push = ConsoleProvider::new("fcm");
        let mut geofence = ConsoleProvider::new("ORConsole");
        geofence.requires_permission = true;

        console.set_console_provider("push", push.clone()).unwrap();
        console.set_console_provider("geofence", geofence.clone()).unwrap();

        let providers = console.console_providers().unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers.get("push"), Some(&push));
        assert_eq!(providers.get("geofence"), Some(&geofence));
    }

    #[test]
    fn test_invalid_provider_is_rejected() {
        let mut console = Console::new("phone");
        console.set_console_provider("push", ConsoleProvider::new("fcm")).unwrap();

        let err = console
            .set_console_provider("geofence", ConsoleProvider::new(" "))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ConstraintViolated { ref constraint, .. } if constraint == "map of console providers"
        ));
        assert_eq!(console.console_providers().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_provider_payload_reads_as_absent() {
        let mut console = Console::new("phone");
        let mut entry = BTreeMap::new();
        entry.insert("version".to_string(), Value::Integer(3));
        let mut payload = BTreeMap::new();
        payload.insert("push".to_string(), Value::Object(entry));
        console
            .attributes_mut()
            .put(Attribute::new("consoleProviders").with_value(Value::Object(payload)));

        assert_eq!(console.console_providers(), None);
    }

    #[test]
    fn test_provider_value_roundtrip_keeps_data() {
        let mut data = BTreeMap::new();
        data.insert("topic".to_string(), Value::from("alerts"));
        let provider = ConsoleProvider {
            data: Some(data),
            ..ConsoleProvider::new("fcm")
        };
        assert_eq!(ConsoleProvider::from_value(&provider.to_value()), Some(provider));
    }

    #[test]
    fn test_from_asset_checks_kind() {
        let light = Asset::new("lamp", &crate::asset::light::LIGHT);
        assert!(Console::from_asset(light).is_err());

        let asset = Asset::new("phone", &CONSOLE);
        let console = Console::from_asset(asset).unwrap();
        assert_eq!(console.asset().name(), "phone");
        assert_eq!(Console::vocabulary().len(), 6);
        assert!(Console::schema().is_ok());
    }
}
