//! Assets and their typed façades.
//!
//! Every asset owns exactly one [`AttributeMap`]. Asset kinds differ only in
//! the attribute descriptors their façade exposes: [`Console`], [`Light`] and
//! [`ElectricityStorage`] each wrap a plain [`Asset`] and delegate all storage
//! to its map.
//!
//! Vocabularies shared across kinds are traits over [`HasAttributes`]:
//! [`AssetAttributes`] for every asset and [`DeviceAttributes`] for devices.
//!
//! # Example
//!
//! ```rust
//! use asset_model::asset::{AssetAttributes, Console};
//!
//! let mut console = Console::new("Front desk");
//! console.set_console_name("kiosk-7").unwrap();
//! console.set_notes("replaced screen").unwrap();
//!
//! assert_eq!(console.console_name().as_deref(), Some("kiosk-7"));
//! assert!(console.set_console_name("").is_err());
//! assert_eq!(console.console_name().as_deref(), Some("kiosk-7"));
//! ```

pub mod console;
pub mod device;
pub mod light;
pub mod storage;

use lazy_static::lazy_static;

use crate::error::ValidationError;
use crate::model::{value_types, AttributeDescriptor, AttributeMap, DescribeAttribute, Id, new_id};
use crate::validate::AttributeSchema;

pub use console::{Console, ConsoleProvider, ConsoleProviders};
pub use device::DeviceAttributes;
pub use light::Light;
pub use storage::ElectricityStorage;

/// Static description of an asset kind.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetDescriptor {
    name: &'static str,
    icon: &'static str,
    colour: Option<&'static str>,
}

impl AssetDescriptor {
    pub const fn new(name: &'static str, icon: &'static str, colour: Option<&'static str>) -> Self {
        Self { name, icon, colour }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn icon(&self) -> &'static str {
        self.icon
    }

    /// Hex RGB colour without the leading `#`.
    pub const fn colour(&self) -> Option<&'static str> {
        self.colour
    }
}

pub static ASSET: AssetDescriptor = AssetDescriptor::new("Asset", "cube-outline", None);

/// Every asset kind known to this crate.
pub static ASSET_KINDS: [&AssetDescriptor; 4] = [
    &ASSET,
    &console::CONSOLE,
    &light::LIGHT,
    &storage::ELECTRICITY_STORAGE,
];

/// Resolves an asset kind by name.
pub fn asset_descriptor(name: &str) -> Option<&'static AssetDescriptor> {
    ASSET_KINDS.iter().copied().find(|kind| kind.name() == name)
}

/// Capability of owning one attribute map.
pub trait HasAttributes {
    fn attributes(&self) -> &AttributeMap;

    fn attributes_mut(&mut self) -> &mut AttributeMap;
}

/// An untyped asset: identity, kind and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    id: Id,
    name: String,
    descriptor: &'static AssetDescriptor,
    attributes: AttributeMap,
}

impl Asset {
    /// Creates an asset with a fresh id and no attributes.
    pub fn new(name: impl Into<String>, descriptor: &'static AssetDescriptor) -> Self {
        Self::with_id(new_id(), name, descriptor)
    }

    pub fn with_id(id: Id, name: impl Into<String>, descriptor: &'static AssetDescriptor) -> Self {
        Self::from_parts(id, name, descriptor, AttributeMap::new())
    }

    pub fn from_parts(
        id: Id,
        name: impl Into<String>,
        descriptor: &'static AssetDescriptor,
        attributes: AttributeMap,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            descriptor,
            attributes,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &'static AssetDescriptor {
        self.descriptor
    }

    /// Whether this asset is of the given kind. Kinds compare by name.
    pub fn is_kind(&self, descriptor: &AssetDescriptor) -> bool {
        self.descriptor.name() == descriptor.name()
    }

    pub fn into_attributes(self) -> AttributeMap {
        self.attributes
    }
}

impl HasAttributes for Asset {
    fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }
}

/// A typed façade over an [`Asset`] of one kind.
pub trait AssetKind: HasAttributes + Sized {
    fn descriptor() -> &'static AssetDescriptor;

    /// Every attribute descriptor the façade exposes, inherited ones included.
    fn vocabulary() -> Vec<&'static dyn DescribeAttribute>;

    /// Wraps an asset, handing it back if it is of another kind.
    fn from_asset(asset: Asset) -> Result<Self, Asset>;

    fn asset(&self) -> &Asset;

    fn into_asset(self) -> Asset;

    fn schema() -> Result<AttributeSchema, ValidationError> {
        AttributeSchema::from_vocabulary(Self::vocabulary())
    }
}

impl AssetKind for Asset {
    fn descriptor() -> &'static AssetDescriptor {
        &ASSET
    }

    fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
        vocabulary()
    }

    /// Every asset is an `Asset`.
    fn from_asset(asset: Asset) -> Result<Self, Asset> {
        Ok(asset)
    }

    fn asset(&self) -> &Asset {
        self
    }

    fn into_asset(self) -> Asset {
        self
    }
}

lazy_static! {
    pub static ref NOTES: AttributeDescriptor<String> =
        AttributeDescriptor::builder("notes", &value_types::TEXT).declare();
    pub static ref TAGS: AttributeDescriptor<Vec<String>> =
        AttributeDescriptor::builder("tags", &value_types::TEXT_LIST).declare();
}

/// Descriptors shared by every asset kind.
pub fn vocabulary() -> Vec<&'static dyn DescribeAttribute> {
    vec![&*NOTES as &dyn DescribeAttribute, &*TAGS]
}

/// Vocabulary shared by every asset kind.
pub trait AssetAttributes: HasAttributes {
    fn notes(&self) -> Option<String> {
        self.attributes().value(&*NOTES)
    }

    fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*NOTES, notes.into())
    }

    fn tags(&self) -> Option<Vec<String>> {
        self.attributes().value(&*TAGS)
    }

    fn set_tags(&mut self, tags: Vec<String>) -> Result<(), ValidationError> {
        self.attributes_mut().set_value(&*TAGS, tags)
    }

    /// Adds a tag, keeping the existing ones.
    fn add_tag(&mut self, tag: impl Into<String>) -> Result<(), ValidationError> {
        let tag = tag.into();
        let mut tags = self.tags().unwrap_or_default();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
        self.set_tags(tags)
    }
}

impl<A: HasAttributes + ?Sized> AssetAttributes for A {}
