//! Typed attribute descriptors for heterogeneous assets.
//!
//! Assets (consoles, lights, batteries, ...) share a single dynamically keyed
//! attribute container. What makes a kind of asset distinct is the catalogue
//! of attribute descriptors its façade exposes: each descriptor names an
//! attribute and fixes its value type, default and metadata.
//!
//! # Overview
//!
//! - **Declared once**: descriptors are statics, independent of any asset
//! - **Validated at the boundary**: typed setters check values before storing
//! - **Forgiving reads**: absent or non-conforming values read as `None`
//!
//! # Quick Start
//!
//! ```rust
//! use asset_model::asset::{AssetKind, Light};
//! use asset_model::codec::{decode_asset, encode_asset};
//!
//! let mut light = Light::new("hall");
//! light.set_on_off(true).unwrap();
//! light.set_brightness(80).unwrap();
//! assert!(light.set_brightness(120).is_err());
//!
//! let bytes = encode_asset(light.asset()).unwrap();
//! let decoded = Light::from_asset(decode_asset(&bytes).unwrap()).unwrap();
//! assert_eq!(decoded.brightness(), Some(80));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Values, value/meta/attribute descriptors, the attribute map
//! - [`asset`]: Assets, asset kinds and their façades
//! - [`codec`]: JSON encoding/decoding of attributes and assets
//! - [`validate`]: Schema-level validation of stored values
//! - [`units`]: Unit identifiers for `unitType` metadata
//! - [`error`]: Error types
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`debug` for non-conforming reads and
//! decodes, `trace` for attribute creation). Install a subscriber to see them.

pub mod asset;
pub mod codec;
pub mod error;
pub mod model;
pub mod units;
pub mod validate;

// Re-export commonly used types at crate root
pub use asset::{
    Asset, AssetAttributes, AssetDescriptor, AssetKind, Console, ConsoleProvider, ConsoleProviders,
    DeviceAttributes, ElectricityStorage, HasAttributes, Light,
};
pub use codec::{decode_asset, decode_attributes, encode_asset, encode_attributes};
pub use error::{DecodeError, DescriptorError, EncodeError, MetaError, ValidationError};
pub use model::{
    meta_types, value_types, Attribute, AttributeDescriptor, AttributeMap, AttributeValue,
    Constraint, DescribeAttribute, Id, MetaDescriptor, MetaItem, MetaMap, Value, ValueDescriptor,
    ValueType,
};
pub use validate::{validate_asset, validate_attributes, AttributeSchema};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
