//! JSON encoding/decoding of attributes and assets.
//!
//! Attributes travel as an object keyed by attribute name, each entry shaped
//! `{ "value": ..., "meta": { ... } }`. Decoding is loose: any JSON value is
//! stored as is and type checks happen later, on typed reads or through
//! [`crate::validate`]. Encoding sorts names, so output is deterministic.

pub mod asset;
pub mod attribute;

pub use asset::{decode_asset, encode_asset};
pub use attribute::{
    absorb, decode_attribute, decode_attributes, encode_attributes, to_structured, value_from_json,
    value_to_json, RawAttribute, StructuredAttributes,
};
