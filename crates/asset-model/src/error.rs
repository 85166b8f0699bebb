//! Error types for descriptor construction, attribute validation and the codec.

use thiserror::Error;

use crate::model::ValueType;

/// Error while constructing a metadata item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetaError {
    #[error("meta item {meta:?} value does not conform to {value_type}: {reason}")]
    InvalidMetaValue {
        meta: &'static str,
        value_type: &'static str,
        reason: &'static str,
    },

    #[error("meta descriptor {meta:?} has no default value")]
    NoDefault { meta: &'static str },

    #[error("meta item name must not be empty")]
    EmptyName,
}

/// Error while constructing an attribute descriptor.
///
/// These indicate a programming defect in a static declaration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("attribute descriptor name must not be empty")]
    EmptyName,

    #[error("attribute {attribute:?} declares meta item {meta:?} more than once")]
    DuplicateMetaItem { attribute: String, meta: String },

    #[error("default value of attribute {attribute:?} violates {value_type}: {reason}")]
    InvalidDefault {
        attribute: String,
        value_type: &'static str,
        reason: &'static str,
    },

    #[error("attribute {attribute:?} has an invalid meta item: {source}")]
    InvalidMeta {
        attribute: String,
        #[source]
        source: MetaError,
    },
}

/// Error during attribute validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("value for attribute {attribute:?} violates constraint {constraint}: {reason}")]
    ConstraintViolated {
        attribute: String,
        constraint: String,
        reason: &'static str,
    },

    #[error("stored value of attribute {attribute:?} does not conform to {expected}: {reason}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        reason: &'static str,
    },

    #[error("attribute {attribute:?} is declared as {registered} and as {declared}")]
    DataTypeInconsistent {
        attribute: String,
        registered: ValueType,
        declared: ValueType,
    },
}

/// Error while decoding a structured payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("unknown asset type {name:?}")]
    UnknownAssetType { name: String },

    #[error("invalid asset id {id:?}")]
    InvalidId { id: String },

    #[error("asset name must not be empty")]
    EmptyAssetName,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// Error while encoding to a structured payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::SerializationFailed(err.to_string())
    }
}
