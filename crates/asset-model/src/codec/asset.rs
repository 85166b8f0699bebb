//! Assets as JSON: id, name, type and attributes.
//!
//! ```json
//! { "id": "550e8400e29b41d4a716446655440000", "name": "hall", "type": "Light",
//!   "attributes": { "onOff": { "value": true } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::{asset_descriptor, Asset, HasAttributes};
use crate::codec::attribute::{absorb, RawEntry};
use crate::error::{DecodeError, EncodeError};
use crate::model::{format_id, new_id, parse_id, AttributeMap};

#[derive(Deserialize)]
struct AssetPayload {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: BTreeMap<String, RawEntry>,
}

#[derive(Serialize)]
struct AssetPayloadRef<'a> {
    id: String,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: &'a AttributeMap,
}

/// Decodes an asset. A missing id is generated; the type must be a known
/// asset kind.
pub fn decode_asset(input: &[u8]) -> Result<Asset, DecodeError> {
    let payload: AssetPayload = serde_json::from_slice(input)?;

    let descriptor = asset_descriptor(&payload.kind).ok_or_else(|| DecodeError::UnknownAssetType {
        name: payload.kind.clone(),
    })?;
    let id = match payload.id {
        Some(id) => parse_id(&id).ok_or(DecodeError::InvalidId { id })?,
        None => new_id(),
    };
    if payload.name.trim().is_empty() {
        return Err(DecodeError::EmptyAssetName);
    }

    let mut attributes = AttributeMap::with_capacity(payload.attributes.len());
    absorb(
        &mut attributes,
        payload
            .attributes
            .into_iter()
            .map(|(name, entry)| entry.named(name)),
    );
    tracing::debug!(
        kind = descriptor.name(),
        attributes = attributes.len(),
        "decoded asset"
    );
    Ok(Asset::from_parts(id, payload.name, descriptor, attributes))
}

/// Encodes an asset. Attribute names are sorted.
pub fn encode_asset(asset: &Asset) -> Result<Vec<u8>, EncodeError> {
    let payload = AssetPayloadRef {
        id: format_id(asset.id()),
        name: asset.name(),
        kind: asset.descriptor().name(),
        attributes: asset.attributes(),
    };
    Ok(serde_json::to_vec(&payload)?)
}
