//! Asset identifiers.
//!
//! Asset ids are RFC 4122 version 4 UUIDs stored as 16 raw bytes.

use uuid::Uuid;

/// A 16-byte UUID identifier.
pub type Id = [u8; 16];

/// The zero/nil UUID.
pub const NIL_ID: Id = [0u8; 16];

/// Generates a random (version 4) id.
pub fn new_id() -> Id {
    Uuid::new_v4().into_bytes()
}

/// Formats an id as non-hyphenated lowercase hex.
pub fn format_id(id: &Id) -> String {
    Uuid::from_bytes(*id).simple().to_string()
}

/// Parses an id from hex, with or without hyphens.
pub fn parse_id(s: &str) -> Option<Id> {
    Uuid::parse_str(s).ok().map(Uuid::into_bytes)
}
