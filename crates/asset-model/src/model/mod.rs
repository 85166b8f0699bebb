//! Data model types for typed asset attributes.
//!
//! This module contains the descriptor/attribute core:
//! - Values (dynamic storage plus typed conversion)
//! - Value descriptors (semantic types with validation)
//! - Metadata descriptors and items
//! - Attribute descriptors and instances
//! - The per-asset attribute map

pub mod attribute;
pub mod descriptor;
pub mod id;
pub mod map;
pub mod meta;
pub mod value;

pub use attribute::{Attribute, AttributeDescriptor, AttributeDescriptorBuilder, DescribeAttribute};
pub use descriptor::{value_types, Constraint, ValueDescriptor};
pub use id::{format_id, new_id, parse_id, Id, NIL_ID};
pub use map::AttributeMap;
pub use meta::{meta_types, MetaDescriptor, MetaItem, MetaMap};
pub use value::{AttributeValue, Value, ValueType};
