//! Value descriptors: a semantic value type plus its validation rule.
//!
//! A [`ValueDescriptor`] is declared once as a `static` and referenced by
//! every attribute and metadata descriptor that uses it.

use std::fmt;
use std::marker::PhantomData;

use crate::model::value::{AttributeValue, Value, ValueType};

/// Validation rule carried by a [`ValueDescriptor`].
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Any value of the right type.
    None,
    /// Text (after trimming), arrays and objects must not be empty.
    NonEmpty,
    /// Inclusive integer bounds.
    IntegerRange { min: i64, max: i64 },
    /// Inclusive number bounds. NaN and infinities never conform.
    NumberRange { min: f64, max: f64 },
    /// Every entry of an object must pass `check`.
    Entries {
        description: &'static str,
        check: fn(&Value) -> Option<&'static str>,
    },
}

impl Constraint {
    /// Checks a value against this constraint.
    ///
    /// Returns a description of the violation, or `None` if the value conforms.
    pub fn check(&self, value: &Value) -> Option<&'static str> {
        match self {
            Constraint::None => None,
            Constraint::NonEmpty => match value {
                Value::Text(s) if s.trim().is_empty() => Some("text must not be empty"),
                Value::Array(items) if items.is_empty() => Some("array must not be empty"),
                Value::Object(entries) if entries.is_empty() => Some("object must not be empty"),
                _ => None,
            },
            Constraint::IntegerRange { min, max } => match value.as_i64() {
                Some(i) if i >= *min && i <= *max => None,
                Some(_) => Some("integer out of range"),
                None => Some("expected an integer"),
            },
            Constraint::NumberRange { min, max } => match value.as_f64() {
                Some(n) if n.is_nan() => Some("NaN is not allowed"),
                Some(n) if n.is_infinite() => Some("number must be finite"),
                Some(n) if n >= *min && n <= *max => None,
                Some(_) => Some("number out of range"),
                None => Some("expected a number"),
            },
            Constraint::Entries { check, .. } => match value {
                Value::Object(entries) => entries.values().find_map(|entry| check(entry)),
                _ => Some("expected an object"),
            },
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::None => f.write_str("any value"),
            Constraint::NonEmpty => f.write_str("non-empty"),
            Constraint::IntegerRange { min, max } => write!(f, "integer in [{min}, {max}]"),
            Constraint::NumberRange { min, max } => write!(f, "number in [{min}, {max}]"),
            Constraint::Entries { description, .. } => f.write_str(description),
        }
    }
}

/// A semantic value type `T` together with its validation rule.
///
/// Immutable and `const`-constructible, so value types live in `static` items.
#[derive(Debug)]
pub struct ValueDescriptor<T> {
    name: &'static str,
    constraint: Constraint,
    _type: PhantomData<fn() -> T>,
}

impl<T> ValueDescriptor<T> {
    pub const fn new(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            constraint,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn constraint(&self) -> &Constraint {
        &self.constraint
    }
}

impl<T: AttributeValue> ValueDescriptor<T> {
    /// Returns the storage type tag of `T`.
    pub fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    /// Converts a stored value to `T` and checks the constraint.
    pub fn coerce(&self, raw: &Value) -> Result<T, &'static str> {
        let typed = T::from_value(raw).ok_or("value type mismatch")?;
        match self.validate(&typed) {
            None => Ok(typed),
            Some(reason) => Err(reason),
        }
    }

    /// Checks a raw value. Returns the violation, or `None` if it conforms.
    pub fn check(&self, raw: &Value) -> Option<&'static str> {
        self.coerce(raw).err()
    }

    pub fn conforms(&self, raw: &Value) -> bool {
        self.check(raw).is_none()
    }

    /// Checks an already typed value against the constraint.
    pub fn validate(&self, value: &T) -> Option<&'static str> {
        self.constraint.check(&value.to_value())
    }
}

/// Standard value types.
pub mod value_types {
    use std::collections::BTreeMap;

    use super::{Constraint, ValueDescriptor};
    use crate::model::value::Value;

    pub static TEXT: ValueDescriptor<String> = ValueDescriptor::new("text", Constraint::None);

    /// Text that is not empty after trimming whitespace.
    pub static NON_EMPTY_TEXT: ValueDescriptor<String> =
        ValueDescriptor::new("nonEmptyText", Constraint::NonEmpty);

    pub static TEXT_LIST: ValueDescriptor<Vec<String>> =
        ValueDescriptor::new("textList", Constraint::None);

    pub static BOOLEAN: ValueDescriptor<bool> = ValueDescriptor::new("boolean", Constraint::None);

    pub static INTEGER: ValueDescriptor<i64> = ValueDescriptor::new("integer", Constraint::None);

    pub static POSITIVE_INTEGER: ValueDescriptor<i32> = ValueDescriptor::new(
        "positiveInteger",
        Constraint::IntegerRange {
            min: 0,
            max: i32::MAX as i64,
        },
    );

    pub static PERCENTAGE_INTEGER_0_100: ValueDescriptor<i32> = ValueDescriptor::new(
        "percentageInteger0100",
        Constraint::IntegerRange { min: 0, max: 100 },
    );

    pub static NUMBER: ValueDescriptor<f64> = ValueDescriptor::new(
        "number",
        Constraint::NumberRange {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        },
    );

    pub static POSITIVE_NUMBER: ValueDescriptor<f64> = ValueDescriptor::new(
        "positiveNumber",
        Constraint::NumberRange {
            min: 0.0,
            max: f64::INFINITY,
        },
    );

    pub static OBJECT: ValueDescriptor<BTreeMap<String, Value>> =
        ValueDescriptor::new("object", Constraint::None);

    pub static ANY: ValueDescriptor<Value> = ValueDescriptor::new("any", Constraint::None);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::value_types::*;
    use super::*;

    #[test]
    fn test_non_empty_text() {
        assert!(NON_EMPTY_TEXT.conforms(&Value::from("kiosk-7")));
        assert!(!NON_EMPTY_TEXT.conforms(&Value::from("")));
        assert!(!NON_EMPTY_TEXT.conforms(&Value::from("   ")));
        assert!(TEXT.conforms(&Value::from("")));
    }

    #[test]
    fn test_type_mismatch_is_reported_not_raised() {
        assert_eq!(BOOLEAN.check(&Value::Integer(1)), Some("value type mismatch"));
        assert_eq!(POSITIVE_NUMBER.check(&Value::from("1.0")), Some("value type mismatch"));
    }

    #[test]
    fn test_positive_number() {
        assert!(POSITIVE_NUMBER.conforms(&Value::Number(0.0)));
        assert!(POSITIVE_NUMBER.conforms(&Value::Integer(7)));
        assert!(!POSITIVE_NUMBER.conforms(&Value::Number(-0.5)));
        assert!(!POSITIVE_NUMBER.conforms(&Value::Number(f64::NAN)));
        assert_eq!(
            POSITIVE_NUMBER.check(&Value::Number(f64::INFINITY)),
            Some("number must be finite")
        );
        assert!(!NUMBER.conforms(&Value::Number(f64::NEG_INFINITY)));
        assert!(NUMBER.conforms(&Value::Number(-1.0e300)));
    }

    #[test]
    fn test_integer() {
        assert_eq!(INTEGER.coerce(&Value::Integer(i64::MAX)), Ok(i64::MAX));
        assert_eq!(INTEGER.coerce(&Value::Number(-3.0)), Ok(-3));
        assert!(!INTEGER.conforms(&Value::Number(1.5)));
        assert!(!INTEGER.conforms(&Value::from("1")));
        assert_eq!(INTEGER.value_type(), ValueType::Integer);
    }

    #[test]
    fn test_object_and_any() {
        let mut entries = std::collections::BTreeMap::new();
        entries.insert("push".to_string(), Value::Bool(true));
        let object = Value::Object(entries.clone());

        assert_eq!(OBJECT.coerce(&object), Ok(entries));
        assert!(OBJECT.conforms(&Value::Object(Default::default())));
        assert!(!OBJECT.conforms(&Value::Array(vec![])));
        assert_eq!(OBJECT.value_type(), ValueType::Object);

        assert_eq!(ANY.value_type(), ValueType::Any);
        for value in [Value::Bool(false), Value::Integer(-1), Value::from(""), object] {
            assert_eq!(ANY.coerce(&value), Ok(value.clone()));
        }
    }

    #[test]
    fn test_coerce_applies_constraint_after_conversion() {
        assert_eq!(PERCENTAGE_INTEGER_0_100.coerce(&Value::Number(40.0)), Ok(40));
        assert_eq!(
            PERCENTAGE_INTEGER_0_100.coerce(&Value::Number(400.0)),
            Err("integer out of range")
        );
    }

    #[test]
    fn test_entries_constraint() {
        fn positive_entry(value: &Value) -> Option<&'static str> {
            match value.as_i64() {
                Some(i) if i > 0 => None,
                _ => Some("entry must be a positive integer"),
            }
        }
        static COUNTS: ValueDescriptor<std::collections::BTreeMap<String, Value>> =
            ValueDescriptor::new(
                "counts",
                Constraint::Entries {
                    description: "map of positive counts",
                    check: positive_entry,
                },
            );

        let mut entries = std::collections::BTreeMap::new();
        entries.insert("a".to_string(), Value::Integer(1));
        assert!(COUNTS.conforms(&Value::Object(entries.clone())));

        entries.insert("b".to_string(), Value::Integer(-1));
        assert_eq!(
            COUNTS.check(&Value::Object(entries)),
            Some("entry must be a positive integer")
        );
        assert_eq!(COUNTS.constraint().to_string(), "map of positive counts");
    }

    #[test]
    fn test_constraint_display() {
        assert_eq!(
            PERCENTAGE_INTEGER_0_100.constraint().to_string(),
            "integer in [0, 100]"
        );
        assert_eq!(NON_EMPTY_TEXT.constraint().to_string(), "non-empty");
    }

    proptest! {
        #[test]
        fn test_percentage_bounds(v in -1000i32..1000) {
            let conforms = PERCENTAGE_INTEGER_0_100.validate(&v).is_none();
            prop_assert_eq!(conforms, (0..=100).contains(&v));
        }
    }
}
