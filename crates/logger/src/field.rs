//! Key/value fields attached to keyed log calls

use serde_json::{Value, json};
use std::borrow::Cow;
use std::fmt;

/// Key used for a dangling key of an alternating pair list
pub const IGNORED_KEY: &str = "ignored";

/// Key used to collect pairs whose key is not a string
pub const INVALID_KEY: &str = "invalid";

/// A single structured field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub key: Cow<'static, str>,
    /// Field value
    pub value: Value,
}

impl Field {
    /// Create a field from anything convertible to a JSON value
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a string field from a `Display` value
    pub fn display(key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }

    /// Create a string field from a `Debug` value
    pub fn debug(key: impl Into<Cow<'static, str>>, value: impl fmt::Debug) -> Self {
        Self::new(key, format!("{value:?}"))
    }

    /// Create an `error` field holding the error's message
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::new("error", err.to_string())
    }

    /// Build fields from an alternating `[key, value, key, value, ...]` list.
    ///
    /// String keys pair with the value that follows them. A trailing element
    /// without a value is kept under `"ignored"`. Pairs whose key is not a
    /// string are gathered into one `"invalid"` field, appended last, as
    /// `[{"position": index, "key": key, "value": value}]`.
    pub fn pairs(args: impl IntoIterator<Item = Value>) -> Vec<Self> {
        let mut fields = Vec::new();
        let mut invalid = Vec::new();
        let mut args = args.into_iter().enumerate();

        while let Some((position, key)) = args.next() {
            let Some((_, value)) = args.next() else {
                fields.push(Self::new(IGNORED_KEY, key));
                break;
            };
            match key {
                Value::String(key) => fields.push(Self::new(key, value)),
                key => invalid.push(json!({
                    "position": position,
                    "key": key,
                    "value": value,
                })),
            }
        }

        if !invalid.is_empty() {
            fields.push(Self::new(INVALID_KEY, invalid));
        }
        fields
    }
}
