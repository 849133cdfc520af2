//! Raw input value model
//!
//! Inputs are finite trees of strings, numbers, and nested records. Values
//! are supplied by the caller, borrowed for the duration of one evaluation
//! call, and never mutated.
//!
//! JSON is the natural interchange format for callers, so this module also
//! carries the conversion boundary from `serde_json::Value`. Conversion is
//! the only fallible operation in the crate: `null`, booleans, and arrays
//! have no raw-value representation and are reported with the dotted path
//! of the offending node.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// A record of named raw values, as supplied by the caller.
///
/// `BTreeMap` keeps key enumeration deterministic, so repeated evaluations
/// of the same input produce byte-identical output.
pub type FieldMap = BTreeMap<String, RawValue>;

/// An externally-supplied value awaiting validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// UTF-8 string
    Str(String),
    /// 64-bit floating point number
    Num(f64),
    /// Nested record of raw values
    Record(FieldMap),
}

impl RawValue {
    /// Returns the type name used in rejection messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Str(_) => "string",
            RawValue::Num(_) => "number",
            RawValue::Record(_) => "record",
        }
    }

    /// Converts a JSON value into a raw value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Unsupported` for `null`, boolean, or array nodes
    /// anywhere in the tree.
    pub fn from_json(value: &Value) -> ValueResult<Self> {
        Self::from_json_at(value, "")
    }

    /// Converts a top-level JSON object into an input record.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotARecord` when `value` is not an object, and
    /// `ValueError::Unsupported` for unrepresentable nodes beneath it.
    pub fn from_json_object(value: &Value) -> ValueResult<FieldMap> {
        let obj = value.as_object().ok_or_else(|| ValueError::NotARecord {
            type_name: json_type_name(value),
        })?;

        let mut fields = FieldMap::new();
        for (key, child) in obj {
            fields.insert(key.clone(), Self::from_json_at(child, key)?);
        }
        Ok(fields)
    }

    fn from_json_at(value: &Value, path: &str) -> ValueResult<Self> {
        match value {
            Value::String(s) => Ok(RawValue::Str(s.clone())),
            Value::Number(n) => {
                let n = n.as_f64().ok_or_else(|| ValueError::Unsupported {
                    type_name: "number",
                    path: display_path(path),
                })?;
                Ok(RawValue::Num(n))
            }
            Value::Object(obj) => {
                let mut fields = FieldMap::new();
                for (key, child) in obj {
                    let child_path = make_path(path, key);
                    fields.insert(key.clone(), Self::from_json_at(child, &child_path)?);
                }
                Ok(RawValue::Record(fields))
            }
            other => Err(ValueError::Unsupported {
                type_name: json_type_name(other),
                path: display_path(path),
            }),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Num(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Num(n as f64)
    }
}

impl From<FieldMap> for RawValue {
    fn from(fields: FieldMap) -> Self {
        RawValue::Record(fields)
    }
}

impl TryFrom<&Value> for RawValue {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        Self::from_json(value)
    }
}

/// Errors raised at the JSON conversion boundary.
///
/// Evaluation itself is total; only getting values *into* the engine can
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// JSON node type with no raw-value representation
    #[error("unsupported {type_name} value at '{path}'")]
    Unsupported {
        /// JSON type name of the offending node
        type_name: &'static str,
        /// Dotted field path of the offending node
        path: String,
    },

    /// Top-level input was not a JSON object
    #[error("input must be a top-level object, got {type_name}")]
    NotARecord {
        /// JSON type name of the top-level value
        type_name: &'static str,
    },
}

/// Result type for conversion operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Path shown for root-level nodes with no field name of their own.
fn display_path(path: &str) -> String {
    if path.is_empty() {
        "$root".to_string()
    } else {
        path.to_string()
    }
}
