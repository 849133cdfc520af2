//! Per-field evaluation outcomes
//!
//! Every outcome is data: a field is either `Parsed` with its typed value or
//! `Rejected` with a reason from the closed taxonomy below. Rejections never
//! escalate into errors or panics, and one field's rejection never affects
//! another field's outcome.
//!
//! Rejection codes:
//! - TYPE_MISMATCH (value type not handled by the validator)
//! - FORBIDDEN_SUBSTRING (string content rule)
//! - NUMERIC_PARSE (numeric string coercion failed)
//! - ZERO_VALUE (number content rule)
//! - NO_VALIDATOR (input field with no schema entry)

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::value::RawValue;

/// Reasons a field can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Value type not handled by the validator that received it
    TypeMismatch {
        /// Type name the validator accepts
        expected: &'static str,
        /// Type name of the value it was given
        actual: &'static str,
    },
    /// String contains a forbidden substring
    ForbiddenSubstring {
        /// The substring that must not appear
        needle: &'static str,
    },
    /// String could not be coerced to a number
    NumericParse,
    /// Number was exactly zero
    Zero,
    /// Input field has no corresponding schema entry
    NoValidator,
}

impl Rejection {
    /// Returns the stable code for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::TypeMismatch { .. } => "TYPE_MISMATCH",
            Rejection::ForbiddenSubstring { .. } => "FORBIDDEN_SUBSTRING",
            Rejection::NumericParse => "NUMERIC_PARSE",
            Rejection::Zero => "ZERO_VALUE",
            Rejection::NoValidator => "NO_VALIDATOR",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "cannot validate this type: expected {}, got {}",
                    expected, actual
                )
            }
            Rejection::ForbiddenSubstring { needle } => {
                write!(f, "must not contain {}", needle)
            }
            Rejection::NumericParse => write!(f, "cannot parse numeric string"),
            Rejection::Zero => write!(f, "value must not be zero"),
            Rejection::NoValidator => write!(f, "no associated validator for this field"),
        }
    }
}

/// A value accepted by a validator.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    /// Accepted string
    Str(String),
    /// Accepted (possibly coerced) number
    Num(f64),
    /// Nested result record produced by an object validator
    Record(ResultRecord),
}

impl ParsedValue {
    /// Renders the value as JSON.
    ///
    /// Non-finite numbers have no JSON representation and render as `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ParsedValue::Str(s) => Value::String(s.clone()),
            ParsedValue::Num(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ParsedValue::Record(record) => record.to_json(),
        }
    }
}

/// The outcome of applying one validator to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The field was accepted with this typed value
    Parsed(ParsedValue),
    /// The field was rejected for this reason
    Rejected(Rejection),
}

impl ParseOutcome {
    /// Creates a type-mismatch rejection for a value the validator does not
    /// handle.
    pub(crate) fn type_mismatch(expected: &'static str, actual: &RawValue) -> Self {
        ParseOutcome::Rejected(Rejection::TypeMismatch {
            expected,
            actual: actual.type_name(),
        })
    }

    /// Returns true when the field was accepted.
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    /// Returns true when the field was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ParseOutcome::Rejected(_))
    }

    /// Returns the accepted value, if any.
    pub fn value(&self) -> Option<&ParsedValue> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::Rejected(_) => None,
        }
    }

    /// Returns the rejection reason, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Rejected(reason) => Some(reason),
        }
    }

    /// Renders the outcome in its wire shape:
    /// `{"parsed": true, "value": …}` or `{"parsed": false, "reason": …}`.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        match self {
            ParseOutcome::Parsed(value) => {
                obj.insert("parsed".into(), Value::Bool(true));
                obj.insert("value".into(), value.to_json());
            }
            ParseOutcome::Rejected(reason) => {
                obj.insert("parsed".into(), Value::Bool(false));
                obj.insert("reason".into(), Value::String(reason.to_string()));
            }
        }
        Value::Object(obj)
    }
}

/// A record of per-field outcomes, isomorphic in keyset to the input record
/// it was evaluated from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    fields: BTreeMap<String, ParseOutcome>,
}

impl ResultRecord {
    /// Returns the outcome for a field, if the field was present in the
    /// input.
    pub fn get(&self, name: &str) -> Option<&ParseOutcome> {
        self.fields.get(name)
    }

    /// Returns the number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the input record had no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates outcomes in deterministic (sorted) key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParseOutcome)> {
        self.fields.iter()
    }

    /// Iterates field names in deterministic (sorted) key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Counts accepted leaf fields, descending through nested records.
    ///
    /// An object validator's own `Parsed` wrapper is structural and is not
    /// counted; only leaves count.
    pub fn count_parsed(&self) -> usize {
        self.fields
            .values()
            .map(|outcome| match outcome {
                ParseOutcome::Parsed(ParsedValue::Record(nested)) => nested.count_parsed(),
                ParseOutcome::Parsed(_) => 1,
                ParseOutcome::Rejected(_) => 0,
            })
            .sum()
    }

    /// Counts rejected fields, descending through nested records.
    pub fn count_rejected(&self) -> usize {
        self.fields
            .values()
            .map(|outcome| match outcome {
                ParseOutcome::Parsed(ParsedValue::Record(nested)) => nested.count_rejected(),
                ParseOutcome::Parsed(_) => 0,
                ParseOutcome::Rejected(_) => 1,
            })
            .sum()
    }

    /// Returns true when no field was rejected at any depth.
    pub fn is_fully_parsed(&self) -> bool {
        self.count_rejected() == 0
    }

    /// Renders the whole record in its wire shape.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (name, outcome) in &self.fields {
            obj.insert(name.clone(), outcome.to_json());
        }
        Value::Object(obj)
    }
}

impl FromIterator<(String, ParseOutcome)> for ResultRecord {
    fn from_iter<I: IntoIterator<Item = (String, ParseOutcome)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, ParseOutcome>> for ResultRecord {
    fn from(fields: BTreeMap<String, ParseOutcome>) -> Self {
        Self { fields }
    }
}

impl Serialize for ParsedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
