//! Validator catalog and schema definitions
//!
//! The catalog is a closed set: two leaf validators (string, number) and the
//! object combinator, which wraps a schema of child validators and recurses.
//! Validators are immutable and reusable across any number of evaluations.

use std::collections::BTreeMap;

use crate::value::RawValue;

use super::evaluator;
use super::outcome::{ParseOutcome, ParsedValue, Rejection};

/// Substring the string validator refuses to accept.
const FORBIDDEN_SUBSTRING: &str = "dog";

/// A field validation rule.
///
/// Applying a validator is total: every raw value yields `Parsed` or
/// `Rejected`, never a panic or an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Accepts strings free of the forbidden substring
    String,
    /// Accepts numbers, coercing numeric strings, rejecting zero
    Number,
    /// Recurses into a nested record using its own schema
    Object(Schema),
}

impl Validator {
    /// String validator.
    pub fn string() -> Self {
        Validator::String
    }

    /// Number validator.
    pub fn number() -> Self {
        Validator::Number
    }

    /// Object combinator: builds a validator out of a schema of child
    /// validators.
    pub fn object(schema: Schema) -> Self {
        Validator::Object(schema)
    }

    /// Returns the name of the input type this validator accepts.
    pub fn expects(&self) -> &'static str {
        match self {
            Validator::String => "string",
            Validator::Number => "number",
            Validator::Object(_) => "record",
        }
    }

    /// Applies this validator to one raw value.
    pub fn apply(&self, input: &RawValue) -> ParseOutcome {
        match self {
            Validator::String => apply_string(input),
            Validator::Number => apply_number(input),
            Validator::Object(schema) => apply_object(schema, input),
        }
    }
}

fn apply_string(input: &RawValue) -> ParseOutcome {
    match input {
        RawValue::Str(s) => {
            if s.contains(FORBIDDEN_SUBSTRING) {
                ParseOutcome::Rejected(Rejection::ForbiddenSubstring {
                    needle: FORBIDDEN_SUBSTRING,
                })
            } else {
                ParseOutcome::Parsed(ParsedValue::Str(s.clone()))
            }
        }
        other => ParseOutcome::type_mismatch("string", other),
    }
}

fn apply_number(input: &RawValue) -> ParseOutcome {
    let n = match input {
        RawValue::Num(n) => *n,
        // Coercion mirrors lenient numeric text handling: surrounding
        // whitespace is fine, NaN is not a number.
        RawValue::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => n,
            _ => return ParseOutcome::Rejected(Rejection::NumericParse),
        },
        other => return ParseOutcome::type_mismatch("number", other),
    };

    if n == 0.0 {
        ParseOutcome::Rejected(Rejection::Zero)
    } else {
        ParseOutcome::Parsed(ParsedValue::Num(n))
    }
}

fn apply_object(schema: &Schema, input: &RawValue) -> ParseOutcome {
    match input {
        // The object level always structurally succeeds; rejections surface
        // only at the fields beneath it.
        RawValue::Record(fields) => {
            ParseOutcome::Parsed(ParsedValue::Record(evaluator::evaluate(fields, schema)))
        }
        other => ParseOutcome::type_mismatch("record", other),
    }
}

/// A mapping from field name to validator.
///
/// During evaluation the schema is consulted as a lookup table keyed by the
/// input's fields; it is not a required-field list, and schema entries with
/// no matching input field are simply never used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: BTreeMap<String, Validator>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field rule, replacing any previous rule under the same name.
    pub fn field(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.fields.insert(name.into(), validator);
        self
    }

    /// Looks up the validator for a field name.
    pub fn get(&self, name: &str) -> Option<&Validator> {
        self.fields.get(name)
    }

    /// Returns the number of field rules.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the schema has no field rules.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates field rules in deterministic (sorted) key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Validator)> {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, Validator>> for Schema {
    fn from(fields: BTreeMap<String, Validator>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Validator)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, Validator)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
