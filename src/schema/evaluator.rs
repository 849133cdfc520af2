//! Field evaluator
//!
//! Walks an input record and a schema in lock-step by key and produces one
//! outcome per input field. The input's key set drives the output: every
//! input key yields exactly one entry, and schema entries with no matching
//! input key are never consulted.

use crate::value::FieldMap;

use super::outcome::{ParseOutcome, Rejection, ResultRecord};
use super::types::Schema;

/// Evaluates every field of `input` against `schema`.
///
/// Fields are independent: a rejection in one field never aborts or alters
/// the evaluation of any other field, and there is no fail-fast mode. An
/// input field with no schema entry yields an explicit no-validator
/// rejection rather than being dropped.
///
/// Nested records paired with object validators re-enter this function
/// transitively; recursion depth equals schema nesting depth, and schemas
/// are finite caller-built trees.
pub fn evaluate(input: &FieldMap, schema: &Schema) -> ResultRecord {
    input
        .iter()
        .map(|(name, value)| {
            let outcome = match schema.get(name) {
                Some(validator) => validator.apply(value),
                None => ParseOutcome::Rejected(Rejection::NoValidator),
            };
            (name.clone(), outcome)
        })
        .collect()
}
