//! Declarative field validation subsystem
//!
//! A schema is a record of validators; an input is a record of raw values.
//! Evaluation walks both in lock-step by key and returns a record of
//! per-field outcomes.
//!
//! # Design principles
//!
//! - Validators are pure functions over immutable inputs
//! - Every input key yields exactly one outcome; there is no fail-fast mode
//! - The input's key set drives the result; the schema is a lookup table
//! - Evaluation and key enumeration are deterministic

mod evaluator;
mod outcome;
mod types;

pub use evaluator::evaluate;
pub use outcome::{ParseOutcome, ParsedValue, Rejection, ResultRecord};
pub use types::{Schema, Validator};
