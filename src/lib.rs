//! fieldparse - a strict, deterministic per-field validation engine
//!
//! Pairs a record of raw input values with a record of validators and
//! produces a record of independent per-field outcomes, recursing through
//! nested object schemas.

pub mod observability;
pub mod schema;
pub mod value;
