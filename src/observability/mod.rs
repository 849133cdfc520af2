//! Observability subsystem
//!
//! Structured logging (JSON) and deterministic counters for evaluation
//! callers.
//!
//! # Principles
//!
//! 1. Observability is read-only over results
//! 2. No side effects on evaluation; validators and the evaluator stay pure
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use fieldparse::observability::{Logger, MetricsRegistry};
//!
//! let metrics = MetricsRegistry::new();
//! let results = fieldparse::schema::evaluate(&input, &schema);
//! metrics.observe(&results);
//! Logger::info("EVALUATION_COMPLETE", &[("fields", "3")]);
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
