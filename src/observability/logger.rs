//! Structured JSON logging
//!
//! One log line is one event. Lines are emitted synchronously, unbuffered,
//! with keys in sorted order, so identical runs produce identical logs.

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured JSON logger.
///
/// Events go to stdout; `Error` severity goes to stderr.
pub struct Logger;

impl Logger {
    /// Logs a trace-level event.
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Trace, event, fields, &mut io::stdout());
    }

    /// Logs an info-level event.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields, &mut io::stdout());
    }

    /// Logs a warning event.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields, &mut io::stdout());
    }

    /// Logs an error event to stderr.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields, &mut io::stderr());
    }

    fn emit<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        // serde_json's map is BTree-backed, so keys serialize in sorted
        // order and escaping is handled for us.
        let mut line = Map::new();
        line.insert("event".into(), Value::String(event.into()));
        line.insert("severity".into(), Value::String(severity.as_str().into()));
        for (key, value) in fields {
            line.insert((*key).into(), Value::String((*value).into()));
        }

        // One write, one flush; logging failures are not propagated.
        let _ = writeln!(writer, "{}", Value::Object(line));
        let _ = writer.flush();
    }
}
