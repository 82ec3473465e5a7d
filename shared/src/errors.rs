//! Error types shared across the application

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the aggregation engine.
///
/// Only range construction can fail. Missing or partial data (no events on a
/// day, an absent calorie goal, a zero hydration goal) is handled by
/// substituting zero-valued defaults, never by returning an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid month identifier '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

/// Rejection of a raw event record at the ingestion boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("invalid {kind} record: {reason}")]
    Invalid { kind: &'static str, reason: String },
}

impl EventParseError {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            reason: reason.into(),
        }
    }
}
