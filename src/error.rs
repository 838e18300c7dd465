//! Error types for the meetup engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading the directory, expanding
//! recurring meetups, or exporting calendar documents.
//!
//! Pay calculator input problems are deliberately *not* represented here:
//! a malformed clock time produces a not-ok [`DayCalc`](crate::models::DayCalc)
//! carrying human-readable messages instead.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// The main error type for the meetup engine.
///
/// # Example
///
/// ```
/// use meetup_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/site.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/site.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A recurrence rule failed validation.
    #[error("Invalid recurrence rule '{rule_id}': {message}")]
    InvalidRule {
        /// The id of the recurring event owning the rule.
        rule_id: String,
        /// What made the rule invalid.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-based).
        month: u32,
    },

    /// The configured timezone is not a known IANA zone.
    #[error("Unknown timezone: {name}")]
    UnknownTimezone {
        /// The timezone name as configured.
        name: String,
    },

    /// A wall-clock time could not be mapped to an instant in the zone.
    #[error("Wall-clock time {date} {time} cannot be resolved in {timezone}")]
    UnresolvableWallClock {
        /// The calendar date.
        date: NaiveDate,
        /// The time of day.
        time: NaiveTime,
        /// The timezone name.
        timezone: String,
    },

    /// No event instance with the given id could be produced.
    #[error("Event not found: {instance_id}")]
    EventNotFound {
        /// The instance id that was looked up.
        instance_id: String,
    },

    /// Building an export document or link failed.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },

    /// The document store refused to publish or release a document.
    #[error("Document store error: {message}")]
    DocumentStoreError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
