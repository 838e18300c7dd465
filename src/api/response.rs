//! Response types for the meetup engine API.
//!
//! This module defines the success payloads that are not plain engine
//! models, plus the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::export::maps_url;
use crate::models::{CalendarMonth, EventInstance};

/// Body of `GET /calendar/:year/:month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthResponse {
    /// The requested month.
    pub month: CalendarMonth,
    /// Display label, e.g. "January 2026".
    pub label: String,
    /// Every date shown on the Sunday-first grid.
    pub grid: Vec<NaiveDate>,
    /// Instances falling on grid dates, ordered by start.
    pub instances: Vec<InstanceView>,
}

/// An event instance as listed on the month calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceView {
    /// The expanded instance.
    #[serde(flatten)]
    pub instance: EventInstance,
    /// Map search link for the venue; absent for TBA meetups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

impl InstanceView {
    /// Pairs `instance` with a map link built from `maps_search_base`.
    pub fn new(instance: EventInstance, maps_search_base: &str) -> Self {
        let link = if instance.is_tba {
            None
        } else {
            maps_url(
                maps_search_base,
                instance.venue_name.as_deref(),
                instance.venue_address.as_deref(),
            )
        };
        Self {
            instance,
            maps_url: link,
        }
    }
}

/// Body of `GET /events/:instance_id/calendar-link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarLinkResponse {
    /// Prefilled "add event" URL.
    pub url: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    "Months are numbered 1 to 12 and years 1 to 9999",
                ),
            },
            EngineError::EventNotFound { instance_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "EVENT_NOT_FOUND",
                    message,
                    format!("No listed meetup produces the instance '{}'", instance_id),
                ),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidRule { .. }
            | EngineError::UnknownTimezone { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::UnresolvableWallClock { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALENDAR_ERROR", "Calendar expansion failed", message),
            },
            EngineError::ExportError { .. } | EngineError::DocumentStoreError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
                }
            }
        }
    }
}
