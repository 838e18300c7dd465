//! HTTP request handlers for the meetup engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_invoice_document, calculate_pay};
use crate::calendar::{build_month_grid, expand_month, find_instance, upcoming_meetups};
use crate::error::EngineError;
use crate::export::{build_ics, google_calendar_url};
use crate::models::CalendarMonth;

use super::request::{CalculateRequest, InvoiceRequest, UpcomingQuery, apply_site_defaults};
use super::response::{
    ApiError, ApiErrorResponse, CalendarLinkResponse, InstanceView, MonthResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calendar/upcoming", get(upcoming_handler))
        .route("/calendar/:year/:month", get(month_handler))
        .route("/events/:instance_id/ics", get(ics_handler))
        .route("/events/:instance_id/calendar-link", get(calendar_link_handler))
        .route("/calculate", post(calculate_handler))
        .route("/invoice", post(invoice_handler))
        .with_state(state)
}

/// Handler for GET /calendar/:year/:month.
///
/// Returns the Sunday-first grid for the month and every meetup instance
/// that falls on it.
async fn month_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path((year, month)) = match path {
        Ok(path) => path,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid month path");
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };
    info!(correlation_id = %correlation_id, year, month, "Processing month request");

    let site = state.site();
    let start_time = Instant::now();
    let result = CalendarMonth::new(year, month).and_then(|month| {
        let maps_base = &site.settings().maps_search_base;
        let instances = expand_month(month, site.events(), site.timezone())?
            .into_iter()
            .map(|instance| InstanceView::new(instance, maps_base))
            .collect();
        Ok(MonthResponse {
            month,
            label: month.label(),
            grid: build_month_grid(month),
            instances,
        })
    });

    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                instances = body.instances.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Month expanded"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => engine_error(correlation_id, err, "Month expansion failed"),
    }
}

/// Handler for GET /calendar/upcoming.
///
/// Accepts an optional `now` query parameter in RFC 3339 form.
async fn upcoming_handler(
    State(state): State<AppState>,
    query: Result<Query<UpcomingQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid upcoming query");
            return ApiErrorResponse::bad_request(ApiError::invalid_query(rejection.body_text()))
                .into_response();
        }
    };

    let now = query.now.unwrap_or_else(Utc::now);
    info!(correlation_id = %correlation_id, now = %now, "Processing upcoming request");

    let site = state.site();
    match upcoming_meetups(
        now,
        site.directory(),
        site.events(),
        site.timezone(),
        &site.settings().region,
    ) {
        Ok(upcoming) => (StatusCode::OK, Json(upcoming)).into_response(),
        Err(err) => engine_error(correlation_id, err, "Upcoming lookup failed"),
    }
}

/// Handler for GET /events/:instance_id/ics.
///
/// Responds with the calendar file as an attachment.
async fn ics_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, instance_id = %instance_id, "Processing ics request");

    let site = state.site();
    let result = find_instance(&instance_id, site.events(), site.timezone()).and_then(|instance| {
        let org = site.directory().find_by_id(&instance.org_id);
        build_ics(&instance, org, site.settings(), Utc::now())
    });

    match result {
        Ok(document) => {
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.mime_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.content,
            )
                .into_response()
        }
        Err(err) => engine_error(correlation_id, err, "ICS export failed"),
    }
}

/// Handler for GET /events/:instance_id/calendar-link.
async fn calendar_link_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        instance_id = %instance_id,
        "Processing calendar link request"
    );

    let site = state.site();
    let result = find_instance(&instance_id, site.events(), site.timezone()).and_then(|instance| {
        let org = site.directory().find_by_id(&instance.org_id);
        google_calendar_url(&instance, org, site.settings())
    });

    match result {
        Ok(url) => (StatusCode::OK, Json(CalendarLinkResponse { url })).into_response(),
        Err(err) => engine_error(correlation_id, err, "Calendar link failed"),
    }
}

/// Handler for POST /calculate endpoint.
///
/// Accepts the pay calculator input and returns every day's result, the
/// invoice totals, and the audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let pay = apply_site_defaults(request, state.site().settings());
    let result = calculate_pay(&pay);
    info!(
        correlation_id = %correlation_id,
        days_count = result.days.len(),
        grand_total = %result.totals.grand_total,
        duration_us = result.audit_trace.duration_us,
        "Calculation completed successfully"
    );
    (StatusCode::OK, Json(result)).into_response()
}

/// Handler for POST /invoice endpoint.
///
/// Runs the calculator on the embedded pay input and lays out the invoice.
/// A missing invoice date defaults to today in the site timezone.
async fn invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice request");

    let mut request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let site = state.site();
    request.pay = apply_site_defaults(request.pay, site.settings());
    let calculation = calculate_pay(&request.pay);
    let today = Utc::now().with_timezone(&site.timezone()).date_naive();
    let document = build_invoice_document(&request, &calculation, today);
    info!(
        correlation_id = %correlation_id,
        invoice_number = %document.invoice_number,
        rows = document.rows.len(),
        grand_total = %document.totals.grand_total,
        "Invoice built"
    );
    (StatusCode::OK, Json(document)).into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError, context: &str) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "{}", context);
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/fwf").expect("Failed to load config");
        AppState::new(config)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_month_returns_grid_and_instances() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/calendar/2026/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "January 2026");
        assert_eq!(json["grid"].as_array().unwrap().len(), 35);
        assert!(!json["instances"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_month_13_is_bad_request() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/calendar/2026/13")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_non_numeric_month_is_bad_request() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/calendar/2026/june")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_instance_is_404() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/events/nobody-meetup-0-2026-01-06/ics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "EVENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_calculate_fills_default_mileage_rate() {
        let router = create_router(create_test_state());
        let body = r#"{ "day_rate": "300", "miles": "40", "days": [] }"#;
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["totals"]["mileage_pay"], "29.00");
    }

    #[tokio::test]
    async fn test_calculate_rejects_syntax_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_requires_json_content_type() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
    }
}
