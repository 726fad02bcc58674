//! HTTP request handlers for the store calendar API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{copy_config, resolve, resolve_range, validate_config};
use crate::error::{CalendarError, CalendarResult};
use crate::models::{Holiday, StoreCalendarConfig};

use super::request::{CopyRequest, DaysQuery, MAX_RANGE_DAYS, TenantQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/stores/:store_id/calendar",
            get(get_calendar_handler).put(put_calendar_handler),
        )
        .route("/stores/:store_id/calendar/days", get(resolve_range_handler))
        .route("/stores/:store_id/calendar/days/:date", get(resolve_day_handler))
        .route("/stores/:store_id/calendar/copy", post(copy_calendar_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: impl Into<ApiErrorResponse>) -> Response {
    let api_error = error.into();
    json_response(api_error.status, &api_error.error)
}

fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    ApiErrorResponse::bad_request(error)
}

fn query_rejection_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::invalid_request(body_text))
}

/// Loads the holidays of a tenant for every year in `from..=to`.
async fn holidays_for_range(
    state: &AppState,
    tenant_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> CalendarResult<Vec<Holiday>> {
    let mut holidays = Vec::new();
    for year in from.year()..=to.year() {
        holidays.extend(state.holidays().load_holidays(tenant_id, year).await?);
    }
    Ok(holidays)
}

/// Handler for GET /stores/:store_id/calendar.
///
/// Returns the stored configuration, or the defaults if none was saved yet.
async fn get_calendar_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, store_id = %store_id, "Loading calendar");

    match state.store().load_or_default(&store_id).await {
        Ok(config) => json_response(StatusCode::OK, &config),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                error = %err,
                "Loading calendar failed"
            );
            error_response(err)
        }
    }
}

/// Handler for PUT /stores/:store_id/calendar.
///
/// Validates and saves a full configuration document. The store id in the
/// path replaces the one in the body.
async fn put_calendar_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    payload: Result<Json<StoreCalendarConfig>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, store_id = %store_id, "Saving calendar");

    let mut config = match payload {
        Ok(Json(config)) => config,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };
    config.store_id = store_id.clone();

    if let Err(err) = validate_config(&config) {
        warn!(
            correlation_id = %correlation_id,
            store_id = %store_id,
            error = %err,
            "Rejected invalid calendar"
        );
        return error_response(CalendarError::from(err));
    }
    config.sort_slots();

    match state.store().save_config(&config).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                overrides = config.overrides.len(),
                "Calendar saved"
            );
            json_response(StatusCode::OK, &config)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                error = %err,
                "Saving calendar failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /stores/:store_id/calendar/days.
///
/// Resolves every date of an inclusive range against the store's
/// configuration and the tenant's holidays.
async fn resolve_range_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return error_response(query_rejection_error(correlation_id, rejection)),
    };
    info!(
        correlation_id = %correlation_id,
        store_id = %store_id,
        from = %query.from,
        to = %query.to,
        "Resolving calendar range"
    );

    if (query.to - query.from).num_days() >= MAX_RANGE_DAYS {
        return error_response(ApiErrorResponse::bad_request(ApiError::invalid_request(
            format!("Date range may cover at most {} days", MAX_RANGE_DAYS),
        )));
    }

    let result = async {
        let config = state.store().load_or_default(&store_id).await?;
        let holidays = holidays_for_range(&state, query.tenant(), query.from, query.to).await?;
        resolve_range(query.from, query.to, &config, &holidays)
    }
    .await;

    match result {
        Ok(days) => json_response(StatusCode::OK, &days),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                error = %err,
                "Resolving calendar range failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /stores/:store_id/calendar/days/:date.
async fn resolve_day_handler(
    State(state): State<AppState>,
    Path((store_id, date)): Path<(String, String)>,
    query: Result<Query<TenantQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return error_response(query_rejection_error(correlation_id, rejection)),
    };
    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        warn!(correlation_id = %correlation_id, date = %date, "Invalid date in path");
        return error_response(ApiErrorResponse::bad_request(ApiError::invalid_request(
            format!("Invalid date '{}', expected YYYY-MM-DD", date),
        )));
    };
    info!(
        correlation_id = %correlation_id,
        store_id = %store_id,
        date = %date,
        "Resolving calendar day"
    );

    let result = async {
        let config = state.store().load_or_default(&store_id).await?;
        let holidays = state
            .holidays()
            .load_holidays(query.tenant(), date.year())
            .await?;
        resolve(date, &config, &holidays)
    }
    .await;

    match result {
        Ok(day) => json_response(StatusCode::OK, &day),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                error = %err,
                "Resolving calendar day failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /stores/:store_id/calendar/copy.
///
/// Responds 200 when every target was updated and 207 when some were not;
/// the body is the per-target report in both cases.
async fn copy_calendar_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    payload: Result<Json<CopyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };
    info!(
        correlation_id = %correlation_id,
        store_id = %store_id,
        targets = request.target_store_ids.len(),
        "Propagating calendar"
    );

    match copy_config(state.store(), &store_id, &request.target_store_ids).await {
        Ok(report) => {
            let status = if report.is_complete() {
                StatusCode::OK
            } else {
                warn!(
                    correlation_id = %correlation_id,
                    store_id = %store_id,
                    failed = ?report.failed_store_ids(),
                    "Calendar propagation partially failed"
                );
                StatusCode::MULTI_STATUS
            };
            json_response(status, &report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                store_id = %store_id,
                error = %err,
                "Calendar propagation failed"
            );
            error_response(err)
        }
    }
}
