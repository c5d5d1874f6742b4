//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler tags its log lines with a fresh correlation id and delegates the
//! decision to [`AttendanceService`](crate::service::AttendanceService).

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::AttendanceError;
use crate::models::{NewEmployee, RegularizationDraft};

use super::request::{LoginRequest, PunchInRequest, ResolveRequest, SummaryQuery};
use super::response::{ApiError, ApiErrorResponse, ResolutionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/attendance/today", get(today_handler))
        .route("/attendance/punch-in", post(punch_in_handler))
        .route("/attendance/punch-out", post(punch_out_handler))
        .route("/attendance/summary", get(summary_handler))
        .route(
            "/regularizations",
            post(submit_regularization_handler).get(pending_regularizations_handler),
        )
        .route("/regularizations/:id/resolve", post(resolve_handler))
        .route("/employees", get(list_employees_handler).post(add_employee_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: AttendanceError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON body rejection into a 400 with a stable error code.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    let response = ApiErrorResponse::bad_request(error);
    json_response(response.status, response.error)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Best-effort client address from proxy headers.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

async fn identify(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> Result<Identity, Response> {
    let Some(token) = bearer_token(headers) else {
        warn!(correlation_id = %correlation_id, "Missing bearer token");
        return Err(ApiErrorResponse::missing_token().into_response());
    };
    state
        .service()
        .authenticate(token)
        .await
        .map_err(|e| error_response(correlation_id, e))
}

/// Handler for POST /login.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_code = %request.employee_code,
        "Processing login"
    );

    match state
        .service()
        .login(&request.employee_code, &request.password)
        .await
    {
        Ok(outcome) => json_response(StatusCode::OK, outcome),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /logout.
async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let Some(token) = bearer_token(&headers) else {
        return ApiErrorResponse::missing_token().into_response();
    };
    match state.service().logout(token).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /attendance/today.
async fn today_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.service().today(&identity).await {
        Ok(view) => json_response(StatusCode::OK, view),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /attendance/punch-in.
async fn punch_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PunchInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_code = %identity.employee_code,
        "Processing punch-in"
    );

    match state
        .service()
        .punch_in(&identity, request.into(), &client_ip(&headers))
        .await
    {
        Ok(record) => json_response(StatusCode::CREATED, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /attendance/punch-out.
async fn punch_out_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_code = %identity.employee_code,
        "Processing punch-out"
    );

    match state.service().punch_out(&identity).await {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /attendance/summary.
async fn summary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Bad summary query");
            let response =
                ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()));
            return json_response(response.status, response.error);
        }
    };

    match state
        .service()
        .summary(
            &identity,
            query.employee_code.as_deref(),
            query.from,
            query.to,
        )
        .await
    {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /regularizations.
async fn submit_regularization_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegularizationDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_code = %identity.employee_code,
        date = %draft.date,
        "Processing regularization request"
    );

    match state
        .service()
        .submit_regularization(&identity, draft)
        .await
    {
        Ok(request) => json_response(StatusCode::CREATED, request),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /regularizations.
async fn pending_regularizations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.service().pending_regularizations(&identity).await {
        Ok(requests) => json_response(StatusCode::OK, requests),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /regularizations/:id/resolve.
async fn resolve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Bad request id");
            let response = ApiErrorResponse::bad_request(ApiError::validation_error(format!(
                "Invalid request id: {}",
                rejection.body_text()
            )));
            return json_response(response.status, response.error);
        }
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        admin = %identity.employee_code,
        request_id = %id,
        action = ?request.action,
        "Processing regularization resolution"
    );

    match state
        .service()
        .resolve_regularization(&identity, id, request.action)
        .await
    {
        Ok(resolution) => json_response(
            StatusCode::OK,
            ResolutionResponse {
                id,
                status: resolution.status(),
                record: resolution.into_record(),
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.service().list_employees(&identity).await {
        Ok(employees) => json_response(StatusCode::OK, employees),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let identity = match identify(&state, &headers, correlation_id).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let new_employee = match payload {
        Ok(Json(new_employee)) => new_employee,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        admin = %identity.employee_code,
        employee_code = %new_employee.employee_code,
        "Processing add employee"
    );

    match state.service().add_employee(&identity, new_employee).await {
        Ok(profile) => json_response(StatusCode::CREATED, profile),
        Err(err) => error_response(correlation_id, err),
    }
}
