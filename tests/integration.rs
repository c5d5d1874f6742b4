//! Integration tests for the attendance HTTP API.
//!
//! This test suite drives the router end to end against the shipped
//! configuration and a fixed clock:
//! - Login, logout and bearer authentication
//! - Punch-in lateness and the once-per-day rule
//! - The punch-out time gate
//! - Regularization submit, approve and reject
//! - Admin-only endpoints
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, FixedOffset};
use serde_json::{Value, json};
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::clock::FixedClock;
use attendance_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

async fn create_router_for_test(now: &str) -> (Router, Arc<FixedClock>) {
    let config = ConfigLoader::load("./config/attendance").expect("Failed to load config");
    let clock = Arc::new(FixedClock::new(at(now)));
    let state = AppState::in_memory(&config, clock.clone())
        .await
        .expect("Failed to build state");
    (create_router(state), clock)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn login(router: &Router, code: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/login",
        None,
        Some(json!({"employee_code": code, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["session_token"].as_str().unwrap().to_string()
}

fn punch_in_body() -> Value {
    json!({
        "photo": "photos/39466-2024-01-01.jpg",
        "location": {"latitude": 19.0760, "longitude": 72.8777, "address": "Nariman Point, Mumbai"}
    })
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_first_login_flag() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let (status, body) = send(
        &router,
        "POST",
        "/login",
        None,
        Some(json!({"employee_code": "39466", "password": "Aditya@123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_login_of_day"], true);
    assert_eq!(body["today_status"], "not_punched_in");
    assert_eq!(body["employee"]["name"], "Aditya");
    assert_eq!(body["employee"]["is_admin"], false);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let (status, body) = send(
        &router,
        "POST",
        "/login",
        None,
        Some(json!({"employee_code": "39466", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_employee() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let (status, body) = send(
        &router,
        "POST",
        "/login",
        None,
        Some(json!({"employee_code": "77777", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;

    let (status, _) = send(&router, "POST", "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, "GET", "/attendance/today", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_missing_bearer_token() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let (status, body) = send(&router, "GET", "/attendance/today", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// =============================================================================
// Punch-in / punch-out
// =============================================================================

#[tokio::test]
async fn test_on_time_punch_in() {
    let (router, _) = create_router_for_test("2024-01-01T09:15:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;

    let (status, body) = send(
        &router,
        "POST",
        "/attendance/punch-in",
        Some(&token),
        Some(punch_in_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "P");
    assert_eq!(body["time"], "09:15:00");
    assert_eq!(body["date"], "2024-01-01");
    assert_eq!(body["location"]["address"], "Nariman Point, Mumbai");
}

#[tokio::test]
async fn test_late_punch_in_at_ten() {
    let (router, _) = create_router_for_test("2024-01-01T10:00:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;

    let (status, body) = send(
        &router,
        "POST",
        "/attendance/punch-in",
        Some(&token),
        Some(punch_in_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PL");

    let (_, today) = send(&router, "GET", "/attendance/today", Some(&token), None).await;
    assert_eq!(today["status"], "present_late");
    assert_eq!(today["can_punch_in"], false);
}

#[tokio::test]
async fn test_second_punch_in_rejected() {
    let (router, clock) = create_router_for_test("2024-01-01T09:15:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;
    send(&router, "POST", "/attendance/punch-in", Some(&token), Some(punch_in_body())).await;

    clock.set(at("2024-01-01T12:00:00+05:30"));
    let (status, body) = send(
        &router,
        "POST",
        "/attendance/punch-in",
        Some(&token),
        Some(punch_in_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_PUNCHED_IN");
}

#[tokio::test]
async fn test_punch_out_time_gate() {
    let (router, clock) = create_router_for_test("2024-01-01T09:15:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;
    send(&router, "POST", "/attendance/punch-in", Some(&token), Some(punch_in_body())).await;

    clock.set(at("2024-01-01T18:29:59+05:30"));
    let (status, body) = send(&router, "POST", "/attendance/punch-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PUNCH_OUT_TOO_EARLY");
    assert_eq!(body["message"], "You can only punch out after 6:30 PM");

    clock.set(at("2024-01-01T18:30:00+05:30"));
    let (status, body) = send(&router, "POST", "/attendance/punch-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logout_time"], "18:30:00");

    let (status, body) = send(&router, "POST", "/attendance/punch-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_PUNCHED_OUT");
}

#[tokio::test]
async fn test_punch_out_without_punch_in() {
    let (router, _) = create_router_for_test("2024-01-01T19:00:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;
    let (status, body) = send(&router, "POST", "/attendance/punch-out", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_PUNCHED_IN");
}

#[tokio::test]
async fn test_punch_in_missing_location() {
    let (router, _) = create_router_for_test("2024-01-01T09:15:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;
    let (status, body) = send(
        &router,
        "POST",
        "/attendance/punch-in",
        Some(&token),
        Some(json!({"photo": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_client_ip_recorded_from_forwarded_header() {
    let (router, _) = create_router_for_test("2024-01-01T09:15:00+05:30").await;
    let token = login(&router, "39466", "Aditya@123").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/attendance/punch-in")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .header("X-Forwarded-For", "203.0.113.7")
                .body(Body::from(punch_in_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ip_address"], "203.0.113.7");
}

// =============================================================================
// Regularization
// =============================================================================

#[tokio::test]
async fn test_regularization_approve_flow() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;
    let admin = login(&router, "00000", "admin001").await;

    let (status, request) = send(
        &router,
        "POST",
        "/regularizations",
        Some(&employee),
        Some(json!({
            "date": "2024-01-02",
            "login_time": "09:00",
            "logout_time": "18:30",
            "reason": "Camera failed"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["status"], "pending");
    let id = request["id"].as_str().unwrap().to_string();

    let (status, pending) = send(&router, "GET", "/regularizations", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, resolved) = send(
        &router,
        "POST",
        &format!("/regularizations/{}/resolve", id),
        Some(&admin),
        Some(json!({"action": "approve"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "approved");
    assert_eq!(resolved["record"]["status"], "R");
    assert_eq!(resolved["record"]["time"], "09:00");
    assert_eq!(resolved["record"]["logout_time"], "18:30");
    assert_eq!(resolved["record"]["photo"], "");
    assert_eq!(resolved["record"]["location"]["latitude"], 0.0);

    let (_, pending) = send(&router, "GET", "/regularizations", Some(&admin), None).await;
    assert!(pending.as_array().unwrap().is_empty());

    let (status, summary) = send(
        &router,
        "GET",
        "/attendance/summary?from=2024-01-01&to=2024-01-03",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["days"][1]["mark"], "regularized");
    assert_eq!(summary["totals"]["regularized"], 1);
    assert_eq!(summary["totals"]["absent"], 1);
}

#[tokio::test]
async fn test_regularization_reject_flow() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;
    let admin = login(&router, "00000", "admin001").await;

    let (_, request) = send(
        &router,
        "POST",
        "/regularizations",
        Some(&employee),
        Some(json!({"date": "2024-01-02", "reason": "Forgot"})),
    )
    .await;
    assert_eq!(request["login_time"], "09:30");
    assert_eq!(request["logout_time"], "18:30");
    let id = request["id"].as_str().unwrap().to_string();

    let (status, resolved) = send(
        &router,
        "POST",
        &format!("/regularizations/{}/resolve", id),
        Some(&admin),
        Some(json!({"action": "reject"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "rejected");
    assert!(resolved.get("record").is_none());

    let (status, body) = send(
        &router,
        "POST",
        &format!("/regularizations/{}/resolve", id),
        Some(&admin),
        Some(json!({"action": "reject"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REGULARIZATION_NOT_FOUND");
}

#[tokio::test]
async fn test_duplicate_pending_regularization() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;
    let body = json!({"date": "2024-01-02", "reason": "Camera failed"});

    let (status, _) = send(&router, "POST", "/regularizations", Some(&employee), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(&router, "POST", "/regularizations", Some(&employee), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_REGULARIZATION");
}

#[tokio::test]
async fn test_regularization_blank_reason() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;
    let (status, body) = send(
        &router,
        "POST",
        "/regularizations",
        Some(&employee),
        Some(json!({"date": "2024-01-02", "reason": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REGULARIZATION");
}

#[tokio::test]
async fn test_resolve_with_malformed_id() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let admin = login(&router, "00000", "admin001").await;
    let (status, body) = send(
        &router,
        "POST",
        "/regularizations/not-a-uuid/resolve",
        Some(&admin),
        Some(json!({"action": "approve"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_employee_cannot_use_admin_endpoints() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;

    for (method, uri) in [("GET", "/employees"), ("GET", "/regularizations")] {
        let (status, body) = send(&router, method, uri, Some(&employee), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_admin_adds_employee_who_can_log_in() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let admin = login(&router, "00000", "admin001").await;

    let new_employee = json!({
        "employee_code": "40001",
        "name": "Priya",
        "email": "priya@example.com",
        "password": "Priya@123"
    });
    let (status, body) = send(&router, "POST", "/employees", Some(&admin), Some(new_employee.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["employee_code"], "40001");
    assert_eq!(body["is_admin"], false);

    let (status, body) = send(&router, "POST", "/employees", Some(&admin), Some(new_employee)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMPLOYEE_EXISTS");

    login(&router, "40001", "Priya@123").await;

    let (status, employees) = send(&router, "GET", "/employees", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = employees
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employee_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["00000", "39466", "40001"]);
}

#[tokio::test]
async fn test_admin_reads_other_summary() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let admin = login(&router, "00000", "admin001").await;
    let employee = login(&router, "39466", "Aditya@123").await;

    let (status, summary) = send(
        &router,
        "GET",
        "/attendance/summary?from=2024-01-01&to=2024-01-05&employee_code=39466",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["employee_code"], "39466");
    assert_eq!(summary["totals"]["absent"], 2);
    assert_eq!(summary["days"][2]["mark"], "pending");
    assert_eq!(summary["days"][4]["mark"], "upcoming");

    let (status, _) = send(
        &router,
        "GET",
        "/attendance/summary?from=2024-01-01&to=2024-01-05&employee_code=00000",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_summary_reversed_range() {
    let (router, _) = create_router_for_test("2024-01-03T10:00:00+05:30").await;
    let employee = login(&router, "39466", "Aditya@123").await;
    let (status, body) = send(
        &router,
        "GET",
        "/attendance/summary?from=2024-01-05&to=2024-01-01",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let (router, _) = create_router_for_test("2024-01-01T09:00:00+05:30").await;
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}
