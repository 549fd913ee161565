use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use lesson_escrow::app_state::AppState;
use lesson_escrow::config::{AppConfig, ResolutionPolicy};
use lesson_escrow::routes;
use lesson_escrow::services::LessonService;

fn app_with(config: AppConfig) -> Router {
    let service = Arc::new(LessonService::from_config(&config));
    routes::app(AppState::new(service))
}

fn app() -> Router {
    app_with(AppConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn approx(value: &Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

#[tokio::test]
async fn health_and_initial_state() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let state = &body["data"];
    assert_eq!(state["status"], "CREATED");
    assert_eq!(
        state["balances"],
        json!({"student": 100.0, "teacher": 0.0, "contract": 0.0, "platform": 0.0})
    );
    assert_eq!(state["logs"], json!([]));
    assert_eq!(state["last_outcome"], Value::Null);
}

#[tokio::test]
async fn fund_defaults_when_body_is_missing() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/fund", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Lesson funded successfully.");
    let state = &body["data"]["state"];
    assert_eq!(state["status"], "FUNDED");
    assert_eq!(state["lesson_price"], 30.0);
    assert_eq!(state["lesson_title"], "Lesson");
    assert!(approx(&state["balances"]["contract"], 30.0));
    assert!(approx(&state["balances"]["student"], 100.0 - 30.03));
}

#[tokio::test]
async fn fund_twice_is_a_conflict() {
    let app = app();
    send(&app, "POST", "/api/fund", Some(json!({"price": 20}))).await;

    let (status, body) = send(&app, "POST", "/api/fund", Some(json!({"price": 20}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Contract already funded.");
}

#[tokio::test]
async fn fund_with_insufficient_funds_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/fund",
        Some(json!({"price": 150, "lesson_title": "Calculus"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient funds. Need 150.15 USD.");

    let (_, body) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(body["data"]["status"], "CREATED");
    assert!(approx(&body["data"]["balances"]["student"], 100.0));
}

#[tokio::test]
async fn fund_rejects_blank_title_and_negative_price() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/fund", Some(json!({"lesson_title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));

    let (status, _) = send(&app, "POST", "/api/fund", Some(json!({"price": -5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn topup_then_fund_expensive_lesson() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/topup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Top-up successful.");
    assert!(approx(&body["data"]["state"]["balances"]["student"], 200.0));
    assert_eq!(
        body["data"]["state"]["logs"][0]["message"],
        "Student wallet topped up by 100 USD."
    );

    let (status, _) = send(&app, "POST", "/api/fund", Some(json!({"price": 150}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/api/topup", Some(json!({"amount": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resolve_happy_path_pays_teacher() {
    let app = app();
    send(&app, "POST", "/api/fund", None).await;

    let (status, body) = send(&app, "POST", "/api/resolve", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["contract_outcome"], "Happy Path: Lesson Completed Successfully.");
    assert_eq!(data["oracle_data"]["teacher_duration"], 60);
    assert_eq!(data["state"]["status"], "COMPLETED");
    assert!(approx(&data["state"]["balances"]["contract"], 0.0));
    assert!(approx(&data["state"]["balances"]["teacher"], 30.0 * 0.98 * 0.999));
    assert!(approx(&data["state"]["balances"]["platform"], 0.6));
    assert_eq!(data["state"]["last_oracle_data"], data["oracle_data"]);
}

#[tokio::test]
async fn resolve_with_scenario_override_refunds_student() {
    let app = app();
    send(&app, "POST", "/api/fund", None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/resolve",
        Some(json!({"scenario": "teacher_no_show"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contract_outcome"], "Teacher No-Show: Student refunded.");
    assert_eq!(body["data"]["state"]["status"], "REFUNDED");
    assert!(approx(
        &body["data"]["state"]["balances"]["student"],
        100.0 - 30.03 + 29.97
    ));

    let (_, body) = send(&app, "GET", "/api/scenario", None).await;
    assert_eq!(body["data"]["scenario"], "teacher_no_show");
}

#[tokio::test]
async fn resolve_without_funding_is_a_conflict() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/resolve", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Contract not in funded state.");
}

#[tokio::test]
async fn unknown_scenario_resolves_as_dispute() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/scenario",
        Some(json!({"scenario": "network_partition"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Scenario set to network_partition");

    send(&app, "POST", "/api/fund", None).await;
    let (_, body) = send(&app, "POST", "/api/resolve", None).await;
    assert_eq!(
        body["data"]["contract_outcome"],
        "Dispute/Irregular: Manual intervention required. (Refunding for MVP)"
    );
    assert_eq!(body["data"]["oracle_data"]["raw_json"], json!({}));
}

#[tokio::test]
async fn scenario_defaults_to_happy_path() {
    let app = app();
    send(&app, "POST", "/api/scenario", Some(json!({"scenario": "random"}))).await;

    let (status, body) = send(&app, "POST", "/api/scenario", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Scenario set to happy_path");
}

#[tokio::test]
async fn override_policy_pays_teacher_on_student_override() {
    let mut config = AppConfig::default();
    config.contract.resolution_policy = ResolutionPolicy::StudentOverride;
    let app = app_with(config);
    send(&app, "POST", "/api/fund", None).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/resolve",
        Some(json!({"scenario": "student_override"})),
    )
    .await;
    assert_eq!(body["data"]["oracle_data"]["student_override"], true);
    assert_eq!(body["data"]["state"]["status"], "COMPLETED");
    assert_eq!(body["data"]["state"]["resolution_policy"], "student_override");
}

#[tokio::test]
async fn reset_restores_initial_state() {
    let app = app();
    send(&app, "POST", "/api/topup", Some(json!({"amount": 50}))).await;
    send(&app, "POST", "/api/fund", None).await;

    let (status, body) = send(&app, "POST", "/api/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "System reset successfully");
    let state = &body["data"]["state"];
    assert_eq!(state["status"], "CREATED");
    assert!(approx(&state["balances"]["student"], 100.0));
    assert_eq!(state["logs"], json!([]));
}

async fn send_raw(app: &Router, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn fund_with_string_price_is_rejected_without_moving_funds() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/fund",
        Some(json!({"price": "80", "lesson_title": "Guitar"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

    let (_, body) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(body["data"]["status"], "CREATED");
    assert!(approx(&body["data"]["balances"]["student"], 100.0));
    assert!(approx(&body["data"]["balances"]["contract"], 0.0));
    assert_eq!(body["data"]["logs"], json!([]));
}

#[tokio::test]
async fn topup_with_non_numeric_amount_is_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/topup", Some(json!({"amount": "five"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/state", None).await;
    assert!(approx(&body["data"]["balances"]["student"], 100.0));
    assert_eq!(body["data"]["logs"], json!([]));
}

#[tokio::test]
async fn resolve_with_invalid_json_leaves_lesson_funded() {
    let app = app();
    send(&app, "POST", "/api/fund", None).await;

    let (status, body) = send_raw(&app, "/api/resolve", r#"{"scenario": teacher_no_show}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(body["data"]["status"], "FUNDED");
    assert!(approx(&body["data"]["balances"]["contract"], 30.0));
    assert!(approx(&body["data"]["balances"]["teacher"], 0.0));
    assert_eq!(body["data"]["last_outcome"], Value::Null);

    let (_, body) = send(&app, "GET", "/api/scenario", None).await;
    assert_eq!(body["data"]["scenario"], "happy_path");
}

#[tokio::test]
async fn scenario_with_wrong_type_is_rejected() {
    let app = app();

    let (status, _) = send(&app, "POST", "/api/scenario", Some(json!({"scenario": 7}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/api/scenario", None).await;
    assert_eq!(body["data"]["scenario"], "happy_path");
}

#[tokio::test]
async fn whitespace_body_still_uses_defaults() {
    let app = app();

    let (status, body) = send_raw(&app, "/api/topup", "  \n").await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["data"]["state"]["balances"]["student"], 200.0));
}
