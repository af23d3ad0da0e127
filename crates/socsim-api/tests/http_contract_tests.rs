// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Contract tests for the simulator HTTP API
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot` and check
//! status codes, JSON bodies, and session cookies.

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use socsim_api::{create_http_server, ApiState};
use socsim_chip::ChipEngineFactory;
use socsim_services::{SessionMode, TelemetryServiceImpl};
use socsim_session_registry::{SessionRegistry, SessionToken};
use std::sync::Arc;
use tower::ServiceExt;

const CHIPSET: &str = "Snapdragon 8 Elite (Gen 5)";
const COOKIE_NAME: &str = "device_id";

struct TestApp {
    router: Router,
    service: Arc<TelemetryServiceImpl>,
}

fn build_app(mode: SessionMode) -> TestApp {
    let registry = Arc::new(SessionRegistry::new(ChipEngineFactory::deterministic()));
    let service = Arc::new(TelemetryServiceImpl::new(registry, CHIPSET, mode));
    let router = create_http_server(ApiState::new(service.clone(), COOKIE_NAME));
    TestApp { router, service }
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    json: Value,
    text: String,
}

async fn send(app: &TestApp, method: &str, uri: &str, device_id: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = device_id {
        builder = builder.header(COOKIE, format!("{}={}", COOKIE_NAME, id));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));

    TestResponse {
        status,
        headers,
        json,
        text,
    }
}

fn device_id(response: &TestResponse) -> String {
    response.json["device_id"].as_str().unwrap().to_string()
}

// ============================================================================
// TELEMETRY
// ============================================================================

#[tokio::test]
async fn test_first_telemetry_issues_session_cookie() {
    let app = build_app(SessionMode::PerDevice);
    let response = send(&app, "GET", "/telemetry", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.json;
    assert_eq!(body["chipset"], CHIPSET);
    assert_eq!(body["power_mode"], "Balance");
    assert_eq!(body["thermal_status"], "OPTIMAL");

    let battery = body["battery"].as_f64().unwrap();
    assert!((99.8..=99.9).contains(&battery), "battery {}", battery);
    assert_eq!(body["global_temp"].as_f64().unwrap(), 40.4);

    let cores = body["cores"].as_array().unwrap();
    assert_eq!(cores.len(), 8);
    for (i, core) in cores.iter().enumerate() {
        assert_eq!(core["id"], i as u64);
        let expected = if i < 2 { "Prime" } else { "Performance" };
        assert_eq!(core["type"], expected);
        assert!(core["speed"].is_number());
        assert!(core["temp"].is_number());
    }
    assert_eq!(cores[0]["speed"].as_f64().unwrap(), 3.53);
    assert_eq!(cores[7]["speed"].as_f64().unwrap(), 2.8);

    let id = device_id(&response);
    let cookie = response.headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    assert_eq!(cookie, format!("device_id={}; Path=/; HttpOnly; SameSite=Lax", id));
}

#[tokio::test]
async fn test_cookie_reuses_device() {
    let app = build_app(SessionMode::PerDevice);
    let first = send(&app, "GET", "/telemetry", None).await;
    let id = device_id(&first);

    let second = send(&app, "GET", "/telemetry", Some(&id)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.headers.get(SET_COOKIE).is_none());
    assert_eq!(device_id(&second), id);
    assert_eq!(second.json["battery"].as_f64().unwrap(), 99.7);
    assert_eq!(app.service.registry().session_count(), 1);
}

#[tokio::test]
async fn test_unknown_cookie_gets_new_device() {
    let app = build_app(SessionMode::PerDevice);
    let response = send(&app, "GET", "/telemetry", Some("forged-token")).await;

    assert_eq!(response.status, StatusCode::OK);
    let id = device_id(&response);
    assert_ne!(id, "forged-token");
    assert!(response.headers.get(SET_COOKIE).is_some());
    assert!(!app.service.registry().contains(&SessionToken::from("forged-token")));
}

// ============================================================================
// SET MODE
// ============================================================================

#[tokio::test]
async fn test_set_mode_switches_callers_chip() {
    let app = build_app(SessionMode::PerDevice);
    let id = device_id(&send(&app, "GET", "/telemetry", None).await);

    let response = send(&app, "POST", "/set_mode?mode=High%20Performance", Some(&id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json, json!({"status": "Successfully switched to High Performance"}));

    let reading = send(&app, "GET", "/telemetry", Some(&id)).await;
    assert_eq!(reading.json["power_mode"], "High Performance");
    assert_eq!(reading.json["cores"][0]["speed"].as_f64().unwrap(), 4.32);
}

#[tokio::test]
async fn test_set_mode_rejects_unknown_and_missing_mode() {
    let app = build_app(SessionMode::PerDevice);
    let id = device_id(&send(&app, "GET", "/telemetry", None).await);
    let expected = json!({
        "detail": "Invalid mode. Choose from ['High Performance', 'Balance']",
        "code": "INVALID_INPUT"
    });

    for uri in ["/set_mode?mode=Turbo", "/set_mode?mode=Battery%20Saver", "/set_mode"] {
        let response = send(&app, "POST", uri, Some(&id)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.json, expected, "{}", uri);
    }
}

#[tokio::test]
async fn test_set_mode_blocked_on_low_battery() {
    let app = build_app(SessionMode::PerDevice);
    let id = device_id(&send(&app, "GET", "/telemetry", None).await);
    app.service
        .registry()
        .with_engine(&SessionToken::from(id.as_str()), |engine| engine.set_battery_percent(18.0))
        .unwrap();

    let response = send(&app, "POST", "/set_mode?mode=High+Performance", Some(&id)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json["detail"],
        "Cannot switch to performance modes: Battery below 20%"
    );
}

#[tokio::test]
async fn test_set_mode_without_session() {
    let app = build_app(SessionMode::PerDevice);

    for cookie in [None, Some("stale")] {
        let response = send(&app, "POST", "/set_mode?mode=Balance", cookie).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json["detail"], "No active session found");
    }
    assert_eq!(app.service.registry().session_count(), 0);
}

// ============================================================================
// REBOOT & ISOLATION
// ============================================================================

#[tokio::test]
async fn test_reboot_restores_factory_state() {
    let app = build_app(SessionMode::PerDevice);
    let id = device_id(&send(&app, "GET", "/telemetry", None).await);
    send(&app, "POST", "/set_mode?mode=High%20Performance", Some(&id)).await;
    for _ in 0..3 {
        send(&app, "GET", "/telemetry", Some(&id)).await;
    }

    let response = send(&app, "POST", "/reboot", Some(&id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json, json!({"status": "SoC Rebooted"}));

    let reading = send(&app, "GET", "/telemetry", Some(&id)).await;
    assert_eq!(reading.json["power_mode"], "Balance");
    assert_eq!(reading.json["global_temp"].as_f64().unwrap(), 40.4);
    assert_eq!(device_id(&reading), id);
}

#[tokio::test]
async fn test_reboot_without_session_is_ok() {
    let app = build_app(SessionMode::PerDevice);
    for cookie in [None, Some("nobody")] {
        let response = send(&app, "POST", "/reboot", cookie).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json["status"], "SoC Rebooted");
    }
}

#[tokio::test]
async fn test_devices_are_isolated() {
    let app = build_app(SessionMode::PerDevice);
    let a = device_id(&send(&app, "GET", "/telemetry", None).await);
    let b = device_id(&send(&app, "GET", "/telemetry", None).await);
    assert_ne!(a, b);

    send(&app, "POST", "/set_mode?mode=High%20Performance", Some(&a)).await;

    let reading_a = send(&app, "GET", "/telemetry", Some(&a)).await;
    let reading_b = send(&app, "GET", "/telemetry", Some(&b)).await;
    assert_eq!(reading_a.json["power_mode"], "High Performance");
    assert_eq!(reading_b.json["power_mode"], "Balance");
}

// ============================================================================
// SHARED MODE
// ============================================================================

#[tokio::test]
async fn test_shared_mode_has_no_cookies() {
    let app = build_app(SessionMode::Shared);

    let first = send(&app, "GET", "/telemetry", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.headers.get(SET_COOKIE).is_none());
    assert!(first.json.get("device_id").is_none());

    let response = send(&app, "POST", "/set_mode?mode=High%20Performance", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let second = send(&app, "GET", "/telemetry", Some("whatever")).await;
    assert_eq!(second.json["power_mode"], "High Performance");
}

// ============================================================================
// STATIC ROUTES
// ============================================================================

#[tokio::test]
async fn test_dashboard_served() {
    let app = build_app(SessionMode::PerDevice);
    let response = send(&app, "GET", "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text.contains("core-grid"));
    assert!(response.text.contains("/telemetry"));
    assert_eq!(app.service.registry().session_count(), 0);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = build_app(SessionMode::PerDevice);
    let response = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let paths = response.json["paths"].as_object().unwrap();
    for path in ["/", "/telemetry", "/set_mode", "/reboot"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_app(SessionMode::PerDevice);
    let response = send(&app, "GET", "/v1/nothing", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json["detail"], "Not Found");
}
