// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios through the fully wired application

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use socsim::config::SocsimConfig;
use socsim::{build_app, SocsimApp};
use tower::ServiceExt;

fn seeded_app(seed: u64) -> SocsimApp {
    let mut config = SocsimConfig::default();
    config.simulation.seed = Some(seed);
    build_app(&config)
}

async fn call(app: &SocsimApp, method: &str, uri: &str, cookie: Option<&str>) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let response = app
        .router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, set_cookie, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_high_performance_run_ends_in_throttling() {
    let app = seeded_app(7);
    let (_, cookie, first) = call(&app, "GET", "/telemetry", None).await;
    let cookie = cookie.unwrap();
    assert_eq!(first["thermal_status"], "OPTIMAL");

    let (status, _, _) = call(&app, "POST", "/set_mode?mode=High%20Performance", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    let mut previous = first;
    let mut throttled = None;
    for _ in 0..60 {
        let (_, _, reading) = call(&app, "GET", "/telemetry", Some(&cookie)).await;
        if reading["thermal_status"] == "THROTTLING" {
            throttled = Some(reading);
            break;
        }
        previous = reading;
    }

    let reading = throttled.expect("chip never throttled");
    assert!(previous["global_temp"].as_f64().unwrap() >= 85.0);
    assert_eq!(reading["power_mode"], "High Performance");
    for core in reading["cores"].as_array().unwrap() {
        let speed = core["speed"].as_f64().unwrap();
        if core["type"] == "Prime" {
            assert!((1.77..=1.83).contains(&speed), "prime clock {}", speed);
        } else {
            assert!((1.37..=1.43).contains(&speed), "performance clock {}", speed);
        }
    }
}

#[tokio::test]
async fn test_two_devices_drain_independently() {
    let app = seeded_app(11);
    let (_, a, _) = call(&app, "GET", "/telemetry", None).await;
    let (_, b, _) = call(&app, "GET", "/telemetry", None).await;
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a, b);

    call(&app, "POST", "/set_mode?mode=High%20Performance", Some(&a)).await;
    let mut last_a = Value::Null;
    let mut last_b = Value::Null;
    for _ in 0..10 {
        last_a = call(&app, "GET", "/telemetry", Some(&a)).await.2;
        last_b = call(&app, "GET", "/telemetry", Some(&b)).await.2;
    }

    assert!(last_a["battery"].as_f64().unwrap() < last_b["battery"].as_f64().unwrap());
    assert!(last_a["global_temp"].as_f64().unwrap() > last_b["global_temp"].as_f64().unwrap());

    call(&app, "POST", "/reboot", Some(&a)).await;
    let (_, _, rebooted) = call(&app, "GET", "/telemetry", Some(&a)).await;
    assert_eq!(rebooted["power_mode"], "Balance");
    assert!(rebooted["battery"].as_f64().unwrap() > last_b["battery"].as_f64().unwrap());
}
