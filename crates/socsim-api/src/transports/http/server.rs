// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// HTTP server implementation (Axum)
//
// Routing, middleware, and shared handler state.

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use socsim_services::{SessionMode, TelemetryService};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::common::ApiError;
use crate::endpoints::{control, dashboard, telemetry};
use crate::middleware::create_cors_layer;
use crate::openapi::ApiDoc;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub telemetry_service: Arc<dyn TelemetryService>,
    /// Name of the cookie carrying the session token
    pub session_cookie: String,
    pub session_mode: SessionMode,
}

impl ApiState {
    pub fn new(telemetry_service: Arc<dyn TelemetryService>, session_cookie: impl Into<String>) -> Self {
        let session_mode = telemetry_service.session_mode();
        Self {
            telemetry_service,
            session_cookie: session_cookie.into(),
            session_mode,
        }
    }
}

/// Create the main HTTP server application
pub fn create_http_server(state: ApiState) -> Router {
    tracing::info!(
        target: "socsim-api",
        "Building HTTP router (sessions: {:?}, cookie: {})",
        state.session_mode,
        state.session_cookie
    );

    Router::new()
        .route("/", get(dashboard::get_dashboard))
        .route("/telemetry", get(telemetry::get_telemetry))
        .route("/set_mode", post(control::post_set_mode))
        .route("/reboot", post(control::post_reboot))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .fallback(|uri: axum::http::Uri| async move {
            tracing::warn!(target: "socsim-api", "Unmatched request - 404 Not Found: {}", uri);
            ApiError::not_found("Not Found")
        })
        .with_state(state)
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        target: "socsim-api",
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    tracing::debug!(target: "socsim-api", "Incoming request: {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        tracing::debug!(
                            target: "socsim-api",
                            "Response: status={}, latency={:?}",
                            response.status(),
                            latency
                        );
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(target: "socsim-api", "Request failed: {}, latency={:?}", error, latency);
                    },
                ),
        )
}
