// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");

/// Live monitor page; polls `/telemetry` once per second
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Dashboard HTML", body = String, content_type = "text/html")
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
