// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Response};

use crate::common::{attach_session_cookie, session_token_from_headers, ApiError, ApiResult};
use crate::dtos::TelemetryResponse;
use crate::transports::http::server::ApiState;

/// Advance the caller's chip by one tick and return the reading
///
/// A client without a known session cookie gets a new device and a
/// `Set-Cookie` header for it.
#[utoipa::path(
    get,
    path = "/telemetry",
    responses(
        (status = 200, description = "Telemetry after one simulation tick", body = TelemetryResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "telemetry"
)]
pub async fn get_telemetry(State(state): State<ApiState>, headers: HeaderMap) -> ApiResult<Response> {
    let token = session_token_from_headers(&headers, &state.session_cookie);
    let reading = state.telemetry_service.telemetry(token).await?;

    let body = TelemetryResponse::from_reading(state.telemetry_service.chipset(), &reading);
    let mut response = Json(body).into_response();

    if reading.is_new {
        if let Some(token) = &reading.token {
            attach_session_cookie(response.headers_mut(), &state.session_cookie, token)?;
        }
    }

    Ok(response)
}
