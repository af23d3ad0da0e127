// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Hardware override endpoints (mode switch, reboot)

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;

use crate::common::{session_token_from_headers, ApiError, ApiResult};
use crate::dtos::{SetModeParams, StatusResponse};
use crate::transports::http::server::ApiState;

/// Request a power-mode change for the caller's chip
///
/// A missing `mode` is rejected like any other unknown mode.
#[utoipa::path(
    post,
    path = "/set_mode",
    params(SetModeParams),
    responses(
        (status = 200, description = "Mode switched", body = StatusResponse),
        (status = 400, description = "Invalid mode, low battery, or no active session", body = ApiError)
    ),
    tag = "control"
)]
pub async fn post_set_mode(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(params): Query<SetModeParams>,
) -> ApiResult<Json<StatusResponse>> {
    let token = session_token_from_headers(&headers, &state.session_cookie);
    let mode = params.mode.as_deref().unwrap_or_default();

    let status = state.telemetry_service.set_mode(token, mode).await?;
    Ok(Json(StatusResponse::new(status)))
}

/// Restore the caller's chip to factory state
///
/// Always succeeds; without a known session nothing changes.
#[utoipa::path(
    post,
    path = "/reboot",
    responses(
        (status = 200, description = "Chip rebooted", body = StatusResponse)
    ),
    tag = "control"
)]
pub async fn post_reboot(State(state): State<ApiState>, headers: HeaderMap) -> ApiResult<Json<StatusResponse>> {
    let token = session_token_from_headers(&headers, &state.session_cookie);
    state.telemetry_service.reboot(token).await?;
    Ok(Json(StatusResponse::new("SoC Rebooted")))
}
