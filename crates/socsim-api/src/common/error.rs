// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    PolicyViolation,
    SessionNotFound,
    Internal,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput | Self::PolicyViolation | Self::SessionNotFound => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error type (FastAPI-compatible: the message lives in `detail`)
#[derive(Debug, Error, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error message
    pub detail: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail).with_code(ApiErrorCode::NotFound)
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(detail).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(detail).with_code(ApiErrorCode::Internal)
    }

    /// HTTP status for this error; uncoded errors are client errors
    pub fn status(&self) -> StatusCode {
        self.code.map_or(StatusCode::BAD_REQUEST, |code| code.status())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "socsim-api", "Request failed: {}", self.detail);
        } else {
            tracing::debug!(target: "socsim-api", "Rejected request ({}): {}", status, self.detail);
        }
        (status, Json(self)).into_response()
    }
}

/// Convert service layer errors to API errors
impl From<socsim_services::ServiceError> for ApiError {
    fn from(err: socsim_services::ServiceError) -> Self {
        use socsim_services::ServiceError;

        let detail = err.to_string();
        match err {
            ServiceError::InvalidMode(_) => ApiError::new(detail).with_code(ApiErrorCode::InvalidInput),
            ServiceError::PowerPolicyViolation(_) => {
                ApiError::new(detail).with_code(ApiErrorCode::PolicyViolation)
            }
            ServiceError::SessionNotFound => ApiError::new(detail).with_code(ApiErrorCode::SessionNotFound),
            ServiceError::Internal(_) => ApiError::new(detail).with_code(ApiErrorCode::Internal),
        }
    }
}
