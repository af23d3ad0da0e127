// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// SoC Simulator REST API Layer
//
// Thin HTTP adapter over the TelemetryService trait. Session tokens travel
// in a cookie; everything else is decided by the service layer.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod dtos;
pub mod endpoints;
pub mod middleware;
pub mod openapi;
pub mod transports;

pub use common::{ApiError, ApiErrorCode, ApiResult};
pub use transports::http::server::{create_http_server, ApiState};
