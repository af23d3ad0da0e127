// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service trait definitions.
*/

pub mod telemetry_service;

pub use telemetry_service::TelemetryService;
