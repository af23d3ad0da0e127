// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service implementations.
*/

pub mod telemetry_service_impl;

pub use telemetry_service_impl::TelemetryServiceImpl;
