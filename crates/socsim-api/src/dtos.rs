// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wire DTOs for the HTTP surface

use serde::{Deserialize, Serialize};
use socsim_services::{ChipSnapshot, SessionTelemetry};
use utoipa::{IntoParams, ToSchema};

/// One core as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoreTelemetry {
    pub id: u8,
    /// `"Prime"` or `"Performance"`
    #[serde(rename = "type")]
    pub core_type: String,
    /// Clock in GHz (2 decimals)
    pub speed: f64,
    /// Temperature in °C (1 decimal)
    pub temp: f64,
}

/// Response of `GET /telemetry`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TelemetryResponse {
    pub chipset: String,
    /// Battery percentage (1 decimal)
    pub battery: f64,
    pub power_mode: String,
    /// `"OPTIMAL"` or `"THROTTLING"`
    pub thermal_status: String,
    /// Die temperature in °C (1 decimal)
    pub global_temp: f64,
    pub cores: Vec<CoreTelemetry>,
    /// Session token, per-device mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl TelemetryResponse {
    pub fn from_snapshot(chipset: &str, snapshot: &ChipSnapshot) -> Self {
        Self {
            chipset: chipset.to_string(),
            battery: snapshot.battery_percent,
            power_mode: snapshot.power_mode.as_str().to_string(),
            thermal_status: snapshot.thermal_status().to_string(),
            global_temp: snapshot.global_temp_c,
            cores: snapshot
                .cores
                .iter()
                .map(|core| CoreTelemetry {
                    id: core.id,
                    core_type: core.cluster.as_str().to_string(),
                    speed: core.clock_ghz,
                    temp: core.temp_c,
                })
                .collect(),
            device_id: None,
        }
    }

    pub fn from_reading(chipset: &str, reading: &SessionTelemetry) -> Self {
        Self {
            device_id: reading.token.as_ref().map(|token| token.as_str().to_string()),
            ..Self::from_snapshot(chipset, &reading.snapshot)
        }
    }
}

/// `{"status": "..."}` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self { status: status.into() }
    }
}

/// Query string of `POST /set_mode`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetModeParams {
    /// `"High Performance"` or `"Balance"`
    pub mode: Option<String>,
}
