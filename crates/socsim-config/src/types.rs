// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Every struct maps to a section of `socsim_configuration.toml`. Missing
//! sections and keys fall back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
pub use socsim_observability::LogFormat;
use socsim_observability::LoggingSettings;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SocsimConfig {
    pub api: ApiConfig,
    pub simulation: SimulationConfig,
    pub sessions: SessionConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ApiConfig {
    /// `host:port` suitable for a socket bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chip model configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Name reported in every telemetry response
    pub chipset: String,
    /// Base seed for reproducible jitter; unset means OS entropy
    pub seed: Option<u64>,
    /// `false` removes all sensor noise
    pub jitter_enabled: bool,
    pub global_temp_jitter_c: f64,
    pub core_clock_jitter_ghz: f64,
    pub core_temp_jitter_c: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chipset: "Snapdragon 8 Elite (Gen 5)".to_string(),
            seed: None,
            jitter_enabled: true,
            global_temp_jitter_c: 0.3,
            core_clock_jitter_ghz: 0.03,
            core_temp_jitter_c: 1.5,
        }
    }
}

/// How clients map onto simulated chips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionModeSetting {
    /// One chip per client cookie
    #[default]
    PerDevice,
    /// One chip for every client
    Shared,
}

impl std::str::FromStr for SessionModeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "per_device" => Ok(Self::PerDevice),
            "shared" => Ok(Self::Shared),
            other => Err(format!("unknown session mode '{}'", other)),
        }
    }
}

/// Session handling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: SessionModeSetting,
    /// Cookie carrying the session token
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionModeSetting::PerDevice,
            cookie_name: "device_id".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    pub format: LogFormat,
    /// Optional directory for rolling log files
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file_dir: None,
        }
    }
}

impl From<&LoggingConfig> for LoggingSettings {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            format: config.format,
            file_dir: config.file_dir.as_ref().map(PathBuf::from),
            ..Default::default()
        }
    }
}
