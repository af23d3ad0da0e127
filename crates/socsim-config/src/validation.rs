// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! All problems are collected and reported together.

use crate::{ConfigError, ConfigResult, SocsimConfig};

/// Largest accepted temperature jitter bound (°C)
pub const MAX_TEMP_JITTER_C: f64 = 5.0;
/// Largest accepted clock jitter bound (GHz)
pub const MAX_CLOCK_JITTER_GHZ: f64 = 0.5;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidPortRange { port_name: String, port: u16 },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPortRange { port_name, port } => {
                write!(
                    f,
                    "Port {} = {} is outside valid range (1024-65535)",
                    port_name, port
                )
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &SocsimConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    if config.api.port < 1024 {
        errors.push(ConfigValidationError::InvalidPortRange {
            port_name: "api.port".to_string(),
            port: config.api.port,
        });
    }

    validate_required_fields(config, &mut errors);
    validate_jitter_bounds(config, &mut errors);
    validate_sessions(config, &mut errors);

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {:?}", LOG_LEVELS),
        });
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &SocsimConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.api.host.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "api.host".to_string(),
        });
    }
    if config.simulation.chipset.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "simulation.chipset".to_string(),
        });
    }
    if config.sessions.cookie_name.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "sessions.cookie_name".to_string(),
        });
    }
}

fn validate_jitter_bounds(config: &SocsimConfig, errors: &mut Vec<ConfigValidationError>) {
    let sim = &config.simulation;
    let bounds = [
        ("simulation.global_temp_jitter_c", sim.global_temp_jitter_c, MAX_TEMP_JITTER_C),
        ("simulation.core_temp_jitter_c", sim.core_temp_jitter_c, MAX_TEMP_JITTER_C),
        ("simulation.core_clock_jitter_ghz", sim.core_clock_jitter_ghz, MAX_CLOCK_JITTER_GHZ),
    ];

    for (field, value, max) in bounds {
        if !value.is_finite() || !(0.0..=max).contains(&value) {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("must be a finite value between 0 and {}", max),
            });
        }
    }
}

fn validate_sessions(config: &SocsimConfig, errors: &mut Vec<ConfigValidationError>) {
    let name = &config.sessions.cookie_name;
    if !name.is_empty() && !name.bytes().all(is_cookie_token_byte) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "sessions.cookie_name".to_string(),
            reason: "must contain only cookie token characters".to_string(),
        });
    }
}

/// RFC 6265 `token`: visible ASCII minus separators
fn is_cookie_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}
