// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Precedence, lowest first:
//! 1. TOML file (or built-in defaults when no file exists)
//! 2. Environment variables
//! 3. CLI arguments

use crate::{ConfigError, ConfigResult, SessionModeSetting, SocsimConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "socsim_configuration.toml";

/// Find the simulator configuration file
///
/// Search order:
/// 1. `SOCSIM_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SOCSIM_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by SOCSIM_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        for ancestor in cwd.ancestors().skip(1).take(5) {
            search_paths.push(ancestor.join(CONFIG_FILE_NAME));
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet SOCSIM_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is a separate step (`validate_config`).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SocsimConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SocsimConfig = toml::from_str(&content)?;

    apply_overrides(&mut config, cli_args);
    Ok(config)
}

/// Like `load_config`, but a missing file yields the built-in defaults
///
/// Overrides are still applied. Unreadable or malformed files, an explicit
/// path, or a dangling `SOCSIM_CONFIG_PATH` remain errors.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SocsimConfig> {
    let searched = config_path.is_none() && env::var_os("SOCSIM_CONFIG_PATH").is_none();
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if searched => {
            let mut config = SocsimConfig::default();
            apply_overrides(&mut config, cli_args);
            Ok(config)
        }
        other => other,
    }
}

fn apply_overrides(config: &mut SocsimConfig, cli_args: Option<&HashMap<String, String>>) {
    apply_environment_overrides(config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(config, cli);
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SOCSIM_API_HOST` -> `api.host`
/// - `SOCSIM_API_PORT` -> `api.port`
/// - `SOCSIM_SEED` -> `simulation.seed`
/// - `SOCSIM_SESSION_MODE` -> `sessions.mode`
/// - `SOCSIM_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut SocsimConfig) {
    if let Ok(value) = env::var("SOCSIM_API_HOST") {
        config.api.host = value;
    }
    if let Ok(value) = env::var("SOCSIM_API_PORT") {
        if let Ok(port) = value.parse::<u16>() {
            config.api.port = port;
        }
    }
    if let Ok(value) = env::var("SOCSIM_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.simulation.seed = Some(seed);
        }
    }
    if let Ok(value) = env::var("SOCSIM_SESSION_MODE") {
        if let Ok(mode) = value.parse::<SessionModeSetting>() {
            config.sessions.mode = mode;
        }
    }
    if let Ok(value) = env::var("SOCSIM_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments keyed by name (e.g., `{"api_port": "9000", "seed": "7"}`)
pub fn apply_cli_overrides(config: &mut SocsimConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("api_host") {
        config.api.host = value.clone();
    }
    if let Some(value) = cli_args.get("api_port") {
        if let Ok(port) = value.parse::<u16>() {
            config.api.port = port;
        }
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.simulation.seed = Some(seed);
        }
    }
    if let Some(value) = cli_args.get("session_mode") {
        if let Ok(mode) = value.parse::<SessionModeSetting>() {
            config.sessions.mode = mode;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
