// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
SoC Simulator Server

Serves the dashboard and telemetry API.

Usage:
  cargo run --bin socsim-server -- [--config <file>] [--host <addr>] [--port <port>]
                                   [--seed <n>] [--session-mode per_device|shared]
                                   [--log-level <level>] [--debug-<crate>|--debug-all]
*/

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use socsim::config::{load_config_or_default, validate_config};
use socsim::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingSettings};
use tracing::info;

/// Value-taking flags and the config keys they override
const VALUE_FLAGS: &[(&str, &str)] = &[
    ("--host", "api_host"),
    ("--port", "api_port"),
    ("--seed", "seed"),
    ("--session-mode", "session_mode"),
    ("--log-level", "log_level"),
];

struct ServerArgs {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn parse_args(args: &[String]) -> Result<Option<ServerArgs>> {
    let mut parsed = ServerArgs {
        config_path: None,
        overrides: HashMap::new(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(None);
        }
        if arg.starts_with("--debug-") {
            continue;
        }
        if arg == "--config" {
            let value = iter.next().context("--config requires a value")?;
            parsed.config_path = Some(PathBuf::from(value));
            continue;
        }
        match VALUE_FLAGS.iter().find(|(flag, _)| *flag == arg.as_str()) {
            Some((flag, key)) => {
                let value = iter
                    .next()
                    .with_context(|| format!("{} requires a value", flag))?;
                parsed.overrides.insert(key.to_string(), value.clone());
            }
            None => bail!("Unknown argument: {}", arg),
        }
    }

    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--config <file>] [--host <addr>] [--port <port>] [--seed <n>] \
         [--session-mode per_device|shared] [--log-level <level>]",
        program
    );
    eprintln!("\n{}", debug_flags_help());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("socsim-server");

    let Some(server_args) = parse_args(&args)? else {
        print_usage(program);
        return Ok(());
    };

    let config = load_config_or_default(server_args.config_path.as_deref(), Some(&server_args.overrides))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    let settings = LoggingSettings::from(&config.logging);
    let logging = init_logging(&parse_debug_flags(), &settings)?;
    match logging.log_dir() {
        Some(dir) => info!("Logging started {} (files in {})", logging.started_at(), dir.display()),
        None => info!("Logging started {}", logging.started_at()),
    }

    info!(
        target: "socsim-config",
        "Configuration loaded: chipset={}, sessions={:?}, seed={:?}, jitter={}",
        config.simulation.chipset,
        config.sessions.mode,
        config.simulation.seed,
        config.simulation.jitter_enabled
    );

    let app = socsim::build_app(&config);

    let address = config.api.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(target: "socsim-api", "Listening on http://{}", address);

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!(target: "socsim-api", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "socsim-api", "Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!(target: "socsim-api", "Shutdown requested");
}
