// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # socsim - mobile SoC power/thermal governor simulator
//!
//! Umbrella crate over the workspace layers:
//!
//! - [`chip`]: `ChipEngine`, power policy, thermal governor, status register decoder
//! - [`session_registry`]: one isolated engine per client token
//! - [`services`]: transport-agnostic `TelemetryService`
//! - [`api`]: axum HTTP transport
//! - [`config`] / [`observability`]: TOML configuration and logging setup
//!
//! ```rust,no_run
//! use socsim::config::SocsimConfig;
//!
//! let app = socsim::build_app(&SocsimConfig::default());
//! // axum::serve(listener, app.router) ...
//! ```

use std::sync::Arc;

pub use socsim_api as api;
pub use socsim_chip as chip;
pub use socsim_config as config;
pub use socsim_observability as observability;
pub use socsim_services as services;
pub use socsim_session_registry as session_registry;

use socsim_api::{create_http_server, ApiState};
use socsim_chip::{ChipEngineFactory, JitterBounds, JitterMode};
use socsim_config::{SessionModeSetting, SimulationConfig, SocsimConfig};
use socsim_services::{SessionMode, TelemetryServiceImpl};
use socsim_session_registry::SessionRegistry;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully wired application
pub struct SocsimApp {
    pub router: axum::Router,
    pub service: Arc<TelemetryServiceImpl>,
}

/// Engine factory described by the `[simulation]` section
pub fn engine_factory(simulation: &SimulationConfig) -> ChipEngineFactory {
    let bounds = JitterBounds {
        global_temp_c: simulation.global_temp_jitter_c,
        core_clock_ghz: simulation.core_clock_jitter_ghz,
        core_temp_c: simulation.core_temp_jitter_c,
    };
    let mode = match (simulation.jitter_enabled, simulation.seed) {
        (false, _) => JitterMode::Disabled,
        (true, Some(seed)) => JitterMode::Seeded(seed),
        (true, None) => JitterMode::Entropy,
    };
    ChipEngineFactory::new(bounds, mode)
}

pub fn session_mode(setting: SessionModeSetting) -> SessionMode {
    match setting {
        SessionModeSetting::PerDevice => SessionMode::PerDevice,
        SessionModeSetting::Shared => SessionMode::Shared,
    }
}

/// Build factory, registry, service, and router from configuration
pub fn build_app(config: &SocsimConfig) -> SocsimApp {
    let registry = Arc::new(SessionRegistry::new(engine_factory(&config.simulation)));
    let service = Arc::new(TelemetryServiceImpl::new(
        registry,
        config.simulation.chipset.clone(),
        session_mode(config.sessions.mode),
    ));
    let router = create_http_server(ApiState::new(service.clone(), config.sessions.cookie_name.clone()));
    SocsimApp { router, service }
}

/// Commonly used types
pub mod prelude {
    pub use crate::chip::{ChipEngine, ChipEngineFactory, ChipSnapshot, PowerMode, StatusRegister};
    pub use crate::services::{SessionMode, TelemetryService, TelemetryServiceImpl};
    pub use crate::session_registry::{SessionRegistry, SessionToken};
    pub use crate::{build_app, SocsimApp};
}
