// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Power/thermal governor simulation for a mobile SoC
//!
//! One `ChipEngine` models one device: battery drain, die temperature drift,
//! PMIC power-mode overrides, and a hysteresis thermal clamp over an 8-core
//! (2 Prime + 6 Performance) CPU. State only advances when polled.
//!
//! `StatusRegister` is a standalone decoder for the 16-bit fault register.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod engine;
pub mod policy;
pub mod rng;
pub mod status_register;
pub mod types;

pub use engine::{ChipEngine, ChipEngineFactory, JitterMode};
pub use policy::{ModeProfile, ThermalGovernor};
pub use rng::{EntropyJitter, JitterBounds, JitterSource, NoJitter, SeededJitter};
pub use status_register::StatusRegister;
pub use types::{ChipSnapshot, ChipState, Cluster, CoreReading, CoreUnit, PowerMode};

/// Rejected mode requests
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChipError {
    #[error("Invalid mode. Choose from ['High Performance', 'Balance']")]
    InvalidMode(String),

    #[error("Cannot switch to performance modes: Battery below 20%")]
    PowerPolicyViolation { battery_percent: f64 },
}

pub type ChipResult<T> = std::result::Result<T, ChipError>;

/// Malformed status register text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Status register value is empty")]
    Empty,

    #[error("Status register is not hexadecimal: {0}")]
    InvalidHex(String),
}
