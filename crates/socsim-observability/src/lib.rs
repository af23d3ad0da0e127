// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # socsim-observability
//!
//! Logging setup shared by the simulator binaries, with per-crate debug
//! flag support.
//!
//! ## Features
//! - `file-logging`: rolling JSON log files next to console output

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Tracing targets used across the workspace
pub const KNOWN_CRATES: &[&str] = &[
    "socsim-api",
    "socsim-services",
    "socsim-session-registry",
    "socsim-chip",
    "socsim-config",
];
