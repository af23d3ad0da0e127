// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Service DTOs

use serde::{Deserialize, Serialize};
use socsim_chip::ChipSnapshot;
use socsim_session_registry::SessionToken;

/// How clients map onto simulated devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Every client gets its own chip, keyed by a session token
    #[default]
    PerDevice,
    /// All clients drive one global chip; no tokens are issued
    Shared,
}

/// Result of one telemetry poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTelemetry {
    /// Session the reading belongs to (`None` in shared mode)
    pub token: Option<SessionToken>,
    /// The token was minted by this request and must be handed to the client
    pub is_new: bool,
    pub snapshot: ChipSnapshot,
}
