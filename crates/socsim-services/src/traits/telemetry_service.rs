// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Telemetry service trait.

Defines the stable interface adapters use to poll and control simulated chips.
*/

use crate::types::*;
use async_trait::async_trait;
use socsim_session_registry::SessionToken;

/// Chip telemetry and control service (transport-agnostic)
#[async_trait]
pub trait TelemetryService: Send + Sync {
    /// Advance the caller's chip by one tick and return the reading
    ///
    /// Creates a session when `token` is absent or unknown; the returned
    /// `SessionTelemetry::is_new` tells the adapter to hand the new token out.
    async fn telemetry(&self, token: Option<SessionToken>) -> ServiceResult<SessionTelemetry>;

    /// Request a power mode by wire name
    ///
    /// Returns the status message on success.
    ///
    /// # Errors
    /// * `ServiceError::SessionNotFound` - Unknown or missing token (per-device mode)
    /// * `ServiceError::InvalidMode` - Not `"High Performance"` or `"Balance"`
    /// * `ServiceError::PowerPolicyViolation` - Battery at or below 20%
    async fn set_mode(&self, token: Option<SessionToken>, mode: &str) -> ServiceResult<String>;

    /// Restore the caller's chip to factory state
    ///
    /// Unknown tokens are ignored.
    async fn reboot(&self, token: Option<SessionToken>) -> ServiceResult<()>;

    /// Chipset name reported in telemetry
    fn chipset(&self) -> &str;

    fn session_mode(&self) -> SessionMode;
}
