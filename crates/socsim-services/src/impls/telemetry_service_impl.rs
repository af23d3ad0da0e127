// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Telemetry service implementation.

Resolves sessions through the `SessionRegistry` and delegates all physics to
the session's `ChipEngine`.
*/

use std::sync::Arc;

use async_trait::async_trait;
use socsim_session_registry::{SessionRegistry, SessionToken};
use tracing::{debug, info};

use crate::traits::TelemetryService;
use crate::types::{ServiceError, ServiceResult, SessionMode, SessionTelemetry};

/// Default implementation of TelemetryService
pub struct TelemetryServiceImpl {
    registry: Arc<SessionRegistry>,
    chipset: String,
    mode: SessionMode,
    /// The one global session in `SessionMode::Shared`
    shared_token: Option<SessionToken>,
}

impl TelemetryServiceImpl {
    /// Create a new TelemetryServiceImpl
    ///
    /// In shared mode the global chip is created here, before any request.
    pub fn new(registry: Arc<SessionRegistry>, chipset: impl Into<String>, mode: SessionMode) -> Self {
        let shared_token = match mode {
            SessionMode::Shared => Some(registry.resolve(None).token),
            SessionMode::PerDevice => None,
        };
        let chipset = chipset.into();
        info!(target: "socsim-services", "Telemetry service ready: {} ({:?})", chipset, mode);
        Self {
            registry,
            chipset,
            mode,
            shared_token,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Token the request actually operates on
    fn effective_token(&self, token: Option<SessionToken>) -> Option<SessionToken> {
        match self.mode {
            SessionMode::Shared => self.shared_token.clone(),
            SessionMode::PerDevice => token,
        }
    }
}

#[async_trait]
impl TelemetryService for TelemetryServiceImpl {
    async fn telemetry(&self, token: Option<SessionToken>) -> ServiceResult<SessionTelemetry> {
        let token = self.effective_token(token);
        let resolved = self.registry.resolve(token.as_ref());
        let snapshot = resolved.engine.lock().advance();

        debug!(
            target: "socsim-services",
            "Telemetry for {}: battery={} temp={} status={}",
            resolved.token,
            snapshot.battery_percent,
            snapshot.global_temp_c,
            snapshot.thermal_status()
        );

        Ok(match self.mode {
            SessionMode::PerDevice => SessionTelemetry {
                token: Some(resolved.token),
                is_new: resolved.is_new,
                snapshot,
            },
            SessionMode::Shared => SessionTelemetry {
                token: None,
                is_new: false,
                snapshot,
            },
        })
    }

    async fn set_mode(&self, token: Option<SessionToken>, mode: &str) -> ServiceResult<String> {
        let token = self
            .effective_token(token)
            .ok_or(ServiceError::SessionNotFound)?;

        let applied = self.registry.with_engine(&token, |engine| engine.request_mode(mode))??;

        Ok(format!("Successfully switched to {}", applied))
    }

    async fn reboot(&self, token: Option<SessionToken>) -> ServiceResult<()> {
        match self.effective_token(token) {
            Some(token) => {
                self.registry.reboot(&token);
            }
            None => debug!(target: "socsim-services", "Reboot without a session; nothing to do"),
        }
        Ok(())
    }

    fn chipset(&self) -> &str {
        &self.chipset
    }

    fn session_mode(&self) -> SessionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socsim_chip::{ChipEngineFactory, PowerMode};

    fn service(mode: SessionMode) -> TelemetryServiceImpl {
        let registry = Arc::new(SessionRegistry::new(ChipEngineFactory::deterministic()));
        TelemetryServiceImpl::new(registry, "Snapdragon 8 Elite (Gen 5)", mode)
    }

    #[tokio::test]
    async fn test_first_poll_issues_token() {
        let service = service(SessionMode::PerDevice);
        let first = service.telemetry(None).await.unwrap();
        assert!(first.is_new);
        let token = first.token.clone().unwrap();

        let second = service.telemetry(Some(token.clone())).await.unwrap();
        assert!(!second.is_new);
        assert_eq!(second.token, Some(token));
        assert_eq!(second.snapshot.battery_percent, 99.7);
    }

    #[tokio::test]
    async fn test_set_mode_requires_session() {
        let service = service(SessionMode::PerDevice);
        let err = service.set_mode(None, "Balance").await.unwrap_err();
        assert!(matches!(err, ServiceError::SessionNotFound));
        assert_eq!(err.to_string(), "No active session found");

        let err = service
            .set_mode(Some(SessionToken::from("ghost")), "Balance")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_set_mode_outcomes() {
        let service = service(SessionMode::PerDevice);
        let token = service.telemetry(None).await.unwrap().token;

        let status = service.set_mode(token.clone(), "High Performance").await.unwrap();
        assert_eq!(status, "Successfully switched to High Performance");
        let reading = service.telemetry(token.clone()).await.unwrap();
        assert_eq!(reading.snapshot.power_mode, PowerMode::HighPerformance);

        let err = service.set_mode(token.clone(), "Battery Saver").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidMode(_)));
        assert!(err.to_string().starts_with("Invalid mode. Choose from"));

        service
            .registry()
            .with_engine(token.as_ref().unwrap(), |engine| engine.set_battery_percent(15.0))
            .unwrap();
        let err = service.set_mode(token, "High Performance").await.unwrap_err();
        assert!(matches!(err, ServiceError::PowerPolicyViolation(_)));
        assert!(err.to_string().contains("Battery below 20%"));
    }

    #[tokio::test]
    async fn test_reboot_resets_only_callers_chip() {
        let service = service(SessionMode::PerDevice);
        let a = service.telemetry(None).await.unwrap().token;
        let b = service.telemetry(None).await.unwrap().token;
        for _ in 0..5 {
            service.telemetry(a.clone()).await.unwrap();
            service.telemetry(b.clone()).await.unwrap();
        }

        service.reboot(a.clone()).await.unwrap();
        let battery = |token: &Option<SessionToken>| {
            service
                .registry()
                .with_engine(token.as_ref().unwrap(), |engine| engine.state().battery_percent)
                .unwrap()
        };
        assert_eq!(battery(&a), 100.0);
        assert!((battery(&b) - 99.1).abs() < 1e-9);

        service.reboot(Some(SessionToken::from("ghost"))).await.unwrap();
        service.reboot(None).await.unwrap();
        assert_eq!(service.registry().session_count(), 2);
    }

    #[tokio::test]
    async fn test_shared_mode_uses_one_chip() {
        let service = service(SessionMode::Shared);
        let first = service.telemetry(None).await.unwrap();
        assert!(first.token.is_none());
        assert!(!first.is_new);

        service.set_mode(None, "High Performance").await.unwrap();
        let second = service.telemetry(Some(SessionToken::from("ignored"))).await.unwrap();
        assert_eq!(second.snapshot.power_mode, PowerMode::HighPerformance);
        assert_eq!(service.registry().session_count(), 1);

        service.reboot(None).await.unwrap();
        let after = service.telemetry(None).await.unwrap();
        assert_eq!(after.snapshot.power_mode, PowerMode::Balance);
    }
}
