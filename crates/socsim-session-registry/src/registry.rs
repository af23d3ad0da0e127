// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Session registry implementation

use crate::{RegistryError, ResolvedSession, Result, SessionToken, SharedEngine};
use parking_lot::{Mutex, RwLock};
use socsim_chip::{ChipEngine, ChipEngineFactory};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry owning one chip engine per session token
///
/// Structural changes (insert on first contact, replace on reboot) take the
/// map write lock. Work on an engine only holds that engine's mutex, so
/// different sessions never block each other.
pub struct SessionRegistry {
    /// Live sessions (token -> engine)
    sessions: RwLock<HashMap<SessionToken, SharedEngine>>,

    /// Builds every engine this registry hands out
    factory: ChipEngineFactory,
}

impl SessionRegistry {
    /// Create an empty registry
    ///
    /// # Arguments
    /// * `factory` - Engine builder used on first contact and on reboot
    pub fn new(factory: ChipEngineFactory) -> Self {
        info!(target: "socsim-session-registry", "Initializing session registry");
        Self {
            sessions: RwLock::new(HashMap::new()),
            factory,
        }
    }

    /// Look up the engine for `token`, creating a new session if the token is
    /// absent or unknown
    ///
    /// Unknown tokens are not adopted: the caller receives a freshly minted
    /// token and must hand it back to the client.
    pub fn resolve(&self, token: Option<&SessionToken>) -> ResolvedSession {
        if let Some(token) = token {
            if let Some(engine) = self.sessions.read().get(token) {
                return ResolvedSession {
                    token: token.clone(),
                    engine: Arc::clone(engine),
                    is_new: false,
                };
            }
        }

        let mut sessions = self.sessions.write();

        // Another request may have won the race between the two locks
        if let Some(token) = token {
            if let Some(engine) = sessions.get(token) {
                return ResolvedSession {
                    token: token.clone(),
                    engine: Arc::clone(engine),
                    is_new: false,
                };
            }
            debug!(target: "socsim-session-registry", "Unknown session token presented; issuing a new one");
        }

        let mut minted = SessionToken::generate();
        while sessions.contains_key(&minted) {
            minted = SessionToken::generate();
        }

        let engine: SharedEngine = Arc::new(Mutex::new(self.factory.build()));
        sessions.insert(minted.clone(), Arc::clone(&engine));

        info!(
            target: "socsim-session-registry",
            "✓ Session created: {} (total sessions: {})",
            minted,
            sessions.len()
        );

        ResolvedSession {
            token: minted,
            engine,
            is_new: true,
        }
    }

    /// Engine for a known token
    pub fn get(&self, token: &SessionToken) -> Option<SharedEngine> {
        self.sessions.read().get(token).cloned()
    }

    /// Run `f` against the locked engine of a known session
    pub fn with_engine<T>(&self, token: &SessionToken, f: impl FnOnce(&mut ChipEngine) -> T) -> Result<T> {
        let engine = self
            .get(token)
            .ok_or_else(|| RegistryError::SessionNotFound(token.to_string()))?;
        let mut guard = engine.lock();
        Ok(f(&mut guard))
    }

    /// Replace the session's engine with a factory-fresh one under the same token
    ///
    /// Returns `false` (and changes nothing) when the token is unknown.
    pub fn reboot(&self, token: &SessionToken) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(token) {
            Some(slot) => {
                *slot = Arc::new(Mutex::new(self.factory.build()));
                info!(target: "socsim-session-registry", "✓ Session rebooted: {}", token);
                true
            }
            None => {
                warn!(
                    target: "socsim-session-registry",
                    "Reboot requested for unknown session {}; ignoring",
                    token
                );
                false
            }
        }
    }

    pub fn contains(&self, token: &SessionToken) -> bool {
        self.sessions.read().contains_key(token)
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}
