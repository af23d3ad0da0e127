// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Session registry types

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use socsim_chip::ChipEngine;

/// Engine handle; the mutex serializes all operations on one device
pub type SharedEngine = Arc<Mutex<ChipEngine>>;

/// Opaque session identifier, compared by equality only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh random (UUID v4) token
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Result of `SessionRegistry::resolve`
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub token: SessionToken,
    pub engine: SharedEngine,
    /// True when the token was minted by this call
    pub is_new: bool,
}
