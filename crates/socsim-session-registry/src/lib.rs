// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-device session registry
//!
//! Maps opaque session tokens to isolated `ChipEngine` instances. Token
//! issuance and engine creation happen only here; carrying the token back to
//! the client (cookie, header, ...) is the transport's job.

pub mod registry;
pub mod types;

pub use registry::SessionRegistry;
pub use types::{ResolvedSession, SessionToken, SharedEngine};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
