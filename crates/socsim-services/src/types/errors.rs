// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

All variants except `Internal` are client-input errors that the caller can
correct by changing its request.
*/

use socsim_chip::ChipError;
use socsim_session_registry::RegistryError;
use thiserror::Error;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Requested mode is unknown or not user-selectable (400 in HTTP)
    #[error("{0}")]
    InvalidMode(String),

    /// Performance mode requested on low battery (400 in HTTP)
    #[error("{0}")]
    PowerPolicyViolation(String),

    /// Mutating call with a missing or unrecognized session token (400 in HTTP)
    #[error("No active session found")]
    SessionNotFound,

    /// Internal service error (500 in HTTP)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

// ============================================================================
// ERROR CONVERSIONS FROM BACKEND
// ============================================================================

impl From<ChipError> for ServiceError {
    fn from(err: ChipError) -> Self {
        match err {
            ChipError::InvalidMode(_) => ServiceError::InvalidMode(err.to_string()),
            ChipError::PowerPolicyViolation { .. } => ServiceError::PowerPolicyViolation(err.to_string()),
        }
    }
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::SessionNotFound(_) => ServiceError::SessionNotFound,
        }
    }
}
