// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Common types used across all endpoints

pub mod error;
pub mod session;

pub use error::{ApiError, ApiErrorCode};
pub use session::{attach_session_cookie, session_cookie_header, session_token_from_headers};

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
