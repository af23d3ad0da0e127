// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Session cookie handling
//!
//! Tokens are opaque to the API layer: read from the `Cookie` header, written
//! back with `Set-Cookie` when the service mints a new one.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use socsim_services::SessionToken;

use super::{ApiError, ApiResult};

/// Value of cookie `name`, if the request carries a non-empty one
pub fn session_token_from_headers(headers: &HeaderMap, name: &str) -> Option<SessionToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(SessionToken::from)
}

/// `Set-Cookie` value binding the client to `token`
pub fn session_cookie_header(name: &str, token: &SessionToken) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        name,
        token.as_str()
    ))
    .map_err(|e| ApiError::internal(format!("Unable to encode session cookie: {}", e)))
}

/// Append the session cookie to outgoing response headers
pub fn attach_session_cookie(headers: &mut HeaderMap, name: &str, token: &SessionToken) -> ApiResult<()> {
    headers.append(SET_COOKIE, session_cookie_header(name, token)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_token_among_other_cookies() {
        let headers = headers(&["theme=dark; device_id=abc-123 ; lang=en"]);
        assert_eq!(
            session_token_from_headers(&headers, "device_id"),
            Some(SessionToken::from("abc-123"))
        );
    }

    #[test]
    fn test_multiple_cookie_headers_and_quotes() {
        let headers = headers(&["theme=dark", "device_id=\"q-1\""]);
        assert_eq!(
            session_token_from_headers(&headers, "device_id"),
            Some(SessionToken::from("q-1"))
        );
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        assert_eq!(session_token_from_headers(&HeaderMap::new(), "device_id"), None);
        assert_eq!(session_token_from_headers(&headers(&["device_id="]), "device_id"), None);
        assert_eq!(session_token_from_headers(&headers(&["other_device_id=x"]), "device_id"), None);
    }

    #[test]
    fn test_set_cookie_format() {
        let value = session_cookie_header("device_id", &SessionToken::from("tok")).unwrap();
        assert_eq!(value, "device_id=tok; Path=/; HttpOnly; SameSite=Lax");
    }
}
