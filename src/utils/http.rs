// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, Result};
use crate::models::ApiConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Reject status >= 400 with the server's status text.
///
/// `reason` is the reason phrase the server sent, when it differs from the
/// standard one. Otherwise the canonical phrase is used, then the bare code.
pub fn check_status(status: StatusCode, reason: Option<&str>) -> ApiResult<()> {
    if status.as_u16() < 400 {
        return Ok(());
    }
    let text = reason
        .filter(|reason| !reason.trim().is_empty())
        .or_else(|| status.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string());
    Err(ApiError::http_status(status.as_u16(), text))
}

/// Parse a successful response body; anything but JSON is malformed.
pub fn parse_body(body: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(ApiError::malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_uses_canonical_reason() {
        let err = check_status(StatusCode::NOT_FOUND, None).unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_server_reason_wins() {
        let err = check_status(StatusCode::NOT_FOUND, Some("Schedule Not Available")).unwrap_err();
        assert_eq!(err, ApiError::http_status(404, "Schedule Not Available"));

        let err = check_status(StatusCode::BAD_GATEWAY, Some(" ")).unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_success_statuses_pass() {
        assert!(check_status(StatusCode::OK, None).is_ok());
        assert!(check_status(StatusCode::NOT_MODIFIED, Some("whatever")).is_ok());
    }

    #[test]
    fn test_unknown_status_uses_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = check_status(status, None).unwrap_err();
        assert_eq!(err, ApiError::http_status(599, "599"));
    }

    #[test]
    fn test_parse_json() {
        let body = parse_body(br#"{"a": 1}"#).unwrap();
        assert_eq!(body, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = parse_body(b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
        assert!(err.is_transport());
    }

    #[test]
    fn test_create_client() {
        assert!(create_async_client(&ApiConfig::default()).is_ok());
    }
}
