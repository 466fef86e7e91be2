//! HTTP plumbing shared by every endpoint: auth headers, transport error
//! classification, envelope decoding, and body-safe debug logging.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Client;
use crate::error::{map_api_error, ApiError, Result};
use crate::types::{ApiResponse, Credentials, ResultInfo};

/// Response and request bodies are truncated to this many bytes in debug
/// logs. Zone exports and TXT records can be arbitrarily large.
const LOG_BODY_LIMIT: usize = 256;

fn truncate_for_log(text: &str) -> String {
    if text.len() <= LOG_BODY_LIMIT {
        return text.to_string();
    }
    let mut end = LOG_BODY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &text[..end], text.len())
}

/// Send a prepared request and return its status and raw body.
///
/// Transport failures, rate limiting, and gateway errors are classified
/// here; envelope decoding happens in [`decode`].
async fn execute(request: RequestBuilder, method: &str, url: &str) -> Result<(StatusCode, String)> {
    log::debug!("{method} {url}");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout {
                detail: e.to_string(),
            }
        } else {
            ApiError::Network {
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    log::debug!("Response Status: {status}");

    // Header must be read before the body consumes the response.
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let text = response.text().await.map_err(|e| ApiError::Network {
        detail: format!("failed to read response body: {e}"),
    })?;
    log::debug!("Response Body: {}", truncate_for_log(&text));

    if status == StatusCode::TOO_MANY_REQUESTS {
        log::warn!("rate limited by the API (retry-after: {retry_after:?})");
        return Err(ApiError::RateLimited {
            retry_after,
            message: text,
        });
    }

    if matches!(status.as_u16(), 502..=504) {
        log::warn!("upstream gateway error: HTTP {status}");
        return Err(ApiError::Network {
            detail: format!("HTTP {status}: {}", truncate_for_log(&text)),
        });
    }

    Ok((status, text))
}

/// Decode a v4 envelope, mapping `success: false` to a typed error.
fn decode<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<ApiResponse<T>> {
    let envelope: ApiResponse<T> = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        // Auth failures at the edge can come back as non-JSON error pages.
        Err(_) if status == StatusCode::UNAUTHORIZED => {
            return Err(ApiError::InvalidCredentials {
                message: format!("HTTP {status}"),
            });
        }
        Err(_) if status == StatusCode::FORBIDDEN => {
            return Err(ApiError::PermissionDenied {
                message: format!("HTTP {status}"),
            });
        }
        Err(e) => {
            log::error!("failed to decode API response: {e}");
            return Err(ApiError::Parse {
                detail: e.to_string(),
            });
        }
    };

    if !envelope.success {
        let (code, message) = envelope
            .errors
            .and_then(|errors| errors.into_iter().next())
            .map_or_else(
                || (None, "Unknown error".to_string()),
                |first| (Some(first.code), first.message),
            );
        return Err(map_api_error(code, message, status));
    }

    Ok(envelope)
}

impl Client {
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.credentials {
            Credentials::Token(token) => {
                builder.header("Authorization", format!("Bearer {token}"))
            }
            Credentials::KeyEmail { key, email } => builder
                .header("X-Auth-Key", key)
                .header("X-Auth-Email", email),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let (status, text) = execute(self.request(Method::GET, &url), "GET", &url).await?;
        let envelope = decode::<T>(status, &text)?;
        envelope.result.ok_or_else(missing_result)
    }

    /// `GET` for list endpoints, keeping the pagination block alongside the
    /// items. A missing `result` on a list is an empty page, not an error.
    pub(crate) async fn get_with_info<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<(Vec<T>, Option<ResultInfo>)> {
        let url = format!("{}{path}", self.base_url);
        let (status, text) = execute(self.request(Method::GET, &url), "GET", &url).await?;
        let envelope = decode::<Vec<T>>(status, &text)?;
        Ok((envelope.result.unwrap_or_default(), envelope.result_info))
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        log_request_body(body);
        let (status, text) =
            execute(self.request(Method::POST, &url).json(body), "POST", &url).await?;
        let envelope = decode::<T>(status, &text)?;
        envelope.result.ok_or_else(missing_result)
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        log_request_body(body);
        let (status, text) =
            execute(self.request(Method::PATCH, &url).json(body), "PATCH", &url).await?;
        let envelope = decode::<T>(status, &text)?;
        envelope.result.ok_or_else(missing_result)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{path}", self.base_url);
        let (status, text) = execute(self.request(Method::DELETE, &url), "DELETE", &url).await?;
        decode::<serde_json::Value>(status, &text)?;
        Ok(())
    }
}

fn log_request_body<B: Serialize>(body: &B) {
    if log::log_enabled!(log::Level::Debug) {
        let json = serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string());
        log::debug!("Request Body: {}", truncate_for_log(&json));
    }
}

fn missing_result() -> ApiError {
    ApiError::Parse {
        detail: "response envelope has no result".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_log_unchanged() {
        assert_eq!(truncate_for_log("{\"ok\":true}"), "{\"ok\":true}");
    }

    #[test]
    fn long_bodies_are_truncated_with_byte_count() {
        let body = "x".repeat(300);
        let logged = truncate_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(LOG_BODY_LIMIT)));
        assert!(logged.ends_with("... (300 bytes total)"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multi-byte characters straddling the limit must not split.
        let body = "é".repeat(200);
        let logged = truncate_for_log(&body);
        assert!(logged.contains("bytes total"));
    }

    #[test]
    fn decode_returns_result_on_success() {
        #[derive(serde::Deserialize)]
        struct Item {
            id: String,
        }
        let body = r#"{"success":true,"errors":[],"result":{"id":"abc"}}"#;
        let envelope = decode::<Item>(StatusCode::OK, body).unwrap();
        assert_eq!(envelope.result.unwrap().id, "abc");
    }

    #[test]
    fn decode_maps_first_envelope_error() {
        let body = r#"{"success":false,"errors":[{"code":81044,"message":"Record does not exist."},{"code":1,"message":"secondary"}],"result":null}"#;
        let err = decode::<serde_json::Value>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(matches!(err, ApiError::RecordNotFound { .. }));
    }

    #[test]
    fn decode_failure_without_errors_is_generic() {
        let body = r#"{"success":false,"result":null}"#;
        let err = decode::<serde_json::Value>(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, None);
                assert_eq!(message, "Unknown error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_non_json_401_is_invalid_credentials() {
        let err = decode::<serde_json::Value>(StatusCode::UNAUTHORIZED, "<html>denied</html>")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    }

    #[test]
    fn decode_non_json_403_is_permission_denied() {
        let err =
            decode::<serde_json::Value>(StatusCode::FORBIDDEN, "<html>denied</html>").unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[test]
    fn decode_other_non_json_is_parse_error() {
        let err = decode::<serde_json::Value>(StatusCode::OK, "garbage").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }
}
