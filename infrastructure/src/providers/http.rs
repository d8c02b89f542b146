//! Shared HTTP plumbing for the provider adapters.

use roundtable_application::GatewayError;
use serde::de::DeserializeOwned;
use std::time::Duration;

const ERROR_BODY_PREVIEW: usize = 500;

/// Resolve an API key: the direct value wins, then the named environment variable.
pub(crate) fn resolve_api_key(direct: Option<&str>, env_name: &str) -> Option<String> {
    direct
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| {
            std::env::var(env_name)
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
}

pub(crate) fn build_client(timeout_seconds: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(seconds) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        reqwest::Client::new()
    })
}

/// Join a base URL and an API path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Transport-level failure (connect, timeout, broken body).
pub(crate) fn map_send_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Network(format!("request timed out: {}", err))
    } else {
        GatewayError::Network(err.to_string())
    }
}

/// Classify a non-2xx response.
pub(crate) fn map_http_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    let message = error_message(body);
    match status.as_u16() {
        401 | 403 => GatewayError::Authentication(message),
        429 => GatewayError::RateLimited(message),
        code => GatewayError::RequestFailed {
            status: code,
            message,
        },
    }
}

/// Pull `error.message` (or a string `error`) out of a JSON error body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
            .and_then(|m| m.as_str())
            .or_else(|| v.get("error").and_then(|e| e.as_str()))
            .or_else(|| v.get("message").and_then(|m| m.as_str()))
    });
    match from_json {
        Some(message) => message.to_string(),
        None => roundtable_domain::core::string::truncate(body.trim(), ERROR_BODY_PREVIEW),
    }
}

/// Send a prepared request and decode a JSON success body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, GatewayError> {
    let response = request.send().await.map_err(map_send_error)?;
    let status = response.status();
    let body = response.text().await.map_err(map_send_error)?;

    if !status.is_success() {
        return Err(map_http_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}
