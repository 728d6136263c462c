//! HTTP utilities for the AWS JSON 1.1 protocol

use super::error::{classify_api_error, ApiError};
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Content type of AWS JSON 1.1 requests
pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Header some AWS services use to report the error code
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Lightsail API calls
#[derive(Clone)]
pub struct LightsailHttpClient {
    client: Client,
}

impl LightsailHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("enum-lightsail/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// POST a signed JSON body and parse the JSON response.
    ///
    /// `headers` must already contain the content type, target and
    /// signature headers computed over `body`.
    pub async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<Value, ApiError> {
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        let error_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let response_body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::debug!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(parse_error_response(
                status.as_u16(),
                error_type.as_deref(),
                &response_body,
            ));
        }

        // Handle empty response
        if response_body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

/// Build an [`ApiError`] from a non-success response.
///
/// The code comes from the `x-amzn-ErrorType` header, else `__type`, else
/// `code` in the body; the message from `message` or `Message`.
pub fn parse_error_response(status: u16, error_type: Option<&str>, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let code = error_type
        .map(|s| s.to_string())
        .or_else(|| str_field(&parsed, &["__type", "code", "Code"]));

    let message = str_field(&parsed, &["message", "Message"])
        .or_else(|| (!body.trim().is_empty()).then(|| sanitize_for_log(body)));

    classify_api_error(status, code.as_deref(), message.as_deref())
}

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
}
