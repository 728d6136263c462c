//! Lightsail API error classification
//!
//! Provides typed errors for remote calls, classified from the AWS JSON
//! protocol error code instead of matching on status text.

use thiserror::Error;

/// Errors a Lightsail API call can produce
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller lacks permission for the operation
    #[error("Access denied ({code}): {message}")]
    AccessDenied { code: String, message: String },

    /// Any other error reported by the service
    #[error("Lightsail API error (HTTP {status}, {}): {message}", .code.as_deref().unwrap_or("no code"))]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to sign request: {0}")]
    Signing(String),

    #[error("Failed to load AWS credentials: {0}")]
    Credentials(String),
}

impl ApiError {
    /// Check if this is an access-denied error
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ApiError::AccessDenied { .. })
    }

    /// The AWS error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::AccessDenied { code, .. } => Some(code),
            ApiError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Known AWS error codes for permission failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDeniedException",
    "AccessDenied",
    "UnauthorizedOperation",
    "NotAuthorizedException",
];

/// Strip protocol decorations from a raw error code.
///
/// `__type` may be namespaced (`com.amazonaws.lightsail#AccessDeniedException`)
/// and `x-amzn-ErrorType` may carry a suffix (`AccessDeniedException:http://...`).
pub fn normalize_error_code(raw: &str) -> &str {
    let code = raw.rsplit('#').next().unwrap_or(raw);
    code.split(':').next().unwrap_or(code).trim()
}

/// Classify an error response by its status and error code.
pub fn classify_api_error(status: u16, code: Option<&str>, message: Option<&str>) -> ApiError {
    let code = code.map(normalize_error_code).filter(|c| !c.is_empty());
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => ApiError::AccessDenied {
            code: c.to_string(),
            message,
        },
        None if status == 403 => ApiError::AccessDenied {
            code: "Forbidden".to_string(),
            message,
        },
        _ => ApiError::Service {
            status,
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}
