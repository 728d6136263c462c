//! AWS Authentication
//!
//! Resolves credentials through the standard AWS provider chain (environment,
//! shared config/profile, SSO, IMDS) and signs requests with SigV4.

use super::error::ApiError;
use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_sigv4::sign::v4;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

/// Refresh credentials this long before they actually expire
const CREDENTIAL_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// AWS credentials holder with caching
#[derive(Clone)]
pub struct AwsCredentials {
    provider: SharedCredentialsProvider,
    cache: Arc<RwLock<Option<Credentials>>>,
    default_region: Option<String>,
}

impl AwsCredentials {
    /// Load credentials from the default provider chain, optionally for a
    /// named profile.
    pub async fn from_env(profile: Option<&str>) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        let provider = sdk_config.credentials_provider().context(
            "No AWS credentials provider available. Set AWS_PROFILE or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY",
        )?;

        let mut credentials = Self::from_provider(provider);
        credentials.default_region = sdk_config.region().map(|r| r.to_string());
        Ok(credentials)
    }

    pub fn from_provider(provider: SharedCredentialsProvider) -> Self {
        Self {
            provider,
            cache: Arc::new(RwLock::new(None)),
            default_region: None,
        }
    }

    /// Fixed access key pair, mostly useful against local endpoints
    pub fn from_static(credentials: Credentials) -> Self {
        Self::from_provider(SharedCredentialsProvider::new(credentials))
    }

    /// Region configured in the environment or profile, if any
    pub fn default_region(&self) -> Option<&str> {
        self.default_region.as_deref()
    }

    /// Get credentials for signing, refreshing them when close to expiry
    pub async fn get_credentials(&self) -> Result<Credentials, ApiError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if is_fresh(cached) {
                    return Ok(cached.clone());
                }
                tracing::debug!("Cached AWS credentials expired, refreshing");
            }
        }

        let credentials = self
            .provider
            .provide_credentials()
            .await
            .map_err(|e| ApiError::Credentials(e.to_string()))?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(credentials.clone());
        }

        Ok(credentials)
    }
}

fn is_fresh(credentials: &Credentials) -> bool {
    match credentials.expiry() {
        Some(expiry) => SystemTime::now() + CREDENTIAL_EXPIRY_BUFFER < expiry,
        None => true,
    }
}

/// Compute the SigV4 headers for a POST request.
///
/// Returns the headers to add (`authorization`, `x-amz-date` and, for
/// temporary credentials, `x-amz-security-token`).
pub fn sign_request(
    credentials: &Credentials,
    region: &str,
    service: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> Result<Vec<(String, String)>, ApiError> {
    let identity = credentials.clone().into();

    let params: SigningParams<'_> = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(service)
        .time(SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| ApiError::Signing(e.to_string()))?
        .into();

    let signable = SignableRequest::new(
        "POST",
        url,
        headers.iter().copied(),
        SignableBody::Bytes(body),
    )
    .map_err(|e| ApiError::Signing(e.to_string()))?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|e| ApiError::Signing(e.to_string()))?
        .into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}
