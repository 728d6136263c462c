//! Lightsail Client
//!
//! Region-scoped client combining credentials, signing and the HTTP layer.

use super::auth::{sign_request, AwsCredentials};
use super::error::ApiError;
use super::http::{LightsailHttpClient, JSON_CONTENT_TYPE};
use crate::resource::{get_registry, Category, ClientFactory, LightsailApi};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::time::Duration;

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Main Lightsail client
#[derive(Clone)]
pub struct LightsailClient {
    pub credentials: AwsCredentials,
    pub http: LightsailHttpClient,
    pub region: String,
    endpoint_override: Option<String>,
}

impl LightsailClient {
    /// Create a client from the default credential chain.
    ///
    /// The home region is the profile/environment region, falling back to
    /// [`DEFAULT_REGION`].
    pub async fn new(
        profile: Option<&str>,
        endpoint_override: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let credentials = AwsCredentials::from_env(profile)
            .await
            .context("Failed to initialize AWS credentials")?;

        let region = credentials
            .default_region()
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        let http = LightsailHttpClient::new(timeout)?;

        Ok(Self::with_parts(credentials, http, &region, endpoint_override))
    }

    pub fn with_parts(
        credentials: AwsCredentials,
        http: LightsailHttpClient,
        region: &str,
        endpoint_override: Option<String>,
    ) -> Self {
        Self {
            credentials,
            http,
            region: region.to_string(),
            endpoint_override,
        }
    }

    /// Same credentials and HTTP client, scoped to another region
    pub fn for_region(&self, region: &str) -> Self {
        Self {
            region: region.to_string(),
            ..self.clone()
        }
    }

    /// Endpoint for the current region
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://lightsail.{}.amazonaws.com/", self.region),
        }
    }

    /// `X-Amz-Target` value for an action
    pub fn target(action: &str) -> String {
        format!("{}.{}", get_registry().target_prefix, action)
    }

    /// Invoke a Lightsail action with a JSON body
    pub async fn call(&self, action: &str, body: &Value) -> Result<Value, ApiError> {
        tracing::debug!("call: region={}, action={}", self.region, action);

        let credentials = self.credentials.get_credentials().await?;
        let url = self.endpoint_url();
        let payload = serde_json::to_vec(body)?;

        let mut headers = vec![
            ("content-type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("x-amz-target".to_string(), Self::target(action)),
        ];

        let signed = {
            let unsigned: Vec<(&str, &str)> = headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            sign_request(
                &credentials,
                &self.region,
                &get_registry().service,
                &url,
                &unsigned,
                &payload,
            )?
        };
        headers.extend(signed);

        self.http.post(&url, &headers, payload).await
    }
}

impl LightsailApi for LightsailClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn get_page(
        &self,
        category: Category,
        page_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let def = category.def();
        tracing::debug!("{} (page token: {})", def.sdk_method, page_token.is_some());

        let mut body = Map::new();
        if let Some(token) = page_token {
            body.insert("pageToken".to_string(), Value::String(token.to_string()));
        }

        self.call(&def.api_action, &Value::Object(body)).await
    }
}

impl ClientFactory for LightsailClient {
    type Client = LightsailClient;

    fn client_for(&self, region: &str) -> Self::Client {
        self.for_region(region)
    }
}
