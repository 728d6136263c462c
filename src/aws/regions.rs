//! Lightsail Regions
//!
//! Region discovery through `GetRegions`, with a static fallback list.

use super::client::LightsailClient;
use super::error::ApiError;
use serde_json::{json, Value};

/// Regions Lightsail is available in, used when discovery fails
pub const LIGHTSAIL_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-2",
    "ca-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-central-1",
    "eu-north-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
];

pub fn static_regions() -> Vec<String> {
    LIGHTSAIL_REGIONS.iter().map(|r| r.to_string()).collect()
}

/// Extract region names from a `GetRegions` response
pub fn parse_regions(response: &Value) -> Vec<String> {
    response
        .get("regions")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|r| r.get("name").and_then(|v| v.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// List regions via the client's home region
pub async fn list_regions(client: &LightsailClient) -> Result<Vec<String>, ApiError> {
    let response = client
        .call("GetRegions", &json!({ "includeAvailabilityZones": false }))
        .await?;
    Ok(parse_regions(&response))
}

/// List regions, falling back to [`LIGHTSAIL_REGIONS`] on failure or an
/// empty answer
pub async fn discover_regions(client: &LightsailClient) -> Vec<String> {
    match list_regions(client).await {
        Ok(regions) if !regions.is_empty() => {
            tracing::info!("Loaded {} Lightsail regions", regions.len());
            regions
        }
        Ok(_) => {
            tracing::warn!("No regions returned, using static list");
            static_regions()
        }
        Err(e) => {
            tracing::warn!("Failed to list regions: {}, using static list", e);
            static_regions()
        }
    }
}
