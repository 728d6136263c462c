//! AWS API interaction module
//!
//! This module provides the pieces needed to talk to the Lightsail API
//! without the full SDK: credentials, SigV4 signing, the JSON 1.1 HTTP
//! transport and region discovery.
//!
//! # Module Structure
//!
//! - [`auth`] - Credential resolution and request signing
//! - [`client`] - Region-scoped Lightsail client
//! - [`error`] - Error classification
//! - [`http`] - HTTP utilities for the AWS JSON protocol
//! - [`regions`] - Region discovery
//!
//! # Example
//!
//! ```ignore
//! use enum_lightsail::aws::client::LightsailClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = LightsailClient::new(None, None, Duration::from_secs(30)).await?;
//!     let instances = client.call("GetInstances", &serde_json::json!({})).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod regions;
