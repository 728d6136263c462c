//! Resource abstraction layer
//!
//! This module provides a data-driven approach to enumerating Lightsail
//! resources. Category descriptors are loaded from JSON at compile time, so
//! the naming convention (flag, SDK method, wire action, response key) lives
//! in one table.
//!
//! # Architecture
//!
//! - [`registry`] - The category catalog and its descriptors
//! - [`selection`] - Command line flags to category selection
//! - [`api`] - Client traits the enumerator is written against
//! - [`fetcher`] - Per-region, per-category fetching with pagination
//! - [`enumerate`] - Region walk, aggregation and session hand-off
//!
//! # Example
//!
//! ```ignore
//! use enum_lightsail::resource::{fetch_resources, Category};
//!
//! async fn list_instances(client: &LightsailClient) -> Result<Vec<serde_json::Value>, ApiError> {
//!     fetch_resources(client, Category::Instances).await
//! }
//! ```

mod api;
pub mod enumerate;
mod fetcher;
mod registry;
mod selection;

pub use api::{ClientFactory, LightsailApi};
pub use enumerate::{
    aggregate, enumerate_region, enumerate_regions, run, Counts, LightsailData, RegionResources,
    MODULE_NAME,
};
pub use fetcher::{fetch_category, fetch_resources, fetch_resources_paginated, PaginatedResult};
pub use registry::*;
pub use selection::{select_by_name, select_categories, CategoryFlags};
