//! Resource Registry - Lightsail category definitions
//!
//! The category catalog is embedded as JSON at compile time and checked
//! against [`Category`] the first time it is accessed, so every category
//! always has exactly one descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Embedded resource JSON (compiled into the binary)
const RESOURCE_FILE: &str = include_str!("../resources/lightsail.json");

/// One of the Lightsail resource types this tool can enumerate.
///
/// Declaration order is the catalog order used for selection, reporting
/// and map ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ActiveNames,
    Blueprints,
    Bundles,
    Instances,
    KeyPairs,
    Operations,
    StaticIps,
    Disks,
    DiskSnapshots,
    LoadBalancers,
}

impl Category {
    /// The full catalog, in catalog order
    pub const ALL: [Category; 10] = [
        Category::ActiveNames,
        Category::Blueprints,
        Category::Bundles,
        Category::Instances,
        Category::KeyPairs,
        Category::Operations,
        Category::StaticIps,
        Category::Disks,
        Category::DiskSnapshots,
        Category::LoadBalancers,
    ];

    /// Internal identifier (underscore form)
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ActiveNames => "active_names",
            Category::Blueprints => "blueprints",
            Category::Bundles => "bundles",
            Category::Instances => "instances",
            Category::KeyPairs => "key_pairs",
            Category::Operations => "operations",
            Category::StaticIps => "static_ips",
            Category::Disks => "disks",
            Category::DiskSnapshots => "disk_snapshots",
            Category::LoadBalancers => "load_balancers",
        }
    }

    /// Descriptor for this category
    pub fn def(self) -> &'static CategoryDef {
        &get_registry().categories[self as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown Lightsail category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts both the hyphenated flag form and the underscore form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches("--").replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category descriptor from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub id: Category,
    /// Command line presentation form, e.g. `disk-snapshots`
    pub flag: String,
    /// Snake-case SDK operation name (`get_` + id)
    pub sdk_method: String,
    /// Wire action sent in `X-Amz-Target`
    pub api_action: String,
    /// Key holding the record list in the response
    pub response_key: String,
    /// Used by the summary report
    pub singular: String,
}

/// Root structure of resources/lightsail.json
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service: String,
    pub session_key: String,
    pub target_prefix: String,
    pub categories: Vec<CategoryDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ServiceConfig> = OnceLock::new();

/// Get the category registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ServiceConfig {
    REGISTRY.get_or_init(|| {
        let config: ServiceConfig = serde_json::from_str(RESOURCE_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));

        let ids: Vec<Category> = config.categories.iter().map(|c| c.id).collect();
        if ids != Category::ALL {
            panic!("Embedded category catalog does not match Category::ALL: {:?}", ids);
        }

        config
    })
}

/// Converts snake_case to camelCase.
///
/// Segments after the first get their leading character upper-cased; input
/// without underscores is returned unchanged.
pub fn camel_case(name: &str) -> String {
    let mut segments = name.split('_');
    let mut out = segments.next().unwrap_or_default().to_string();

    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
