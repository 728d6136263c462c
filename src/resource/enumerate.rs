//! Region enumeration and aggregation
//!
//! Walks every region in order and every selected category in order,
//! then totals the results and stores them in the session.

use super::api::{ClientFactory, LightsailApi};
use super::fetcher::fetch_category;
use super::registry::{get_registry, Category};
use crate::progress::Progress;
use crate::session::Session;
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Name reported when a run completes
pub const MODULE_NAME: &str = "enum_lightsail";

/// Records of each category found in one region
pub type RegionResources = BTreeMap<Category, Vec<Value>>;

/// Per-category totals across all regions
pub type Counts = BTreeMap<Category, usize>;

/// Everything one run collected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightsailData {
    /// Selected categories, in selection order
    pub categories: Vec<Category>,
    /// Region results, in the order the regions were processed
    pub regions: Vec<(String, RegionResources)>,
}

impl LightsailData {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            regions: Vec::new(),
        }
    }

    pub fn region(&self, name: &str) -> Option<&RegionResources> {
        self.regions
            .iter()
            .find(|(region, _)| region == name)
            .map(|(_, resources)| resources)
    }

    /// `{ region: { category: [records...] } }`
    pub fn to_json(&self) -> Value {
        let regions = self
            .regions
            .iter()
            .map(|(region, resources)| {
                let categories: Map<String, Value> = resources
                    .iter()
                    .map(|(category, items)| {
                        (category.as_str().to_string(), Value::Array(items.clone()))
                    })
                    .collect();
                (region.clone(), Value::Object(categories))
            })
            .collect();
        Value::Object(regions)
    }
}

/// Total record count per category across all regions.
///
/// Every selected category appears, with zero when nothing was found.
pub fn aggregate(data: &LightsailData) -> Counts {
    let mut counts: Counts = data.categories.iter().map(|c| (*c, 0)).collect();

    for (_, resources) in &data.regions {
        for (category, items) in resources {
            *counts.entry(*category).or_insert(0) += items.len();
        }
    }

    counts
}

/// Enumerate every selected category in one region
pub async fn enumerate_region<C: LightsailApi, P: Progress + ?Sized>(
    client: &C,
    categories: &[Category],
    progress: &P,
) -> RegionResources {
    let mut resources = RegionResources::new();
    for category in categories {
        let items = fetch_category(client, *category, progress).await;
        resources.insert(*category, items);
    }
    resources
}

/// Enumerate every region in order, building a client per region.
///
/// A region listed more than once is enumerated only at its first position,
/// so every counted record is also a stored record.
pub async fn enumerate_regions<F: ClientFactory, P: Progress + ?Sized>(
    factory: &F,
    categories: &[Category],
    regions: &[String],
    progress: &P,
) -> LightsailData {
    let mut data = LightsailData::new(categories.to_vec());
    let mut seen = HashSet::new();

    for region in regions {
        if !seen.insert(region.as_str()) {
            tracing::debug!("Skipping repeated region {}", region);
            continue;
        }
        progress.region_started(region);
        let client = factory.client_for(region);
        let resources = enumerate_region(&client, categories, progress).await;
        data.regions.push((region.clone(), resources));
    }

    data
}

/// Full run: enumerate, store the results in the session under the
/// service's session key, and return the per-category totals.
///
/// Enumeration failures never surface here; the only error is the session
/// failing to persist.
pub async fn run<F, S, P>(
    factory: &F,
    session: &mut S,
    categories: &[Category],
    regions: &[String],
    progress: &P,
) -> Result<Counts>
where
    F: ClientFactory,
    S: Session + ?Sized,
    P: Progress + ?Sized,
{
    let data = enumerate_regions(factory, categories, regions, progress).await;
    let counts = aggregate(&data);

    session.update(&get_registry().session_key, data.to_json())?;
    progress.completed(MODULE_NAME);

    Ok(counts)
}
