//! Field selection
//!
//! Turns the per-category command line flags into the ordered list of
//! categories to enumerate.

use super::registry::Category;
use clap::Args;

/// One boolean flag per Lightsail category
#[derive(Args, Debug, Clone, Default)]
pub struct CategoryFlags {
    /// Enumerate Lightsail active names
    #[arg(long)]
    pub active_names: bool,

    /// Enumerate Lightsail blueprints
    #[arg(long)]
    pub blueprints: bool,

    /// Enumerate Lightsail bundles
    #[arg(long)]
    pub bundles: bool,

    /// Enumerate Lightsail instances
    #[arg(long)]
    pub instances: bool,

    /// Enumerate Lightsail key pairs
    #[arg(long)]
    pub key_pairs: bool,

    /// Enumerate Lightsail operations
    #[arg(long)]
    pub operations: bool,

    /// Enumerate Lightsail static ips
    #[arg(long)]
    pub static_ips: bool,

    /// Enumerate Lightsail disks
    #[arg(long)]
    pub disks: bool,

    /// Enumerate Lightsail disk snapshots
    #[arg(long)]
    pub disk_snapshots: bool,

    /// Enumerate Lightsail load balancers
    #[arg(long)]
    pub load_balancers: bool,
}

impl CategoryFlags {
    pub fn is_set(&self, category: Category) -> bool {
        match category {
            Category::ActiveNames => self.active_names,
            Category::Blueprints => self.blueprints,
            Category::Bundles => self.bundles,
            Category::Instances => self.instances,
            Category::KeyPairs => self.key_pairs,
            Category::Operations => self.operations,
            Category::StaticIps => self.static_ips,
            Category::Disks => self.disks,
            Category::DiskSnapshots => self.disk_snapshots,
            Category::LoadBalancers => self.load_balancers,
        }
    }

    pub fn set(&mut self, category: Category) {
        let flag = match category {
            Category::ActiveNames => &mut self.active_names,
            Category::Blueprints => &mut self.blueprints,
            Category::Bundles => &mut self.bundles,
            Category::Instances => &mut self.instances,
            Category::KeyPairs => &mut self.key_pairs,
            Category::Operations => &mut self.operations,
            Category::StaticIps => &mut self.static_ips,
            Category::Disks => &mut self.disks,
            Category::DiskSnapshots => &mut self.disk_snapshots,
            Category::LoadBalancers => &mut self.load_balancers,
        };
        *flag = true;
    }

    /// Categories to enumerate: the flagged ones, or the whole catalog when
    /// no flag is set.
    pub fn selected(&self) -> Vec<Category> {
        select_categories(Category::ALL.into_iter().filter(|c| self.is_set(*c)))
    }
}

/// Normalize a set of requested categories into catalog order, falling back
/// to the full catalog when the set is empty.
pub fn select_categories(requested: impl IntoIterator<Item = Category>) -> Vec<Category> {
    let mut selected: Vec<Category> = requested.into_iter().collect();
    selected.sort();
    selected.dedup();

    if selected.is_empty() {
        return Category::ALL.to_vec();
    }
    selected
}

/// Select categories by flag name (`disk-snapshots`) or identifier
/// (`disk_snapshots`). Unknown names are skipped.
pub fn select_by_name<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<Category> {
    let requested = names.into_iter().filter_map(|name| match name.parse::<Category>() {
        Ok(category) => Some(category),
        Err(err) => {
            tracing::warn!("{}", err);
            None
        }
    });
    select_categories(requested)
}
