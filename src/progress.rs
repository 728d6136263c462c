//! Enumeration progress reporting
//!
//! The enumerator reports what it is doing through [`Progress`] instead of
//! printing, so hosts can route diagnostics wherever they like.

use crate::aws::error::ApiError;
use crate::resource::Category;

/// Sink for enumeration diagnostics
pub trait Progress {
    fn region_started(&self, region: &str);

    fn category_started(&self, region: &str, category: Category);

    fn category_finished(&self, region: &str, category: Category, count: usize);

    /// Expected and non-fatal: the category degrades to an empty list.
    fn access_denied(&self, region: &str, category: Category, error: &ApiError);

    /// Any other failure; the category degrades to an empty list.
    fn category_failed(&self, region: &str, category: Category, error: &ApiError);

    fn completed(&self, module: &str);
}

/// Emits every diagnostic as a `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn region_started(&self, region: &str) {
        tracing::info!(region, "Starting region {}...", region);
    }

    fn category_started(&self, region: &str, category: Category) {
        tracing::info!(region, %category, "Attempting to enumerate {}", category);
    }

    fn category_finished(&self, region: &str, category: Category, count: usize) {
        tracing::info!(region, %category, count, "Found {} {}", count, category);
        tracing::info!(region, %category, "Finished enumerating for {}", category);
    }

    fn access_denied(&self, region: &str, category: Category, error: &ApiError) {
        tracing::warn!(region, %category, code = error.code(), "AccessDenied for: {}", category);
    }

    fn category_failed(&self, region: &str, category: Category, error: &ApiError) {
        tracing::error!(region, %category, "Unknown Error:\n{:?}", error);
    }

    fn completed(&self, module: &str) {
        tracing::info!("{} completed.", module);
    }
}
