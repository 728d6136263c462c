//! Collaborator seams for enumeration
//!
//! The enumerator only needs something that can fetch one page of a category
//! in a region, and something that can hand out such a client per region.

use super::registry::Category;
use crate::aws::error::ApiError;
use serde_json::Value;

/// A region-scoped Lightsail client.
///
/// `get_page` performs the category's list operation (`get_<category>`) and
/// returns the raw response object: the record list under the category's
/// response key plus an optional `nextPageToken`.
#[allow(async_fn_in_trait)]
pub trait LightsailApi {
    fn region(&self) -> &str;

    async fn get_page(&self, category: Category, page_token: Option<&str>)
        -> Result<Value, ApiError>;
}

/// Builds region-scoped clients
pub trait ClientFactory {
    type Client: LightsailApi;

    fn client_for(&self, region: &str) -> Self::Client;
}
