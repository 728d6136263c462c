//! Resource Fetcher
//!
//! Fetches one category from one region, following pagination tokens.

use super::api::LightsailApi;
use super::registry::Category;
use crate::aws::error::ApiError;
use crate::progress::Progress;
use serde_json::Value;
use std::collections::HashSet;

/// Result of paginated fetch
#[derive(Debug, Clone, Default)]
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<String>,
}

/// Fetch one page of a category
pub async fn fetch_resources_paginated<C: LightsailApi>(
    client: &C,
    category: Category,
    page_token: Option<&str>,
) -> Result<PaginatedResult, ApiError> {
    let response = client.get_page(category, page_token).await?;

    let items = extract_items(&response, &category.def().response_key);

    let next_token = response
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(PaginatedResult { items, next_token })
}

/// Fetch all records of a category (auto-paginate).
///
/// Stops when the server hands back a token it already sent, so a token
/// cycle cannot loop forever.
pub async fn fetch_resources<C: LightsailApi>(
    client: &C,
    category: Category,
) -> Result<Vec<Value>, ApiError> {
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();

    loop {
        let result = fetch_resources_paginated(client, category, page_token.as_deref()).await?;
        all_items.extend(result.items);

        match result.next_token {
            None => break,
            Some(next) if !seen_tokens.insert(next.clone()) => {
                tracing::warn!(
                    region = client.region(),
                    %category,
                    "Server repeated page token, stopping pagination"
                );
                break;
            }
            Some(next) => page_token = Some(next),
        }
    }

    Ok(all_items)
}

/// Enumerate a category in one region.
///
/// Never fails: access denied and every other error are reported through
/// `progress` and yield an empty list.
pub async fn fetch_category<C: LightsailApi, P: Progress + ?Sized>(
    client: &C,
    category: Category,
    progress: &P,
) -> Vec<Value> {
    let region = client.region();
    progress.category_started(region, category);

    match fetch_resources(client, category).await {
        Ok(items) => {
            progress.category_finished(region, category, items.len());
            items
        }
        Err(e) if e.is_access_denied() => {
            progress.access_denied(region, category, &e);
            Vec::new()
        }
        Err(e) => {
            progress.category_failed(region, category, &e);
            Vec::new()
        }
    }
}

/// Extract the record list stored under `key`
fn extract_items(response: &Value, key: &str) -> Vec<Value> {
    match response.get(key) {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            tracing::warn!("Expected a list under '{}', got {}", key, other);
            Vec::new()
        }
        None => {
            tracing::debug!("Response has no '{}' key", key);
            Vec::new()
        }
    }
}
