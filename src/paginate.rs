//! Pagination
//!
//! Generic "fetch until exhausted" helper for list-style API queries.
//!
//! Every page fetch is admitted through the shared [`RateLimiter`] first,
//! so the request budget is spent in exactly one place. Pagination stops
//! on the first empty batch, or at a hard page cap as protection against
//! a misbehaving or unbounded remote dataset.

use std::future::Future;

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::error::ApiResult;
use crate::ratelimit::RateLimiter;

/// Hard safety cap on pages fetched per query (host pagination limit)
pub const MAX_PAGES: usize = 100;

/// Batch size requested per page (host maximum)
pub const PER_PAGE: usize = 100;

/// Fetch all pages of a query into a single list
///
/// `fetch_page` is called with page numbers starting at 1 and must return
/// one batch per call. An empty batch ends the query; a failed batch
/// aborts it. The result is a finite, consumed-once list.
pub async fn fetch_all<T, F, Fut>(
    limiter: &Mutex<RateLimiter>,
    mut fetch_page: F,
) -> ApiResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        limiter.lock().await.admit().await;

        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            break;
        }
        items.extend(batch);

        page += 1;
        if page > MAX_PAGES {
            warn!(
                "Stopping pagination at the {}-page cap; results may be truncated",
                MAX_PAGES
            );
            break;
        }
    }

    debug!("Fetched {} item(s) across {} page(s)", items.len(), page - 1);
    Ok(items)
}
