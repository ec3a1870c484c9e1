//! Count + fetch of one page

use async_trait::async_trait;
use tracing::debug;

use crate::shared::types::{DomainResult, PageEnvelope, PageMeta, PageRequest};

/// A filtered, sorted row set that can be counted and sliced.
///
/// Implementations bake the predicate and the sort order in at
/// construction, so `count` and `fetch` always see the same rows.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Row: Send;

    async fn count(&self) -> DomainResult<u64>;

    async fn fetch(&self, offset: u64, limit: u64) -> DomainResult<Vec<Self::Row>>;
}

/// Run the count and the bounded fetch concurrently and build the envelope.
///
/// A page past the end yields no items; the metadata still reflects the
/// total.
pub async fn resolve_page<S>(
    module: &'static str,
    source: &S,
    request: PageRequest,
) -> DomainResult<PageEnvelope<S::Row>>
where
    S: PageSource + ?Sized,
{
    let (total, items) = tokio::try_join!(
        source.count(),
        source.fetch(request.offset(), request.limit())
    )?;

    metrics::counter!("report_queries_total", "module" => module).increment(1);
    debug!(
        module,
        page = request.page(),
        limit = request.limit(),
        total,
        returned = items.len(),
        "Resolved page"
    );

    Ok(PageEnvelope::new(items, PageMeta::for_request(&request, total)))
}
