//! Crawl services: paginated fetch, project discovery, list selection and
//! hierarchical aggregation.

mod aggregator;
mod discovery;
mod fetcher;
mod selector;

pub use aggregator::{CrawlEvent, HierarchicalTaskAggregator};
pub use discovery::ProjectDiscovery;
pub use fetcher::{FetchError, FetchOutcome, PageStreamEnd, PaginatedFetcher, TruncatedFetch};
pub use selector::ListSelector;

/// Values gathered by a crawl step plus any listings it had to cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest<T> {
    /// Gathered values.
    pub items: Vec<T>,
    /// Listings that ended after exhausting their retries.
    pub truncated: Vec<TruncatedFetch>,
}

impl<T> Harvest<T> {
    /// Records `outcome`'s truncation, if any, and returns its items promoted
    /// through `promote`. Items `promote` rejects are dropped.
    pub fn absorb<R, U>(
        &mut self,
        outcome: FetchOutcome<R>,
        promote: impl FnMut(R) -> Option<U>,
    ) -> Vec<U> {
        if let Some(truncated) = outcome.truncation() {
            self.truncated.push(truncated);
        }
        outcome.items.into_iter().filter_map(promote).collect()
    }
}

impl<T> Default for Harvest<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            truncated: Vec::new(),
        }
    }
}
