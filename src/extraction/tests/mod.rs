//! Unit tests for the extraction crawler.


use crate::config::RetryPolicy;
use crate::extraction::{
    adapters::memory::ScriptedListingClient, ports::BearerToken, services::PaginatedFetcher,
};
use std::sync::Arc;

/// API base used by every crawler test.
const API: &str = "https://api.test/99";

fn fetcher_over(client: ScriptedListingClient) -> PaginatedFetcher<ScriptedListingClient> {
    PaginatedFetcher::new(
        Arc::new(client),
        BearerToken::new("test-token"),
        API,
        RetryPolicy::immediate(5),
    )
}
