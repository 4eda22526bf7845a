//! URL composition for listing endpoints.

use super::StatusFilter;

/// Resolves `endpoint` against `api_base` unless it is already absolute.
#[must_use]
pub fn resolve_endpoint(api_base: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_owned()
    } else {
        format!(
            "{}/{}",
            api_base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Appends a `key=value` query fragment with the right separator.
#[must_use]
pub fn append_query(url: &str, fragment: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{fragment}")
}

/// Listing URL with an optional status filter applied.
#[must_use]
pub fn filtered_url(url: &str, filter: StatusFilter) -> String {
    filter
        .query()
        .map_or_else(|| url.to_owned(), |fragment| append_query(url, fragment))
}

/// URL of a 1-based page of a listing.
#[must_use]
pub fn page_url(listing_url: &str, page: u32) -> String {
    append_query(listing_url, &format!("page={page}"))
}
