//! Retrying page walker over listing endpoints.

use crate::config::RetryPolicy;
use crate::extraction::{
    domain::{StatusFilter, filtered_url, page_url, resolve_endpoint},
    ports::{ApiResponse, BearerToken, ListingClient},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a listing stopped producing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStreamEnd {
    /// The API answered 404 or an empty page.
    NoMoreData,
    /// A page kept failing until the retry budget ran out.
    RetriesFailed {
        /// Page that could not be fetched.
        page: u32,
        /// Attempts spent on it.
        attempts: u32,
        /// Description of the final failure.
        last_failure: String,
    },
}

/// A listing that ended early because a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedFetch {
    /// Listing URL, including any status filter.
    pub url: String,
    /// Page that could not be fetched.
    pub page: u32,
    /// Attempts spent on it.
    pub attempts: u32,
    /// Description of the final failure.
    pub last_failure: String,
}

/// Items gathered from one listing plus the reason it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    /// Listing URL, including any status filter.
    pub url: String,
    /// Items from every page fetched, in page order.
    pub items: Vec<T>,
    /// How the listing ended.
    pub end: PageStreamEnd,
}

impl<T> FetchOutcome<T> {
    /// Describes the truncation when retries were exhausted.
    #[must_use]
    pub fn truncation(&self) -> Option<TruncatedFetch> {
        match &self.end {
            PageStreamEnd::NoMoreData => None,
            PageStreamEnd::RetriesFailed {
                page,
                attempts,
                last_failure,
            } => Some(TruncatedFetch {
                url: self.url.clone(),
                page: *page,
                attempts: *attempts,
                last_failure: last_failure.clone(),
            }),
        }
    }
}

/// Errors returned when fetching a single document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Every attempt failed.
    #[error("giving up on {url} after {attempts} attempts: {last_failure}")]
    RetriesFailed {
        /// Document URL.
        url: String,
        /// Attempts spent.
        attempts: u32,
        /// Description of the final failure.
        last_failure: String,
    },

    /// The document did not match the expected schema.
    #[error("unexpected document shape at {url}: {message}")]
    Decode {
        /// Document URL.
        url: String,
        /// Decoder message.
        message: String,
    },
}

enum PageAttempt {
    Items(Vec<Value>),
    End,
    Exhausted(String),
}

/// Walks listing endpoints page by page with bounded retries.
#[derive(Debug)]
pub struct PaginatedFetcher<L>
where
    L: ListingClient,
{
    client: Arc<L>,
    token: BearerToken,
    api_base: String,
    retry: RetryPolicy,
}

impl<L> PaginatedFetcher<L>
where
    L: ListingClient,
{
    /// Creates a fetcher that authenticates every call with `token`.
    #[must_use]
    pub fn new(
        client: Arc<L>,
        token: BearerToken,
        api_base: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            token,
            api_base: api_base.into(),
            retry,
        }
    }

    /// Fetches every page of `endpoint` under `filter`.
    ///
    /// Relative endpoints are resolved against the API base. Elements that do
    /// not fit `T` are skipped with a warning. When a page exhausts its
    /// retries the items gathered so far are returned together with
    /// [`PageStreamEnd::RetriesFailed`].
    pub async fn fetch<T>(&self, endpoint: &str, filter: StatusFilter) -> FetchOutcome<T>
    where
        T: DeserializeOwned,
    {
        let listing_url = filtered_url(&resolve_endpoint(&self.api_base, endpoint), filter);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = page_url(&listing_url, page);
            match self.fetch_page(&url).await {
                PageAttempt::Items(values) => {
                    debug!(url = %url, count = values.len(), "fetched page");
                    items.extend(values.into_iter().filter_map(|value| decode(&url, value)));
                    page = page.saturating_add(1);
                    pause(self.retry.page_delay()).await;
                }
                PageAttempt::End => {
                    return FetchOutcome {
                        url: listing_url,
                        items,
                        end: PageStreamEnd::NoMoreData,
                    };
                }
                PageAttempt::Exhausted(last_failure) => {
                    let attempts = self.retry.max_attempts();
                    warn!(
                        url = %listing_url,
                        page,
                        attempts,
                        failure = %last_failure,
                        "listing truncated after repeated failures"
                    );
                    return FetchOutcome {
                        url: listing_url,
                        items,
                        end: PageStreamEnd::RetriesFailed {
                            page,
                            attempts,
                            last_failure,
                        },
                    };
                }
            }
        }
    }

    /// Fetches a single JSON document with the same retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] on 404, [`FetchError::Decode`] when the
    /// body does not match `T`, and [`FetchError::RetriesFailed`] when every
    /// attempt failed.
    pub async fn fetch_document<T>(&self, endpoint: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = resolve_endpoint(&self.api_base, endpoint);
        let attempts = self.retry.max_attempts();
        let mut last_failure = String::new();

        for attempt in 1..=attempts {
            match self.client.get(&self.token, &url).await {
                Ok(ApiResponse::Json(body)) => {
                    return serde_json::from_value(body).map_err(|err| FetchError::Decode {
                        url,
                        message: err.to_string(),
                    });
                }
                Ok(ApiResponse::NotFound) => return Err(FetchError::NotFound(url)),
                Ok(ApiResponse::Status(status)) => last_failure = format!("HTTP {status}"),
                Err(err) => last_failure = err.to_string(),
            }
            debug!(url = %url, attempt, failure = %last_failure, "document attempt failed");
            if attempt < attempts {
                pause(self.retry.retry_pause()).await;
            }
        }

        Err(FetchError::RetriesFailed {
            url,
            attempts,
            last_failure,
        })
    }

    async fn fetch_page(&self, url: &str) -> PageAttempt {
        let attempts = self.retry.max_attempts();
        let mut last_failure = String::new();

        for attempt in 1..=attempts {
            match self.client.get(&self.token, url).await {
                Ok(ApiResponse::NotFound) => return PageAttempt::End,
                Ok(ApiResponse::Json(Value::Array(values))) => {
                    return if values.is_empty() {
                        PageAttempt::End
                    } else {
                        PageAttempt::Items(values)
                    };
                }
                Ok(ApiResponse::Json(Value::Null)) => return PageAttempt::End,
                Ok(ApiResponse::Json(Value::Object(fields))) if fields.is_empty() => {
                    return PageAttempt::End;
                }
                Ok(ApiResponse::Json(_)) => last_failure = "expected a JSON array".to_owned(),
                Ok(ApiResponse::Status(status)) => last_failure = format!("HTTP {status}"),
                Err(err) => last_failure = err.to_string(),
            }
            debug!(url, attempt, failure = %last_failure, "page attempt failed");
            if attempt < attempts {
                pause(self.retry.retry_pause()).await;
            }
        }

        PageAttempt::Exhausted(last_failure)
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Option<T> {
    serde_json::from_value(value)
        .inspect_err(|err| warn!(url, error = %err, "skipping malformed listing element"))
        .ok()
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
