//! Scripted listing client for crawler tests.

use crate::extraction::{
    domain::{StatusFilter, filtered_url, page_url},
    ports::{ApiResponse, BearerToken, ListingClient, ListingError, ListingResult},
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

/// Listing client that replays queued responses per URL.
///
/// Each GET pops the next response queued for its exact URL. URLs with no
/// queued response answer [`ApiResponse::NotFound`], which is how the real
/// API ends a listing. Every requested URL is recorded in call order.
#[derive(Debug, Default)]
pub struct ScriptedListingClient {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    responses: HashMap<String, VecDeque<ListingResult<ApiResponse>>>,
    calls: Vec<String>,
}

impl ScriptedListingClient {
    /// Creates a client with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one response for `url`.
    #[must_use]
    pub fn respond(mut self, url: impl Into<String>, response: ListingResult<ApiResponse>) -> Self {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state
            .responses
            .entry(url.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Serves a JSON document at `url`.
    #[must_use]
    pub fn document(self, url: impl Into<String>, body: Value) -> Self {
        self.respond(url, Ok(ApiResponse::Json(body)))
    }

    /// Serves `pages` as consecutive pages of `listing_url` under `filter`.
    ///
    /// The page after the last one is left unscripted and therefore ends the
    /// listing with a 404.
    #[must_use]
    pub fn pages(self, listing_url: &str, filter: StatusFilter, pages: Vec<Vec<Value>>) -> Self {
        let base = filtered_url(listing_url, filter);
        pages
            .into_iter()
            .zip(1_u32..)
            .fold(self, |client, (items, page)| {
                client.respond(
                    page_url(&base, page),
                    Ok(ApiResponse::Json(Value::Array(items))),
                )
            })
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ListingClient for ScriptedListingClient {
    async fn get(&self, _token: &BearerToken, url: &str) -> ListingResult<ApiResponse> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ListingError::Transport(err.to_string()))?;
        state.calls.push(url.to_owned());
        state
            .responses
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(ApiResponse::NotFound))
    }
}
