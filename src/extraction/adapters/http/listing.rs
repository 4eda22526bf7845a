//! HTTP listing client.

use crate::extraction::ports::{ApiResponse, BearerToken, ListingClient, ListingError, ListingResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Listing client backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct HttpListingClient {
    client: reqwest::Client,
}

impl HttpListingClient {
    /// Builds a client that identifies itself with `user_agent`.
    ///
    /// The upstream API rejects requests without a descriptive user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Transport`] when the TLS backend cannot be
    /// initialised.
    pub fn new(user_agent: &str) -> ListingResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|err| ListingError::Transport(err.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingClient for HttpListingClient {
    async fn get(&self, token: &BearerToken, url: &str) -> ListingResult<ApiResponse> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| ListingError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(ApiResponse::NotFound);
        }
        if !status.is_success() {
            return Ok(ApiResponse::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| ListingError::Transport(err.to_string()))?;
        if body.trim().is_empty() {
            return Ok(ApiResponse::Json(serde_json::Value::Array(Vec::new())));
        }
        serde_json::from_str(&body)
            .map(ApiResponse::Json)
            .map_err(|err| ListingError::Decode(err.to_string()))
    }
}
