//! Listing port: one authenticated GET against the upstream API.

use super::BearerToken;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for listing client operations.
pub type ListingResult<T> = Result<T, ListingError>;

/// Classified response to a single GET.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Successful response with a JSON body.
    Json(serde_json::Value),
    /// HTTP 404; listings use it to signal that no further page exists.
    NotFound,
    /// Any other non-success status.
    Status(u16),
}

/// Read-only access to the upstream API.
#[async_trait]
pub trait ListingClient: Send + Sync {
    /// Issues a GET for an absolute `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Transport`] when no response was received and
    /// [`ListingError::Decode`] when a success body is not JSON.
    async fn get(&self, token: &BearerToken, url: &str) -> ListingResult<ApiResponse>;
}

/// Errors returned by listing client implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The request did not complete.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}
