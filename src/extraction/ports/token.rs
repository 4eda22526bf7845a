//! Token port: exchanges a long-lived credential for a bearer token.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Result type for token provider operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Short-lived bearer token for the upstream API.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Source of bearer tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtains a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when no token can be issued. Callers treat this
    /// as fatal for the whole run.
    async fn access_token(&self) -> TokenResult<BearerToken>;
}

/// Errors returned by token providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The refresh credential is not configured.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// The authorisation server refused the exchange.
    #[error("token request rejected with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The request did not complete.
    #[error("token transport error: {0}")]
    Transport(String),

    /// The response did not contain an access token.
    #[error("token response could not be decoded: {0}")]
    Decode(String),
}
