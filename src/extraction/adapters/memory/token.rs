//! Fixed-token provider for tests and local runs.

use crate::extraction::ports::{BearerToken, TokenError, TokenProvider, TokenResult};
use async_trait::async_trait;

/// Provider that returns a preconfigured outcome on every call.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    outcome: TokenResult<BearerToken>,
}

impl StaticTokenProvider {
    /// Always issues `token`.
    #[must_use]
    pub fn issuing(token: impl Into<String>) -> Self {
        Self {
            outcome: Ok(BearerToken::new(token)),
        }
    }

    /// Always fails with `error`.
    #[must_use]
    pub const fn failing(error: TokenError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> TokenResult<BearerToken> {
        self.outcome.clone()
    }
}
