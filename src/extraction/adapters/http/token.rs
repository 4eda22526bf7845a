//! OAuth refresh-token exchange against the Launchpad authorisation server.

use crate::extraction::ports::{BearerToken, TokenError, TokenProvider, TokenResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Production token endpoint.
pub const LAUNCHPAD_TOKEN_URL: &str = "https://launchpad.37signals.com/authorization/token";

/// Redirect URI registered for the OAuth client when none is configured.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/callback";

/// OAuth client registration plus the long-lived refresh token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RefreshCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Redirect URI registered for the client.
    pub redirect_uri: String,
    /// Refresh token; `None` when the secret was not provisioned.
    pub refresh_token: Option<String>,
}

impl RefreshCredentials {
    /// Creates credentials registered with [`DEFAULT_REDIRECT_URI`].
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
            refresh_token,
        }
    }

    /// Overrides the registered redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }
}

impl std::fmt::Debug for RefreshCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCredentials")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// Token provider that refreshes an access token on every call.
#[derive(Debug, Clone)]
pub struct LaunchpadTokenProvider {
    client: reqwest::Client,
    token_url: String,
    credentials: RefreshCredentials,
}

impl LaunchpadTokenProvider {
    /// Creates a provider for the production endpoint.
    #[must_use]
    pub fn new(client: reqwest::Client, credentials: RefreshCredentials) -> Self {
        Self {
            client,
            token_url: LAUNCHPAD_TOKEN_URL.to_owned(),
            credentials,
        }
    }

    /// Points the provider at another token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

#[async_trait]
impl TokenProvider for LaunchpadTokenProvider {
    async fn access_token(&self) -> TokenResult<BearerToken> {
        let refresh_token = self
            .credentials
            .refresh_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(TokenError::MissingCredential("BASECAMP_REFRESH_TOKEN"))?;

        let request = RefreshRequest {
            kind: "refresh",
            refresh_token,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            redirect_uri: &self.credentials.redirect_uri,
        };

        let response = self
            .client
            .post(&self.token_url)
            .json(&request)
            .send()
            .await
            .map_err(|err| TokenError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response
            .json::<RefreshResponse>()
            .await
            .map_err(|err| TokenError::Decode(err.to_string()))?;
        Ok(BearerToken::new(payload.access_token))
    }
}
