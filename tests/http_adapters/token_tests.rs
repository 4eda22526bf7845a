//! Refresh-token exchange.

use rstest::{fixture, rstest};
use serde_json::json;
use tasksheet::extraction::adapters::http::{
    DEFAULT_REDIRECT_URI, LaunchpadTokenProvider, RefreshCredentials,
};
use tasksheet::extraction::ports::{TokenError, TokenProvider};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[fixture]
fn credentials() -> RefreshCredentials {
    RefreshCredentials {
        client_id: "client".to_owned(),
        client_secret: "shh".to_owned(),
        redirect_uri: "https://example.test/callback".to_owned(),
        refresh_token: Some("refresh-me".to_owned()),
    }
}

fn provider(server: &MockServer, credentials: RefreshCredentials) -> LaunchpadTokenProvider {
    LaunchpadTokenProvider::new(reqwest::Client::new(), credentials)
        .with_token_url(format!("{}/authorization/token", server.uri()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_exchange_yields_access_token(credentials: RefreshCredentials) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .and(body_json(json!({
            "type": "refresh",
            "refresh_token": "refresh-me",
            "client_id": "client",
            "client_secret": "shh",
            "redirect_uri": "https://example.test/callback"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "fresh", "expires_in": 1_209_600 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = provider(&server, credentials)
        .access_token()
        .await
        .expect("token issued");

    assert_eq!(token.expose(), "fresh");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unset_redirect_uri_falls_back_to_local_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authorization/token"))
        .and(body_json(json!({
            "type": "refresh",
            "refresh_token": "refresh-me",
            "client_id": "client",
            "client_secret": "shh",
            "redirect_uri": DEFAULT_REDIRECT_URI
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;
    let credentials = RefreshCredentials::new("client", "shh", Some("refresh-me".to_owned()));

    let token = provider(&server, credentials)
        .access_token()
        .await
        .expect("token issued");

    assert_eq!(token.expose(), "fresh");
    assert_eq!(DEFAULT_REDIRECT_URI, "http://localhost:8000/callback");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_exchange_keeps_status_and_body(credentials: RefreshCredentials) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let result = provider(&server, credentials).access_token().await;

    assert_eq!(
        result,
        Err(TokenError::Rejected {
            status: 401,
            body: "invalid_grant".to_owned(),
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_refresh_token_fails_without_a_request(mut credentials: RefreshCredentials) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    credentials.refresh_token = None;

    let result = provider(&server, credentials).access_token().await;

    assert_eq!(
        result,
        Err(TokenError::MissingCredential("BASECAMP_REFRESH_TOKEN"))
    );
}
