//! Listing client response classification.

use rstest::rstest;
use serde_json::json;
use tasksheet::extraction::adapters::http::HttpListingClient;
use tasksheet::extraction::ports::{ApiResponse, BearerToken, ListingClient, ListingError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpListingClient {
    HttpListingClient::new("tasksheet-tests").expect("client builds")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn json_pages_are_returned_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/99/projects.json"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client()
        .get(
            &BearerToken::new("secret"),
            &format!("{}/99/projects.json?page=1", server.uri()),
        )
        .await
        .expect("request completes");

    assert_eq!(response, ApiResponse::Json(json!([{ "id": 1 }])));
}

#[rstest]
#[case(404, ApiResponse::NotFound)]
#[case(429, ApiResponse::Status(429))]
#[case(500, ApiResponse::Status(500))]
#[tokio::test(flavor = "multi_thread")]
async fn statuses_are_classified(#[case] status: u16, #[case] expected: ApiResponse) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let response = client()
        .get(&BearerToken::new("secret"), &format!("{}/any.json", server.uri()))
        .await
        .expect("request completes");

    assert_eq!(response, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_body_reads_as_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = client()
        .get(&BearerToken::new("secret"), &format!("{}/todos.json", server.uri()))
        .await
        .expect("request completes");

    assert_eq!(response, ApiResponse::Json(json!([])));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client()
        .get(&BearerToken::new("secret"), &format!("{}/todos.json", server.uri()))
        .await;

    assert!(matches!(result, Err(ListingError::Decode(_))));
}
