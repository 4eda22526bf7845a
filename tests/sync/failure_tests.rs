//! Fatal and degraded sync runs.

use super::helpers::{API, config, spreadsheet, today};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use tasksheet::config::SyncConfig;
use tasksheet::extraction::{
    adapters::memory::{ScriptedListingClient, StaticTokenProvider},
    domain::StatusFilter,
    ports::{ApiResponse, TokenError},
};
use tasksheet::pipeline::{SyncError, SyncService};
use tasksheet::reconciliation::adapters::memory::InMemorySpreadsheet;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn token_failure_aborts_before_crawling(
    spreadsheet: Arc<InMemorySpreadsheet>,
    config: SyncConfig,
) {
    let upstream = Arc::new(ScriptedListingClient::new());
    let service = SyncService::new(
        Arc::clone(&upstream),
        Arc::new(StaticTokenProvider::failing(TokenError::MissingCredential(
            "BASECAMP_REFRESH_TOKEN",
        ))),
        Arc::clone(&spreadsheet),
        Arc::new(DefaultClock),
        config,
    );

    let result = service.run_on(today()).await;

    assert!(matches!(
        result,
        Err(SyncError::Token(TokenError::MissingCredential(
            "BASECAMP_REFRESH_TOKEN"
        )))
    ));
    assert!(upstream.calls().is_empty());
    assert!(spreadsheet.rows("Total BaseCamp Semanas").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_listing_is_reported_and_earlier_pages_kept(
    spreadsheet: Arc<InMemorySpreadsheet>,
    config: SyncConfig,
) {
    let projects = format!("{API}/projects.json");
    let upstream = ScriptedListingClient::new()
        .pages(
            &projects,
            StatusFilter::Active,
            vec![vec![json!({ "id": 1, "name": "Sprint Q1" })]],
        )
        .respond(format!("{projects}?page=2"), Ok(ApiResponse::Status(500)))
        .respond(format!("{projects}?page=2"), Ok(ApiResponse::Status(502)))
        .respond(format!("{projects}?page=2"), Ok(ApiResponse::Status(503)));
    let service = SyncService::new(
        Arc::new(upstream),
        Arc::new(StaticTokenProvider::issuing("upstream-token")),
        Arc::clone(&spreadsheet),
        Arc::new(DefaultClock),
        config,
    );

    let report = service.run_on(today()).await.expect("token is available");

    assert_eq!(report.projects, 1);
    assert_eq!(report.lists, 0);
    let truncated = report
        .truncated_fetches
        .first()
        .expect("exhausted listing is reported");
    assert_eq!(truncated.url, projects);
    assert_eq!(truncated.page, 2);
    assert_eq!(truncated.attempts, 3);
    assert_eq!(
        spreadsheet
            .rows("Total BaseCamp Semanas")
            .map(|rows| rows.len()),
        Some(1)
    );
}
