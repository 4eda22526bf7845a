//! Shared fixtures for end-to-end sync tests.

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;
use tasksheet::config::{RetryPolicy, SyncConfig};
use tasksheet::extraction::{
    adapters::memory::{ScriptedListingClient, StaticTokenProvider},
    domain::StatusFilter,
};
use tasksheet::pipeline::SyncService;
use tasksheet::reconciliation::adapters::memory::InMemorySpreadsheet;

/// API base every scripted URL lives under.
pub const API: &str = "https://api.test/99";

/// Service type used by the sync tests.
pub type TestSyncService =
    SyncService<ScriptedListingClient, StaticTokenProvider, InMemorySpreadsheet, DefaultClock>;

/// Wednesday of the scripted work week.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid calendar date")
}

/// Configuration pointing at the scripted API with no pacing delays.
#[fixture]
pub fn config() -> SyncConfig {
    SyncConfig::for_account("99")
        .with_api_base(API)
        .with_retry(RetryPolicy::immediate(3))
}

/// Spreadsheet holding only the team roster.
#[fixture]
pub fn spreadsheet() -> Arc<InMemorySpreadsheet> {
    Arc::new(InMemorySpreadsheet::new().with_worksheet(
        "Equipes",
        vec![
            vec!["Equipe".to_owned(), "Nome".to_owned()],
            vec!["Portal".to_owned(), "João Silva".to_owned()],
        ],
    ))
}

/// Upstream data for one matching project with a weekly list and a backlog.
///
/// The weekly list holds an open root item, a completed root item and a
/// group owned by João whose listing repeats the open root item.
#[fixture]
pub fn upstream() -> ScriptedListingClient {
    let weekly_todos = format!("{API}/buckets/1/todolists/100/todos.json");
    let group_todos = format!("{API}/buckets/1/todolists/500/todos.json");
    ScriptedListingClient::new()
        .pages(
            &format!("{API}/projects.json"),
            StatusFilter::Active,
            vec![vec![
                json!({ "id": 1, "name": "Media Portal 2025" }),
                json!({ "id": 2, "name": "Financeiro" }),
            ]],
        )
        .document(
            format!("{API}/projects/1.json"),
            json!({ "dock": [
                { "id": 7, "name": "message_board" },
                { "id": 10, "name": "todoset" }
            ] }),
        )
        .pages(
            &format!("{API}/buckets/1/todosets/10/todolists.json"),
            StatusFilter::Active,
            vec![vec![
                json!({
                    "id": 100,
                    "title": "ATIVIDADES DA SEMANA 13/01/2025",
                    "todos_url": weekly_todos,
                    "app_url": "https://app.test/lists/100"
                }),
                json!({ "id": 101, "title": "BACKLOG", "app_url": "https://app.test/lists/101" }),
                json!({ "id": 102, "title": "Reunião geral" }),
            ]],
        )
        .pages(
            &weekly_todos,
            StatusFilter::Active,
            vec![vec![json!({
                "id": 1000,
                "title": "Publicar matéria",
                "created_at": "2025-01-13T09:00:00-03:00",
                "app_url": "https://app.test/todos/1000"
            })]],
        )
        .pages(
            &weekly_todos,
            StatusFilter::Completed,
            vec![vec![json!({
                "id": 1001,
                "title": "Revisar pauta",
                "completed": true,
                "created_at": "2025-01-13T10:00:00-03:00",
                "completion": { "created_at": "2025-01-14T16:00:00-03:00" }
            })]],
        )
        .pages(
            &format!("{API}/buckets/1/todolists/100/groups.json"),
            StatusFilter::Active,
            vec![vec![json!({
                "id": 500,
                "title": "Atividades João Silva",
                "todos_url": group_todos
            })]],
        )
        .pages(
            &group_todos,
            StatusFilter::Active,
            vec![vec![
                json!({ "id": 1002, "title": "Editar vídeo" }),
                json!({ "id": 1000, "title": "Publicar matéria" }),
            ]],
        )
        .pages(
            &format!("{API}/buckets/1/todolists/101/todos.json"),
            StatusFilter::Active,
            vec![vec![json!({ "id": 2000, "title": "Nova seção" })]],
        )
}

/// Builds a service over the given adapters.
#[must_use]
pub fn service_over(
    upstream: ScriptedListingClient,
    spreadsheet: &Arc<InMemorySpreadsheet>,
    config: SyncConfig,
) -> TestSyncService {
    SyncService::new(
        Arc::new(upstream),
        Arc::new(StaticTokenProvider::issuing("upstream-token")),
        Arc::clone(spreadsheet),
        Arc::new(DefaultClock),
        config,
    )
}
