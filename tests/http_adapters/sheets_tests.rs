//! Spreadsheet lookup and worksheet operations over the Sheets REST API.

use rstest::rstest;
use serde_json::json;
use tasksheet::extraction::ports::BearerToken;
use tasksheet::reconciliation::adapters::google::{GoogleSheetsStore, SpreadsheetLocator};
use tasksheet::reconciliation::ports::{SpreadsheetError, SpreadsheetStore};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> BearerToken {
    BearerToken::new("sheets-token")
}

fn store(server: &MockServer) -> GoogleSheetsStore {
    GoogleSheetsStore::new(reqwest::Client::new(), token(), "sheet-1")
        .with_sheets_api(format!("{}/v4/spreadsheets", server.uri()))
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worksheet_titles_come_from_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .and(query_param("fields", "sheets.properties.title"))
        .and(header("authorization", "Bearer sheets-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [
                { "properties": { "title": "Equipes" } },
                { "properties": { "title": "Janeiro 2025" } }
            ]
        })))
        .mount(&server)
        .await;

    let titles = store(&server).worksheet_titles().await.expect("metadata read");

    assert_eq!(titles, ["Equipes", "Janeiro 2025"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_rows_tolerates_empty_ranges() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/values/'Equipes'$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Equipes!A1:Z1000",
            "values": [["Nome"], ["João Silva"]]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/values/'Backlog'$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "range": "Backlog!A1:Z1000" })))
        .mount(&server)
        .await;

    let roster = store(&server).read_rows("Equipes").await.expect("roster read");
    let backlog = store(&server).read_rows("Backlog").await.expect("backlog read");

    assert_eq!(roster, vec![cells(&["Nome"]), cells(&["João Silva"])]);
    assert!(backlog.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_worksheet_sizes_grid_for_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .and(body_json(json!({
            "requests": [{ "addSheet": { "properties": {
                "title": "Backlog",
                "gridProperties": { "rowCount": 2600, "columnCount": 20 }
            } } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [{}] })))
        .expect(1)
        .mount(&server)
        .await;

    store(&server)
        .create_worksheet("Backlog", 2500)
        .await
        .expect("worksheet created");
}

fn grid_metadata(rows: usize, columns: usize) -> serde_json::Value {
    json!({
        "sheets": [{ "properties": {
            "sheetId": 42,
            "title": "Consolidado",
            "gridProperties": { "rowCount": rows, "columnCount": columns }
        } }]
    })
}

fn consolidated_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|index| {
            let title = format!("Tarefa {index}");
            cells(&[title.as_str(), "Janeiro 2025"])
        })
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn write_rows_grows_a_grid_that_is_too_small() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grid_metadata(1000, 26)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .and(body_json(json!({
            "requests": [{ "appendDimension": {
                "sheetId": 42,
                "dimension": "ROWS",
                "length": 1500
            } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [{}] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"/values/'Consolidado'!A1$"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    store(&server)
        .write_rows("Consolidado", &consolidated_rows(2500))
        .await
        .expect("rows written");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn write_rows_leaves_a_large_enough_grid_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grid_metadata(1000, 26)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-1:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [{}] })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"/values/'Consolidado'!A1$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    store(&server)
        .write_rows("Consolidado", &consolidated_rows(3))
        .await
        .expect("rows written");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_use_user_entered_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/values/'HistoricoDiario':clear$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"/values/'HistoricoDiario'!A3$"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(body_json(json!({
            "range": "'HistoricoDiario'!A3",
            "values": [["15/01/2025", "2", "5"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"/values/'HistoricoDiario':append$"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(query_param("insertDataOption", "INSERT_ROWS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let sheets = store(&server);
    sheets.clear("HistoricoDiario").await.expect("cleared");
    sheets
        .update_row("HistoricoDiario", 3, &cells(&["15/01/2025", "2", "5"]))
        .await
        .expect("row updated");
    sheets
        .append_row("HistoricoDiario", &cells(&["16/01/2025", "3", "5"]))
        .await
        .expect("row appended");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refused_requests_surface_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let result = store(&server).worksheet_titles().await;

    assert_eq!(
        result,
        Err(SpreadsheetError::Rejected {
            status: 403,
            body: "PERMISSION_DENIED".to_owned(),
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn row_zero_is_out_of_range() {
    let server = MockServer::start().await;

    let result = store(&server)
        .update_row("HistoricoDiario", 0, &cells(&["x"]))
        .await;

    assert!(matches!(result, Err(SpreadsheetError::RowOutOfRange { row: 0, .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn named_locator_searches_drive_in_folder() {
    let server = MockServer::start().await;
    let locator = SpreadsheetLocator::Named {
        name: "Relatório Semanal".to_owned(),
        folder: Some("folder-9".to_owned()),
    };
    let query = locator.drive_query().expect("named locators query drive");
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("q", query.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "id": "found-id", "name": "Relatório Semanal" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = locator
        .resolve(
            &reqwest::Client::new(),
            &token(),
            &format!("{}/drive/v3/files", server.uri()),
        )
        .await
        .expect("spreadsheet found");

    assert_eq!(id, "found-id");
    assert!(query.ends_with("and 'folder-9' in parents"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_spreadsheet_name_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .mount(&server)
        .await;
    let locator = SpreadsheetLocator::Named {
        name: "Sem nome".to_owned(),
        folder: None,
    };

    let result = locator
        .resolve(
            &reqwest::Client::new(),
            &token(),
            &format!("{}/drive/v3/files", server.uri()),
        )
        .await;

    assert_eq!(
        result,
        Err(SpreadsheetError::SpreadsheetNotFound("Sem nome".to_owned()))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn id_locator_needs_no_lookup() {
    let id = SpreadsheetLocator::Id("known".to_owned())
        .resolve(&reqwest::Client::new(), &token(), "http://127.0.0.1:9/unused")
        .await
        .expect("ids resolve locally");

    assert_eq!(id, "known");
}
