//! Runs one synchronisation from the upstream project-management API into
//! the report spreadsheet.
//!
//! Usage:
//!
//! ```text
//! tasksheet
//! ```
//!
//! Configuration is read from the environment. `BASECAMP_CLIENT_ID`,
//! `BASECAMP_CLIENT_SECRET` and `BASECAMP_REFRESH_TOKEN` authorise the crawl,
//! with `BASECAMP_REDIRECT_URI` defaulting to `http://localhost:8000/callback`; `GOOGLE_ACCESS_TOKEN`
//! authorises spreadsheet access, and the spreadsheet is located by
//! `SPREADSHEET_ID` or by `SPREADSHEET_NAME` (optionally inside `FOLDER_ID`).
//! Worksheet titles can be overridden with the `TASKSHEET_SHEET_*` variables.
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use mockable::DefaultClock;
use std::sync::Arc;
use tasksheet::config::{ConfigError, SyncConfig};
use tasksheet::extraction::adapters::http::{
    HttpListingClient, LaunchpadTokenProvider, RefreshCredentials,
};
use tasksheet::extraction::ports::BearerToken;
use tasksheet::pipeline::SyncService;
use tasksheet::reconciliation::adapters::google::{
    DRIVE_FILES_API, GoogleSheetsStore, SpreadsheetLocator,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const USER_AGENT: &str = concat!("tasksheet/", env!("CARGO_PKG_VERSION"));

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env_value(name).ok_or(ConfigError::Missing(name))
}

fn init_logging() {
    let filter = env_value("RUST_LOG")
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn spreadsheet_locator() -> Result<SpreadsheetLocator, ConfigError> {
    if let Some(id) = env_value("SPREADSHEET_ID") {
        return Ok(SpreadsheetLocator::Id(id));
    }
    Ok(SpreadsheetLocator::Named {
        name: required("SPREADSHEET_NAME")?,
        folder: env_value("FOLDER_ID"),
    })
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_logging();

    let config = SyncConfig::from_env()?;
    let mut credentials = RefreshCredentials::new(
        required("BASECAMP_CLIENT_ID")?,
        required("BASECAMP_CLIENT_SECRET")?,
        env_value("BASECAMP_REFRESH_TOKEN"),
    );
    if let Some(uri) = env_value("BASECAMP_REDIRECT_URI") {
        credentials = credentials.with_redirect_uri(uri);
    }
    let sheets_token = BearerToken::new(required("GOOGLE_ACCESS_TOKEN")?);
    let locator = spreadsheet_locator()?;

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let spreadsheet_id = locator
        .resolve(&client, &sheets_token, DRIVE_FILES_API)
        .await?;
    info!(spreadsheet = %spreadsheet_id, "destination spreadsheet located");

    let service = SyncService::new(
        Arc::new(HttpListingClient::with_client(client.clone())),
        Arc::new(LaunchpadTokenProvider::new(client.clone(), credentials)),
        Arc::new(GoogleSheetsStore::new(client, sheets_token, spreadsheet_id)),
        Arc::new(DefaultClock),
        config,
    );

    let report = service.run().await.inspect_err(|err| {
        error!(error = %err, "sync aborted");
    })?;
    for fetch in &report.truncated_fetches {
        warn!(url = %fetch.url, page = fetch.page, "listing was incomplete");
    }
    for (view, err) in report.views.failures() {
        warn!(view = %view, error = %err, "view was not updated");
    }
    info!(
        tasks = report.tasks,
        failed_views = report.views.failures().count(),
        "sync finished"
    );
    Ok(())
}
