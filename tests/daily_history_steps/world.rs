//! Shared world state for daily history BDD scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::fixture;
use tasksheet::calendar::parse_day;
use tasksheet::config::SheetNames;
use tasksheet::reconciliation::{
    adapters::memory::InMemorySpreadsheet,
    domain::Task,
    services::{ReconciliationEngine, ViewError, ViewOutcome},
};

/// Scenario world for daily history behaviour tests.
pub struct HistoryWorld {
    pub store: Arc<InMemorySpreadsheet>,
    pub engine: ReconciliationEngine<InMemorySpreadsheet>,
    pub tasks: Vec<Task>,
    pub next_id: u64,
    pub last_result: Option<Result<ViewOutcome, ViewError>>,
}

impl HistoryWorld {
    /// Creates a world over an empty spreadsheet.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemorySpreadsheet::new());
        let engine = ReconciliationEngine::new(Arc::clone(&store), SheetNames::default());
        Self {
            store,
            engine,
            tasks: Vec::new(),
            next_id: 1,
            last_result: None,
        }
    }

    /// Title of the history worksheet.
    #[must_use]
    pub fn history_title() -> String {
        SheetNames::default().history().to_owned()
    }
}

impl Default for HistoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> HistoryWorld {
    HistoryWorld::default()
}

/// Parses a `dd/mm/yyyy` step argument.
///
/// # Errors
///
/// Returns an error when the argument is not a calendar day.
pub fn step_day(raw: &str) -> Result<NaiveDate, eyre::Report> {
    parse_day(raw).ok_or_else(|| eyre::eyre!("not a dd/mm/yyyy date: {raw}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
