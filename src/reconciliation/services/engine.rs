//! Derives each report view from the canonical tasks and writes it.

use crate::calendar::MonthSheet;
use crate::config::SheetNames;
use crate::reconciliation::{
    domain::{
        HistoryRow, MonthTab, Roster, Row, Task, backlog_tasks, consolidate, current_month_tasks,
        history_header, task_table,
    },
    ports::{SpreadsheetError, SpreadsheetStore},
};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Roster column holding full names.
const ROSTER_NAME_COLUMN: &str = "Nome";

/// Destination views, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Tasks of the current month's weeks.
    CurrentMonth,
    /// Every task.
    AllTasks,
    /// Tasks from backlog lists.
    Backlog,
    /// Rows of every monthly worksheet that belong to that month.
    Consolidated,
    /// One progress row per day.
    History,
}

impl View {
    /// Every view in write order.
    pub const ALL: [Self; 5] = [
        Self::CurrentMonth,
        Self::AllTasks,
        Self::Backlog,
        Self::Consolidated,
        Self::History,
    ];

    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentMonth => "current_month",
            Self::AllTasks => "all_tasks",
            Self::Backlog => "backlog",
            Self::Consolidated => "consolidated",
            Self::History => "history",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a view that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The worksheet now holds `rows` rows, header included.
    Written {
        /// Worksheet title.
        worksheet: String,
        /// Rows written.
        rows: usize,
    },
    /// The history row for the day was inserted or overwritten.
    Recorded {
        /// Worksheet title.
        worksheet: String,
        /// 1-based row number, or `None` when the row was appended.
        replaced_row: Option<usize>,
    },
    /// Nothing to write; the worksheet was left untouched.
    Skipped,
}

/// Failure of a single view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The spreadsheet rejected an operation.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}

/// Outcome of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewReport {
    /// View concerned.
    pub view: View,
    /// Outcome or failure.
    pub result: Result<ViewOutcome, ViewError>,
}

/// Outcome of every view of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Per-view outcomes in write order.
    pub views: Vec<ViewReport>,
}

impl ReconciliationReport {
    /// Outcome recorded for `view`.
    #[must_use]
    pub fn outcome(&self, view: View) -> Option<&Result<ViewOutcome, ViewError>> {
        self.views
            .iter()
            .find(|report| report.view == view)
            .map(|report| &report.result)
    }

    /// Views that failed.
    #[must_use]
    pub fn failures(&self) -> impl Iterator<Item = (View, &ViewError)> {
        self.views
            .iter()
            .filter_map(|report| report.result.as_ref().err().map(|err| (report.view, err)))
    }

    /// Returns `true` when every view succeeded or was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Writes the report views into one spreadsheet.
#[derive(Debug)]
pub struct ReconciliationEngine<S>
where
    S: SpreadsheetStore,
{
    store: Arc<S>,
    sheets: SheetNames,
}

impl<S> ReconciliationEngine<S>
where
    S: SpreadsheetStore,
{
    /// Creates an engine writing to `store` under the given sheet names.
    #[must_use]
    pub const fn new(store: Arc<S>, sheets: SheetNames) -> Self {
        Self { store, sheets }
    }

    /// Reads the team roster.
    ///
    /// A missing or unreadable roster worksheet, or one without a name
    /// column, yields an empty roster so every owner resolves to blank.
    pub async fn load_roster(&self) -> Roster {
        let title = self.sheets.roster();
        let rows = match self.store.read_rows(title).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(worksheet = title, error = %err, "roster unavailable; owners left blank");
                return Roster::default();
            }
        };
        Roster::from_rows(&rows, ROSTER_NAME_COLUMN).unwrap_or_else(|| {
            warn!(worksheet = title, column = ROSTER_NAME_COLUMN, "roster has no name column");
            Roster::default()
        })
    }

    /// Writes every view for `tasks` as of `today`.
    ///
    /// A failing view is logged and recorded; the remaining views still run.
    pub async fn reconcile(&self, tasks: &[Task], today: NaiveDate) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();
        for view in View::ALL {
            let result = match view {
                View::CurrentMonth => self.write_current_month(tasks, today).await,
                View::AllTasks => self.write_all_tasks(tasks).await,
                View::Backlog => self.write_backlog(tasks).await,
                View::Consolidated => self.write_consolidated().await,
                View::History => self.record_history(tasks, today).await,
            };
            match &result {
                Ok(outcome) => info!(view = %view, ?outcome, "view reconciled"),
                Err(err) => error!(view = %view, error = %err, "view failed"),
            }
            report.views.push(ViewReport { view, result });
        }
        report
    }

    /// Replaces the current month's worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the spreadsheet rejects an operation.
    pub async fn write_current_month(
        &self,
        tasks: &[Task],
        today: NaiveDate,
    ) -> Result<ViewOutcome, ViewError> {
        let selected = current_month_tasks(tasks, today);
        if selected.is_empty() {
            return Ok(ViewOutcome::Skipped);
        }
        self.replace(&MonthSheet::of(today).title(), &task_table(&selected))
            .await
    }

    /// Replaces the all-tasks worksheet. Written even when there are no
    /// tasks, leaving only the header.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the spreadsheet rejects an operation.
    pub async fn write_all_tasks(&self, tasks: &[Task]) -> Result<ViewOutcome, ViewError> {
        self.replace(self.sheets.all_tasks(), &task_table(tasks))
            .await
    }

    /// Replaces the backlog worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the spreadsheet rejects an operation.
    pub async fn write_backlog(&self, tasks: &[Task]) -> Result<ViewOutcome, ViewError> {
        let selected = backlog_tasks(tasks);
        if selected.is_empty() {
            return Ok(ViewOutcome::Skipped);
        }
        self.replace(self.sheets.backlog(), &task_table(selected))
            .await
    }

    /// Rebuilds the consolidated worksheet from every monthly worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the worksheet list or the destination
    /// cannot be accessed. Unreadable monthly worksheets are skipped.
    pub async fn write_consolidated(&self) -> Result<ViewOutcome, ViewError> {
        let mut tabs = Vec::new();
        for title in self.store.worksheet_titles().await? {
            let Some(month) = MonthSheet::parse(&title) else {
                continue;
            };
            match self.store.read_rows(&title).await {
                Ok(rows) => tabs.push(MonthTab { title, month, rows }),
                Err(err) => warn!(worksheet = %title, error = %err, "monthly worksheet skipped"),
            }
        }
        let rows = consolidate(&tabs);
        if rows.is_empty() {
            return Ok(ViewOutcome::Skipped);
        }
        self.replace(self.sheets.consolidated(), &rows).await
    }

    /// Inserts or overwrites today's progress row.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the spreadsheet rejects an operation.
    pub async fn record_history(
        &self,
        tasks: &[Task],
        today: NaiveDate,
    ) -> Result<ViewOutcome, ViewError> {
        let title = self.sheets.history();
        if !self.exists(title).await? {
            self.store.create_worksheet(title, 1).await?;
            self.store.append_row(title, &history_header()).await?;
        }
        let entry = HistoryRow::measure(tasks, today);
        let rows = self.store.read_rows(title).await?;
        let replaced_row = entry.locate(&rows);
        match replaced_row {
            Some(row_number) => {
                self.store
                    .update_row(title, row_number, &entry.to_row())
                    .await?;
            }
            None => self.store.append_row(title, &entry.to_row()).await?,
        }
        Ok(ViewOutcome::Recorded {
            worksheet: title.to_owned(),
            replaced_row,
        })
    }

    async fn exists(&self, title: &str) -> Result<bool, ViewError> {
        let titles = self.store.worksheet_titles().await?;
        Ok(titles.iter().any(|existing| existing == title))
    }

    async fn replace(&self, title: &str, rows: &[Row]) -> Result<ViewOutcome, ViewError> {
        if self.exists(title).await? {
            self.store.clear(title).await?;
        } else {
            self.store.create_worksheet(title, rows.len()).await?;
        }
        self.store.write_rows(title, rows).await?;
        Ok(ViewOutcome::Written {
            worksheet: title.to_owned(),
            rows: rows.len(),
        })
    }
}
