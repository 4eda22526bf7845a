//! In-memory spreadsheet for engine and pipeline tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::reconciliation::{
    domain::Row,
    ports::{SpreadsheetError, SpreadsheetResult, SpreadsheetStore},
};

/// Thread-safe spreadsheet kept in memory.
///
/// Worksheets keep their creation order. Reads drop trailing empty rows the
/// same way the hosted service omits them.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpreadsheet {
    state: Arc<RwLock<Vec<Worksheet>>>,
}

#[derive(Debug, Clone)]
struct Worksheet {
    title: String,
    rows: Vec<Row>,
}

impl InMemorySpreadsheet {
    /// Creates a document with no worksheets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worksheet pre-filled with `rows`.
    #[must_use]
    pub fn with_worksheet(self, title: impl Into<String>, rows: Vec<Row>) -> Self {
        if let Ok(mut sheets) = self.state.write() {
            sheets.push(Worksheet {
                title: title.into(),
                rows,
            });
        }
        self
    }

    /// Snapshot of a worksheet's rows, or `None` when it does not exist.
    #[must_use]
    pub fn rows(&self, title: &str) -> Option<Vec<Row>> {
        let sheets = self.state.read().ok()?;
        sheets
            .iter()
            .find(|sheet| sheet.title == title)
            .map(|sheet| trimmed(&sheet.rows))
    }

    fn with_sheet<R>(
        &self,
        title: &str,
        apply: impl FnOnce(&mut Worksheet) -> SpreadsheetResult<R>,
    ) -> SpreadsheetResult<R> {
        let mut sheets = self
            .state
            .write()
            .map_err(|err| SpreadsheetError::Poisoned(err.to_string()))?;
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| SpreadsheetError::WorksheetNotFound(title.to_owned()))?;
        apply(sheet)
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(String::is_empty)
}

fn trimmed(rows: &[Row]) -> Vec<Row> {
    let used = rows.iter().rposition(|row| !is_blank(row)).map_or(0, |last| last + 1);
    rows.iter().take(used).cloned().collect()
}

fn place(rows: &mut Vec<Row>, index: usize, row: &[String]) {
    if rows.len() <= index {
        rows.resize_with(index + 1, Vec::new);
    }
    if let Some(slot) = rows.get_mut(index) {
        *slot = row.to_vec();
    }
}

#[async_trait]
impl SpreadsheetStore for InMemorySpreadsheet {
    async fn worksheet_titles(&self) -> SpreadsheetResult<Vec<String>> {
        let sheets = self
            .state
            .read()
            .map_err(|err| SpreadsheetError::Poisoned(err.to_string()))?;
        Ok(sheets.iter().map(|sheet| sheet.title.clone()).collect())
    }

    async fn create_worksheet(&self, title: &str, _rows: usize) -> SpreadsheetResult<()> {
        let mut sheets = self
            .state
            .write()
            .map_err(|err| SpreadsheetError::Poisoned(err.to_string()))?;
        if sheets.iter().any(|sheet| sheet.title == title) {
            return Err(SpreadsheetError::AlreadyExists(title.to_owned()));
        }
        sheets.push(Worksheet {
            title: title.to_owned(),
            rows: Vec::new(),
        });
        Ok(())
    }

    async fn read_rows(&self, title: &str) -> SpreadsheetResult<Vec<Row>> {
        self.with_sheet(title, |sheet| Ok(trimmed(&sheet.rows)))
    }

    async fn clear(&self, title: &str) -> SpreadsheetResult<()> {
        self.with_sheet(title, |sheet| {
            sheet.rows.clear();
            Ok(())
        })
    }

    async fn write_rows(&self, title: &str, rows: &[Row]) -> SpreadsheetResult<()> {
        self.with_sheet(title, |sheet| {
            for (index, row) in rows.iter().enumerate() {
                place(&mut sheet.rows, index, row);
            }
            Ok(())
        })
    }

    async fn append_row(&self, title: &str, row: &[String]) -> SpreadsheetResult<()> {
        self.with_sheet(title, |sheet| {
            let next = trimmed(&sheet.rows).len();
            place(&mut sheet.rows, next, row);
            Ok(())
        })
    }

    async fn update_row(
        &self,
        title: &str,
        row_number: usize,
        row: &[String],
    ) -> SpreadsheetResult<()> {
        self.with_sheet(title, |sheet| {
            let index = row_number
                .checked_sub(1)
                .ok_or_else(|| SpreadsheetError::RowOutOfRange {
                    title: title.to_owned(),
                    row: row_number,
                })?;
            place(&mut sheet.rows, index, row);
            Ok(())
        })
    }
}
