//! Spreadsheet port: worksheet-level access to the destination document.

use crate::reconciliation::domain::Row;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for spreadsheet operations.
pub type SpreadsheetResult<T> = Result<T, SpreadsheetError>;

/// A spreadsheet document made of titled worksheets holding string cells.
///
/// Row numbers are 1-based, matching what a reader sees in the sheet.
#[async_trait]
pub trait SpreadsheetStore: Send + Sync {
    /// Titles of every worksheet, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError`] when the document cannot be read.
    async fn worksheet_titles(&self) -> SpreadsheetResult<Vec<String>>;

    /// Adds an empty worksheet sized for at least `rows` rows.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::AlreadyExists`] when `title` is taken.
    async fn create_worksheet(&self, title: &str, rows: usize) -> SpreadsheetResult<()>;

    /// Every non-empty row of a worksheet, header first.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::WorksheetNotFound`] for unknown titles.
    async fn read_rows(&self, title: &str) -> SpreadsheetResult<Vec<Row>>;

    /// Removes every cell of a worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::WorksheetNotFound`] for unknown titles.
    async fn clear(&self, title: &str) -> SpreadsheetResult<()>;

    /// Writes `rows` starting at the first cell, growing the worksheet when
    /// it is too small to hold them.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::WorksheetNotFound`] for unknown titles.
    async fn write_rows(&self, title: &str, rows: &[Row]) -> SpreadsheetResult<()>;

    /// Appends `row` after the last non-empty row.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::WorksheetNotFound`] for unknown titles.
    async fn append_row(&self, title: &str, row: &[String]) -> SpreadsheetResult<()>;

    /// Overwrites row `row_number`, starting at its first cell.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::WorksheetNotFound`] for unknown titles and
    /// [`SpreadsheetError::RowOutOfRange`] for row 0.
    async fn update_row(&self, title: &str, row_number: usize, row: &[String])
    -> SpreadsheetResult<()>;
}

/// Errors returned by spreadsheet implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpreadsheetError {
    /// No spreadsheet matches the lookup.
    #[error("spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// No worksheet carries the title.
    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// A worksheet with the title already exists.
    #[error("worksheet already exists: {0}")]
    AlreadyExists(String),

    /// A row number outside the worksheet was addressed.
    #[error("row {row} is out of range in worksheet {title}")]
    RowOutOfRange {
        /// Worksheet title.
        title: String,
        /// Offending 1-based row number.
        row: usize,
    },

    /// The spreadsheet service refused the request.
    #[error("spreadsheet request rejected with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The request did not complete.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Shared state was poisoned by a panicking writer.
    #[error("spreadsheet state lock poisoned: {0}")]
    Poisoned(String),
}
