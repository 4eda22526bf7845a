//! `reqwest` adapter for the Google Sheets v4 and Drive v3 APIs.

mod sheets;

pub use sheets::{DRIVE_FILES_API, GoogleSheetsStore, SHEETS_API, SpreadsheetLocator};
