//! Port contracts for report reconciliation.
//!
//! The engine only depends on [`SpreadsheetStore`]; the hosted spreadsheet
//! and the in-memory test double both implement it.

pub mod spreadsheet;

pub use spreadsheet::{SpreadsheetError, SpreadsheetResult, SpreadsheetStore};
