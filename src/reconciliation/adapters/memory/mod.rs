//! In-memory adapters for reconciliation tests.

mod spreadsheet;

pub use spreadsheet::InMemorySpreadsheet;
