//! Report reconciliation for the destination spreadsheet.
//!
//! Canonical tasks are derived from crawled items, owners are resolved
//! against the team roster, and each report view is rewritten so that
//! repeated runs converge on the same spreadsheet contents. The module
//! follows hexagonal architecture:
//!
//! - Domain types and view rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The reconciliation engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
