//! Extraction crawler for the upstream project-management API.
//!
//! The crawler discovers matching projects, selects their backlog and most
//! recent weekly todo-lists, and walks every list and sub-group to produce a
//! flat stream of items tagged with their week and group. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Crawl services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
