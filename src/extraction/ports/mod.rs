//! Port contracts for the extraction crawler.
//!
//! Ports define infrastructure-agnostic interfaces used by crawl services.

pub mod listing;
pub mod token;

pub use listing::{ApiResponse, ListingClient, ListingError, ListingResult};
pub use token::{BearerToken, TokenError, TokenProvider, TokenResult};
