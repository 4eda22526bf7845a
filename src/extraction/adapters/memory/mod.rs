//! In-memory adapters for extraction tests.

mod listing;
mod token;

pub use listing::ScriptedListingClient;
pub use token::StaticTokenProvider;
