//! `reqwest` adapters for the upstream API and its authorisation server.

mod listing;
mod token;

pub use listing::HttpListingClient;
pub use token::{
    DEFAULT_REDIRECT_URI, LAUNCHPAD_TOKEN_URL, LaunchpadTokenProvider, RefreshCredentials,
};
