//! Status filters used to split upstream listings into partitions.

use std::fmt;

/// Status filter appended to a listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Default listing: active, open records.
    Active,
    /// `completed=true`.
    Completed,
    /// `status=archived`.
    Archived,
}

/// Partitions fetched for todo items (lists and groups alike).
pub const ITEM_PARTITIONS: [StatusFilter; 3] = [
    StatusFilter::Active,
    StatusFilter::Completed,
    StatusFilter::Archived,
];

/// Partitions fetched for todo-lists and groups themselves.
pub const LISTING_PARTITIONS: [StatusFilter; 2] = [StatusFilter::Active, StatusFilter::Archived];

impl StatusFilter {
    /// Query fragment for this filter, `None` for the default listing.
    #[must_use]
    pub const fn query(self) -> Option<&'static str> {
        match self {
            Self::Active => None,
            Self::Completed => Some("completed=true"),
            Self::Archived => Some("status=archived"),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        })
    }
}
