//! Todo items and the provenance tags attached while crawling.

use super::ItemId;
use serde::Deserialize;
use std::fmt;

/// Sentinel written for items that sit directly under a list.
const ROOT_GROUP_LABEL: &str = "(Raiz)";

/// One todo item as returned upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemRecord {
    /// Upstream identifier.
    pub id: Option<u64>,
    /// Item title.
    pub title: Option<String>,
    /// Lifecycle status, `archived` for archived items.
    pub status: Option<String>,
    /// Whether the item sits in the trash.
    pub trashed: Option<bool>,
    /// Whether the item has been checked off.
    pub completed: Option<bool>,
    /// Creation timestamp (RFC 3339).
    pub created_at: Option<String>,
    /// Completion details when the item has been checked off.
    pub completion: Option<CompletionRecord>,
    /// Browser permalink.
    pub app_url: Option<String>,
}

impl ItemRecord {
    /// Identifier, when present.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        self.id.map(ItemId::new)
    }
}

/// Completion details nested in an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompletionRecord {
    /// When the item was checked off (RFC 3339).
    pub created_at: Option<String>,
}

/// Group an item was found under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupLabel {
    /// Directly under the todo-list.
    Root,
    /// Under a named group.
    Named(String),
}

impl GroupLabel {
    /// Label as written to worksheets.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => ROOT_GROUP_LABEL,
            Self::Named(title) => title,
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Week and group an item was crawled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Title of the todo-list the item belongs to.
    pub week_label: String,
    /// Group inside the list.
    pub group_label: GroupLabel,
    /// Permalink of the parent list.
    pub parent_list_url: String,
}

/// An item tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    /// Raw upstream record.
    pub record: ItemRecord,
    /// Where the crawler found it.
    pub provenance: Provenance,
}
