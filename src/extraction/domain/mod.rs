//! Domain model for the extraction crawler.
//!
//! Upstream payloads are loosely typed, so every record here is an
//! optional-field ingestion schema. Records are promoted to validated values
//! ([`Project`], [`TodoList`], [`Group`]) only once their identifying fields
//! are known to be present.

mod endpoint;
mod ids;
mod item;
mod partition;
mod project;
mod todolist;

pub use endpoint::{append_query, filtered_url, page_url, resolve_endpoint};
pub use ids::{GroupId, ItemId, ProjectId, TodoListId};
pub use item::{CompletionRecord, GroupLabel, ItemRecord, Provenance, TaggedItem};
pub use partition::{ITEM_PARTITIONS, LISTING_PARTITIONS, StatusFilter};
pub use project::{DockEntry, Project, ProjectDocument, ProjectRecord};
pub use todolist::{Group, GroupRecord, TodoList, TodoListRecord};
