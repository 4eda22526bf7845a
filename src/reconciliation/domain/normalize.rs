//! Raw item to canonical task mapping.

use super::{Task, TaskStatus};
use crate::calendar::parse_day;
use crate::extraction::domain::{ItemId, TaggedItem};
use chrono::{DateTime, NaiveDate};
use std::collections::HashSet;
use tracing::warn;

/// Keeps the first occurrence of every item id, preserving order.
///
/// Items without an id cannot be keyed and are dropped.
#[must_use]
pub fn dedup_by_id(items: impl IntoIterator<Item = TaggedItem>) -> Vec<TaggedItem> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    let mut unkeyed = 0_usize;
    let kept = items
        .into_iter()
        .filter(|item| match item.record.item_id() {
            Some(id) => seen.insert(id),
            None => {
                unkeyed += 1;
                false
            }
        })
        .collect();
    if unkeyed > 0 {
        warn!(count = unkeyed, "dropped items without an id");
    }
    kept
}

/// Maps a tagged item to a canonical task; `None` when it has no id.
#[must_use]
pub fn normalize(item: TaggedItem) -> Option<Task> {
    let TaggedItem { record, provenance } = item;
    let id = record.item_id()?;
    let status = TaskStatus::from_record(&record);
    let created_on = record.created_at.as_deref().and_then(parse_timestamp);
    let completed_on = record
        .completion
        .as_ref()
        .and_then(|completion| completion.created_at.as_deref())
        .and_then(parse_timestamp);

    Some(
        Task::new(
            id,
            record.title.unwrap_or_default(),
            provenance.week_label,
            provenance.group_label,
        )
        .with_status(status)
        .with_created_on(created_on)
        .with_completed_on(completed_on)
        .with_permalink(record.app_url.unwrap_or_default())
        .with_parent_list_url(provenance.parent_list_url),
    )
}

/// Deduplicates and normalizes a whole crawl.
#[must_use]
pub fn canonicalize(items: impl IntoIterator<Item = TaggedItem>) -> Vec<Task> {
    dedup_by_id(items).into_iter().filter_map(normalize).collect()
}

/// Calendar date of an upstream timestamp, in the timestamp's own offset.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .ok()
        .or_else(|| parse_day(trimmed))
}
