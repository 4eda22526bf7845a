//! Hierarchical walk over a todo-list and its groups.

use super::{FetchOutcome, PaginatedFetcher, TruncatedFetch};
use crate::extraction::{
    domain::{
        Group, GroupLabel, GroupRecord, ITEM_PARTITIONS, ItemRecord, LISTING_PARTITIONS,
        ProjectId, Provenance, TaggedItem, TodoList,
    },
    ports::ListingClient,
};
use async_stream::stream;
use futures::Stream;
use tracing::debug;

/// One element of a crawl stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// An item tagged with its week and group.
    Item(TaggedItem),
    /// A listing that ended early; items before the failure were emitted.
    Truncated(TruncatedFetch),
}

/// Walks the root items and groups of selected todo-lists.
///
/// Items are not deduplicated: the open, completed and archived partitions
/// can overlap, so consumers must dedup by id across the whole crawl.
#[derive(Debug)]
pub struct HierarchicalTaskAggregator<'a, L>
where
    L: ListingClient,
{
    fetcher: &'a PaginatedFetcher<L>,
}

impl<'a, L> HierarchicalTaskAggregator<'a, L>
where
    L: ListingClient,
{
    /// Creates an aggregator over `fetcher`.
    #[must_use]
    pub const fn new(fetcher: &'a PaginatedFetcher<L>) -> Self {
        Self { fetcher }
    }

    /// Streams every item of `list`, root items first, then group by group.
    ///
    /// The stream is finite and can be consumed once. Network calls happen
    /// only as the stream is polled.
    pub fn crawl<'s>(
        &'s self,
        project: ProjectId,
        list: &'s TodoList,
    ) -> impl Stream<Item = CrawlEvent> + 's {
        let fetcher = self.fetcher;
        stream! {
            let root_endpoint = list.todos_url().map_or_else(
                || format!("buckets/{project}/todolists/{}/todos.json", list.id()),
                str::to_owned,
            );
            let root = provenance(list, GroupLabel::Root);
            for filter in ITEM_PARTITIONS {
                let outcome = fetcher.fetch::<ItemRecord>(&root_endpoint, filter).await;
                for event in tag(outcome, &root) {
                    yield event;
                }
            }

            let groups_endpoint = format!("buckets/{project}/todolists/{}/groups.json", list.id());
            let mut groups = Vec::new();
            for filter in LISTING_PARTITIONS {
                let outcome = fetcher.fetch::<GroupRecord>(&groups_endpoint, filter).await;
                if let Some(truncated) = outcome.truncation() {
                    yield CrawlEvent::Truncated(truncated);
                }
                groups.extend(outcome.items.into_iter().filter_map(Group::from_record));
            }
            debug!(list = %list.title(), groups = groups.len(), "walking groups");

            for group in groups {
                let tagged = provenance(list, GroupLabel::Named(group.title().to_owned()));
                for filter in ITEM_PARTITIONS {
                    let outcome = fetcher.fetch::<ItemRecord>(group.todos_url(), filter).await;
                    for event in tag(outcome, &tagged) {
                        yield event;
                    }
                }
            }
        }
    }
}

fn provenance(list: &TodoList, group_label: GroupLabel) -> Provenance {
    Provenance {
        week_label: list.title().to_owned(),
        group_label,
        parent_list_url: list.app_url().to_owned(),
    }
}

fn tag(outcome: FetchOutcome<ItemRecord>, provenance: &Provenance) -> Vec<CrawlEvent> {
    let truncated = outcome.truncation();
    outcome
        .items
        .into_iter()
        .map(|record| {
            CrawlEvent::Item(TaggedItem {
                record,
                provenance: provenance.clone(),
            })
        })
        .chain(truncated.map(CrawlEvent::Truncated))
        .collect()
}
