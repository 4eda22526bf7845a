//! Todo-list selection: backlog lists plus the most recent weekly lists.

use super::{Harvest, PaginatedFetcher};
use crate::extraction::{
    domain::{LISTING_PARTITIONS, Project, ProjectDocument, TodoList, TodoListRecord},
    ports::ListingClient,
};
use tracing::{info, warn};

/// Chooses which of a project's todo-lists to crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSelector {
    keywords: Vec<String>,
    recent_limit: usize,
}

impl ListSelector {
    /// Creates a selector.
    ///
    /// `recent_limit` caps the weekly lists kept; 0 keeps every weekly list.
    #[must_use]
    pub fn new(keywords: &[String], recent_limit: usize) -> Self {
        Self {
            keywords: keywords.iter().map(|keyword| keyword.to_uppercase()).collect(),
            recent_limit,
        }
    }

    /// Filters, ranks and truncates `lists`.
    ///
    /// Returns backlog lists in listing order followed by weekly lists, most
    /// recent first.
    #[must_use]
    pub fn select(&self, lists: Vec<TodoList>) -> Vec<TodoList> {
        let (mut backlog, mut weekly): (Vec<_>, Vec<_>) = lists
            .into_iter()
            .filter(|list| self.matches(list.title()))
            .partition(TodoList::is_backlog);

        weekly.sort_by(|left, right| left.date().recency_order(right.date()));
        if self.recent_limit > 0 {
            weekly.truncate(self.recent_limit);
        }

        backlog.append(&mut weekly);
        backlog
    }

    /// Fetches a project's active and archived lists and selects among them.
    ///
    /// A project whose document cannot be read, or that has no todoset,
    /// contributes no lists.
    pub async fn lists_for_project<L>(
        &self,
        fetcher: &PaginatedFetcher<L>,
        project: &Project,
    ) -> Harvest<TodoList>
    where
        L: ListingClient,
    {
        let mut harvest = Harvest::default();
        let document = match fetcher
            .fetch_document::<ProjectDocument>(&format!("projects/{}.json", project.id()))
            .await
        {
            Ok(document) => document,
            Err(err) => {
                warn!(project = %project.id(), error = %err, "skipping project without a readable document");
                return harvest;
            }
        };
        let Some(todoset) = document.todoset_id() else {
            warn!(project = %project.id(), "skipping project without a todoset");
            return harvest;
        };

        let endpoint = format!("buckets/{}/todosets/{todoset}/todolists.json", project.id());
        let mut candidates = Vec::new();
        for filter in LISTING_PARTITIONS {
            let outcome = fetcher.fetch::<TodoListRecord>(&endpoint, filter).await;
            candidates.extend(harvest.absorb(outcome, TodoList::from_record));
        }

        harvest.items = self.select(candidates);
        info!(
            project = %project.id(),
            selected = harvest.items.len(),
            "todo-lists selected"
        );
        harvest
    }

    fn matches(&self, title: &str) -> bool {
        let upper = title.to_uppercase();
        self.keywords.iter().any(|keyword| upper.contains(keyword.as_str()))
    }
}
