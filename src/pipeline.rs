//! End-to-end synchronisation: crawl the upstream API, then reconcile the
//! destination spreadsheet.

use crate::config::SyncConfig;
use crate::extraction::{
    ports::{ListingClient, TokenError, TokenProvider},
    services::{
        CrawlEvent, HierarchicalTaskAggregator, ListSelector, PaginatedFetcher, ProjectDiscovery,
        TruncatedFetch,
    },
};
use crate::reconciliation::{
    domain::{AssigneeResolver, Task, canonicalize},
    ports::SpreadsheetStore,
    services::{ReconciliationEngine, ReconciliationReport},
};
use chrono::NaiveDate;
use futures::StreamExt;
use mockable::Clock;
use std::pin::pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No access token could be obtained; nothing was crawled.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Projects matching the project keywords.
    pub projects: usize,
    /// Todo-lists selected across those projects.
    pub lists: usize,
    /// Items crawled, before deduplication.
    pub raw_items: usize,
    /// Canonical tasks after deduplication.
    pub tasks: usize,
    /// Listings cut short after exhausting their retries.
    pub truncated_fetches: Vec<TruncatedFetch>,
    /// Per-view outcomes; empty when no project matched.
    pub views: ReconciliationReport,
}

/// Drives one synchronisation run over the configured adapters.
#[derive(Debug)]
pub struct SyncService<L, T, S, C>
where
    L: ListingClient,
    T: TokenProvider,
    S: SpreadsheetStore,
    C: Clock + Send + Sync,
{
    listing: Arc<L>,
    tokens: Arc<T>,
    store: Arc<S>,
    clock: Arc<C>,
    config: SyncConfig,
}

impl<L, T, S, C> SyncService<L, T, S, C>
where
    L: ListingClient,
    T: TokenProvider,
    S: SpreadsheetStore,
    C: Clock + Send + Sync,
{
    /// Creates a service.
    #[must_use]
    pub const fn new(
        listing: Arc<L>,
        tokens: Arc<T>,
        store: Arc<S>,
        clock: Arc<C>,
        config: SyncConfig,
    ) -> Self {
        Self {
            listing,
            tokens,
            store,
            clock,
            config,
        }
    }

    /// Runs a sync dated by the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Token`] when no access token can be obtained.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_on(self.clock.local().date_naive()).await
    }

    /// Runs a sync as if today were `today`.
    ///
    /// When no project matches, the spreadsheet is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Token`] when no access token can be obtained.
    pub async fn run_on(&self, today: NaiveDate) -> Result<SyncReport, SyncError> {
        let token = self.tokens.access_token().await?;
        let fetcher = PaginatedFetcher::new(
            Arc::clone(&self.listing),
            token,
            self.config.api_base(),
            self.config.retry(),
        );
        let mut report = SyncReport::default();

        let discovered = ProjectDiscovery::new(self.config.project_keywords())
            .fetch_matching(&fetcher)
            .await;
        report.truncated_fetches.extend(discovered.truncated);
        report.projects = discovered.items.len();
        if discovered.items.is_empty() {
            warn!("no matching projects; spreadsheet left untouched");
            return Ok(report);
        }

        let selector = ListSelector::new(
            self.config.list_keywords(),
            self.config.recent_list_limit(),
        );
        let aggregator = HierarchicalTaskAggregator::new(&fetcher);
        let mut crawled = Vec::new();
        for project in &discovered.items {
            let lists = selector.lists_for_project(&fetcher, project).await;
            report.truncated_fetches.extend(lists.truncated);
            report.lists += lists.items.len();
            for list in &lists.items {
                let mut events = pin!(aggregator.crawl(project.id(), list));
                while let Some(event) = events.next().await {
                    match event {
                        CrawlEvent::Item(item) => crawled.push(item),
                        CrawlEvent::Truncated(truncated) => {
                            report.truncated_fetches.push(truncated);
                        }
                    }
                }
            }
        }
        report.raw_items = crawled.len();

        let engine = ReconciliationEngine::new(Arc::clone(&self.store), self.config.sheets().clone());
        let resolver = AssigneeResolver::new(engine.load_roster().await);
        let tasks: Vec<Task> = canonicalize(crawled)
            .into_iter()
            .map(|task| {
                let owner = resolver.resolve(task.group_label().as_str());
                task.with_owner(owner)
            })
            .collect();
        report.tasks = tasks.len();
        info!(
            projects = report.projects,
            lists = report.lists,
            raw_items = report.raw_items,
            tasks = report.tasks,
            truncated = report.truncated_fetches.len(),
            "crawl finished"
        );

        report.views = engine.reconcile(&tasks, today).await;
        Ok(report)
    }
}
