//! Project discovery by name keyword.

use super::{Harvest, PaginatedFetcher};
use crate::extraction::{
    domain::{Project, ProjectId, ProjectRecord, StatusFilter},
    ports::ListingClient,
};
use tracing::info;

const PROJECTS_ENDPOINT: &str = "projects.json";

/// Selects projects whose name contains one of the configured keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDiscovery {
    keywords: Vec<String>,
}

impl ProjectDiscovery {
    /// Creates a discovery filter; matching is case-insensitive.
    #[must_use]
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|keyword| keyword.to_uppercase()).collect(),
        }
    }

    /// Returns `true` when `name` contains any keyword.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let upper = name.to_uppercase();
        self.keywords.iter().any(|keyword| upper.contains(keyword.as_str()))
    }

    /// Matching projects, in listing order.
    pub fn matching<'a>(&'a self, projects: &'a [Project]) -> impl Iterator<Item = &'a Project> {
        projects
            .iter()
            .filter(|project| self.matches(project.name()))
    }

    /// Ids of matching projects, in listing order.
    #[must_use]
    pub fn discover(&self, projects: &[Project]) -> Vec<ProjectId> {
        self.matching(projects).map(Project::id).collect()
    }

    /// Fetches the project listing and keeps matching projects.
    pub async fn fetch_matching<L>(&self, fetcher: &PaginatedFetcher<L>) -> Harvest<Project>
    where
        L: ListingClient,
    {
        let outcome = fetcher
            .fetch::<ProjectRecord>(PROJECTS_ENDPOINT, StatusFilter::Active)
            .await;
        let mut harvest = Harvest::default();
        let projects = harvest.absorb(outcome, Project::from_record);

        for project in self.matching(&projects) {
            info!(project = %project.name(), id = %project.id(), "project matched");
            harvest.items.push(project.clone());
        }
        if harvest.items.is_empty() {
            info!("no project matched the configured keywords");
        }
        harvest
    }
}
