//! Immutable run configuration.
//!
//! A single [`SyncConfig`] value is built once at start-up and handed to each
//! component at construction. Defaults reproduce the production report
//! layout; every field can be overridden with a `with_*` builder method or an
//! environment variable read by [`SyncConfig::from_env`].

use std::time::Duration;
use thiserror::Error;

/// Default upstream account.
pub const DEFAULT_ACCOUNT_ID: &str = "3619571";

const API_HOST: &str = "https://3.basecampapi.com";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("invalid value '{value}' for {variable}, expected a non-negative integer")]
    InvalidNumber {
        /// Environment variable name.
        variable: &'static str,
        /// Raw value found.
        value: String,
    },

    /// A required variable is missing or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Retry and pacing policy for paginated fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_pause: Duration,
    page_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. A `max_attempts` of zero is treated as one.
    #[must_use]
    pub const fn new(max_attempts: u32, retry_pause: Duration, page_delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            retry_pause,
            page_delay,
        }
    }

    /// Policy with no pauses, for tests and local replays.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Attempts made per page before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between two failed attempts on the same page.
    #[must_use]
    pub const fn retry_pause(&self) -> Duration {
        self.retry_pause
    }

    /// Courtesy delay after each successful page.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1), Duration::from_millis(50))
    }
}

/// Destination worksheet titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    roster: String,
    all_tasks: String,
    consolidated: String,
    history: String,
    backlog: String,
}

impl SheetNames {
    /// Worksheet holding the team roster.
    #[must_use]
    pub fn roster(&self) -> &str {
        &self.roster
    }

    /// Worksheet receiving every extracted task.
    #[must_use]
    pub fn all_tasks(&self) -> &str {
        &self.all_tasks
    }

    /// Worksheet receiving the cross-month consolidation.
    #[must_use]
    pub fn consolidated(&self) -> &str {
        &self.consolidated
    }

    /// Worksheet holding one progress row per day.
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Worksheet receiving backlog tasks.
    #[must_use]
    pub fn backlog(&self) -> &str {
        &self.backlog
    }

    /// Overrides the roster worksheet title.
    #[must_use]
    pub fn with_roster(mut self, title: impl Into<String>) -> Self {
        self.roster = title.into();
        self
    }

    /// Overrides the all-tasks worksheet title.
    #[must_use]
    pub fn with_all_tasks(mut self, title: impl Into<String>) -> Self {
        self.all_tasks = title.into();
        self
    }

    /// Overrides the consolidation worksheet title.
    #[must_use]
    pub fn with_consolidated(mut self, title: impl Into<String>) -> Self {
        self.consolidated = title.into();
        self
    }

    /// Overrides the history worksheet title.
    #[must_use]
    pub fn with_history(mut self, title: impl Into<String>) -> Self {
        self.history = title.into();
        self
    }

    /// Overrides the backlog worksheet title.
    #[must_use]
    pub fn with_backlog(mut self, title: impl Into<String>) -> Self {
        self.backlog = title.into();
        self
    }
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            roster: "Equipes".to_owned(),
            all_tasks: "Total BaseCamp Semanas".to_owned(),
            consolidated: "Total BaseCamp para Notas".to_owned(),
            history: "HistoricoDiario".to_owned(),
            backlog: "Backlog".to_owned(),
        }
    }
}

/// Complete configuration for one synchronisation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    api_base: String,
    project_keywords: Vec<String>,
    list_keywords: Vec<String>,
    recent_list_limit: usize,
    retry: RetryPolicy,
    sheets: SheetNames,
}

impl SyncConfig {
    /// Creates the default configuration for an account.
    #[must_use]
    pub fn for_account(account_id: &str) -> Self {
        Self {
            api_base: format!("{API_HOST}/{account_id}"),
            project_keywords: vec!["MEDIA PORTAL".to_owned(), "SPRINT".to_owned()],
            list_keywords: vec!["ATIVIDADES DA SEMANA".to_owned(), "BACKLOG".to_owned()],
            recent_list_limit: 6,
            retry: RetryPolicy::default(),
            sheets: SheetNames::default(),
        }
    }

    /// Builds configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric override does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric override does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let account = get("BASECAMP_ACCOUNT_ID").unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_owned());
        let mut config = Self::for_account(account.trim());

        if let Some(base) = get("BASECAMP_API_BASE") {
            config = config.with_api_base(base.trim());
        }
        if let Some(raw) = get("TASKSHEET_PROJECT_KEYWORDS") {
            config = config.with_project_keywords(split_keywords(&raw));
        }
        if let Some(raw) = get("TASKSHEET_LIST_KEYWORDS") {
            config = config.with_list_keywords(split_keywords(&raw));
        }
        if let Some(raw) = get("TASKSHEET_RECENT_LISTS") {
            let limit = parse_number::<usize>("TASKSHEET_RECENT_LISTS", &raw)?;
            config = config.with_recent_list_limit(limit);
        }
        if let Some(raw) = get("TASKSHEET_MAX_RETRIES") {
            let attempts = parse_number::<u32>("TASKSHEET_MAX_RETRIES", &raw)?;
            let current = config.retry;
            config = config.with_retry(RetryPolicy::new(
                attempts,
                current.retry_pause(),
                current.page_delay(),
            ));
        }

        let mut sheets = config.sheets.clone();
        if let Some(title) = get("TASKSHEET_SHEET_ROSTER") {
            sheets = sheets.with_roster(title.trim());
        }
        if let Some(title) = get("TASKSHEET_SHEET_ALL_TASKS") {
            sheets = sheets.with_all_tasks(title.trim());
        }
        if let Some(title) = get("TASKSHEET_SHEET_CONSOLIDATED") {
            sheets = sheets.with_consolidated(title.trim());
        }
        if let Some(title) = get("TASKSHEET_SHEET_HISTORY") {
            sheets = sheets.with_history(title.trim());
        }
        if let Some(title) = get("TASKSHEET_SHEET_BACKLOG") {
            sheets = sheets.with_backlog(title.trim());
        }
        Ok(config.with_sheets(sheets))
    }

    /// Absolute base URL that relative endpoints are resolved against.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Upper-case keywords selecting projects by name.
    #[must_use]
    pub fn project_keywords(&self) -> &[String] {
        &self.project_keywords
    }

    /// Upper-case keywords selecting todo-lists by title.
    #[must_use]
    pub fn list_keywords(&self) -> &[String] {
        &self.list_keywords
    }

    /// Number of most-recent weekly lists kept per project; 0 keeps all.
    #[must_use]
    pub const fn recent_list_limit(&self) -> usize {
        self.recent_list_limit
    }

    /// Pagination retry policy.
    #[must_use]
    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Destination worksheet titles.
    #[must_use]
    pub const fn sheets(&self) -> &SheetNames {
        &self.sheets
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_owned();
        self
    }

    /// Overrides the project keywords. Keywords are stored upper-cased.
    #[must_use]
    pub fn with_project_keywords(mut self, keywords: impl IntoIterator<Item = String>) -> Self {
        self.project_keywords = upper_all(keywords);
        self
    }

    /// Overrides the list keywords. Keywords are stored upper-cased.
    #[must_use]
    pub fn with_list_keywords(mut self, keywords: impl IntoIterator<Item = String>) -> Self {
        self.list_keywords = upper_all(keywords);
        self
    }

    /// Overrides the weekly list recency limit.
    #[must_use]
    pub const fn with_recent_list_limit(mut self, limit: usize) -> Self {
        self.recent_list_limit = limit;
        self
    }

    /// Overrides the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Overrides the destination worksheet titles.
    #[must_use]
    pub fn with_sheets(mut self, sheets: SheetNames) -> Self {
        self.sheets = sheets;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::for_account(DEFAULT_ACCOUNT_ID)
    }
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_owned)
        .collect()
}

fn upper_all(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_uppercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

fn parse_number<T: std::str::FromStr>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        variable,
        value: raw.to_owned(),
    })
}
