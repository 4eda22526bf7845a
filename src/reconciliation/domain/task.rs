//! Canonical task record.

use crate::calendar::ListDate;
use crate::extraction::domain::{GroupLabel, ItemId, ItemRecord};
use chrono::NaiveDate;
use std::fmt;

/// Reporting status derived from the raw status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Archived upstream.
    Archived,
    /// In the trash.
    Trashed,
    /// Checked off.
    Closed,
    /// Still open.
    Open,
}

impl TaskStatus {
    /// Derives the status; archived wins over trashed, which wins over
    /// completed.
    #[must_use]
    pub fn from_record(record: &ItemRecord) -> Self {
        if record.status.as_deref() == Some("archived") {
            Self::Archived
        } else if record.trashed.unwrap_or(false) {
            Self::Trashed
        } else if record.completed.unwrap_or(false) {
            Self::Closed
        } else {
            Self::Open
        }
    }

    /// Label written to worksheets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archived => "Arquivado",
            Self::Trashed => "Lixeira",
            Self::Closed => "Fechado",
            Self::Open => "Aberto",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, deduplicated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: ItemId,
    title: String,
    status: TaskStatus,
    created_on: Option<NaiveDate>,
    completed_on: Option<NaiveDate>,
    permalink: String,
    week_label: String,
    week: ListDate,
    group_label: GroupLabel,
    parent_list_url: String,
    owner: String,
}

impl Task {
    /// Creates an open task with the given week and group.
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        week_label: impl Into<String>,
        group_label: GroupLabel,
    ) -> Self {
        let week_text: String = week_label.into();
        Self {
            id,
            title: title.into(),
            status: TaskStatus::Open,
            created_on: None,
            completed_on: None,
            permalink: String::new(),
            week: ListDate::from_title(&week_text),
            week_label: week_text,
            group_label,
            parent_list_url: String::new(),
            owner: String::new(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation date.
    #[must_use]
    pub const fn with_created_on(mut self, date: Option<NaiveDate>) -> Self {
        self.created_on = date;
        self
    }

    /// Sets the completion date.
    #[must_use]
    pub const fn with_completed_on(mut self, date: Option<NaiveDate>) -> Self {
        self.completed_on = date;
        self
    }

    /// Sets the item permalink.
    #[must_use]
    pub fn with_permalink(mut self, url: impl Into<String>) -> Self {
        self.permalink = url.into();
        self
    }

    /// Sets the parent list permalink.
    #[must_use]
    pub fn with_parent_list_url(mut self, url: impl Into<String>) -> Self {
        self.parent_list_url = url.into();
        self
    }

    /// Sets the resolved owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Task key.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Reporting status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Creation date.
    #[must_use]
    pub const fn created_on(&self) -> Option<NaiveDate> {
        self.created_on
    }

    /// Completion date.
    #[must_use]
    pub const fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_on
    }

    /// Item permalink.
    #[must_use]
    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// Title of the list the task was found in.
    #[must_use]
    pub fn week_label(&self) -> &str {
        &self.week_label
    }

    /// Date embedded in the week label.
    #[must_use]
    pub const fn week(&self) -> ListDate {
        self.week
    }

    /// Group the task was found under.
    #[must_use]
    pub const fn group_label(&self) -> &GroupLabel {
        &self.group_label
    }

    /// Parent list permalink.
    #[must_use]
    pub fn parent_list_url(&self) -> &str {
        &self.parent_list_url
    }

    /// Resolved owner, empty when unresolved.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns `true` when the week label marks a backlog list.
    #[must_use]
    pub fn is_backlog(&self) -> bool {
        self.week_label.to_uppercase().contains("BACKLOG")
    }

    /// Caps the completion date at `limit`.
    #[must_use]
    pub fn with_completion_capped_at(mut self, limit: NaiveDate) -> Self {
        if self.completed_on.is_some_and(|completed| completed > limit) {
            self.completed_on = Some(limit);
        }
        self
    }
}
