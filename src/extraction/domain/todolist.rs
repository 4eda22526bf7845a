//! Todo-lists and their groups.

use super::{GroupId, TodoListId};
use crate::calendar::ListDate;
use serde::Deserialize;

const BACKLOG_MARKER: &str = "BACKLOG";

/// One element of a todo-list listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodoListRecord {
    /// Upstream identifier.
    pub id: Option<u64>,
    /// List title, possibly embedding the week's date.
    pub title: Option<String>,
    /// Endpoint listing the list's root items.
    pub todos_url: Option<String>,
    /// Browser permalink.
    pub app_url: Option<String>,
}

/// A todo-list selected for crawling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: TodoListId,
    title: String,
    todos_url: Option<String>,
    app_url: String,
    date: ListDate,
}

impl TodoList {
    /// Creates a list; the embedded date is parsed from `title`.
    #[must_use]
    pub fn new(id: TodoListId, title: impl Into<String>) -> Self {
        let owned_title: String = title.into();
        Self {
            id,
            date: ListDate::from_title(&owned_title),
            title: owned_title,
            todos_url: None,
            app_url: String::new(),
        }
    }

    /// Sets the item listing endpoint.
    #[must_use]
    pub fn with_todos_url(mut self, url: impl Into<String>) -> Self {
        self.todos_url = Some(url.into());
        self
    }

    /// Sets the browser permalink.
    #[must_use]
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = url.into();
        self
    }

    /// Promotes a listing record, returning `None` when it has no id.
    #[must_use]
    pub fn from_record(record: TodoListRecord) -> Option<Self> {
        let mut list = Self::new(TodoListId::new(record.id?), record.title.unwrap_or_default());
        list.todos_url = record.todos_url.filter(|url| !url.is_empty());
        list.app_url = record.app_url.unwrap_or_default();
        Some(list)
    }

    /// List identifier.
    #[must_use]
    pub const fn id(&self) -> TodoListId {
        self.id
    }

    /// List title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Item listing endpoint, when the upstream record carried one.
    #[must_use]
    pub fn todos_url(&self) -> Option<&str> {
        self.todos_url.as_deref()
    }

    /// Browser permalink.
    #[must_use]
    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    /// Date embedded in the title.
    #[must_use]
    pub const fn date(&self) -> ListDate {
        self.date
    }

    /// Returns `true` for backlog lists.
    #[must_use]
    pub fn is_backlog(&self) -> bool {
        self.title.to_uppercase().contains(BACKLOG_MARKER)
    }
}

/// One element of a group listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupRecord {
    /// Upstream identifier.
    pub id: Option<u64>,
    /// Group title, usually naming the person responsible.
    pub title: Option<String>,
    /// Endpoint listing the group's items.
    pub todos_url: Option<String>,
}

/// A sub-partition of a todo-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    title: String,
    todos_url: String,
}

impl Group {
    /// Creates a group.
    #[must_use]
    pub fn new(id: GroupId, title: impl Into<String>, todos_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            todos_url: todos_url.into(),
        }
    }

    /// Promotes a listing record.
    ///
    /// Returns `None` without an id or an item listing endpoint, since such a
    /// group cannot be crawled.
    #[must_use]
    pub fn from_record(record: GroupRecord) -> Option<Self> {
        let id = GroupId::new(record.id?);
        let url = record.todos_url.filter(|url| !url.is_empty())?;
        Some(Self::new(id, record.title.unwrap_or_default(), url))
    }

    /// Group identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Group title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Item listing endpoint.
    #[must_use]
    pub fn todos_url(&self) -> &str {
        &self.todos_url
    }
}
