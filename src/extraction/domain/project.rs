//! Project listing records.

use super::ProjectId;
use serde::Deserialize;

/// One element of the project listing as returned upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    /// Upstream identifier.
    pub id: Option<u64>,
    /// Display name.
    pub name: Option<String>,
}

/// A project with a known identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
}

impl Project {
    /// Creates a project.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Promotes a listing record, returning `None` when it has no id.
    #[must_use]
    pub fn from_record(record: ProjectRecord) -> Option<Self> {
        let id = ProjectId::new(record.id?);
        Some(Self::new(id, record.name.unwrap_or_default()))
    }

    /// Project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Project display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Single-project document, fetched to locate the project's todoset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectDocument {
    /// Tools docked in the project.
    pub dock: Vec<DockEntry>,
}

/// One docked tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DockEntry {
    /// Tool identifier.
    pub id: Option<u64>,
    /// Tool kind, e.g. `todoset`.
    pub name: Option<String>,
}

impl ProjectDocument {
    /// Returns the id of the docked `todoset`, if any.
    #[must_use]
    pub fn todoset_id(&self) -> Option<u64> {
        self.dock
            .iter()
            .find(|entry| entry.name.as_deref() == Some("todoset"))
            .and_then(|entry| entry.id)
    }
}
