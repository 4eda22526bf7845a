//! Owner resolution by fuzzy name match against the team roster.
//!
//! Group titles name the person responsible, loosely: `Atividades João
//! Silva`, `JOAO SILVEIRA`, `Maria`. Both sides are normalized (diacritics
//! stripped, upper-cased, trimmed) and compared on the given name exactly and
//! on the first four characters of the surname.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const LABEL_NOISE: &str = "ATIVIDADES";
const SURNAME_PREFIX: usize = 4;

/// Strips diacritics, upper-cases and trims.
#[must_use]
pub fn normalize_name(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_uppercase()
        .trim()
        .to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RosterEntry {
    full_name: String,
    given: String,
    surname: Option<String>,
}

impl RosterEntry {
    fn new(full_name: &str) -> Self {
        let normalized = normalize_name(full_name);
        let mut tokens = normalized.split_whitespace();
        Self {
            full_name: full_name.to_owned(),
            given: tokens.next().unwrap_or_default().to_owned(),
            surname: tokens.next().map(str::to_owned),
        }
    }
}

/// Authoritative list of team members, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Builds a roster from full names; blank names are ignored.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: names
                .into_iter()
                .filter(|name| !name.as_ref().trim().is_empty())
                .map(|name| RosterEntry::new(name.as_ref()))
                .collect(),
        }
    }

    /// Reads the roster from worksheet rows.
    ///
    /// The first row is the header; names come from the column titled
    /// `column`. Returns `None` when the sheet is empty or lacks the column.
    #[must_use]
    pub fn from_rows(rows: &[Vec<String>], column: &str) -> Option<Self> {
        let (header, body) = rows.split_first()?;
        let index = header.iter().position(|title| title.trim() == column)?;
        Some(Self::new(body.iter().filter_map(|row| row.get(index))))
    }

    /// Number of roster entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the roster has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves group labels to roster names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeResolver {
    roster: Roster,
}

impl AssigneeResolver {
    /// Creates a resolver over `roster`.
    #[must_use]
    pub const fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Returns the first matching roster name, or an empty string.
    #[must_use]
    pub fn resolve(&self, group_label: &str) -> String {
        let normalized = normalize_name(group_label);
        let cleaned = normalized.replace(LABEL_NOISE, "");
        let mut tokens = cleaned.split_whitespace();
        let Some(given_query) = tokens.next() else {
            return String::new();
        };
        let surname_query = tokens.next();

        self.roster
            .entries
            .iter()
            .find(|entry| {
                entry.given == given_query
                    && surname_query.is_none_or(|query| {
                        entry
                            .surname
                            .as_deref()
                            .is_some_and(|surname| same_prefix(surname, query))
                    })
            })
            .map(|entry| entry.full_name.clone())
            .unwrap_or_default()
    }
}

fn same_prefix(left: &str, right: &str) -> bool {
    left.chars()
        .take(SURNAME_PREFIX)
        .eq(right.chars().take(SURNAME_PREFIX))
}
