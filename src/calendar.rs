//! Calendar helpers shared by the crawler and the reconciliation views.
//!
//! Weekly todo-lists embed the Monday of their work week in the title
//! (`ATIVIDADES DA SEMANA 06/01/2025`), and monthly report worksheets are
//! titled with a Portuguese month name and a year (`Janeiro 2025`). Both
//! conventions are parsed here so the two halves of the pipeline agree.

use chrono::{Datelike, Days, NaiveDate};
use regex_lite::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Portuguese month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Format used for every date written to a worksheet.
pub const DAY_FORMAT: &str = "%d/%m/%Y";

static LIST_DATE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").ok());

/// Calendar date embedded in a todo-list title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListDate {
    /// The title carries a valid `D/M/YYYY` date.
    Dated(NaiveDate),
    /// No date, or a match that is not a real calendar day.
    Undated,
}

impl ListDate {
    /// Extracts the first day-first `D/M/YYYY` date found in `title`.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let Some(pattern) = LIST_DATE_PATTERN.as_ref() else {
            return Self::Undated;
        };
        pattern
            .captures(title)
            .and_then(|caps| {
                let day = caps.get(1)?.as_str().parse().ok()?;
                let month = caps.get(2)?.as_str().parse().ok()?;
                let year = caps.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })
            .map_or(Self::Undated, Self::Dated)
    }

    /// Returns the embedded date, if any.
    #[must_use]
    pub const fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Dated(date) => Some(date),
            Self::Undated => None,
        }
    }

    /// Most-recent-first ordering used to rank weekly lists.
    ///
    /// Undated lists rank after every dated list. Two undated lists compare
    /// equal, so a stable sort keeps their upstream order.
    #[must_use]
    pub fn recency_order(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Dated(left), Self::Dated(right)) => right.cmp(&left),
            (Self::Dated(_), Self::Undated) => Ordering::Less,
            (Self::Undated, Self::Dated(_)) => Ordering::Greater,
            (Self::Undated, Self::Undated) => Ordering::Equal,
        }
    }
}

/// A month/year pair addressed by a `"<Mês> <Ano>"` worksheet title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthSheet {
    month: u32,
    year: i32,
}

impl MonthSheet {
    /// Returns the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// Parses a worksheet title such as `Março 2025` or `MARÇO 2025`.
    ///
    /// The title must contain exactly two whitespace-separated tokens; the
    /// month token is compared after capitalisation and the year token must be
    /// all ASCII digits.
    #[must_use]
    pub fn parse(title: &str) -> Option<Self> {
        let mut tokens = title.split_whitespace();
        let month_token = tokens.next()?;
        let year_token = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        if year_token.is_empty() || !year_token.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        let wanted = capitalise(month_token);
        let month_index = MONTH_NAMES.iter().position(|name| *name == wanted)?;
        let month = u32::try_from(month_index).ok()? + 1;
        let year = year_token.parse().ok()?;
        Some(Self { month, year })
    }

    /// Month number, 1 to 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns `true` when `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// Worksheet title for this month, e.g. `Janeiro 2025`.
    #[must_use]
    pub fn title(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = usize::try_from(self.month)
            .ok()
            .and_then(|month| month.checked_sub(1))
            .and_then(|index| MONTH_NAMES.get(index))
            .copied()
            .unwrap_or_default();
        write!(f, "{name} {}", self.year)
    }
}

fn capitalise(token: &str) -> String {
    let mut chars = token.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Renders a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parses a worksheet date cell.
///
/// Accepts day-first `d/m/yyyy` and ISO `yyyy-mm-dd`. Blank cells and the
/// placeholders spreadsheets tend to leave behind (`0`, `#N/A`, `None`) yield
/// `None`.
#[must_use]
pub fn parse_day(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if matches!(trimmed, "" | "0" | "nan" | "None" | "NaT" | "#N/A") {
        return None;
    }
    let mut parts = trimmed.split('/');
    if let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    {
        return NaiveDate::from_ymd_opt(
            year.trim().parse().ok()?,
            month.trim().parse().ok()?,
            day.trim().parse().ok()?,
        );
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Monday of the calendar week containing `today`.
#[must_use]
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_monday());
    today.checked_sub_days(Days::new(offset)).unwrap_or(today)
}

/// Last working day of a week that starts on `start` (start + 4 days).
#[must_use]
pub fn work_week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(4)).unwrap_or(start)
}
