//! Cross-month consolidation of monthly worksheets.

use super::{COMPLETION_COLUMN, ORIGIN_COLUMN, Row};
use crate::calendar::{MonthSheet, parse_day};

/// Contents of one `"<Mês> <Ano>"` worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTab {
    /// Worksheet title.
    pub title: String,
    /// Month the title names.
    pub month: MonthSheet,
    /// Rows, header first.
    pub rows: Vec<Row>,
}

struct KeptRow<'a> {
    header: &'a [String],
    cells: &'a Row,
    origin: &'a str,
}

/// Concatenates the rows of every tab that belong to the tab's own month.
///
/// A row is kept when its completion date falls in the tab's month or is
/// blank or unreadable. Tabs without a completion column contribute nothing.
/// Headers are unioned in first-seen order, rows are aligned by column title
/// and an origin column naming the source tab is appended. Returns an empty
/// table when no row was kept.
#[must_use]
pub fn consolidate(tabs: &[MonthTab]) -> Vec<Row> {
    let mut kept: Vec<KeptRow<'_>> = Vec::new();
    let mut columns: Vec<String> = Vec::new();

    for tab in tabs {
        let Some((header, body)) = tab.rows.split_first() else {
            continue;
        };
        let Some(completion) = header.iter().position(|title| title == COMPLETION_COLUMN) else {
            continue;
        };
        let before = kept.len();
        kept.extend(
            body.iter()
                .filter(|row| {
                    row.get(completion)
                        .and_then(|cell| parse_day(cell))
                        .is_none_or(|date| tab.month.contains(date))
                })
                .map(|cells| KeptRow {
                    header,
                    cells,
                    origin: &tab.title,
                }),
        );
        if kept.len() > before {
            for title in header {
                if !columns.contains(title) {
                    columns.push(title.clone());
                }
            }
        }
    }

    if kept.is_empty() {
        return Vec::new();
    }

    let mut header = columns.clone();
    header.push(ORIGIN_COLUMN.to_owned());
    std::iter::once(header)
        .chain(kept.iter().map(|row| align(row, &columns)))
        .collect()
}

fn align(row: &KeptRow<'_>, columns: &[String]) -> Row {
    columns
        .iter()
        .map(|column| {
            row.header
                .iter()
                .position(|title| title == column)
                .and_then(|index| row.cells.get(index))
                .cloned()
                .unwrap_or_default()
        })
        .chain(std::iter::once(row.origin.to_owned()))
        .collect()
}
