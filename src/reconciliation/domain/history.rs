//! Daily progress rows.

use super::{Row, Task};
use crate::calendar::{ListDate, format_day, week_start};
use chrono::NaiveDate;

/// Header of the history worksheet.
pub const HISTORY_HEADER: [&str; 3] = ["Data", "Total_Fechadas", "Total_Tarefas"];

/// Progress of the current work week, keyed by the day it was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRow {
    date: NaiveDate,
    closed: usize,
    total: usize,
}

impl HistoryRow {
    /// Creates a row.
    #[must_use]
    pub const fn new(date: NaiveDate, closed: usize, total: usize) -> Self {
        Self {
            date,
            closed,
            total,
        }
    }

    /// Counts the tasks of the week containing `today`.
    ///
    /// Only tasks whose list is dated on that week's Monday are counted; a
    /// task is closed when it has a completion date.
    #[must_use]
    pub fn measure(tasks: &[Task], today: NaiveDate) -> Self {
        let monday = ListDate::Dated(week_start(today));
        let (closed, total) = tasks
            .iter()
            .filter(|task| task.week() == monday)
            .fold((0, 0), |(done, seen), task| {
                (done + usize::from(task.completed_on().is_some()), seen + 1)
            });
        Self::new(today, closed, total)
    }

    /// Day the row describes.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Closed tasks.
    #[must_use]
    pub const fn closed(&self) -> usize {
        self.closed
    }

    /// All tasks.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Key cell, `dd/mm/yyyy`.
    #[must_use]
    pub fn key(&self) -> String {
        format_day(self.date)
    }

    /// Worksheet rendering.
    #[must_use]
    pub fn to_row(&self) -> Row {
        vec![self.key(), self.closed.to_string(), self.total.to_string()]
    }

    /// 1-based worksheet row already holding this day, skipping the header.
    #[must_use]
    pub fn locate(&self, rows: &[Row]) -> Option<usize> {
        let key = self.key();
        rows.iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|cell| cell.trim() == key))
            .map(|(index, _)| index + 1)
    }
}

/// Header row of the history worksheet.
#[must_use]
pub fn history_header() -> Row {
    HISTORY_HEADER.iter().map(|title| (*title).to_owned()).collect()
}
