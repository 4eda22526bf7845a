//! Task selection rules for the per-period views.

use super::Task;
use crate::calendar::{MonthSheet, work_week_end};
use chrono::NaiveDate;

/// Tasks whose week falls in the month of `today`.
///
/// A completion date later than the Friday of the task's week is a
/// data-entry slip and is capped at that Friday.
#[must_use]
pub fn current_month_tasks(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let month = MonthSheet::of(today);
    tasks
        .iter()
        .filter_map(|task| {
            let week_start = task.week().date().filter(|date| month.contains(*date))?;
            Some(task.clone().with_completion_capped_at(work_week_end(week_start)))
        })
        .collect()
}

/// Tasks crawled from backlog lists.
#[must_use]
pub fn backlog_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_backlog()).collect()
}
