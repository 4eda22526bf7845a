//! Unit tests for report reconciliation.


use crate::extraction::domain::{GroupLabel, ItemId};
use crate::reconciliation::domain::Task;
use chrono::NaiveDate;

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid calendar date")
}

fn task(id: u64, week_label: &str) -> Task {
    Task::new(
        ItemId::new(id),
        format!("Task {id}"),
        week_label,
        GroupLabel::Root,
    )
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_owned()).collect()
}
