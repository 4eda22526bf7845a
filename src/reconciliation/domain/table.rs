//! Worksheet layout for task views.

use super::Task;
use crate::calendar::format_day;

/// One worksheet row.
pub type Row = Vec<String>;

/// Column titles of every task view, in order.
pub const TASK_COLUMNS: [&str; 10] = [
    "ID",
    "Status",
    "Atividades Semanal",
    "Sub-Lista / Grupo",
    "Nome Task",
    "Encarregado",
    "Data Inicial",
    "Data Final",
    "Link",
    "Link Lista",
];

/// Column holding the completion date.
pub const COMPLETION_COLUMN: &str = "Data Final";

/// Column appended by the consolidation view.
pub const ORIGIN_COLUMN: &str = "Origem_Aba";

/// Header row of task views.
#[must_use]
pub fn task_header() -> Row {
    TASK_COLUMNS.iter().map(|title| (*title).to_owned()).collect()
}

/// Renders one task in [`TASK_COLUMNS`] order.
#[must_use]
pub fn task_row(task: &Task) -> Row {
    vec![
        task.id().to_string(),
        task.status().as_str().to_owned(),
        task.week_label().to_owned(),
        task.group_label().as_str().to_owned(),
        task.title().to_owned(),
        task.owner().to_owned(),
        task.created_on().map(format_day).unwrap_or_default(),
        task.completed_on().map(format_day).unwrap_or_default(),
        task.permalink().to_owned(),
        task.parent_list_url().to_owned(),
    ]
}

/// Header followed by one row per task.
#[must_use]
pub fn task_table<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Row> {
    std::iter::once(task_header())
        .chain(tasks.into_iter().map(task_row))
        .collect()
}
