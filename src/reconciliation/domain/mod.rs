//! Domain model for report reconciliation.
//!
//! Turns tagged crawl output into canonical [`Task`] records and defines the
//! pure rules behind every destination view: which tasks a view holds, how
//! dates are corrected, how rows are laid out, and how the daily history row
//! is keyed.

mod assignee;
mod consolidation;
mod history;
mod normalize;
mod table;
mod task;
mod views;

pub use assignee::{AssigneeResolver, Roster, normalize_name};
pub use consolidation::{MonthTab, consolidate};
pub use history::{HISTORY_HEADER, HistoryRow, history_header};
pub use normalize::{canonicalize, dedup_by_id, normalize};
pub use table::{
    COMPLETION_COLUMN, ORIGIN_COLUMN, Row, TASK_COLUMNS, task_header, task_row, task_table,
};
pub use task::{Task, TaskStatus};
pub use views::{backlog_tasks, current_month_tasks};
