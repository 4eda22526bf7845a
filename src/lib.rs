//! Tasksheet: weekly task reports from a project-management API.
//!
//! This crate crawls todo-lists from the upstream project-management API and
//! keeps a set of spreadsheet report views in step with them: the current
//! month, every task, the backlog, a cross-month consolidation and a daily
//! progress history.
//!
//! # Architecture
//!
//! Tasksheet follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP APIs, in-memory)
//!
//! # Modules
//!
//! - [`extraction`]: Paginated crawling of projects, lists, groups and items
//! - [`reconciliation`]: Canonical tasks and the spreadsheet views
//! - [`pipeline`]: One end-to-end run
//! - [`config`]: Run configuration
//! - [`calendar`]: Week and month conventions shared by both halves

pub mod calendar;
pub mod config;
pub mod extraction;
pub mod pipeline;
pub mod reconciliation;
