//! Reconciliation services: writing the destination views.

mod engine;

pub use engine::{
    ReconciliationEngine, ReconciliationReport, View, ViewError, ViewOutcome, ViewReport,
};
