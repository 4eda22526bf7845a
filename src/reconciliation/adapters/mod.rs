//! Adapter implementations for reconciliation ports.

pub mod google;
pub mod memory;
