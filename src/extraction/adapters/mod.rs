//! Adapter implementations for extraction ports.

pub mod http;
pub mod memory;
