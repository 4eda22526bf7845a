//! Step definitions for daily history scenarios.

pub mod then;
pub mod when;
pub mod world;
