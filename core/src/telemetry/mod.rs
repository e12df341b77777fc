//! telemetry/mod.rs
//! Decode summaries: per-variant counters over a container.

pub mod counters;

pub use counters::*;
