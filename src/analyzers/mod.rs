//! Flight classification, aggregation and report assembly.
//!
//! Raw records are normalised elsewhere; this module turns canonical
//! flights into per-hour, per-terminal and per-status summaries.

pub mod aggregate;
pub mod analyzer;
pub mod status;
pub mod types;
pub mod utility;
