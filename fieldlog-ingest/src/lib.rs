//! fieldlog-ingest: hour-log ingestion (CSV exports and JSON dumps).
//!
//! This crate is the engine's log-record collaborator: it owns write-side
//! validation (hours range, location vocabulary, date formats) and hands
//! fieldlog-core a clean `Vec<LogEntry>`.

pub mod csv_log;
pub mod json_log;

pub use csv_log::{parse_duration_hours, parse_log_csv};
pub use json_log::read_log_json;

/// Per-entry hour bounds enforced on read, matching the admin app's
/// write-side validation.
pub const MIN_ENTRY_HOURS: f64 = 0.25;
pub const MAX_ENTRY_HOURS: f64 = 24.0;
