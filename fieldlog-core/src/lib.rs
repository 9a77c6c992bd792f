//! fieldlog-core: annual-hours reporting and transcript-credit engine
//!
//! Pure computation over in-memory hour-log entries. Fetching entries from a
//! store, HTTP routing, and rendering all live outside this crate.

pub mod academic_year;
pub mod config;
pub mod entry;
pub mod error;
pub mod report;
pub mod subjects;
pub mod transcript;

pub use academic_year::FiscalBoundary;
pub use config::ReportConfig;
pub use entry::{LogEntry, Location, UNTITLED_COURSE};
pub use error::ReportError;
pub use report::{AnnualReport, BreakdownRow, GroupBy, ReportQuery, ReportTotals, build_annual_report};
pub use subjects::CoreSubjectSet;
pub use transcript::{TranscriptQuery, TranscriptRow, build_transcript};

/// Round an hour/credit figure to two decimal places for output.
/// Intermediate sums stay unrounded; only emitted figures pass through this.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
