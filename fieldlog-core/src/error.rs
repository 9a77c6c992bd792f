//! Engine error type.
//!
//! Everything here is an invalid-input rejection: the engine never retries
//! and never silently defaults. Empty result sets are not errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("invalid location: {0:?} (expected home, offsite, or off-site)")]
    InvalidLocation(String),

    #[error("invalid hours value: {0:?}")]
    InvalidHours(String),

    #[error("invalid group-by dimension: {0:?} (expected subject, course, or month)")]
    InvalidGroupBy(String),

    #[error("invalid fiscal boundary: month {month}, day {day}")]
    InvalidFiscalBoundary { month: u32, day: u32 },

    #[error("transcript requires a student id")]
    MissingStudentId,

    #[error("credit scale must be a positive number up to 1000, got {0}")]
    InvalidScale(f64),
}
