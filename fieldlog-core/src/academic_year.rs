//! Academic-year classification.
//!
//! An academic year runs from the fiscal start date of calendar year Y
//! through the day before the fiscal start of Y+1, and is labeled Y.
//! The boundary is inclusive on the start side: July 1, 2024 belongs to
//! academic year 2024 under the default boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Month/day pair marking the first day of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalBoundary {
    pub month: u32,
    pub day: u32,
}

impl Default for FiscalBoundary {
    fn default() -> Self {
        Self { month: 7, day: 1 }
    }
}

impl FiscalBoundary {
    /// Build a validated boundary. The month/day pair must name a real
    /// calendar date (leap-year Feb 29 is accepted).
    pub fn new(month: u32, day: u32) -> Result<Self, ReportError> {
        // 2000 is a leap year, so every representable month/day passes.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(ReportError::InvalidFiscalBoundary { month, day });
        }
        Ok(Self { month, day })
    }

    /// Label the academic year containing `date`.
    ///
    /// Total over all valid dates and pure: on or after the boundary the
    /// label is the calendar year, before it the previous year.
    pub fn academic_year(&self, date: NaiveDate) -> i32 {
        if (date.month(), date.day()) >= (self.month, self.day) {
            date.year()
        } else {
            date.year() - 1
        }
    }
}
