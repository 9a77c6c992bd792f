//! Transcript credit conversion.
//!
//! Hours grouped by (academic year, course title, subject) for a single
//! student, converted to credits under an hours-per-credit scale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ReportConfig;
use crate::entry::LogEntry;
use crate::error::ReportError;
use crate::round2;

/// Upper bound on the hours-per-credit scale, carried over from the admin
/// app's request validation.
const MAX_CREDIT_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptQuery {
    pub student_id: String,
    /// Restrict to these academic years; `None` means all.
    pub academic_years: Option<Vec<i32>>,
    /// Hours per credit; falls back to the configured default.
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRow {
    pub student_id: String,
    pub academic_year: i32,
    pub course_title: String,
    pub subject: String,
    pub hours_total: f64,
    pub credits_at_scale: f64,
}

/// Build transcript rows for one student.
///
/// Rows are ordered by academic year, then course title, then subject, so
/// regenerating a transcript over the same entries is byte-for-byte stable.
/// A missing student id or a non-positive/non-finite scale is rejected;
/// a student with no matching entries yields an empty list.
pub fn build_transcript(
    entries: &[LogEntry],
    query: &TranscriptQuery,
    config: &ReportConfig,
) -> Result<Vec<TranscriptRow>, ReportError> {
    let student_id = query.student_id.trim();
    if student_id.is_empty() {
        return Err(ReportError::MissingStudentId);
    }

    let scale = query.scale.unwrap_or(config.default_credit_scale);
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_CREDIT_SCALE {
        return Err(ReportError::InvalidScale(scale));
    }

    // BTreeMap keys give the required (year, course, subject) ordering.
    let mut groups: BTreeMap<(i32, String, String), f64> = BTreeMap::new();

    for entry in entries {
        if entry.student_id != student_id {
            continue;
        }
        let year = config.fiscal_boundary.academic_year(entry.date);
        if let Some(years) = &query.academic_years {
            if !years.contains(&year) {
                continue;
            }
        }
        let key = (
            year,
            entry.course_title_or_untitled().to_string(),
            entry.subject.clone(),
        );
        *groups.entry(key).or_default() += entry.hours;
    }

    Ok(groups
        .into_iter()
        .map(|((academic_year, course_title, subject), hours)| TranscriptRow {
            student_id: student_id.to_string(),
            academic_year,
            course_title,
            subject,
            hours_total: round2(hours),
            credits_at_scale: round2(hours / scale),
        })
        .collect())
}
