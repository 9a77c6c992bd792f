//! Annual-hours aggregation.
//!
//! One canonical implementation of the filter/classify/bucket pipeline; the
//! totals path and the per-group breakdown path share the same classifier
//! calls so they cannot drift apart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::config::ReportConfig;
use crate::entry::LogEntry;
use crate::error::ReportError;
use crate::round2;

/// Breakdown dimension for the annual report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Subject,
    Course,
    Month,
}

impl FromStr for GroupBy {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "subject" => Ok(GroupBy::Subject),
            "course" => Ok(GroupBy::Course),
            "month" => Ok(GroupBy::Month),
            _ => Err(ReportError::InvalidGroupBy(s.to_string())),
        }
    }
}

/// Filters and breakdown dimension for one report request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    /// Restrict to one student; `None` means all students.
    pub student_id: Option<String>,
    /// Restrict to one academic year (fiscal-boundary labeled).
    pub academic_year: Option<i32>,
    pub group_by: GroupBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_hours: f64,
    pub core_hours: f64,
    pub core_at_home_hours: f64,
    pub non_core_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub group: String,
    pub total: f64,
    pub core: f64,
    pub core_home: f64,
    pub non_core: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualReport {
    pub totals: ReportTotals,
    pub breakdown: Vec<BreakdownRow>,
}

#[derive(Default)]
struct Bucket {
    total: f64,
    core: f64,
    core_home: f64,
}

impl Bucket {
    fn add(&mut self, entry: &LogEntry, config: &ReportConfig) {
        self.total += entry.hours;
        if config.core_subjects.is_core(&entry.subject) {
            self.core += entry.hours;
        }
        if config
            .core_subjects
            .is_core_at_home(&entry.subject, entry.location)
        {
            self.core_home += entry.hours;
        }
    }
}

fn group_key(entry: &LogEntry, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Subject => entry.subject.clone(),
        GroupBy::Course => entry.course_title_or_untitled().to_string(),
        GroupBy::Month => entry.date.format("%b").to_string(),
    }
}

/// Build the annual hours report over `entries`.
///
/// Entries are re-filtered here regardless of what the caller already
/// filtered, so an over- or under-filtering data source cannot change the
/// result. Empty input after filtering yields zero totals and an empty
/// breakdown, not an error. Breakdown rows appear in first-seen order of
/// the group key; all emitted figures are rounded to two decimals, with
/// `nonCore = max(0, total - core)` computed on the rounded values.
pub fn build_annual_report(
    entries: &[LogEntry],
    query: &ReportQuery,
    config: &ReportConfig,
) -> AnnualReport {
    let filtered = entries.iter().filter(|e| {
        query
            .student_id
            .as_ref()
            .is_none_or(|id| &e.student_id == id)
            && query
                .academic_year
                .is_none_or(|y| config.fiscal_boundary.academic_year(e.date) == y)
    });

    let mut totals = Bucket::default();
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Bucket> = HashMap::new();

    for entry in filtered {
        totals.add(entry, config);

        let key = group_key(entry, query.group_by);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().add(entry, config);
    }

    let breakdown = order
        .into_iter()
        .map(|key| {
            let b = &groups[&key];
            let total = round2(b.total);
            let core = round2(b.core);
            BreakdownRow {
                group: key,
                total,
                core,
                core_home: round2(b.core_home),
                non_core: round2((total - core).max(0.0)),
            }
        })
        .collect();

    let total_hours = round2(totals.total);
    let core_hours = round2(totals.core);
    AnnualReport {
        totals: ReportTotals {
            total_hours,
            core_hours,
            core_at_home_hours: round2(totals.core_home),
            non_core_hours: round2((total_hours - core_hours).max(0.0)),
        },
        breakdown,
    }
}
