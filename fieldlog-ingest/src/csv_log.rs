//! Parse hour-log CSV exports into typed entries.
//!
//! Exports come from two generations of the tracker: the newer one writes an
//! `hours` column, the older one wrote `minutes`. Duration cells may also be
//! hand-edited (`90m`, `1.5h`). Rows that fail validation are skipped with a
//! warning rather than failing the whole file; these exports routinely carry
//! blank trailing rows and half-deleted lines.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

use fieldlog_core::{LogEntry, Location, ReportError};

use crate::{MAX_ENTRY_HOURS, MIN_ENTRY_HOURS};

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)\s*(?P<num>\d+(?:\.\d+)?)\s*(?P<unit>[hm])?\s*$").expect("valid regex")
});

/// Parse a duration cell into hours.
///
/// Accepts a plain decimal (hours), an `h` suffix, or an `m` suffix
/// (minutes): `1.5`, `1.5h`, and `90m` all mean an hour and a half.
pub fn parse_duration_hours(raw: &str) -> Result<f64, ReportError> {
    let caps = DURATION_RE
        .captures(raw)
        .ok_or_else(|| ReportError::InvalidHours(raw.to_string()))?;
    let num: f64 = caps["num"]
        .parse()
        .map_err(|_| ReportError::InvalidHours(raw.to_string()))?;

    match caps.name("unit").map(|m| m.as_str().to_lowercase()) {
        Some(u) if u == "m" => Ok(num / 60.0),
        _ => Ok(num),
    }
}

/// Column layout resolved from the header row. Header names are matched
/// case-insensitively with both snake_case and camelCase spellings.
struct Columns {
    student_id: usize,
    course_id: Option<usize>,
    course_title: Option<usize>,
    subject: usize,
    date: usize,
    hours: Option<usize>,
    minutes: Option<usize>,
    location: usize,
}

fn find_col(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        names.iter().any(|n| h == *n)
    })
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let required = |names: &[&str]| {
            find_col(headers, names)
                .with_context(|| format!("missing required column {:?}", names[0]))
        };
        let hours = find_col(headers, &["hours"]);
        let minutes = find_col(headers, &["minutes"]);
        if hours.is_none() && minutes.is_none() {
            bail!("log CSV needs an \"hours\" or \"minutes\" column");
        }
        Ok(Self {
            student_id: required(&["student_id", "studentid", "student"])?,
            course_id: find_col(headers, &["course_id", "courseid"]),
            course_title: find_col(headers, &["course_title", "coursetitle", "course"]),
            subject: required(&["subject", "category", "acellus_category"])?,
            date: required(&["date", "logged_on"])?,
            hours,
            minutes,
            location: required(&["location"])?,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ReportError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .map_err(|_| ReportError::InvalidDate(raw.to_string()))
}

fn get<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn opt_field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.map(|i| get(record, i))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn row_to_entry(record: &StringRecord, cols: &Columns) -> Result<LogEntry, ReportError> {
    let student_id = get(record, cols.student_id);
    if student_id.is_empty() {
        return Err(ReportError::MissingStudentId);
    }

    let date = parse_date(get(record, cols.date))?;
    let location: Location = get(record, cols.location).parse()?;

    // Prefer the hours column; fall back to legacy minutes.
    let hours = match (cols.hours.map(|i| get(record, i)), cols.minutes) {
        (Some(cell), _) if !cell.is_empty() => parse_duration_hours(cell)?,
        (_, Some(i)) => {
            let cell = get(record, i);
            let value = parse_duration_hours(cell)?;
            // Unit suffixes win; a bare number in a minutes column is minutes.
            if cell.to_lowercase().ends_with(['m', 'h']) {
                value
            } else {
                value / 60.0
            }
        }
        _ => return Err(ReportError::InvalidHours(String::new())),
    };
    if !(MIN_ENTRY_HOURS..=MAX_ENTRY_HOURS).contains(&hours) {
        return Err(ReportError::InvalidHours(format!("{hours}")));
    }

    let mut entry = LogEntry::new(
        student_id,
        get(record, cols.subject),
        date,
        hours,
        location,
    );
    entry.course_id = opt_field(record, cols.course_id);
    entry.course_title = opt_field(record, cols.course_title);
    Ok(entry)
}

/// Parse a log CSV, returning all valid entries. Blank rows and rows that
/// fail validation are skipped (with a warning per bad row).
pub fn parse_log_csv(path: impl AsRef<Path>) -> Result<Vec<LogEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let headers = rdr.headers().context("reading header row")?.clone();
    let cols = Columns::resolve(&headers)
        .with_context(|| format!("resolving columns in {}", path.as_ref().display()))?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match row_to_entry(&record, &cols) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                // Header is row 1.
                warn!(row = i + 2, error = %e, "skipping invalid log row");
                skipped += 1;
            }
        }
    }

    debug!(
        entries = entries.len(),
        skipped,
        path = %path.as_ref().display(),
        "parsed log CSV"
    );
    Ok(entries)
}
