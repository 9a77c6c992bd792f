//! Hour-log entry types shared across the fieldlog crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ReportError;

/// Group label used when a log entry has no course title.
pub const UNTITLED_COURSE: &str = "Untitled Course";

/// Where the hours were logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "off-site", alias = "offsite")]
    OffSite,
}

impl Location {
    pub fn is_home(&self) -> bool {
        matches!(self, Location::Home)
    }
}

impl FromStr for Location {
    type Err = ReportError;

    /// Accepts the vocabulary seen in real exports: `home`, `offsite`,
    /// `off-site`, any case, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Location::Home),
            "offsite" | "off-site" => Ok(Location::OffSite),
            _ => Err(ReportError::InvalidLocation(s.to_string())),
        }
    }
}

/// One hour-log record, as read from the log store.
///
/// The engine never mutates these; write-side validation (hours range,
/// no future dates) belongs to whatever produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub student_id: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
    pub subject: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub location: Location,
}

impl LogEntry {
    pub fn new(
        student_id: impl Into<String>,
        subject: impl Into<String>,
        date: NaiveDate,
        hours: f64,
        location: Location,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: None,
            course_title: None,
            subject: subject.into(),
            date,
            hours,
            location,
        }
    }

    pub fn with_course(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.course_id = Some(id.into());
        self.course_title = Some(title.into());
        self
    }

    /// Course title for grouping, falling back to the untitled sentinel.
    pub fn course_title_or_untitled(&self) -> &str {
        self.course_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_COURSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing_vocabulary() {
        assert_eq!("home".parse::<Location>().unwrap(), Location::Home);
        assert_eq!(" Home ".parse::<Location>().unwrap(), Location::Home);
        assert_eq!("offsite".parse::<Location>().unwrap(), Location::OffSite);
        assert_eq!("Off-Site".parse::<Location>().unwrap(), Location::OffSite);
        assert!("school".parse::<Location>().is_err());
    }

    #[test]
    fn test_entry_json_shape() {
        let e = LogEntry::new(
            "s1",
            "Math",
            NaiveDate::from_ymd_opt(2024, 8, 10).unwrap(),
            1.5,
            Location::Home,
        )
        .with_course("c1", "Algebra I");

        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["studentId"], "s1");
        assert_eq!(json["courseTitle"], "Algebra I");
        assert_eq!(json["date"], "2024-08-10");
        assert_eq!(json["location"], "home");
    }

    #[test]
    fn test_untitled_course_fallback() {
        let e = LogEntry::new(
            "s1",
            "PE",
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            1.0,
            Location::OffSite,
        );
        assert_eq!(e.course_title_or_untitled(), UNTITLED_COURSE);

        let titled = e.clone().with_course("c2", "Soccer");
        assert_eq!(titled.course_title_or_untitled(), "Soccer");

        let blank = LogEntry {
            course_title: Some("   ".to_string()),
            ..e
        };
        assert_eq!(blank.course_title_or_untitled(), UNTITLED_COURSE);
    }
}
