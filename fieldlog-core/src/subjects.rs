//! Core-subject classification.
//!
//! The canonical subject set is configuration, defined once and threaded
//! through every call. The original admin app redefined this list inline in
//! half a dozen handlers with drifting contents; keeping it in one value is
//! the whole point of this module.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entry::Location;

/// Normalize a subject or location string for comparison: trim, collapse
/// internal whitespace, case-fold.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// The configured set of core subjects, matched case- and
/// whitespace-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CoreSubjectSet {
    names: Vec<String>,
    normalized: HashSet<String>,
}

impl CoreSubjectSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let normalized = names.iter().map(|n| normalize(n)).collect();
        Self { names, normalized }
    }

    /// Default set: the union of the subject lists used by Missouri-style
    /// hour reporting, with both Math/Mathematics and Social Studies/History
    /// spellings so either synonym classifies as core.
    pub fn missouri_default() -> Self {
        Self::new([
            "Reading",
            "Language Arts",
            "Math",
            "Mathematics",
            "Science",
            "Social Studies",
            "History",
        ])
    }

    /// The subject names as configured (display casing preserved).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `subject` is a core subject. Empty or unknown subjects are
    /// never core.
    pub fn is_core(&self, subject: &str) -> bool {
        let n = normalize(subject);
        !n.is_empty() && self.normalized.contains(&n)
    }

    /// Core subject logged at home.
    pub fn is_core_at_home(&self, subject: &str, location: Location) -> bool {
        self.is_core(subject) && location.is_home()
    }
}

impl From<Vec<String>> for CoreSubjectSet {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<CoreSubjectSet> for Vec<String> {
    fn from(set: CoreSubjectSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_core_case_and_whitespace_insensitive() {
        let set = CoreSubjectSet::new(["Math"]);
        assert!(set.is_core("math"));
        assert!(set.is_core("Math"));
        assert!(set.is_core(" Math "));
        assert!(set.is_core("MATH"));
        assert!(!set.is_core("Science"));
    }

    #[test]
    fn test_internal_whitespace_collapsed() {
        let set = CoreSubjectSet::new(["Language Arts"]);
        assert!(set.is_core("language  arts"));
        assert!(set.is_core("Language\tArts"));
    }

    #[test]
    fn test_empty_subject_never_core() {
        let set = CoreSubjectSet::missouri_default();
        assert!(!set.is_core(""));
        assert!(!set.is_core("   "));
    }

    #[test]
    fn test_missouri_default_synonyms() {
        let set = CoreSubjectSet::missouri_default();
        assert!(set.is_core("Math"));
        assert!(set.is_core("Mathematics"));
        assert!(set.is_core("History"));
        assert!(set.is_core("Social Studies"));
        assert!(!set.is_core("PE"));
        assert!(!set.is_core("Fine Arts"));
    }

    #[test]
    fn test_core_at_home_requires_both() {
        let set = CoreSubjectSet::missouri_default();
        assert!(set.is_core_at_home("Math", Location::Home));
        assert!(!set.is_core_at_home("Math", Location::OffSite));
        assert!(!set.is_core_at_home("PE", Location::Home));
    }

    #[test]
    fn test_toml_round_trip_as_name_list() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            core_subjects: CoreSubjectSet,
        }
        let w = Wrapper {
            core_subjects: CoreSubjectSet::new(["Math", "Science"]),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"core_subjects":["Math","Science"]}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert!(back.core_subjects.is_core("science"));
    }
}
