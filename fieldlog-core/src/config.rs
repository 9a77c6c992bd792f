//! Engine configuration.
//!
//! Loaded once at startup and passed explicitly into every engine call; the
//! classifiers never read ambient state.

use serde::{Deserialize, Serialize};

use crate::academic_year::FiscalBoundary;
use crate::subjects::CoreSubjectSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Canonical core-subject names.
    #[serde(default = "CoreSubjectSet::missouri_default")]
    pub core_subjects: CoreSubjectSet,

    /// Hours per transcript credit when the caller does not supply a scale.
    #[serde(default = "default_credit_scale")]
    pub default_credit_scale: f64,

    /// First day of the academic year.
    /// Kept last so the TOML serializer emits scalars before this table.
    #[serde(default)]
    pub fiscal_boundary: FiscalBoundary,
}

fn default_credit_scale() -> f64 {
    120.0
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            core_subjects: CoreSubjectSet::missouri_default(),
            default_credit_scale: default_credit_scale(),
            fiscal_boundary: FiscalBoundary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ReportConfig::default();
        assert_eq!(cfg.fiscal_boundary, FiscalBoundary { month: 7, day: 1 });
        assert_eq!(cfg.default_credit_scale, 120.0);
        assert!(cfg.core_subjects.is_core("Reading"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: ReportConfig =
            serde_json::from_str(r#"{"core_subjects":["Math"]}"#).unwrap();
        assert!(cfg.core_subjects.is_core("math"));
        assert!(!cfg.core_subjects.is_core("History"));
        assert_eq!(cfg.fiscal_boundary.month, 7);
        assert_eq!(cfg.default_credit_scale, 120.0);
    }
}
